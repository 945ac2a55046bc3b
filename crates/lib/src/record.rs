//! Directive records and directive lists.

use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::errors::RecordError;
use crate::render;
use crate::schema::Schema;
use crate::value::Value;

/// One parsed directive occurrence.
///
/// A record holds exactly the fields its schema declares, each starting
/// at its default.  Fields are read and written by name; names that were
/// removed by the record's version fail with [`RecordError::RemovedField`].
///
/// Once pushed onto a [`DirectiveList`] a record is only reachable
/// through shared references and therefore frozen.
#[derive(Clone, Debug)]
pub struct Record {
    schema: Arc<Schema>,
    values: Vec<Value>,
}

impl Record {
    /// A record with every field at its default.
    pub fn new(schema: Arc<Schema>) -> Self {
        let values = schema.fields().iter().map(|f| f.default.clone()).collect();
        Self { schema, values }
    }

    /// The schema this record was built from.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// The directive keyword.
    pub fn keyword(&self) -> &'static str {
        self.schema.keyword()
    }

    fn index(&self, field: &str) -> Result<usize, RecordError> {
        if let Some(idx) = self.schema.field_index(field) {
            return Ok(idx);
        }
        let keyword = self.schema.keyword();
        let field = field.to_owned();
        Err(match self.schema.removed_in(&field) {
            Some(removed_in) => RecordError::RemovedField {
                keyword,
                field,
                removed_in,
            },
            None => RecordError::UnknownField { keyword, field },
        })
    }

    /// Read a field.
    pub fn get(&self, field: &str) -> Result<&Value, RecordError> {
        self.index(field).map(|i| &self.values[i])
    }

    /// Write a field.  The value must be of the field's kind.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<(), RecordError> {
        let value = value.into();
        let idx = self.index(field)?;
        let current = &self.values[idx];
        if !current.same_kind(&value) {
            return Err(RecordError::KindMismatch {
                field: field.to_owned(),
                expected: current.kind_name(),
                found: value.kind_name(),
            });
        }
        self.values[idx] = value;
        Ok(())
    }

    /// Write a value produced by the parser, which is already kind-checked
    /// against the same schema.
    pub(crate) fn put(&mut self, field: &str, value: Value) {
        if let Some(idx) = self.schema.field_index(field) {
            self.values[idx] = value;
        }
    }

    fn mismatch(&self, field: &str, expected: &'static str) -> RecordError {
        RecordError::KindMismatch {
            field: field.to_owned(),
            expected,
            found: self
                .get(field)
                .map(Value::kind_name)
                .unwrap_or("missing"),
        }
    }

    /// Read a boolean field.
    pub fn get_bool(&self, field: &str) -> Result<bool, RecordError> {
        match self.get(field)? {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.mismatch(field, "boolean")),
        }
    }

    /// Read an integer field.
    pub fn get_int(&self, field: &str) -> Result<i64, RecordError> {
        match self.get(field)? {
            Value::Int(n) => Ok(*n),
            _ => Err(self.mismatch(field, "integer")),
        }
    }

    /// Read a string field.
    pub fn get_str(&self, field: &str) -> Result<&str, RecordError> {
        match self.get(field)? {
            Value::Str(s) => Ok(s),
            _ => Err(self.mismatch(field, "string")),
        }
    }

    /// Read a list field.
    pub fn get_list(&self, field: &str) -> Result<&[String], RecordError> {
        match self.get(field)? {
            Value::List(l) => Ok(l),
            _ => Err(self.mismatch(field, "list")),
        }
    }

    /// Fields and their values in schema order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.schema
            .fields()
            .iter()
            .map(|f| f.name)
            .zip(self.values.iter())
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.schema.keyword() == other.schema.keyword()
            && self.schema.version() == other.schema.version()
            && self.values == other.values
    }
}

impl Eq for Record {}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&render::render(self))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 2))?;
        map.serialize_entry("directive", self.keyword())?;
        map.serialize_entry("version", &self.schema.version())?;
        for (name, value) in self.fields() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// The records of one directive family, in file order.
#[derive(Clone, Debug)]
pub struct DirectiveList {
    header: &'static str,
    records: Vec<Record>,
}

impl DirectiveList {
    /// An empty list rendered under the given header comment.
    pub fn new(header: &'static str) -> Self {
        Self {
            header,
            records: Vec::new(),
        }
    }

    /// Append a record; from here on it is read-only.
    pub fn push(&mut self, record: Record) -> &Record {
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// The records in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render the list: empty for no records, otherwise the header line
    /// followed by one line per record.
    pub fn render(&self) -> String {
        if self.records.is_empty() {
            return String::new();
        }
        let mut out = format!("{}\n", self.header);
        for record in &self.records {
            out.push_str(&render::render(record));
            out.push('\n');
        }
        out
    }
}

impl<'a> IntoIterator for &'a DirectiveList {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for DirectiveList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.records.iter())
    }
}
