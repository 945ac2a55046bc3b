//! Schema snapshots: one directive's rule table and field set at one version.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::errors::{ErrorKind, ParseError, SchemaError};
use crate::parser::parse_args;
use crate::record::Record;
use crate::rule::Emission;
use crate::table::OptionTable;
use crate::value::Value;
use crate::version::Version;

/// A bare argument a directive takes, e.g. a partition's mount point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionalField {
    /// The record field it is stored in
    pub field: &'static str,
    /// What it means, for diagnostics
    pub what: &'static str,
}

/// One field of a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field name
    pub name: &'static str,
    /// Value before parsing
    pub default: Value,
}

/// Everything known about one directive at one version.
///
/// The field set is the positional fields followed by the destination
/// field of every active, non-deprecated rule.  Fields whose only
/// writer was removed are remembered so that accessing them fails with
/// the removing version rather than as an unknown name.
#[derive(Debug)]
pub struct Schema {
    keyword: &'static str,
    version: Version,
    positionals: &'static [PositionalField],
    table: OptionTable,
    fields: Vec<FieldDecl>,
    removed_fields: BTreeMap<&'static str, Version>,
}

impl Schema {
    pub(crate) fn new(
        keyword: &'static str,
        version: Version,
        positionals: &'static [PositionalField],
        table: OptionTable,
    ) -> Result<Self, SchemaError> {
        let mut fields: Vec<FieldDecl> = positionals
            .iter()
            .map(|p| FieldDecl {
                name: p.field,
                default: Value::Str(String::new()),
            })
            .collect();
        for rule in table.rules().filter(|r| !r.is_deprecated()) {
            match fields.iter().find(|f| f.name == rule.dest_field()) {
                Some(existing) if !existing.default.same_kind(&rule.kind().unset()) => {
                    return Err(SchemaError::FieldKindConflict {
                        field: rule.dest_field(),
                    });
                }
                Some(_) => {}
                None => fields.push(FieldDecl {
                    name: rule.dest_field(),
                    default: rule.initial_value(),
                }),
            }
        }
        for rule in table.rules() {
            if let Emission::Governed(field) = rule.emission() {
                let ok = fields
                    .iter()
                    .any(|f| f.name == field && matches!(f.default, Value::Bool(_)));
                if !ok {
                    return Err(SchemaError::BadGovernor {
                        name: rule.name(),
                        field,
                    });
                }
            }
        }
        let removed_fields = table
            .removed()
            .filter(|(_, r)| !fields.iter().any(|f| f.name == r.dest))
            .map(|(_, r)| (r.dest, r.version))
            .collect();
        Ok(Self {
            keyword,
            version,
            positionals,
            table,
            fields,
            removed_fields,
        })
    }

    /// The canonical directive keyword.
    pub fn keyword(&self) -> &'static str {
        self.keyword
    }

    /// The version of the revision this snapshot was built from.
    pub fn version(&self) -> Version {
        self.version
    }

    /// The positional arguments the directive takes.
    pub fn positionals(&self) -> &'static [PositionalField] {
        self.positionals
    }

    /// The option rule table.
    pub fn table(&self) -> &OptionTable {
        &self.table
    }

    /// All fields in record order.
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    /// Position of a field, if active.
    pub(crate) fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// If the field was removed, the version that removed it.
    pub fn removed_in(&self, field: &str) -> Option<Version> {
        self.removed_fields.get(field).copied()
    }

    /// Parse one directive occurrence into a record.
    ///
    /// `keyword` is the keyword as written, used only for diagnostics.
    pub fn parse<S: AsRef<str>>(
        self: &Arc<Self>,
        keyword: &str,
        args: &[S],
        lineno: usize,
    ) -> Result<Record, ParseError> {
        let parsed = parse_args(&self.table, keyword, args, lineno)?;
        if parsed.positionals.len() != self.positionals.len() {
            let what = self.positionals.first().map_or("none", |p| p.what);
            return Err(ParseError::new(
                lineno,
                keyword,
                ErrorKind::PositionalArity {
                    expected: self.positionals.len(),
                    found: parsed.positionals.len(),
                    what,
                },
            ));
        }
        let mut record = Record::new(Arc::clone(self));
        for (decl, value) in self.positionals.iter().zip(parsed.positionals) {
            record.put(decl.field, Value::Str(value));
        }
        for (field, value) in parsed.values {
            record.put(field, value);
        }
        tracing::debug!(
            "line {lineno}: parsed {} ({})",
            self.keyword,
            self.version
        );
        Ok(record)
    }
}
