//! The document-level dispatcher.
//!
//! A [`Handler`] is bound to one kickstart version.  It routes each
//! directive line to its family's schema, keeps one [`DirectiveList`]
//! per family, and renders the whole document with families ordered by
//! their write priority.

use std::sync::Arc;

use ksdirective_args::line::{directive_lines, DirectiveLine};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::commands::{Catalog, Family};
use crate::errors::{ErrorKind, ParseError, SchemaError};
use crate::record::{DirectiveList, Record};
use crate::schema::Schema;
use crate::version::Version;

/// Parses directives for one version and accumulates the results.
#[derive(Debug)]
pub struct Handler {
    version: Version,
    catalog: Arc<Catalog>,
    partition: DirectiveList,
    user: DirectiveList,
}

impl Handler {
    /// A handler with a freshly built catalog.
    pub fn new(version: Version) -> Result<Self, SchemaError> {
        Ok(Self::with_catalog(Arc::new(Catalog::new()?), version))
    }

    /// A handler sharing an existing catalog.
    pub fn with_catalog(catalog: Arc<Catalog>, version: Version) -> Self {
        Self {
            version,
            catalog,
            partition: DirectiveList::new(Family::Partition.header()),
            user: DirectiveList::new(Family::User.header()),
        }
    }

    /// The active version.
    pub fn version(&self) -> Version {
        self.version
    }

    fn resolve(
        &self,
        keyword: &str,
        lineno: usize,
    ) -> Result<(Family, &Arc<Schema>), ParseError> {
        Family::from_keyword(keyword)
            .and_then(|f| Some((f, self.catalog.schema(f, self.version)?)))
            .ok_or_else(|| {
                ParseError::new(
                    lineno,
                    keyword,
                    ErrorKind::UnknownDirective {
                        version: self.version,
                    },
                )
            })
    }

    /// Parse one directive without recording it.
    pub fn parse_directive<S: AsRef<str>>(
        &self,
        keyword: &str,
        args: &[S],
        lineno: usize,
    ) -> Result<Record, ParseError> {
        let (_, schema) = self.resolve(keyword, lineno)?;
        schema.parse(keyword, args, lineno)
    }

    /// Parse one directive and append it to its family's list.
    pub fn dispatch<S: AsRef<str>>(
        &mut self,
        keyword: &str,
        args: &[S],
        lineno: usize,
    ) -> Result<&Record, ParseError> {
        let (family, schema) = self.resolve(keyword, lineno)?;
        let record = schema.parse(keyword, args, lineno)?;
        let list = match family {
            Family::Partition => &mut self.partition,
            Family::User => &mut self.user,
        };
        Ok(list.push(record))
    }

    /// The records of one family.
    pub fn list(&self, family: Family) -> &DirectiveList {
        match family {
            Family::Partition => &self.partition,
            Family::User => &self.user,
        }
    }

    /// Every family's list, in write priority order.
    pub fn lists(&self) -> impl Iterator<Item = (Family, &DirectiveList)> {
        let mut families = Family::ALL;
        families.sort_by_key(|f| f.write_priority());
        families.into_iter().map(move |f| (f, self.list(f)))
    }

    /// Total number of records across all families.
    pub fn len(&self) -> usize {
        self.lists().map(|(_, l)| l.len()).sum()
    }

    /// Whether no directive has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render every family in write priority order.
    pub fn render(&self) -> String {
        self.lists().map(|(_, l)| l.render()).collect()
    }

    fn read_line(&mut self, line: DirectiveLine<'_>) -> Result<(), ParseError> {
        let Some(words) = line.words() else {
            let keyword = line.text.split_whitespace().next().unwrap_or_default();
            return Err(ParseError::new(
                line.lineno,
                keyword,
                ErrorKind::UnbalancedQuotes,
            ));
        };
        let Some((keyword, args)) = words.split_first() else {
            return Ok(());
        };
        self.dispatch(keyword, args, line.lineno).map(|_| ())
    }

    /// Read a whole document, stopping at the first rejected line.
    pub fn read_str(&mut self, document: &str) -> Result<(), ParseError> {
        for line in directive_lines(document) {
            self.read_line(line)?;
        }
        Ok(())
    }

    /// Read a whole document, skipping rejected lines and returning
    /// every error in line order.
    pub fn read_str_collect(&mut self, document: &str) -> Vec<ParseError> {
        directive_lines(document)
            .filter_map(|line| self.read_line(line).err())
            .collect()
    }
}

impl Serialize for Handler {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Family::ALL.len() + 1))?;
        map.serialize_entry("version", &self.version)?;
        for (family, list) in self.lists() {
            map.serialize_entry(family.keyword(), list)?;
        }
        map.end()
    }
}
