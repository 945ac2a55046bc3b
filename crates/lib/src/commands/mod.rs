//! The fixed catalog of directive families.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::errors::SchemaError;
use crate::lineage::Lineage;
use crate::schema::Schema;
use crate::version::Version;

mod partition;
mod user;

/// A kind of directive; one list per family is kept per document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// `part` / `partition`
    Partition,
    /// `user`
    User,
}

impl Family {
    /// Every family, in catalog order.
    pub const ALL: [Family; 2] = [Family::Partition, Family::User];

    /// The canonical keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            Family::Partition => "part",
            Family::User => "user",
        }
    }

    /// Every keyword the family answers to.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Family::Partition => &["part", "partition"],
            Family::User => &["user"],
        }
    }

    /// The comment line rendered above the family's records.
    pub fn header(self) -> &'static str {
        match self {
            Family::Partition => "# Disk partitioning information",
            Family::User => "# User accounts",
        }
    }

    /// Lower values are written earlier in a document.
    pub fn write_priority(self) -> u32 {
        match self {
            Family::Partition => 130,
            Family::User => 0,
        }
    }

    /// The family a keyword belongs to.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.keywords().contains(&keyword))
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Every family's lineage, built once.
#[derive(Debug)]
pub struct Catalog {
    partition: Lineage,
    user: Lineage,
}

impl Catalog {
    /// Build every lineage from its declaration.
    pub fn new() -> Result<Self, SchemaError> {
        Ok(Self {
            partition: Lineage::build(partition::declaration())?,
            user: Lineage::build(user::declaration())?,
        })
    }

    /// The lineage of one family.
    pub fn lineage(&self, family: Family) -> &Lineage {
        match family {
            Family::Partition => &self.partition,
            Family::User => &self.user,
        }
    }

    /// The schema for a family at a version, if the family exists there.
    pub fn schema(&self, family: Family, version: Version) -> Option<&Arc<Schema>> {
        self.lineage(family).schema(version)
    }
}
