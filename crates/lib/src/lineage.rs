//! Version lineages: the revision history of one directive.
//!
//! A lineage is declared as data: a list of revisions, each naming the
//! version that introduced it and the [`Delta`] it applies.  A
//! revision's parent is the nearest ancestor version (see
//! [`Version::ancestry`]) that also has a revision, so every version's
//! schema is the base table with the deltas along one ancestry chain
//! replayed in order.

use std::sync::Arc;

use serde::Serialize;

use crate::errors::SchemaError;
use crate::schema::{PositionalField, Schema};
use crate::table::{Delta, OptionTable};
use crate::version::Version;

/// One step in a directive's history.
#[derive(Clone, Debug)]
pub struct Revision {
    version: Version,
    delta: Delta,
}

impl Revision {
    /// A revision introduced by `version`.
    pub fn new(version: Version, delta: Delta) -> Self {
        Self { version, delta }
    }
}

/// The static description of a directive family.
#[derive(Clone, Debug)]
pub struct Declaration {
    /// Canonical keyword
    pub keyword: &'static str,
    /// Bare arguments, in order
    pub positionals: &'static [PositionalField],
    /// Revisions; a revision's parent must come before it
    pub revisions: Vec<Revision>,
}

/// Options gained and lost between two versions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VersionDiff {
    /// Options present only in the newer version
    pub added: Vec<&'static str>,
    /// Options present only in the older version
    pub removed: Vec<&'static str>,
}

impl VersionDiff {
    /// Whether nothing changed.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Every schema snapshot of one directive, built by replaying its revisions.
#[derive(Debug)]
pub struct Lineage {
    snapshots: Vec<(Version, Arc<Schema>)>,
}

impl Lineage {
    /// Replay every revision of `decl`.
    pub fn build(decl: Declaration) -> Result<Self, SchemaError> {
        let declared: Vec<Version> = decl.revisions.iter().map(|r| r.version).collect();
        let mut snapshots: Vec<(Version, Arc<Schema>)> = Vec::with_capacity(declared.len());

        for (idx, rev) in decl.revisions.iter().enumerate() {
            let version = rev.version;
            if declared[..idx].contains(&version) {
                return Err(SchemaError::DuplicateRevision { version });
            }
            let parent = version
                .ancestry()
                .skip(1)
                .find(|v| declared.contains(v));
            let base = match parent {
                Some(parent) => snapshots
                    .iter()
                    .find(|(v, _)| *v == parent)
                    .map(|(_, s)| s.table().clone())
                    .ok_or(SchemaError::ForwardParent { version, parent })?,
                None if idx == 0 => OptionTable::new(),
                None => return Err(SchemaError::OrphanRevision { version }),
            };
            let wrap = |source| SchemaError::Revision {
                keyword: decl.keyword,
                version,
                source: Box::new(source),
            };
            let table = base.apply(&rev.delta, version).map_err(wrap)?;
            let schema = Schema::new(decl.keyword, version, decl.positionals, table).map_err(wrap)?;
            tracing::trace!(
                "built {} {version} from {}",
                decl.keyword,
                parent.map_or("nothing", Version::as_str)
            );
            snapshots.push((version, Arc::new(schema)));
        }

        Ok(Self { snapshots })
    }

    /// The schema in effect at `version`, if the directive exists there.
    pub fn schema(&self, version: Version) -> Option<&Arc<Schema>> {
        version.ancestry().find_map(|v| {
            self.snapshots
                .iter()
                .find(|(sv, _)| *sv == v)
                .map(|(_, s)| s)
        })
    }

    /// Options added and removed going from `from` to `to`.
    pub fn diff(&self, from: Version, to: Version) -> VersionDiff {
        let names = |v| -> Vec<&'static str> {
            self.schema(v)
                .map(|s| s.table().rules().map(|r| r.name()).collect())
                .unwrap_or_default()
        };
        let old = names(from);
        let new = names(to);
        VersionDiff {
            added: new.iter().filter(|n| !old.contains(n)).copied().collect(),
            removed: old.iter().filter(|n| !new.contains(n)).copied().collect(),
        }
    }
}
