//! Option rule tables and the deltas that derive one version's table
//! from its predecessor's.

use std::collections::BTreeMap;

use crate::errors::SchemaError;
use crate::rule::{OptionRule, ValueKind};
use crate::value::Value;
use crate::version::Version;

/// Bookkeeping for an option removed by some revision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Removed {
    /// Canonical name of the removed rule
    pub name: &'static str,
    /// The field it used to write
    pub dest: &'static str,
    /// The revision that removed it
    pub version: Version,
}

/// The result of looking up a spelling.
#[derive(Clone, Copy, Debug)]
pub enum Lookup<'t> {
    /// An active (possibly deprecated) rule.
    Active(&'t OptionRule),
    /// A spelling of a rule removed in an earlier revision.
    Removed(Removed),
    /// Never declared.
    NotFound,
}

/// Changes to an existing rule.
#[derive(Clone, Debug)]
pub struct Alteration {
    name: &'static str,
    kind: Option<ValueKind>,
    required: Option<bool>,
    default: Option<Option<Value>>,
}

impl Alteration {
    /// Start altering the named rule.
    pub fn of(name: &'static str) -> Self {
        Self {
            name,
            kind: None,
            required: None,
            default: None,
        }
    }

    /// Change the value kind, and with it the arity.
    pub fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Change whether the option must be given.
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Change the default; `None` falls back to the kind's unset value.
    pub fn default_value(mut self, default: Option<Value>) -> Self {
        self.default = Some(default);
        self
    }
}

#[derive(Clone, Debug)]
enum Change {
    Add(OptionRule),
    Remove(&'static str),
    Alter(Alteration),
    Deprecate(&'static str),
}

/// An ordered list of changes turning a predecessor's table into a new one.
#[derive(Clone, Debug, Default)]
pub struct Delta {
    changes: Vec<Change>,
}

impl Delta {
    /// An empty delta.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new rule, or reintroduce a removed one.
    pub fn add(mut self, rule: OptionRule) -> Self {
        self.changes.push(Change::Add(rule));
        self
    }

    /// Remove a rule; its spellings become [`Lookup::Removed`].
    pub fn remove(mut self, name: &'static str) -> Self {
        self.changes.push(Change::Remove(name));
        self
    }

    /// Change an existing rule in place, keeping its position.
    pub fn alter(mut self, alteration: Alteration) -> Self {
        self.changes.push(Change::Alter(alteration));
        self
    }

    /// Keep accepting a rule on input but stop rendering it.
    pub fn deprecate(mut self, name: &'static str) -> Self {
        self.changes.push(Change::Deprecate(name));
        self
    }
}

/// The ordered option rules of one directive at one version.
///
/// Rule order is declaration order: a predecessor's rules first, then
/// whatever each later delta appended.  Rendering follows this order.
#[derive(Clone, Debug, Default)]
pub struct OptionTable {
    rules: Vec<OptionRule>,
    removed: BTreeMap<&'static str, Removed>,
}

impl OptionTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a new table by applying `delta` on top of this one.
    pub fn apply(&self, delta: &Delta, version: Version) -> Result<Self, SchemaError> {
        let mut table = self.clone();
        for change in &delta.changes {
            match change {
                Change::Add(rule) => table.add(rule.clone())?,
                Change::Remove(name) => table.remove(name, version)?,
                Change::Alter(alteration) => table.alter(alteration)?,
                Change::Deprecate(name) => table.rule_mut(name)?.set_deprecated(),
            }
        }
        table.validate()?;
        Ok(table)
    }

    /// Append a rule.
    ///
    /// Fails if any of its spellings is already active.  Spellings of
    /// previously removed rules are reclaimed.
    pub fn add(&mut self, rule: OptionRule) -> Result<(), SchemaError> {
        for spelling in rule.spellings() {
            if self.find(spelling).is_some() {
                return Err(SchemaError::DuplicateSpelling { spelling });
            }
        }
        if rule.is_required() && rule.default().is_some() {
            return Err(SchemaError::RequiredWithDefault { name: rule.name() });
        }
        for spelling in rule.spellings() {
            // Only the reclaimed spellings; the old rule's others stay removed.
            if let Some(prev) = self.removed.remove(spelling) {
                tracing::trace!("reintroducing --{spelling} (removed in {})", prev.version);
            }
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Remove a rule, remembering its spellings and the removing version.
    pub fn remove(&mut self, name: &'static str, version: Version) -> Result<(), SchemaError> {
        let idx = self
            .rules
            .iter()
            .position(|r| r.name() == name)
            .ok_or(SchemaError::NoSuchRule { name })?;
        let rule = self.rules.remove(idx);
        for spelling in rule.spellings() {
            self.removed.insert(
                spelling,
                Removed {
                    name: rule.name(),
                    dest: rule.dest_field(),
                    version,
                },
            );
        }
        Ok(())
    }

    fn alter(&mut self, alteration: &Alteration) -> Result<(), SchemaError> {
        let rule = self.rule_mut(alteration.name)?;
        if let Some(kind) = alteration.kind {
            rule.set_kind(kind);
        }
        if let Some(required) = alteration.required {
            rule.set_required(required);
        }
        if let Some(default) = &alteration.default {
            rule.set_default(default.clone());
        }
        if rule.is_required() && rule.default().is_some() {
            return Err(SchemaError::RequiredWithDefault { name: rule.name() });
        }
        Ok(())
    }

    fn rule_mut(&mut self, name: &'static str) -> Result<&mut OptionRule, SchemaError> {
        self.rules
            .iter_mut()
            .find(|r| r.name() == name)
            .ok_or(SchemaError::NoSuchRule { name })
    }

    fn find(&self, spelling: &str) -> Option<&OptionRule> {
        self.rules
            .iter()
            .find(|r| r.spellings().any(|s| s == spelling))
    }

    fn validate(&self) -> Result<(), SchemaError> {
        for rule in &self.rules {
            if let Some(default) = rule.default() {
                if !default.same_kind(&rule.kind().unset()) {
                    return Err(SchemaError::DefaultKindMismatch { name: rule.name() });
                }
            }
            for spelling in rule.spellings() {
                if let Some((&spelling, _)) = self.removed.get_key_value(spelling) {
                    return Err(SchemaError::RemovedCollision { spelling });
                }
            }
        }
        Ok(())
    }

    /// Look up a spelling, given without leading dashes.
    pub fn lookup(&self, spelling: &str) -> Lookup<'_> {
        if let Some(rule) = self.find(spelling) {
            return Lookup::Active(rule);
        }
        match self.removed.get(spelling) {
            Some(removed) => Lookup::Removed(*removed),
            None => Lookup::NotFound,
        }
    }

    /// The rule with the given canonical name.
    pub fn get(&self, name: &str) -> Option<&OptionRule> {
        self.rules.iter().find(|r| r.name() == name)
    }

    /// All active rules in declaration order.
    pub fn rules(&self) -> impl Iterator<Item = &OptionRule> {
        self.rules.iter()
    }

    /// All removed spellings with their bookkeeping.
    pub fn removed(&self) -> impl Iterator<Item = (&'static str, &Removed)> {
        self.removed.iter().map(|(k, v)| (*k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> OptionTable {
        OptionTable::new()
            .apply(
                &Delta::new()
                    .add(OptionRule::string("ondisk").alias("ondrive").dest("disk"))
                    .add(OptionRule::int("size"))
                    .add(OptionRule::int("bytes-per-inode").dest("bytes_per_inode")),
                Version::FC3,
            )
            .unwrap()
    }

    fn names(t: &OptionTable) -> Vec<&'static str> {
        t.rules().map(|r| r.name()).collect()
    }

    #[test]
    fn test_lookup() {
        let t = base();
        assert!(matches!(t.lookup("ondrive"), Lookup::Active(r) if r.name() == "ondisk"));
        assert!(matches!(t.lookup("nothing"), Lookup::NotFound));
    }

    #[test]
    fn test_duplicate_spelling() {
        let e = base()
            .apply(&Delta::new().add(OptionRule::string("ondrive")), Version::FC4)
            .unwrap_err();
        assert_eq!(e, SchemaError::DuplicateSpelling { spelling: "ondrive" });
    }

    #[test]
    fn test_required_without_default() {
        let e = OptionTable::new()
            .apply(
                &Delta::new().add(OptionRule::string("name").required().default_value("x")),
                Version::FC3,
            )
            .unwrap_err();
        assert_eq!(e, SchemaError::RequiredWithDefault { name: "name" });
    }

    #[test]
    fn test_remove_tracks_version() {
        let t = base()
            .apply(&Delta::new().remove("bytes-per-inode"), Version::F9)
            .unwrap();
        assert_eq!(names(&t), ["ondisk", "size"]);
        match t.lookup("bytes-per-inode") {
            Lookup::Removed(r) => {
                assert_eq!(r.version, Version::F9);
                assert_eq!(r.dest, "bytes_per_inode");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            base().apply(&Delta::new().remove("nope"), Version::F9),
            Err(SchemaError::NoSuchRule { name: "nope" })
        ));
    }

    #[test]
    fn test_reintroduce() {
        let t = base()
            .apply(&Delta::new().remove("ondisk"), Version::FC4)
            .unwrap()
            .apply(&Delta::new().add(OptionRule::string("ondisk")), Version::FC5)
            .unwrap();
        // reintroduced at the end, and no longer reported as removed
        assert_eq!(names(&t), ["size", "bytes-per-inode", "ondisk"]);
        assert!(matches!(t.lookup("ondisk"), Lookup::Active(_)));
        // the alias was not reintroduced
        assert!(matches!(t.lookup("ondrive"), Lookup::Removed(_)));
    }

    #[test]
    fn test_alter() {
        let t = base()
            .apply(
                &Delta::new().alter(Alteration::of("size").default_value(Some(Value::Int(1)))),
                Version::FC4,
            )
            .unwrap();
        assert_eq!(t.get("size").unwrap().initial_value(), Value::Int(1));
        // order is unchanged
        assert_eq!(names(&t), names(&base()));

        let t = base()
            .apply(
                &Delta::new().alter(Alteration::of("size").kind(ValueKind::Str)),
                Version::FC4,
            )
            .unwrap();
        assert_eq!(t.get("size").unwrap().kind().arity(), 1);
        assert_eq!(t.get("size").unwrap().kind().describe(), "string");

        let e = base()
            .apply(
                &Delta::new().alter(Alteration::of("size").kind(ValueKind::FlagTrue)),
                Version::FC4,
            )
            .unwrap();
        assert_eq!(e.get("size").unwrap().kind().arity(), 0);

        let e = base()
            .apply(
                &Delta::new().alter(
                    Alteration::of("size")
                        .default_value(Some(Value::Int(1)))
                        .required(true),
                ),
                Version::FC4,
            )
            .unwrap_err();
        assert_eq!(e, SchemaError::RequiredWithDefault { name: "size" });
    }

    #[test]
    fn test_default_kind_mismatch() {
        let e = OptionTable::new()
            .apply(
                &Delta::new().add(OptionRule::int("size").default_value("big")),
                Version::FC3,
            )
            .unwrap_err();
        assert_eq!(e, SchemaError::DefaultKindMismatch { name: "size" });
    }

    #[test]
    fn test_deprecate() {
        let t = base()
            .apply(&Delta::new().deprecate("size"), Version::FC4)
            .unwrap();
        assert!(matches!(t.lookup("size"), Lookup::Active(r) if r.is_deprecated()));
    }
}
