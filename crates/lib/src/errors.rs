//! Error types.
//!
//! [`ParseError`] is what callers see when a directive line is rejected.
//! [`SchemaError`] is raised while building rule tables and lineages
//! from the catalog declarations, and [`RecordError`] when reading or
//! writing record fields by name.

use crate::version::Version;

/// A directive line was rejected.
///
/// Always carries enough context to report the failure to a user: the
/// line number, the directive keyword and, where there is one, the
/// argument that caused it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {lineno}: {keyword}: {kind}")]
pub struct ParseError {
    /// One-based line number of the directive
    pub lineno: usize,
    /// The directive keyword as written
    pub keyword: String,
    /// The offending argument, if a single one is to blame
    pub token: Option<String>,
    /// What went wrong
    pub kind: ErrorKind,
}

impl ParseError {
    pub(crate) fn new(lineno: usize, keyword: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            lineno,
            keyword: keyword.into(),
            token: None,
            kind,
        }
    }

    pub(crate) fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// The reason a directive line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// The argument looks like an option but no rule matches it.
    #[error("no such option: {option}")]
    UnknownOption {
        /// The option spelling as written
        option: String,
    },
    /// The argument names an option that an earlier version had.
    #[error("option {option} was removed in {removed_in}")]
    RemovedOption {
        /// The option spelling as written
        option: String,
        /// The version whose revision removed it
        removed_in: Version,
    },
    /// A required option never received a value.
    #[error("option {option} is required")]
    MissingRequiredOption {
        /// Canonical spelling of the missing option
        option: String,
    },
    /// A value was present but could not be converted.
    #[error("invalid value {value:?} for {option}: {reason}")]
    InvalidValue {
        /// The option spelling as written
        option: String,
        /// The raw value
        value: String,
        /// Why it was rejected
        reason: String,
    },
    /// The directive received the wrong number of bare arguments.
    #[error("expected {expected} positional argument(s) ({what}), found {found}")]
    PositionalArity {
        /// How many the directive takes
        expected: usize,
        /// How many were given
        found: usize,
        /// What the positional arguments mean
        what: &'static str,
    },
    /// The keyword names no directive known at the active version.
    #[error("unknown directive for version {version}")]
    UnknownDirective {
        /// The active version
        version: Version,
    },
    /// The line could not be split into words.
    #[error("unbalanced quotes")]
    UnbalancedQuotes,
}

/// A rule table or lineage declaration is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Two active rules share a spelling.
    #[error("option spelling --{spelling} is already declared")]
    DuplicateSpelling {
        /// The colliding spelling
        spelling: &'static str,
    },
    /// A delta names a rule the table does not have.
    #[error("no such option rule: {name}")]
    NoSuchRule {
        /// The missing rule name
        name: &'static str,
    },
    /// A required rule declares a default.
    #[error("required option --{name} must not have a default")]
    RequiredWithDefault {
        /// The offending rule name
        name: &'static str,
    },
    /// A rule's default does not match its value kind.
    #[error("default for --{name} does not match its value kind")]
    DefaultKindMismatch {
        /// The offending rule name
        name: &'static str,
    },
    /// Two rules writing one field disagree on the field's kind.
    #[error("field {field} is written with conflicting value kinds")]
    FieldKindConflict {
        /// The contested field
        field: &'static str,
    },
    /// A removed spelling is still claimed by an active rule.
    #[error("removed spelling --{spelling} collides with an active rule")]
    RemovedCollision {
        /// The colliding spelling
        spelling: &'static str,
    },
    /// A rule is governed by a field that is not an active boolean.
    #[error("--{name} is governed by {field}, which is not a boolean field")]
    BadGovernor {
        /// The governed rule
        name: &'static str,
        /// The governing field
        field: &'static str,
    },
    /// A version has more than one revision.
    #[error("{version} is declared twice")]
    DuplicateRevision {
        /// The repeated version
        version: Version,
    },
    /// A revision's parent is declared after it.
    #[error("{version} derives from {parent}, which is declared later")]
    ForwardParent {
        /// The revision being built
        version: Version,
        /// Its parent
        parent: Version,
    },
    /// A revision other than the first has no ancestor with a revision.
    #[error("{version} has no ancestor revision")]
    OrphanRevision {
        /// The revision being built
        version: Version,
    },
    /// Context for a failure inside one revision.
    #[error("{keyword} at {version}: {source}")]
    Revision {
        /// The directive keyword
        keyword: &'static str,
        /// The revision version
        version: Version,
        /// The underlying failure
        #[source]
        source: Box<SchemaError>,
    },
}

/// A record field was accessed incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// The field never existed for this directive.
    #[error("{keyword} has no field {field}")]
    UnknownField {
        /// The directive keyword
        keyword: &'static str,
        /// The requested field
        field: String,
    },
    /// The field existed in an earlier version but was removed.
    #[error("{keyword} field {field} was removed in {removed_in}")]
    RemovedField {
        /// The directive keyword
        keyword: &'static str,
        /// The requested field
        field: String,
        /// The version whose revision removed it
        removed_in: Version,
    },
    /// The value's kind does not match the field's kind.
    #[error("field {field} holds a {expected} value, not a {found}")]
    KindMismatch {
        /// The field
        field: String,
        /// The field's kind
        expected: &'static str,
        /// The offered value's kind
        found: &'static str,
    },
}
