//! Option rules: how one option is parsed and how it is rendered.

use serde::Serialize;

use crate::value::Value;

/// A pure conversion applied to an option's raw value before storage.
pub type Transform = fn(&str) -> String;

/// When an integer option is worth rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntEmit {
    /// Rendered unless 0.
    NonZero,
    /// Rendered only when strictly positive; negative input is rejected.
    Positive,
}

impl IntEmit {
    /// Whether `n` is rendered.
    pub fn emits(self, n: i64) -> bool {
        match self {
            IntEmit::NonZero => n != 0,
            IntEmit::Positive => n > 0,
        }
    }
}

/// What an option's value is and how many arguments it consumes.
#[derive(Clone, Copy, Debug)]
pub enum ValueKind {
    /// A switch that sets its field to true.
    FlagTrue,
    /// A negative-sense switch that sets its field to false.
    FlagFalse,
    /// A string value.
    Str,
    /// An integer value.
    Int(IntEmit),
    /// A comma-separated list, appended to on each occurrence.
    List,
    /// A string value passed through a transform first.
    Transform(Transform),
}

impl ValueKind {
    /// How many arguments the option consumes.
    pub fn arity(&self) -> usize {
        match self {
            ValueKind::FlagTrue | ValueKind::FlagFalse => 0,
            _ => 1,
        }
    }

    /// The value a field holds when the option was never given.
    pub fn unset(&self) -> Value {
        match self {
            ValueKind::FlagTrue => Value::Bool(false),
            ValueKind::FlagFalse => Value::Bool(true),
            ValueKind::Str | ValueKind::Transform(_) => Value::Str(String::new()),
            ValueKind::Int(_) => Value::Int(0),
            ValueKind::List => Value::List(Vec::new()),
        }
    }

    /// A short description for listings.
    pub fn describe(&self) -> &'static str {
        match self {
            ValueKind::FlagTrue | ValueKind::FlagFalse => "flag",
            ValueKind::Str | ValueKind::Transform(_) => "string",
            ValueKind::Int(_) => "integer",
            ValueKind::List => "list",
        }
    }
}

/// How a string value is written out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quoting {
    /// `--name=value`
    Bare,
    /// `--name="value"`
    Double,
}

/// Whether a rule contributes to rendered output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emission {
    /// Rendered when the field holds a non-default value.
    Value,
    /// Only accepted on input; another rule renders the field.
    Never,
    /// Rendered only when the named boolean field is true.
    Governed(&'static str),
}

/// What `ksdirective options` prints for one rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    /// Canonical name
    pub name: &'static str,
    /// Other accepted spellings
    pub aliases: Vec<&'static str>,
    /// Destination field
    pub field: &'static str,
    /// Value kind, e.g. `integer`
    pub kind: &'static str,
    /// Must be given
    pub required: bool,
    /// Accepted but ignored
    pub deprecated: bool,
    /// The field's value when the option is absent
    pub default: Value,
}

/// Declaration of one recognized option.
#[derive(Clone, Debug)]
pub struct OptionRule {
    name: &'static str,
    aliases: Vec<&'static str>,
    dest: &'static str,
    kind: ValueKind,
    required: bool,
    default: Option<Value>,
    deprecated: bool,
    quoting: Quoting,
    emission: Emission,
}

impl OptionRule {
    fn new(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            aliases: Vec::new(),
            dest: name,
            kind,
            required: false,
            default: None,
            deprecated: false,
            quoting: Quoting::Bare,
            emission: Emission::Value,
        }
    }

    /// A switch that sets its field to true.
    pub fn flag(name: &'static str) -> Self {
        Self::new(name, ValueKind::FlagTrue)
    }

    /// A switch that sets its field to false; the field defaults to true.
    pub fn negated_flag(name: &'static str) -> Self {
        Self::new(name, ValueKind::FlagFalse)
    }

    /// An option taking a string.
    pub fn string(name: &'static str) -> Self {
        Self::new(name, ValueKind::Str)
    }

    /// An option taking an integer, rendered when non-zero.
    pub fn int(name: &'static str) -> Self {
        Self::new(name, ValueKind::Int(IntEmit::NonZero))
    }

    /// An option taking a comma-separated list.
    pub fn list(name: &'static str) -> Self {
        Self::new(name, ValueKind::List)
    }

    /// An option taking a string that is transformed before storage.
    pub fn transform(name: &'static str, f: Transform) -> Self {
        Self::new(name, ValueKind::Transform(f))
    }

    /// Accept an additional spelling.
    pub fn alias(mut self, alias: &'static str) -> Self {
        self.aliases.push(alias);
        self
    }

    /// Store into a field named differently from the option.
    pub fn dest(mut self, dest: &'static str) -> Self {
        self.dest = dest;
        self
    }

    /// The option must be given.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The value the field takes when the option is not given.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Render the value in double quotes.
    pub fn quoted(mut self) -> Self {
        self.quoting = Quoting::Double;
        self
    }

    /// Render only while the given boolean field is true.
    pub fn governed_by(mut self, field: &'static str) -> Self {
        self.emission = Emission::Governed(field);
        self
    }

    /// Accept on input but never render.
    pub fn parse_only(mut self) -> Self {
        self.emission = Emission::Never;
        self
    }

    /// Accept and discard on input, never render.
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Render integers only when strictly positive.
    pub fn positive(mut self) -> Self {
        if let ValueKind::Int(_) = self.kind {
            self.kind = ValueKind::Int(IntEmit::Positive);
        }
        self
    }

    /// The canonical option name, without leading dashes.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The canonical name followed by all aliases.
    pub fn spellings(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }

    /// The record field written by this rule.
    pub fn dest_field(&self) -> &'static str {
        self.dest
    }

    /// The value kind.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Whether the option must be given.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the option is accepted but ignored.
    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    /// The declared default, if any.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The value the field starts with.
    pub fn initial_value(&self) -> Value {
        self.default.clone().unwrap_or_else(|| self.kind.unset())
    }

    /// How string values are written.
    pub fn quoting(&self) -> Quoting {
        self.quoting
    }

    /// Whether and when this rule renders.
    pub fn emission(&self) -> Emission {
        self.emission
    }

    /// The spelling used on output, e.g. `--ondisk`.
    pub fn switch(&self) -> String {
        format!("--{}", self.name)
    }

    /// A serializable description of this rule.
    pub fn summary(&self) -> RuleSummary {
        RuleSummary {
            name: self.name,
            aliases: self.aliases.clone(),
            field: self.dest,
            kind: self.kind.describe(),
            required: self.required,
            deprecated: self.deprecated,
            default: self.initial_value(),
        }
    }

    pub(crate) fn set_kind(&mut self, kind: ValueKind) {
        self.kind = kind;
    }

    pub(crate) fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub(crate) fn set_default(&mut self, default: Option<Value>) {
        self.default = default;
    }

    pub(crate) fn set_deprecated(&mut self) {
        self.deprecated = true;
    }

    /// The value stored when a switch is given.
    pub(crate) fn flag_value(&self) -> Option<Value> {
        match self.kind {
            ValueKind::FlagTrue => Some(Value::Bool(true)),
            ValueKind::FlagFalse => Some(Value::Bool(false)),
            _ => None,
        }
    }

    /// Convert a raw argument into the stored value.
    ///
    /// Returns the rejection reason on failure.
    pub(crate) fn convert(&self, raw: &str) -> Result<Value, String> {
        match self.kind {
            ValueKind::FlagTrue | ValueKind::FlagFalse => {
                Err(format!("{} takes no value", self.switch()))
            }
            ValueKind::Str => Ok(Value::Str(raw.to_owned())),
            ValueKind::Transform(f) => Ok(Value::Str(f(raw))),
            ValueKind::Int(emit) => {
                let n = raw
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| "not an integer".to_owned())?;
                if emit == IntEmit::Positive && n < 0 {
                    return Err("must not be negative".to_owned());
                }
                Ok(Value::Int(n))
            }
            ValueKind::List => Ok(Value::List(
                raw.split(',')
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
                    .collect(),
            )),
        }
    }
}
