//! The canonical serializer.
//!
//! Output is the keyword, the positional arguments, then one fragment
//! per option in rule table order.  Because each revision's delta
//! appends its new rules to the predecessor's table, a version's
//! rendering is its predecessor's rendering followed by the fragments
//! for whatever that version added.

use crate::record::Record;
use crate::rule::{Emission, OptionRule, Quoting, ValueKind};
use crate::value::Value;

/// Render one record as a single directive line, without a trailing newline.
pub fn render(record: &Record) -> String {
    let schema = record.schema();
    let mut out = String::from(schema.keyword());
    for positional in schema.positionals() {
        match record.get_str(positional.field) {
            Ok(v) if !v.is_empty() => {
                out.push(' ');
                out.push_str(v);
            }
            _ => {}
        }
    }
    for rule in schema.table().rules() {
        if let Some(fragment) = fragment(rule, record) {
            out.push(' ');
            out.push_str(&fragment);
        }
    }
    out
}

/// The text one rule contributes, if any.
fn fragment(rule: &OptionRule, record: &Record) -> Option<String> {
    if rule.is_deprecated() {
        return None;
    }
    match rule.emission() {
        Emission::Never => return None,
        Emission::Governed(field) if record.get_bool(field) != Ok(true) => return None,
        Emission::Governed(_) | Emission::Value => {}
    }
    let switch = rule.switch();
    match (rule.kind(), record.get(rule.dest_field()).ok()?) {
        (ValueKind::FlagTrue, Value::Bool(true)) | (ValueKind::FlagFalse, Value::Bool(false)) => {
            Some(switch)
        }
        (ValueKind::Str | ValueKind::Transform(_), Value::Str(s)) if !s.is_empty() => {
            Some(match rule.quoting() {
                Quoting::Bare => format!("{switch}={s}"),
                Quoting::Double => format!("{switch}=\"{s}\""),
            })
        }
        (ValueKind::Int(emit), Value::Int(n)) if emit.emits(*n) => Some(format!("{switch}={n}")),
        (ValueKind::List, Value::List(items)) if !items.is_empty() => {
            Some(format!("{switch}={}", items.join(",")))
        }
        _ => None,
    }
}
