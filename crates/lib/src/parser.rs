//! The argument parser: raw directive arguments to typed option values.

use std::collections::BTreeMap;

use ksdirective_args::token::{OptionToken, Token};

use crate::errors::{ErrorKind, ParseError};
use crate::rule::{OptionRule, ValueKind};
use crate::table::{Lookup, OptionTable};
use crate::value::Value;

/// The outcome of parsing one directive's arguments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Values by destination field, for options that were given
    pub values: BTreeMap<&'static str, Value>,
    /// Bare arguments in encounter order
    pub positionals: Vec<String>,
}

/// Parse `args` against `table`.
///
/// Options may carry their value inline (`--size=500`) or as the next
/// argument (`--size 500`).  A bare `--` ends option processing.  The
/// first malformed argument aborts the parse; nothing is returned for
/// the arguments that preceded it.
pub fn parse_args<S: AsRef<str>>(
    table: &OptionTable,
    keyword: &str,
    args: &[S],
    lineno: usize,
) -> Result<ParsedArgs, ParseError> {
    let fail = |kind: ErrorKind, token: &str| {
        ParseError::new(lineno, keyword, kind).with_token(token)
    };
    let mut parsed = ParsedArgs::default();
    let mut args = args.iter().map(AsRef::as_ref);
    let mut only_positionals = false;

    while let Some(arg) = args.next() {
        tracing::trace!("{keyword}: argument {arg:?}");
        if only_positionals {
            parsed.positionals.push(arg.to_owned());
            continue;
        }
        let opt = match Token::classify(arg) {
            Token::EndOfOptions => {
                only_positionals = true;
                continue;
            }
            Token::Positional(p) => {
                parsed.positionals.push(p.to_owned());
                continue;
            }
            Token::Short(s) => {
                let option = s.to_owned();
                return Err(fail(ErrorKind::UnknownOption { option }, arg));
            }
            Token::Option(opt) => opt,
        };

        let rule = match table.lookup(opt.name()) {
            Lookup::Active(rule) => rule,
            Lookup::Removed(removed) => {
                let kind = ErrorKind::RemovedOption {
                    option: opt.spelling().to_owned(),
                    removed_in: removed.version,
                };
                return Err(fail(kind, arg));
            }
            Lookup::NotFound => {
                let option = opt.spelling().to_owned();
                return Err(fail(ErrorKind::UnknownOption { option }, arg));
            }
        };

        let value = match rule.flag_value() {
            Some(value) => {
                if let Some(raw) = opt.value() {
                    let kind = invalid(&opt, raw, format!("{} takes no value", opt.spelling()));
                    return Err(fail(kind, arg));
                }
                value
            }
            None => {
                let raw = match opt.value() {
                    Some(raw) => raw,
                    None => args.next().ok_or_else(|| {
                        let reason = format!("{} requires an argument", opt.spelling());
                        fail(invalid(&opt, "", reason), arg)
                    })?,
                };
                rule.convert(raw)
                    .map_err(|reason| fail(invalid(&opt, raw, reason), arg))?
            }
        };

        if rule.is_deprecated() {
            tracing::warn!(
                "line {lineno}: {keyword}: {} is deprecated and has no effect",
                opt.spelling()
            );
            continue;
        }
        store(&mut parsed.values, rule, value);
    }

    if let Some(rule) = table
        .rules()
        .filter(|r| r.is_required())
        .find(|r| !parsed.values.contains_key(r.dest_field()))
    {
        return Err(ParseError::new(
            lineno,
            keyword,
            ErrorKind::MissingRequiredOption {
                option: rule.switch(),
            },
        ));
    }

    Ok(parsed)
}

fn invalid(opt: &OptionToken<'_>, raw: &str, reason: String) -> ErrorKind {
    ErrorKind::InvalidValue {
        option: opt.spelling().to_owned(),
        value: raw.to_owned(),
        reason,
    }
}

/// Record a converted value; lists accumulate, everything else is last-wins.
fn store(values: &mut BTreeMap<&'static str, Value>, rule: &OptionRule, value: Value) {
    let dest = rule.dest_field();
    if let (ValueKind::List, Value::List(more)) = (rule.kind(), &value) {
        if let Some(Value::List(existing)) = values.get_mut(dest) {
            existing.extend(more.iter().cloned());
            return;
        }
    }
    values.insert(dest, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Delta;
    use crate::version::Version;

    fn table() -> OptionTable {
        fn upper(v: &str) -> String {
            v.to_uppercase()
        }
        OptionTable::new()
            .apply(
                &Delta::new()
                    .add(OptionRule::flag("grow"))
                    .add(OptionRule::negated_flag("noformat").dest("format"))
                    .add(OptionRule::int("size"))
                    .add(OptionRule::string("ondisk").alias("ondrive").dest("disk"))
                    .add(OptionRule::list("groups"))
                    .add(OptionRule::transform("shout", upper))
                    .add(OptionRule::int("gone"))
                    .add(OptionRule::int("old").deprecated()),
                Version::FC3,
            )
            .unwrap()
            .apply(&Delta::new().remove("gone"), Version::FC4)
            .unwrap()
    }

    fn parse(args: &[&str]) -> Result<ParsedArgs, ParseError> {
        parse_args(&table(), "test", args, 7)
    }

    #[test]
    fn test_values_and_positionals() {
        let p = parse(&["a", "--grow", "--size=500", "--ondrive", "sda", "b"]).unwrap();
        assert_eq!(p.positionals, ["a", "b"]);
        assert_eq!(p.values["grow"], Value::Bool(true));
        assert_eq!(p.values["size"], Value::Int(500));
        assert_eq!(p.values["disk"], Value::Str("sda".into()));
        assert!(!p.values.contains_key("format"));

        let p = parse(&["--noformat"]).unwrap();
        assert_eq!(p.values["format"], Value::Bool(false));
    }

    #[test]
    fn test_end_of_options() {
        let p = parse(&["--grow", "--", "--size=1"]).unwrap();
        assert_eq!(p.positionals, ["--size=1"]);
        assert!(!p.values.contains_key("size"));
    }

    #[test]
    fn test_list_accumulates() {
        let p = parse(&["--groups=a,b", "--groups", "c"]).unwrap();
        assert_eq!(
            p.values["groups"],
            Value::List(vec!["a".into(), "b".into(), "c".into()])
        );
    }

    #[test]
    fn test_last_wins() {
        let p = parse(&["--size=1", "--size=2"]).unwrap();
        assert_eq!(p.values["size"], Value::Int(2));
    }

    #[test]
    fn test_transform() {
        let p = parse(&["--shout=quiet"]).unwrap();
        assert_eq!(p.values["shout"], Value::Str("QUIET".into()));
    }

    #[test]
    fn test_deprecated_is_discarded() {
        let p = parse(&["--old=3", "x"]).unwrap();
        assert!(p.values.is_empty());
        assert_eq!(p.positionals, ["x"]);
    }

    #[test]
    fn test_unknown() {
        let e = parse(&["--bogus"]).unwrap_err();
        assert_eq!(e.lineno, 7);
        assert_eq!(e.token.as_deref(), Some("--bogus"));
        assert_eq!(
            e.kind,
            ErrorKind::UnknownOption {
                option: "--bogus".into()
            }
        );
        assert_eq!(e.to_string(), "line 7: test: no such option: --bogus");

        let e = parse(&["-x"]).unwrap_err();
        assert!(matches!(e.kind, ErrorKind::UnknownOption { .. }));
    }

    #[test]
    fn test_removed() {
        let e = parse(&["--gone=3"]).unwrap_err();
        assert_eq!(
            e.kind,
            ErrorKind::RemovedOption {
                option: "--gone".into(),
                removed_in: Version::FC4
            }
        );
        assert_eq!(e.to_string(), "line 7: test: option --gone was removed in FC4");
    }

    #[test]
    fn test_invalid_values() {
        let e = parse(&["--size=big"]).unwrap_err();
        assert_eq!(
            e.kind,
            ErrorKind::InvalidValue {
                option: "--size".into(),
                value: "big".into(),
                reason: "not an integer".into()
            }
        );

        let e = parse(&["--grow=yes"]).unwrap_err();
        assert!(matches!(e.kind, ErrorKind::InvalidValue { .. }));

        let e = parse(&["--size"]).unwrap_err();
        assert!(
            matches!(e.kind, ErrorKind::InvalidValue { ref reason, .. } if reason == "--size requires an argument")
        );
    }

    #[test]
    fn test_required() {
        let table = OptionTable::new()
            .apply(
                &Delta::new().add(OptionRule::string("name").required()),
                Version::FC6,
            )
            .unwrap();
        let no_args: [&str; 0] = [];
        let e = parse_args(&table, "user", &no_args, 12).unwrap_err();
        assert_eq!(e.lineno, 12);
        assert_eq!(
            e.kind,
            ErrorKind::MissingRequiredOption {
                option: "--name".into()
            }
        );
        assert!(parse_args(&table, "user", &["--name=joe"], 12).is_ok());
    }
}
