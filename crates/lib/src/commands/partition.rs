//! `part` / `partition`: disk partition requests.

use crate::lineage::{Declaration, Revision};
use crate::rule::OptionRule;
use crate::schema::PositionalField;
use crate::table::Delta;
use crate::version::Version;

const POSITIONALS: &[PositionalField] = &[PositionalField {
    field: "mountpoint",
    what: "mount point",
}];

/// `/dev/sda1` and `sda1` name the same partition.
fn strip_dev(value: &str) -> String {
    value.strip_prefix("/dev/").unwrap_or(value).to_owned()
}

fn encryption() -> [OptionRule; 2] {
    [
        OptionRule::flag("encrypted"),
        OptionRule::string("passphrase")
            .quoted()
            .governed_by("encrypted"),
    ]
}

pub(super) fn declaration() -> Declaration {
    let fc3 = Delta::new()
        .add(OptionRule::flag("active"))
        .add(OptionRule::flag("asprimary").dest("prim_only"))
        .add(OptionRule::int("end"))
        .add(OptionRule::string("fstype").alias("type").quoted())
        .add(OptionRule::flag("grow"))
        .add(OptionRule::int("maxsize").dest("max_size_mb").positive())
        .add(OptionRule::negated_flag("noformat").dest("format"))
        .add(OptionRule::string("onbiosdisk"))
        .add(OptionRule::string("ondisk").alias("ondrive").dest("disk"))
        .add(OptionRule::transform("onpart", strip_dev).alias("usepart"))
        .add(OptionRule::flag("recommended"))
        .add(OptionRule::int("size"))
        .add(OptionRule::int("start"));

    let fc4 = Delta::new()
        .add(OptionRule::int("bytes-per-inode").dest("bytes_per_inode"))
        .add(OptionRule::string("fsoptions").dest("fsopts").quoted())
        .add(OptionRule::string("label"));

    let rhel5 = encryption().into_iter().fold(Delta::new(), Delta::add);

    // F9 derives from FC4, not RHEL5, so it adds encryption itself.
    let f9 = encryption().into_iter().fold(
        Delta::new()
            .remove("bytes-per-inode")
            .add(OptionRule::string("fsprofile").quoted()),
        Delta::add,
    );

    Declaration {
        keyword: "part",
        positionals: POSITIONALS,
        revisions: vec![
            Revision::new(Version::FC3, fc3),
            Revision::new(Version::FC4, fc4),
            Revision::new(Version::RHEL5, rhel5),
            Revision::new(Version::F9, f9),
        ],
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::errors::{ErrorKind, RecordError};
    use crate::lineage::Lineage;
    use crate::record::Record;
    use crate::schema::Schema;

    fn schema(version: Version) -> Arc<Schema> {
        let lineage = Lineage::build(declaration()).unwrap();
        Arc::clone(lineage.schema(version).unwrap())
    }

    fn parse(version: Version, args: &[&str]) -> Record {
        schema(version).parse("part", args, 1).unwrap()
    }

    #[test]
    fn test_strip_dev() {
        assert_eq!(strip_dev("/dev/sda1"), "sda1");
        assert_eq!(strip_dev("sda1"), "sda1");
        assert_eq!(strip_dev("/devices/x"), "/devices/x");
    }

    #[test]
    fn test_ondisk_size() {
        let r = parse(Version::FC4, &["--ondisk=sda", "--size=500", "/"]);
        assert_eq!(r.get_str("disk").unwrap(), "sda");
        assert_eq!(r.get_int("size").unwrap(), 500);
        assert_eq!(r.get_str("mountpoint").unwrap(), "/");
        assert_eq!(r.to_string(), "part / --ondisk=sda --size=500");
    }

    #[test]
    fn test_onpart() {
        let r = parse(Version::F9, &["--onpart=/dev/sda1", "/boot"]);
        assert_eq!(r.get_str("onpart").unwrap(), "sda1");
        let r = parse(Version::FC3, &["--usepart", "sdb2", "/boot"]);
        assert_eq!(r.to_string(), "part /boot --onpart=sdb2");
    }

    #[test]
    fn test_defaults_render_nothing() {
        for version in Version::ALL {
            let r = parse(version, &["swap"]);
            assert_eq!(r.to_string(), "part swap");
        }
    }

    #[test]
    fn test_order_is_declaration_order() {
        let a = parse(
            Version::FC4,
            &["--label=root", "--grow", "--fstype=ext3", "--active", "/"],
        );
        let b = parse(
            Version::FC4,
            &["--active", "--fstype", "ext3", "/", "--label", "root", "--grow"],
        );
        assert_eq!(a, b);
        assert_eq!(
            a.to_string(),
            r#"part / --active --fstype="ext3" --grow --label=root"#
        );
    }

    #[test]
    fn test_every_option_fc4() {
        let r = parse(
            Version::FC4,
            &[
                "/var",
                "--active",
                "--asprimary",
                "--end=9",
                "--type=xfs",
                "--grow",
                "--maxsize=1000",
                "--noformat",
                "--onbiosdisk=80",
                "--ondrive=hda",
                "--onpart=hda3",
                "--recommended",
                "--size=10",
                "--start=2",
                "--bytes-per-inode=2048",
                "--fsoptions=noatime,ro",
                "--label=var",
            ],
        );
        assert_eq!(
            r.to_string(),
            concat!(
                "part /var --active --asprimary --end=9 --fstype=\"xfs\" --grow",
                " --maxsize=1000 --noformat --onbiosdisk=80 --ondisk=hda --onpart=hda3",
                " --recommended --size=10 --start=2 --bytes-per-inode=2048",
                " --fsoptions=\"noatime,ro\" --label=var"
            )
        );
    }

    #[test]
    fn test_maxsize() {
        let e = schema(Version::FC3)
            .parse("part", &["--maxsize=-1", "/"], 3)
            .unwrap_err();
        assert!(matches!(e.kind, ErrorKind::InvalidValue { .. }));
        let r = parse(Version::FC3, &["--maxsize=0", "/"]);
        assert_eq!(r.to_string(), "part /");
    }

    #[test]
    fn test_zero_is_unset() {
        assert_eq!(
            parse(Version::FC3, &["--size=0", "/"]),
            parse(Version::FC3, &["/"])
        );
    }

    #[test]
    fn test_mountpoint_required() {
        let s = schema(Version::FC3);
        for args in [&[][..], &["/", "/home"][..]] {
            let e = s.parse("partition", args, 4).unwrap_err();
            assert_eq!(e.keyword, "partition");
            assert!(matches!(
                e.kind,
                ErrorKind::PositionalArity {
                    expected: 1,
                    what: "mount point",
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_bytes_per_inode_removed_in_f9() {
        let e = schema(Version::F9)
            .parse("part", &["--bytes-per-inode=2048", "/"], 5)
            .unwrap_err();
        assert_eq!(
            e.kind,
            ErrorKind::RemovedOption {
                option: "--bytes-per-inode".into(),
                removed_in: Version::F9
            }
        );
        // still accepted where the lineage does not pass through F9
        let r = parse(Version::RHEL5, &["--bytes-per-inode=2048", "/"]);
        assert_eq!(r.get_int("bytes_per_inode").unwrap(), 2048);

        let r = parse(Version::F9, &["/"]);
        assert_eq!(
            r.get("bytes_per_inode").unwrap_err(),
            RecordError::RemovedField {
                keyword: "part",
                field: "bytes_per_inode".into(),
                removed_in: Version::F9
            }
        );
        assert!(matches!(
            r.get("nonsense"),
            Err(RecordError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_unknown_before_introduction() {
        let e = schema(Version::FC3)
            .parse("part", &["--label=x", "/"], 1)
            .unwrap_err();
        assert!(matches!(e.kind, ErrorKind::UnknownOption { .. }));
    }

    #[test]
    fn test_encryption_suffixes() {
        let args = &["--encrypted", "--passphrase=secret", "--label=l", "/"];
        let rhel5 = parse(Version::RHEL5, args);
        assert_eq!(
            rhel5.to_string(),
            r#"part / --label=l --encrypted --passphrase="secret""#
        );
        let f9 = parse(Version::F9, &["--fsprofile=big", "--encrypted", "/"]);
        assert_eq!(f9.to_string(), r#"part / --fsprofile="big" --encrypted"#);

        // the passphrase is dropped unless encryption is on
        let r = parse(Version::F9, &["--passphrase=secret", "/"]);
        assert_eq!(r.get_str("passphrase").unwrap(), "secret");
        assert_eq!(r.to_string(), "part /");
    }

    #[test]
    fn test_predecessor_prefix() {
        let args = &["--size=1", "--label=x", "/"];
        let fc4 = parse(Version::FC4, args).to_string();
        let f7 = parse(Version::F7, args).to_string();
        assert_eq!(fc4, f7);
        let mut rhel5 = parse(Version::RHEL5, args);
        rhel5.set("encrypted", true).unwrap();
        let rhel5 = rhel5.to_string();
        assert!(rhel5.starts_with(&fc4));
        assert_eq!(&rhel5[fc4.len()..], " --encrypted");
    }

    #[test]
    fn test_set_checks_kind() {
        let mut r = parse(Version::FC3, &["/"]);
        assert!(matches!(
            r.set("size", "big"),
            Err(RecordError::KindMismatch { .. })
        ));
        r.set("size", 20i64).unwrap();
        r.set("format", false).unwrap();
        assert_eq!(r.to_string(), "part / --noformat --size=20");
    }
}
