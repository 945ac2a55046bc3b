//! `user`: local user accounts.

use crate::lineage::{Declaration, Revision};
use crate::rule::OptionRule;
use crate::table::Delta;
use crate::version::Version;

pub(super) fn declaration() -> Declaration {
    let fc6 = Delta::new()
        .add(OptionRule::list("groups"))
        .add(OptionRule::string("homedir"))
        .add(OptionRule::string("name").required())
        .add(OptionRule::string("password"))
        .add(OptionRule::flag("iscrypted").dest("is_crypted"))
        .add(OptionRule::string("shell"))
        .add(OptionRule::int("uid"));

    let f8 = Delta::new().add(OptionRule::flag("lock")).add(
        OptionRule::negated_flag("plaintext")
            .dest("is_crypted")
            .parse_only(),
    );

    Declaration {
        keyword: "user",
        positionals: &[],
        revisions: vec![
            Revision::new(Version::FC6, fc6),
            Revision::new(Version::F8, f8),
        ],
    }
}
