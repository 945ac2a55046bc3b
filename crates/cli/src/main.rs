//! The `ksdirective` command line tool.
//!
//! Reads kickstart documents and validates, re-renders or dumps their
//! `part` and `user` directives for a chosen kickstart version.  If
//! `KSDIRECTIVE_CONFIG` names a TOML file, its `version` and
//! `keep_going` keys provide defaults for the command line.

use std::io::Write as _;

use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod ops;

use cli::{Cmd, Opt};
use config::Config;

fn run() -> Result<()> {
    ksdirective_utils::initialize_tracing();
    tracing::trace!("starting {}", env!("CARGO_PKG_NAME"));

    let opt = Opt::parse();
    let config = Config::load()?;
    let mut out = std::io::stdout().lock();
    match opt.cmd {
        Cmd::Validate { doc, keep_going } => ops::validate(&mut out, &doc, keep_going, &config)?,
        Cmd::Render(doc) => ops::render(&mut out, &doc, &config)?,
        Cmd::Dump(doc) => ops::dump(&mut out, &doc, &config)?,
        Cmd::Options {
            directive,
            version,
            json,
        } => ops::options(&mut out, &directive, config.version(version), json)?,
        Cmd::Verdiff { from, to, json } => ops::verdiff(&mut out, from, to, json)?,
    }
    out.flush()?;
    Ok(())
}

fn main() {
    ksdirective_utils::run_main(run)
}
