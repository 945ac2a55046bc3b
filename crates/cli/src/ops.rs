//! Implementations of each subcommand.

use std::collections::BTreeMap;
use std::io::{Read as _, Write};

use anyhow::{Context, Result};
use camino::Utf8Path;
use fn_error_context::context;
use ksdirective_lib::lineage::VersionDiff;
use ksdirective_lib::{Catalog, Family, Handler, Version};

use crate::cli::DocumentOpts;
use crate::config::Config;

#[context("Reading {path}")]
fn read_document(path: &Utf8Path) -> Result<String> {
    if path.as_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Parse a whole document, failing on the first rejected line.
fn load(doc: &DocumentOpts, config: &Config) -> Result<Handler> {
    let version = config.version(doc.version);
    let text = read_document(&doc.file)?;
    let mut handler = Handler::new(version)?;
    handler
        .read_str(&text)
        .with_context(|| format!("Parsing {} as {version}", doc.file))?;
    Ok(handler)
}

pub(crate) fn validate(
    out: &mut impl Write,
    doc: &DocumentOpts,
    keep_going: bool,
    config: &Config,
) -> Result<()> {
    let version = config.version(doc.version);
    let text = read_document(&doc.file)?;
    let mut handler = Handler::new(version)?;
    let errors = if keep_going || config.keep_going {
        handler.read_str_collect(&text)
    } else {
        handler.read_str(&text).err().into_iter().collect()
    };
    for e in &errors {
        writeln!(out, "{e}")?;
    }
    if !errors.is_empty() {
        out.flush()?;
        anyhow::bail!("{}: {} invalid directive(s)", doc.file, errors.len());
    }
    tracing::debug!("{}: {} directive(s) valid for {version}", doc.file, handler.len());
    Ok(())
}

pub(crate) fn render(out: &mut impl Write, doc: &DocumentOpts, config: &Config) -> Result<()> {
    let handler = load(doc, config)?;
    out.write_all(handler.render().as_bytes())?;
    Ok(())
}

pub(crate) fn dump(out: &mut impl Write, doc: &DocumentOpts, config: &Config) -> Result<()> {
    let handler = load(doc, config)?;
    serde_json::to_writer_pretty(&mut *out, &handler)?;
    writeln!(out)?;
    Ok(())
}

pub(crate) fn options(
    out: &mut impl Write,
    directive: &str,
    version: Version,
    json: bool,
) -> Result<()> {
    let family = Family::from_keyword(directive)
        .with_context(|| format!("Unknown directive: {directive}"))?;
    let catalog = Catalog::new()?;
    let schema = catalog
        .schema(family, version)
        .with_context(|| format!("{family} does not exist in {version}"))?;
    let rules: Vec<_> = schema.table().rules().map(|r| r.summary()).collect();

    if json {
        serde_json::to_writer_pretty(&mut *out, &rules)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{family} ({version}, from {})", schema.version())?;
    for positional in schema.positionals() {
        writeln!(out, "  <{}>", positional.what)?;
    }
    for rule in rules {
        let mut line = format!("  --{} {}", rule.name, rule.kind);
        for alias in &rule.aliases {
            line.push_str(&format!(" (--{alias})"));
        }
        if rule.field != rule.name {
            line.push_str(&format!(" -> {}", rule.field));
        }
        if rule.required {
            line.push_str(" [required]");
        }
        if rule.deprecated {
            line.push_str(" [deprecated]");
        }
        writeln!(out, "{line}")?;
    }
    let mut removed: Vec<_> = schema.table().removed().collect();
    removed.sort_by_key(|(spelling, r)| (r.version, *spelling));
    for (spelling, r) in removed {
        writeln!(out, "  --{spelling} removed in {}", r.version)?;
    }
    Ok(())
}

pub(crate) fn verdiff(out: &mut impl Write, from: Version, to: Version, json: bool) -> Result<()> {
    let catalog = Catalog::new()?;
    let diffs: Vec<(Family, VersionDiff)> = Family::ALL
        .into_iter()
        .map(|f| (f, catalog.lineage(f).diff(from, to)))
        .collect();

    if json {
        let map: BTreeMap<&str, &VersionDiff> =
            diffs.iter().map(|(f, d)| (f.keyword(), d)).collect();
        serde_json::to_writer_pretty(&mut *out, &map)?;
        writeln!(out)?;
        return Ok(());
    }

    for (family, diff) in diffs {
        if diff.is_empty() {
            writeln!(out, "{family}: unchanged")?;
            continue;
        }
        writeln!(out, "{family}:")?;
        for name in diff.added {
            writeln!(out, "  + --{name}")?;
        }
        for name in diff.removed {
            writeln!(out, "  - --{name}")?;
        }
    }
    Ok(())
}
