//! Command line argument definitions.

use camino::Utf8PathBuf;
use clap::Parser;
use ksdirective_lib::Version;

/// Parse, validate and render versioned kickstart directives
#[derive(Debug, Parser, PartialEq, Eq)]
#[clap(name = "ksdirective")]
pub(crate) struct Opt {
    #[clap(subcommand)]
    pub(crate) cmd: Cmd,
}

/// Options shared by every command that reads a document.
#[derive(Debug, clap::Args, PartialEq, Eq)]
pub(crate) struct DocumentOpts {
    /// Path to a kickstart file, or `-` for standard input
    pub(crate) file: Utf8PathBuf,

    /// Kickstart version to parse as, e.g. `F8`, `RHEL5` or `DEVEL`
    #[clap(long)]
    pub(crate) version: Option<Version>,
}

#[derive(Debug, clap::Subcommand, PartialEq, Eq)]
pub(crate) enum Cmd {
    /// Check that every directive in a document is valid
    ///
    /// Prints one `line N: ...` diagnostic per rejected directive and
    /// exits non-zero if there were any.
    Validate {
        #[clap(flatten)]
        doc: DocumentOpts,

        /// Report every rejected line rather than stopping at the first
        #[clap(long)]
        keep_going: bool,
    },

    /// Print a document in canonical form
    Render(DocumentOpts),

    /// Print the parsed records of a document as JSON
    Dump(DocumentOpts),

    /// Print the options a directive accepts
    Options {
        /// Directive keyword, e.g. `part`
        directive: String,

        /// Kickstart version
        #[clap(long)]
        version: Option<Version>,

        /// Print JSON instead of text
        #[clap(long)]
        json: bool,
    },

    /// Print the options added and removed between two versions
    Verdiff {
        /// Older version
        #[clap(long)]
        from: Version,

        /// Newer version
        #[clap(long)]
        to: Version,

        /// Print JSON instead of text
        #[clap(long)]
        json: bool,
    },
}
