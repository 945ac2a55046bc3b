//! Kickstart directive argument utilities.
//!
//! This crate knows how a kickstart document is cut into directive
//! lines, how each line is split into words, and how a single word is
//! classified as an option switch, an option with an inline value, or a
//! bare positional argument.  It knows nothing about which options any
//! particular directive accepts.
//!
//! The `line` module handles whole documents and lines; the `token`
//! module handles individual arguments.

pub mod line;
pub mod token;

/// Every long option starts with this.
pub const OPTION_PREFIX: &str = "--";
/// Separates an option name from an inline value.
pub const VALUE_SEPARATOR: char = '=';
/// Lines starting with this (after whitespace) are comments.
pub const COMMENT_PREFIX: char = '#';
/// Lines starting with this are section headers or one-line `%` directives.
pub const SECTION_PREFIX: char = '%';
/// Section headers whose body runs up to the next [`SECTION_END`].
///
/// Any other line starting with [`SECTION_PREFIX`], such as `%include`
/// or `%ksappend`, stands alone.
pub const SECTION_HEADERS: &[&str] = &[
    "%packages",
    "%pre",
    "%pre-install",
    "%post",
    "%traceback",
    "%onerror",
    "%addon",
    "%anaconda",
];
/// Closes a section opened by one of [`SECTION_HEADERS`].
pub const SECTION_END: &str = "%end";
