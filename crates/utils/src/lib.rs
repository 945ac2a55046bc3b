//! The inevitable catchall "utils" crate. Only things shared by
//! entrypoints go here; the directive logic lives in the lib crate.

mod tracing_util;
pub use tracing_util::*;

/// Run the body of a `main` function.  An error is printed to stderr
/// with its whole context chain and the process exits with status 1.
pub fn run_main<F>(f: F)
where
    F: FnOnce() -> anyhow::Result<()>,
{
    use std::io::Write as _;

    use owo_colors::OwoColorize;

    if let Err(e) = f() {
        let mut stderr = anstream::stderr();
        // a closed stderr leaves nothing to report to
        let _ = writeln!(stderr, "{}{:#}", "error: ".red(), e);
        std::process::exit(1);
    }
}
