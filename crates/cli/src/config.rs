//! Optional configuration file.

use anyhow::{Context, Result};
use camino::Utf8Path;
use fn_error_context::context;
use ksdirective_lib::Version;
use serde::Deserialize;

/// Names a TOML file providing defaults for the command line.
pub(crate) const CONFIG_VAR: &str = "KSDIRECTIVE_CONFIG";

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    /// Kickstart version used when `--version` is not given.
    #[serde(default)]
    pub(crate) version: Option<Version>,
    /// Behave as if `validate --keep-going` was always given.
    #[serde(default)]
    pub(crate) keep_going: bool,
}

impl Config {
    /// Load the file named by [`CONFIG_VAR`], or the defaults if it is unset.
    #[context("Loading config")]
    pub(crate) fn load() -> Result<Self> {
        let Some(path) = std::env::var_os(CONFIG_VAR) else {
            return Ok(Self::default());
        };
        let path = Utf8Path::from_path(std::path::Path::new(&path))
            .with_context(|| format!("{CONFIG_VAR} is not valid UTF-8"))?;
        Self::load_from(path)
    }

    #[context("Reading {path}")]
    pub(crate) fn load_from(path: &Utf8Path) -> Result<Self> {
        let buf = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&buf)?;
        tracing::debug!("loaded {path}: {config:?}");
        Ok(config)
    }

    /// The version to use given an optional command line override.
    pub(crate) fn version(&self, cli: Option<Version>) -> Version {
        cli.or(self.version).unwrap_or_else(Version::devel)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use camino::Utf8PathBuf;
    use indoc::indoc;

    use super::*;

    fn write(contents: &str) -> (tempfile::NamedTempFile, Utf8PathBuf) {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        let path = Utf8PathBuf::try_from(f.path().to_path_buf()).unwrap();
        (f, path)
    }

    #[test]
    fn test_load() {
        let (_f, path) = write(indoc! {r#"
            version = "rhel5"
            keep_going = true
        "#});
        let c = Config::load_from(&path).unwrap();
        assert_eq!(
            c,
            Config {
                version: Some(Version::RHEL5),
                keep_going: true
            }
        );
        assert_eq!(c.version(None), Version::RHEL5);
        assert_eq!(c.version(Some(Version::F7)), Version::F7);
    }

    #[test]
    fn test_empty_is_default() {
        let (_f, path) = write("");
        let c = Config::load_from(&path).unwrap();
        assert_eq!(c, Config::default());
        assert_eq!(c.version(None), Version::F9);
    }

    #[test]
    fn test_rejects_unknown() {
        let (_f, path) = write("verison = \"F8\"\n");
        let e = Config::load_from(&path).unwrap_err();
        assert!(format!("{e:#}").contains("unknown field"));

        let (_f, path) = write("version = \"F10\"\n");
        let e = Config::load_from(&path).unwrap_err();
        assert!(format!("{e:#}").contains("unknown kickstart version"));
    }
}
