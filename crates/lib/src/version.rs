//! Kickstart language versions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The name used on the command line and in config files for the newest version.
pub const DEVEL: &str = "DEVEL";

/// A kickstart language version.
///
/// Every version except the oldest has exactly one predecessor; a
/// directive family that has no revision of its own at some version
/// behaves as it did at the nearest ancestor that has one.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Version {
    /// Fedora Core 3
    FC3,
    /// Fedora Core 4
    FC4,
    /// Fedora Core 5
    FC5,
    /// Fedora Core 6
    FC6,
    /// Fedora 7
    F7,
    /// Fedora 8
    F8,
    /// Fedora 9
    F9,
    /// Red Hat Enterprise Linux 5, branched from Fedora Core 6
    RHEL5,
}

/// Returned when a version name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown kickstart version: {0}")]
pub struct UnknownVersion(pub String);

impl Version {
    /// Every known version, oldest first.
    pub const ALL: [Version; 8] = [
        Version::FC3,
        Version::FC4,
        Version::FC5,
        Version::FC6,
        Version::F7,
        Version::F8,
        Version::F9,
        Version::RHEL5,
    ];

    /// The newest version.
    pub const fn devel() -> Self {
        Version::F9
    }

    /// The version this one was derived from.
    pub const fn predecessor(self) -> Option<Version> {
        match self {
            Version::FC3 => None,
            Version::FC4 => Some(Version::FC3),
            Version::FC5 => Some(Version::FC4),
            Version::FC6 => Some(Version::FC5),
            Version::F7 => Some(Version::FC6),
            Version::F8 => Some(Version::F7),
            Version::F9 => Some(Version::F8),
            Version::RHEL5 => Some(Version::FC6),
        }
    }

    /// This version followed by each of its ancestors, newest first.
    pub fn ancestry(self) -> impl Iterator<Item = Version> {
        std::iter::successors(Some(self), |v| v.predecessor())
    }

    /// The canonical name, e.g. `F9`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Version::FC3 => "FC3",
            Version::FC4 => "FC4",
            Version::FC5 => "FC5",
            Version::FC6 => "FC6",
            Version::F7 => "F7",
            Version::F8 => "F8",
            Version::F9 => "F9",
            Version::RHEL5 => "RHEL5",
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Version {
    type Err = UnknownVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(DEVEL) {
            return Ok(Version::devel());
        }
        Version::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVersion(s.to_owned()))
    }
}

impl TryFrom<String> for Version {
    type Error = UnknownVersion;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(value: Version) -> Self {
        value.as_str().to_owned()
    }
}
