//! Application release versions with build-number tiebreakers

use std::cmp::Ordering;
use std::fmt;

use crate::version::VersionNumber;

/// A release version as published for the app itself, where a build
/// number may augment the version string (`"7.0_101"`: version 7.0,
/// build 101).
///
/// Ordering is by version first; the build number only breaks ties
/// between identical versions. An absent patch or build sorts below a
/// present one, so `7.0` orders before `7.0.0` and stays consistent
/// with equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AppVersion {
    version: VersionNumber,
    build: Option<u64>,
}

impl AppVersion {
    /// Parse a `version` or `version_build` string. Returns `None` when
    /// either half is malformed.
    pub fn make(text: &str) -> Option<AppVersion> {
        let (version_text, build_text) = match text.split_once('_') {
            Some((version, build)) => (version, Some(build)),
            None => (text, None),
        };

        let version = VersionNumber::parse(version_text).ok()?;
        let build = match build_text {
            Some(build) => Some(build.trim().parse().ok()?),
            None => None,
        };

        Some(AppVersion { version, build })
    }

    pub fn version(&self) -> &VersionNumber {
        &self.version
    }

    pub fn build(&self) -> Option<u64> {
        self.build
    }

    pub fn is_newer_than(&self, other: &AppVersion) -> bool {
        self > other
    }
}

impl Ord for AppVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version
            .major()
            .cmp(&other.version.major())
            .then(self.version.minor().cmp(&other.version.minor()))
            .then(
                self.version
                    .patch()
                    .unwrap_or(0)
                    .cmp(&other.version.patch().unwrap_or(0)),
            )
            .then(self.version.patch().cmp(&other.version.patch()))
            .then(self.build.cmp(&other.build))
    }
}

impl PartialOrd for AppVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for AppVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.build {
            Some(build) => write!(f, "{}_{}", self.version, build),
            None => write!(f, "{}", self.version),
        }
    }
}
