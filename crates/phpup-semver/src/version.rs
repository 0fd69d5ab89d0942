//! PHP version numbers and strict/lenient comparison predicates

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::constraint::VersionPattern;

/// Error type for version parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No version number found in \"{0}\"")]
pub struct VersionParseError(pub String);

/// Patch fallback for imprecise versions in lenient comparisons.
/// An installed version that omits its patch is assumed to satisfy any
/// patch-level requirement unless strict mode says otherwise.
const IMPRECISE_PATCH: u32 = 999;

lazy_static! {
    // First X.Y(.Z)? shaped substring inside arbitrary text
    static ref EXTRACT_RE: Regex = Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").unwrap();
}

/// A parsed PHP version number.
///
/// `patch` is `None` when the source string carried no third component
/// (or a wildcard in that position). Comparisons resolve the absent
/// patch through [`VersionNumber::effective_patch`]: `0` in strict mode,
/// the other side's patch (or 999) in lenient mode.
///
/// A wildcard in the minor position resolves to a concrete `0` instead,
/// because predicates that inspect the minor need a real number to
/// compare against. Only the patch carries "unknown precision".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionNumber {
    major: u32,
    minor: u32,
    patch: Option<u32>,
}

impl VersionNumber {
    /// Create a version from its components
    pub fn new(major: u32, minor: u32, patch: Option<u32>) -> Self {
        VersionNumber {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version out of free-form text.
    ///
    /// Extracts the first `X.Y(.Z)?` shaped substring, so banners like
    /// `"PHP 8.2.0-dev"` or `"7.4.33RC5-dev"` work. Fails when the text
    /// contains no version at all.
    pub fn parse(text: &str) -> Result<VersionNumber, VersionParseError> {
        extract(text)
            .and_then(|candidate| VersionNumber::make(candidate, VersionPattern::Exact))
            .ok_or_else(|| VersionParseError(text.to_string()))
    }

    /// Non-throwing anchored parse against one specific syntax form.
    ///
    /// Unlike [`VersionNumber::parse`] this does not search inside the
    /// text; the whole (trimmed) input must match the pattern.
    pub fn make(text: &str, pattern: VersionPattern) -> Option<VersionNumber> {
        pattern.extract(text)
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn patch(&self) -> Option<u32> {
        self.patch
    }

    /// Resolve the patch used in comparisons.
    ///
    /// Returns the concrete patch when present. Otherwise: `0` in strict
    /// mode; in lenient mode the reference version's concrete patch, or
    /// 999 when the reference is absent or imprecise itself.
    pub fn effective_patch(&self, strict: bool, reference: Option<&VersionNumber>) -> u32 {
        match self.patch {
            Some(patch) => patch,
            None if strict => 0,
            None => reference
                .and_then(|version| version.patch)
                .unwrap_or(IMPRECISE_PATCH),
        }
    }

    /// Major equality only
    pub fn has_same_major(&self, other: &VersionNumber) -> bool {
        self.major == other.major
    }

    /// Major and minor equality only
    pub fn has_same_major_and_minor(&self, other: &VersionNumber) -> bool {
        self.major == other.major && self.minor == other.minor
    }

    /// Major and minor must match; the patch only matters in strict mode,
    /// where an absent patch counts as `.0`.
    pub fn is_same_as(&self, other: &VersionNumber, strict: bool) -> bool {
        self.has_same_major_and_minor(other)
            && (!strict || self.effective_patch(true, None) == other.effective_patch(true, None))
    }

    /// Lexicographic greater-than over (major, minor, effective patch)
    pub fn is_newer_than(&self, other: &VersionNumber, strict: bool) -> bool {
        if self.major != other.major {
            return self.major > other.major;
        }
        if self.minor != other.minor {
            return self.minor > other.minor;
        }
        self.effective_patch(strict, Some(other)) > other.effective_patch(strict, Some(self))
    }

    /// Lexicographic less-than over (major, minor, effective patch)
    pub fn is_older_than(&self, other: &VersionNumber, strict: bool) -> bool {
        if self.major != other.major {
            return self.major < other.major;
        }
        if self.minor != other.minor {
            return self.minor < other.minor;
        }
        self.effective_patch(strict, Some(other)) < other.effective_patch(strict, Some(self))
    }

    /// Caret semantics: same major, and either a newer minor or the same
    /// minor with an effective patch at or above the constraint's.
    pub fn has_newer_minor_or_patch(&self, constraint: &VersionNumber, strict: bool) -> bool {
        self.major == constraint.major
            && (self.minor > constraint.minor
                || (self.minor == constraint.minor
                    && self.effective_patch(strict, Some(constraint))
                        >= constraint.effective_patch(strict, Some(self))))
    }

    /// Tilde-with-patch semantics: major and minor pinned, effective
    /// patch at or above the constraint's.
    pub fn has_same_major_minor_and_newer_or_same_patch(
        &self,
        constraint: &VersionNumber,
        strict: bool,
    ) -> bool {
        self.has_same_major_and_minor(constraint)
            && self.effective_patch(strict, Some(constraint))
                >= constraint.effective_patch(strict, Some(self))
    }

    /// Tilde-without-patch semantics: major pinned, minor at or above
    /// the constraint's.
    pub fn has_same_major_and_newer_or_same_minor(&self, constraint: &VersionNumber) -> bool {
        self.major == constraint.major && self.minor >= constraint.minor
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.patch {
            Some(patch) => write!(f, "{}.{}.{}", self.major, self.minor, patch),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

impl FromStr for VersionNumber {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionNumber::parse(s)
    }
}

/// Find the first version-shaped substring inside arbitrary text
fn extract(text: &str) -> Option<&str> {
    EXTRACT_RE.find(text).map(|m| m.as_str())
}
