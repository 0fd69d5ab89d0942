//! Composer-style constraint syntax forms and matching
//!
//! A constraint string is recognized by trying a fixed priority list of
//! anchored patterns; the first one that matches decides which predicate
//! family applies. Unrecognized syntax is fail-closed: it parses to
//! nothing and therefore matches nothing.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::version::VersionNumber;

lazy_static! {
    static ref EXACT_RE: Regex = Regex::new(r"^(\d+)\.(\d+)(?:\.(\d+))?$").unwrap();
    static ref WILDCARD_PATCH_RE: Regex = Regex::new(r"^(\d+)\.(\d+)\.\*$").unwrap();
    static ref WILDCARD_MINOR_RE: Regex = Regex::new(r"^(\d+)\.\*$").unwrap();
    static ref CARET_RE: Regex = Regex::new(r"^\^(\d+)\.(\d+)(?:\.(\d+))?$").unwrap();
    static ref TILDE_RE: Regex = Regex::new(r"^~(\d+)\.(\d+)(?:\.(\d+))?$").unwrap();
    static ref GTE_RE: Regex = Regex::new(r"^>=\s*(\d+)\.(\d+)(?:\.(\d+))?$").unwrap();
    static ref GT_RE: Regex = Regex::new(r"^>\s*(\d+)\.(\d+)(?:\.(\d+))?$").unwrap();
    static ref LTE_RE: Regex = Regex::new(r"^<=\s*(\d+)\.(\d+)(?:\.(\d+))?$").unwrap();
    static ref LT_RE: Regex = Regex::new(r"^<\s*(\d+)\.(\d+)(?:\.(\d+))?$").unwrap();
}

/// Anchored constraint syntax forms.
///
/// The order of [`VersionPattern::PRIORITY`] matters: `7.0` must be
/// recognized as an exact version before any comparison form is tried,
/// and `>=` must be tried before `>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionPattern {
    /// `X.Y.*`
    WildcardPatch,
    /// `X.*`
    WildcardMinor,
    /// `X.Y` or `X.Y.Z`
    Exact,
    /// `^X.Y` or `^X.Y.Z`
    Caret,
    /// `~X.Y` or `~X.Y.Z`
    Tilde,
    /// `>=X.Y(.Z)?`
    GreaterThanOrEqual,
    /// `>X.Y(.Z)?`
    GreaterThan,
    /// `<=X.Y(.Z)?`
    LessThanOrEqual,
    /// `<X.Y(.Z)?`
    LessThan,
}

impl VersionPattern {
    /// All syntax forms, in recognition order
    pub const PRIORITY: [VersionPattern; 9] = [
        VersionPattern::WildcardPatch,
        VersionPattern::WildcardMinor,
        VersionPattern::Exact,
        VersionPattern::Caret,
        VersionPattern::Tilde,
        VersionPattern::GreaterThanOrEqual,
        VersionPattern::GreaterThan,
        VersionPattern::LessThanOrEqual,
        VersionPattern::LessThan,
    ];

    fn regex(&self) -> &'static Regex {
        match self {
            VersionPattern::WildcardPatch => &WILDCARD_PATCH_RE,
            VersionPattern::WildcardMinor => &WILDCARD_MINOR_RE,
            VersionPattern::Exact => &EXACT_RE,
            VersionPattern::Caret => &CARET_RE,
            VersionPattern::Tilde => &TILDE_RE,
            VersionPattern::GreaterThanOrEqual => &GTE_RE,
            VersionPattern::GreaterThan => &GT_RE,
            VersionPattern::LessThanOrEqual => &LTE_RE,
            VersionPattern::LessThan => &LT_RE,
        }
    }

    /// Apply this pattern to the whole (trimmed) text and pull out the
    /// version payload.
    ///
    /// A wildcard minor resolves to a concrete `0`; a wildcard or absent
    /// patch resolves to `None`. That asymmetry is deliberate: the minor
    /// is always compared as a number, while an absent patch means
    /// "unknown precision" and gets resolved per comparison.
    pub fn extract(&self, text: &str) -> Option<VersionNumber> {
        let caps = self.regex().captures(text.trim())?;
        let major = caps.get(1)?.as_str().parse().ok()?;

        if let VersionPattern::WildcardMinor = self {
            return Some(VersionNumber::new(major, 0, None));
        }

        let minor = caps.get(2)?.as_str().parse().ok()?;
        let patch = match caps.get(3) {
            Some(m) => Some(m.as_str().parse().ok()?),
            None => None,
        };

        Some(VersionNumber::new(major, minor, patch))
    }
}

/// A recognized version constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// The literal `*`: matches every version
    MatchAll,
    /// Any of the nine versioned syntax forms
    Versioned {
        pattern: VersionPattern,
        version: VersionNumber,
    },
}

impl Constraint {
    /// Recognize a single constraint.
    ///
    /// Returns `None` for syntax none of the patterns accept; callers
    /// treat that as "matches nothing" rather than an error, so a
    /// malformed constraint excludes everything instead of crashing the
    /// caller.
    pub fn parse(text: &str) -> Option<Constraint> {
        let text = text.trim();

        if text == "*" {
            return Some(Constraint::MatchAll);
        }

        for pattern in VersionPattern::PRIORITY {
            if let Some(version) = pattern.extract(text) {
                return Some(Constraint::Versioned { pattern, version });
            }
        }

        None
    }

    /// Check whether a version satisfies this constraint.
    pub fn matches(&self, candidate: &VersionNumber, strict: bool) -> bool {
        let (pattern, version) = match self {
            Constraint::MatchAll => return true,
            Constraint::Versioned { pattern, version } => (pattern, version),
        };

        match pattern {
            VersionPattern::WildcardPatch => candidate.has_same_major_and_minor(version),
            VersionPattern::WildcardMinor => candidate.has_same_major(version),
            VersionPattern::Exact => candidate.is_same_as(version, strict),
            VersionPattern::Caret => candidate.has_newer_minor_or_patch(version, strict),
            VersionPattern::Tilde => {
                if version.patch().is_some() {
                    candidate.has_same_major_minor_and_newer_or_same_patch(version, strict)
                } else {
                    candidate.has_same_major_and_newer_or_same_minor(version)
                }
            }
            VersionPattern::GreaterThanOrEqual => {
                candidate.is_same_as(version, strict) || candidate.is_newer_than(version, strict)
            }
            VersionPattern::GreaterThan => candidate.is_newer_than(version, strict),
            VersionPattern::LessThanOrEqual => {
                candidate.is_same_as(version, strict) || candidate.is_older_than(version, strict)
            }
            VersionPattern::LessThan => candidate.is_older_than(version, strict),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::MatchAll => write!(f, "*"),
            Constraint::Versioned { pattern, version } => match pattern {
                VersionPattern::WildcardPatch => {
                    write!(f, "{}.{}.*", version.major(), version.minor())
                }
                VersionPattern::WildcardMinor => write!(f, "{}.*", version.major()),
                VersionPattern::Exact => write!(f, "{}", version),
                VersionPattern::Caret => write!(f, "^{}", version),
                VersionPattern::Tilde => write!(f, "~{}", version),
                VersionPattern::GreaterThanOrEqual => write!(f, ">={}", version),
                VersionPattern::GreaterThan => write!(f, ">{}", version),
                VersionPattern::LessThanOrEqual => write!(f, "<={}", version),
                VersionPattern::LessThan => write!(f, "<{}", version),
            },
        }
    }
}

/// Pipe-delimited constraint alternatives, as Composer writes them
/// (`"^7.3|^8.0"`, `"^7.4||^8.1"`).
///
/// Alternatives that fail to parse are dropped: they could never match
/// anything, and one bad alternative must not poison the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintSet {
    alternatives: Vec<Constraint>,
}

impl ConstraintSet {
    /// Split a compound constraint on `|` and recognize each alternative.
    pub fn parse(text: &str) -> ConstraintSet {
        let alternatives = text
            .split('|')
            .map(str::trim)
            .filter(|alternative| !alternative.is_empty())
            .filter_map(Constraint::parse)
            .collect();

        ConstraintSet { alternatives }
    }

    /// The recognized alternatives, in source order
    pub fn alternatives(&self) -> &[Constraint] {
        &self.alternatives
    }

    /// True when no alternative was recognized
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    /// Check whether a version satisfies any alternative.
    pub fn matches(&self, candidate: &VersionNumber, strict: bool) -> bool {
        self.alternatives
            .iter()
            .any(|alternative| alternative.matches(candidate, strict))
    }
}

impl fmt::Display for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for alternative in &self.alternatives {
            if !first {
                write!(f, "|")?;
            }
            write!(f, "{}", alternative)?;
            first = false;
        }
        Ok(())
    }
}
