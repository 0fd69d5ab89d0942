//! Ordered collections of PHP version numbers

use crate::constraint::{Constraint, ConstraintSet};
use crate::version::{VersionNumber, VersionParseError};

/// An ordered sequence of versions, filtered by Composer-style
/// constraints.
///
/// Order and duplicates are the caller's: a detection layer that found
/// the same version twice gets it back twice, and `matching` filters
/// without reordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionCollection {
    versions: Vec<VersionNumber>,
}

impl VersionCollection {
    /// Wrap already-parsed versions
    pub fn new(versions: Vec<VersionNumber>) -> Self {
        VersionCollection { versions }
    }

    /// Parse each string through [`VersionNumber::parse`].
    ///
    /// Fails on the first string no version can be extracted from.
    pub fn parse<'a, I>(texts: I) -> Result<Self, VersionParseError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let versions = texts
            .into_iter()
            .map(VersionNumber::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(VersionCollection { versions })
    }

    /// All versions, in insertion order
    pub fn all(&self) -> &[VersionNumber] {
        &self.versions
    }

    /// The first version, when any
    pub fn first(&self) -> Option<&VersionNumber> {
        self.versions.first()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Versions satisfying a single constraint, in their original
    /// relative order.
    ///
    /// Unrecognized constraint syntax yields an empty result, the same
    /// outcome as a constraint nothing satisfies.
    pub fn matching(&self, constraint: &str, strict: bool) -> Vec<VersionNumber> {
        let Some(constraint) = Constraint::parse(constraint) else {
            return Vec::new();
        };

        self.versions
            .iter()
            .filter(|version| constraint.matches(version, strict))
            .copied()
            .collect()
    }

    /// Versions satisfying any alternative of a pipe-delimited compound
    /// constraint (`"^7.3|^8.0"`).
    ///
    /// Results come out in per-alternative order; an element matched by
    /// several alternatives appears once, at its first match.
    pub fn matching_any(&self, constraints: &str, strict: bool) -> Vec<VersionNumber> {
        let set = ConstraintSet::parse(constraints);

        let mut taken = vec![false; self.versions.len()];
        let mut result = Vec::new();

        for alternative in set.alternatives() {
            for (index, version) in self.versions.iter().enumerate() {
                if !taken[index] && alternative.matches(version, strict) {
                    taken[index] = true;
                    result.push(*version);
                }
            }
        }

        result
    }
}

impl FromIterator<VersionNumber> for VersionCollection {
    fn from_iter<I: IntoIterator<Item = VersionNumber>>(iter: I) -> Self {
        VersionCollection {
            versions: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(texts: &[&str]) -> VersionCollection {
        VersionCollection::parse(texts.iter().copied()).unwrap()
    }

    fn texts(versions: &[VersionNumber]) -> Vec<String> {
        versions.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_preserves_order_and_duplicates() {
        let c = collection(&["8.2", "7.4", "7.4", "8.1.2"]);
        assert_eq!(c.len(), 4);
        assert_eq!(c.first(), Some(&VersionNumber::new(8, 2, None)));
        assert_eq!(texts(c.all()), ["8.2", "7.4", "7.4", "8.1.2"]);

        assert!(VersionCollection::parse(["8.2", "OOF"]).is_err());
        assert!(VersionCollection::parse([]).unwrap().is_empty());

        let collected: VersionCollection =
            [VersionNumber::new(8, 2, None), VersionNumber::new(7, 4, None)]
                .into_iter()
                .collect();
        assert_eq!(collected.len(), 2);
    }

    #[test]
    fn test_match_all_is_identity() {
        let c = collection(&["8.2", "8.1", "7.4"]);
        assert_eq!(c.matching("*", false), c.all());
        assert_eq!(c.matching("*", true), c.all());
    }

    #[test]
    fn test_wildcard_patch() {
        let c = collection(&["7.4.10", "7.3.10", "7.3.9"]);
        assert_eq!(texts(&c.matching("7.3.*", false)), ["7.3.10", "7.3.9"]);
    }

    #[test]
    fn test_wildcard_minor() {
        let c = collection(&["8.1.2", "7.4.10", "7.3.9"]);
        assert_eq!(texts(&c.matching("7.*", false)), ["7.4.10", "7.3.9"]);
    }

    #[test]
    fn test_exact() {
        let c = collection(&["7.4.10", "7.4", "7.3.9"]);
        // lenient: the patch is ignored
        assert_eq!(texts(&c.matching("7.4", false)), ["7.4.10", "7.4"]);
        // strict: only the imprecise 7.4 resolves to 7.4.0
        assert_eq!(texts(&c.matching("7.4", true)), ["7.4"]);
        assert_eq!(texts(&c.matching("7.4.10", true)), ["7.4.10"]);
    }

    #[test]
    fn test_caret_imprecise_strict() {
        let c = collection(&["7.4", "7.3", "7.2", "7.1", "7.0"]);
        // imprecise versions count as .0, so all satisfy ^7.0
        assert_eq!(c.matching("^7.0", true), c.all());
    }

    #[test]
    fn test_caret_precise_constraint_strict() {
        let c = collection(&["7.4", "7.3", "7.2", "7.1", "7.0"]);
        // 7.0 resolves to 7.0.0, older than the required 7.0.1
        assert_eq!(texts(&c.matching("^7.0.1", true)), ["7.4", "7.3", "7.2", "7.1"]);
    }

    #[test]
    fn test_caret_excludes_other_majors() {
        let c = collection(&["8.1.2", "8.0.0", "7.4.10"]);
        assert_eq!(texts(&c.matching("^8.0", true)), ["8.1.2", "8.0.0"]);
    }

    #[test]
    fn test_tilde_with_patch_pins_major_and_minor() {
        let c = collection(&["7.4.10", "7.3.10", "7.2.10", "7.1.10", "7.0.10"]);
        assert_eq!(texts(&c.matching("~7.0.1", true)), ["7.0.10"]);
    }

    #[test]
    fn test_tilde_without_patch_pins_major() {
        let c = collection(&["8.0.0", "7.4.10", "7.2.0", "7.1.33"]);
        assert_eq!(texts(&c.matching("~7.2", true)), ["7.4.10", "7.2.0"]);
    }

    #[test]
    fn test_comparison_operators() {
        let c = collection(&["8.1.2", "8.0.0", "7.4.33", "7.4.0"]);

        assert_eq!(texts(&c.matching(">=8.0", true)), ["8.1.2", "8.0.0"]);
        assert_eq!(texts(&c.matching(">8.0", true)), ["8.1.2"]);
        assert_eq!(texts(&c.matching("<=7.4", true)), ["7.4.0"]);
        assert_eq!(texts(&c.matching("<7.4.33", true)), ["7.4.0"]);
        assert_eq!(texts(&c.matching(">7.4.33", true)), ["8.1.2", "8.0.0"]);
    }

    #[test]
    fn test_lenient_imprecise_satisfies_patch_level() {
        // An installed 8.1 with unknown patch passes a precise floor in
        // lenient mode and fails it in strict mode.
        let c = collection(&["8.1", "8.0"]);
        assert_eq!(texts(&c.matching(">=8.1.10", false)), ["8.1"]);
        assert_eq!(texts(&c.matching(">=8.1.10", true)), Vec::<String>::new());
    }

    #[test]
    fn test_unrecognized_constraint_is_empty() {
        let c = collection(&["8.2", "8.1"]);
        assert!(c.matching("banana", false).is_empty());
        assert!(c.matching("", false).is_empty());
        assert!(c.matching(">=x", true).is_empty());
    }

    #[test]
    fn test_matching_preserves_duplicates() {
        let c = collection(&["7.4.10", "7.4.10", "7.3.9"]);
        assert_eq!(texts(&c.matching("7.4.*", false)), ["7.4.10", "7.4.10"]);
    }

    #[test]
    fn test_matching_any_unions_alternatives() {
        let c = collection(&["8.1", "8.0", "7.4", "7.3", "7.2"]);
        let matched = c.matching_any("^7.3|^8.0", true);
        // per-alternative order: the ^7.3 matches first, then ^8.0
        assert_eq!(texts(&matched), ["7.4", "7.3", "8.1", "8.0"]);
    }

    #[test]
    fn test_matching_any_deduplicates_overlap() {
        let c = collection(&["7.4", "7.3"]);
        // both alternatives accept 7.4; it appears once, at its first match
        assert_eq!(texts(&c.matching_any("^7.3|7.4", true)), ["7.4", "7.3"]);
    }

    #[test]
    fn test_matching_any_single_alternative() {
        let c = collection(&["8.1", "7.4"]);
        assert_eq!(c.matching_any("^8.0", true), c.matching("^8.0", true));
        assert!(c.matching_any("nope|also-nope", true).is_empty());
    }
}
