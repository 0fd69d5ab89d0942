//! PHP version parsing and Composer-style constraint matching
//!
//! This crate parses version numbers out of the free-form strings that
//! local PHP tooling produces (`php -v` banners, Homebrew formula names
//! like `php@8.2`, `php-config --version` output) and matches them
//! against Composer-style constraints (`7.4`, `7.4.*`, `^7.2`, `~7.2.1`,
//! `>=7.0`, `*`, and pipe-delimited alternatives such as `^7.4|^8.0`).
//!
//! Everything here is a pure value type: no I/O, no shared state, no
//! process execution. Callers feed in strings they scraped elsewhere and
//! get back parsed versions and filtered collections.

pub mod constraint;
mod app_version;
mod collection;
mod version;

pub use app_version::AppVersion;
pub use collection::VersionCollection;
pub use constraint::{Constraint, ConstraintSet, VersionPattern};
pub use version::{VersionNumber, VersionParseError};
