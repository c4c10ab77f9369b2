//! # rangever
//!
//! A library for parsing, comparing, and range-matching semantic versions.
//!
//! Versions follow the [SemVer](https://semver.org/) grammar with
//! arbitrary-precision numeric components. Version ranges extend SemVer with
//! four notations that all reduce to a single interval representation.
//!
//! ## Versions
//!
//! ```
//! use rangever::prelude::*;
//!
//! let version = Version::parse("1.2.3-alpha.1+build.5").unwrap();
//! assert_eq!("1.2.3-alpha.1+build.5", version.to_string());
//!
//! // precedence follows the SemVer ordering rules
//! let release = Version::parse("1.2.3").unwrap();
//! assert!(version < release);
//! ```
//!
//! ## Ranges
//!
//! Four range syntaxes are accepted; the leading character selects one:
//!
//! | Syntax | Example | Matches |
//! |---|---|---|
//! | Interval | `[1.0.0,2.0.0)` | `1.0.0` ≤ v < `2.0.0`; either bound may be omitted |
//! | Comparison | `>=1.2.3` | everything at or above `1.2.3` |
//! | Caret | `^1.2.3` | `1.2.3` up to (excluding) `2.0.0` |
//! | Glob | `1.2.+` | `1.2.0` up to (excluding) `1.3.0` |
//!
//! Brackets make an interval bound inclusive, parentheses exclusive,
//! independently per side. A caret range extends up to the next version that
//! changes the first non-zero core component, so `^0.1.2` excludes `0.2.0`.
//! The bare globs `*` and `+` match every version.
//!
//! ```
//! use rangever::prelude::*;
//!
//! let range = VersionRange::parse("^1.2.3").unwrap();
//! assert!(range.is_satisfied_by_str("1.9.9").unwrap());
//! assert!(!range.is_satisfied_by_str("2.0.0").unwrap());
//!
//! // every syntax normalizes to the interval form
//! assert_eq!("[1.2.3,2.0.0)", range.to_string());
//! ```
//!
//! Range matching compares only the `major.minor.patch` triple, so a
//! pre-release of an in-range triple satisfies the range.
//!
//! ## Errors
//!
//! Both parsers report malformed input as a [`ParseError`] carrying the exact
//! column of the offending character, which [`ParseError::annotate`] renders
//! as a caret diagnostic:
//!
//! ```
//! use rangever::Version;
//!
//! let err = Version::parse("1.2.?").unwrap_err();
//! println!("{}", err.annotate("1.2.?"));
//! // numeric identifier expected
//! // 1.2.?
//! //     ^
//! ```
#![warn(missing_docs)]

mod error;
mod parse;
mod range;
mod range_parse;
mod stream;
mod version;

pub use crate::error::{ErrorKind, ParseError};
pub use crate::range::VersionRange;
pub use crate::version::{BuildMetadata, CoreVersion, PreRelease, PreReleaseIdentifier, Version};

/// A convenience module appropriate for glob imports (`use rangever::prelude::*;`).
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::BuildMetadata;
    #[doc(no_inline)]
    pub use crate::CoreVersion;
    #[doc(no_inline)]
    pub use crate::ErrorKind;
    #[doc(no_inline)]
    pub use crate::ParseError;
    #[doc(no_inline)]
    pub use crate::PreRelease;
    #[doc(no_inline)]
    pub use crate::PreReleaseIdentifier;
    #[doc(no_inline)]
    pub use crate::Version;
    #[doc(no_inline)]
    pub use crate::VersionRange;
}
