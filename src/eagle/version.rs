//! EAGLE toolchain version numbers.
//!
//! Versions are strict dotted numbers: `MAJOR.MINOR[.PATCH]`, optionally
//! followed by a pre-release tag `aN` or `bN` (`6.0b3`). A missing patch is
//! zero, so `6.2` and `6.2.0` compare equal, as do `2.0` and `2.00`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::EagleError;

/// Pre-release stage marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreRelease {
    /// Alpha (`a`).
    Alpha(u64),
    /// Beta (`b`).
    Beta(u64),
}

/// A parsed EAGLE version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EagleVersion {
    major: u64,
    minor: u64,
    patch: u64,
    pre: Option<PreRelease>,
}

impl EagleVersion {
    /// Creates a release version.
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre: None,
        }
    }

    /// Version assumed when nothing is requested and nothing newer is installed.
    pub const BASELINE: Self = Self::new(1, 0, 0);

    /// Parses a version string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidVersion` if the string is not a strict dotted version.
    pub fn parse(s: &str) -> Result<Self, EagleError> {
        let invalid = || EagleError::invalid_version(s);

        let (numbers, pre) = match s.find(['a', 'b']) {
            Some(idx) => {
                let (numbers, tag) = s.split_at(idx);
                let n = parse_number(&tag[1..]).ok_or_else(invalid)?;
                let pre = if tag.starts_with('a') {
                    PreRelease::Alpha(n)
                } else {
                    PreRelease::Beta(n)
                };
                (numbers, Some(pre))
            }
            None => (s, None),
        };

        let parts: Vec<&str> = numbers.split('.').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(invalid());
        }
        let major = parse_number(parts[0]).ok_or_else(invalid)?;
        let minor = parse_number(parts[1]).ok_or_else(invalid)?;
        let patch = match parts.get(2) {
            Some(p) => parse_number(p).ok_or_else(invalid)?,
            None => 0,
        };

        Ok(Self {
            major,
            minor,
            patch,
            pre,
        })
    }

    /// Returns the patch component (zero when omitted).
    #[must_use]
    pub const fn patch(&self) -> u64 {
        self.patch
    }
}

fn parse_number(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl Ord for EagleVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (self.pre, other.pre) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(&b),
            })
    }
}

impl PartialOrd for EagleVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for EagleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if self.patch != 0 {
            write!(f, ".{}", self.patch)?;
        }
        match self.pre {
            Some(PreRelease::Alpha(n)) => write!(f, "a{n}"),
            Some(PreRelease::Beta(n)) => write!(f, "b{n}"),
            None => Ok(()),
        }
    }
}

impl FromStr for EagleVersion {
    type Err = EagleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parses an optional version request, where an empty string means "latest".
///
/// # Errors
///
/// Returns `InvalidVersion` for a non-empty string that does not parse.
pub fn parse_request(s: &str) -> Result<Option<EagleVersion>, EagleError> {
    let s = s.trim();
    if s.is_empty() {
        Ok(None)
    } else {
        EagleVersion::parse(s).map(Some)
    }
}
