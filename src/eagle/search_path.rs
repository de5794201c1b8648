//! Library search path construction.
//!
//! Every installed version is a candidate; the requested version only
//! decides the order. The exact version comes first if installed, then
//! newer versions ascending, then older versions descending, and the remote
//! repository last. For a request of 3.0:
//!
//! ```text
//! [1.0, 2.0, 3.0, 4.0, 5.0]  ->  [3.0, 4.0, 5.0, 2.0, 1.0, remote]
//! [2.0, 2.5, 3.5]            ->  [3.5, 2.5, 2.0, remote]
//! ```

use std::fmt;
use std::path::PathBuf;

use super::{EagleVersion, Installation};

/// Public repository tried after every local installation.
pub const DEFAULT_REMOTE_URL: &str =
    "https://raw.github.com/sparkfun/SparkFun-Eagle-Libraries/master/";

/// Library file extension.
pub const LIBRARY_EXTENSION: &str = "lbr";

/// One place a library file may be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// A local installation's library directory.
    Local {
        /// Version of the installation.
        version: EagleVersion,
        /// Directory holding `.lbr` files.
        dir: PathBuf,
    },
    /// A remote directory URL, ending in `/`.
    Remote {
        /// Base URL.
        base_url: String,
    },
}

impl Candidate {
    /// Returns the local file path for `library_name`, if this is a local candidate.
    #[must_use]
    pub fn local_file(&self, library_name: &str) -> Option<PathBuf> {
        match self {
            Self::Local { dir, .. } => {
                Some(dir.join(format!("{library_name}.{LIBRARY_EXTENSION}")))
            }
            Self::Remote { .. } => None,
        }
    }

    /// Returns the URL for `library_name`, if this is a remote candidate.
    #[must_use]
    pub fn remote_url(&self, library_name: &str) -> Option<String> {
        match self {
            Self::Local { .. } => None,
            Self::Remote { base_url } => Some(format!("{base_url}{library_name}.{LIBRARY_EXTENSION}")),
        }
    }

    /// Returns the installation version for local candidates.
    #[must_use]
    pub const fn version(&self) -> Option<&EagleVersion> {
        match self {
            Self::Local { version, .. } => Some(version),
            Self::Remote { .. } => None,
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local { version, dir } => write!(f, "{} (EAGLE {version})", dir.display()),
            Self::Remote { base_url } => f.write_str(base_url),
        }
    }
}

/// Returns the version a request resolves to: the requested one, or when
/// none is given the newest installed version (never below 1.0).
#[must_use]
pub fn effective_version(
    installations: &[Installation],
    requested: Option<&EagleVersion>,
) -> EagleVersion {
    requested.copied().unwrap_or_else(|| {
        installations
            .iter()
            .map(|i| i.version)
            .fold(EagleVersion::BASELINE, std::cmp::max)
    })
}

/// Builds the ordered candidate list for a version request.
///
/// Equal versions keep their discovery order.
#[must_use]
pub fn build_search_path(
    installations: &[Installation],
    requested: Option<&EagleVersion>,
    remote_base_url: &str,
) -> Vec<Candidate> {
    let desired = effective_version(installations, requested);

    let mut sorted: Vec<&Installation> = installations.iter().collect();
    sorted.sort_by(|a, b| a.version.cmp(&b.version));

    let cutover = sorted.partition_point(|i| i.version < desired);
    let (older, newer) = sorted.split_at(cutover);

    newer
        .iter()
        .chain(older.iter().rev())
        .map(|i| Candidate::Local {
            version: i.version,
            dir: i.library_dir.clone(),
        })
        .chain(std::iter::once(Candidate::Remote {
            base_url: remote_base_url.to_string(),
        }))
        .collect()
}
