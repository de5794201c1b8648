//! Locally installed EAGLE toolchains.
//!
//! Each installation pins a version and ships its own `lbr/` directory. How
//! installations are discovered is platform specific, so discovery sits
//! behind [`InstallationProvider`] and the search-path logic only sees the
//! resulting list.

use std::path::{Path, PathBuf};

use super::EagleVersion;

/// Directory prefix used by EAGLE installers (`EAGLE-6.2.0`).
pub const INSTALL_DIR_PREFIX: &str = "EAGLE-";

/// Library subdirectory inside an installation.
pub const LIBRARY_SUBDIR: &str = "lbr";

/// One installed toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    /// Installed version.
    pub version: EagleVersion,
    /// Directory holding that version's `.lbr` files.
    pub library_dir: PathBuf,
}

impl Installation {
    /// Creates an installation record.
    pub fn new(version: EagleVersion, library_dir: impl Into<PathBuf>) -> Self {
        Self {
            version,
            library_dir: library_dir.into(),
        }
    }
}

/// Source of installed toolchains.
pub trait InstallationProvider {
    /// Returns installations in discovery order. An empty list is valid.
    fn installations(&self) -> Vec<Installation>;
}

/// A fixed list of installations.
#[derive(Debug, Clone, Default)]
pub struct StaticInstallations(pub Vec<Installation>);

impl InstallationProvider for StaticInstallations {
    fn installations(&self) -> Vec<Installation> {
        self.0.clone()
    }
}

/// Scans root directories for `EAGLE-<version>` installations.
#[derive(Debug, Clone, Default)]
pub struct DirectoryScan {
    roots: Vec<PathBuf>,
}

impl DirectoryScan {
    /// Creates a scanner over the given roots.
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    fn scan_root(root: &Path) -> Vec<Installation> {
        let entries = match std::fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(root = %root.display(), error = %e, "Cannot scan install root");
                return Vec::new();
            }
        };

        // read_dir order is unspecified; sort by name so ties stay stable
        let mut dirs: Vec<(String, PathBuf)> = entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_ok_and(|t| t.is_dir()))
            .filter_map(|e| Some((e.file_name().into_string().ok()?, e.path())))
            .collect();
        dirs.sort();

        dirs.into_iter()
            .filter_map(|(name, path)| {
                let suffix = name.strip_prefix(INSTALL_DIR_PREFIX)?;
                match EagleVersion::parse(suffix) {
                    Ok(version) => Some(Installation::new(version, path.join(LIBRARY_SUBDIR))),
                    Err(_) => {
                        tracing::debug!(dir = %name, "Skipping install dir with invalid version");
                        None
                    }
                }
            })
            .collect()
    }
}

impl InstallationProvider for DirectoryScan {
    fn installations(&self) -> Vec<Installation> {
        self.roots
            .iter()
            .flat_map(|root| Self::scan_root(root))
            .collect()
    }
}

/// Concatenates several providers, in order.
#[derive(Default)]
pub struct CombinedInstallations {
    providers: Vec<Box<dyn InstallationProvider>>,
}

impl CombinedInstallations {
    /// Creates an empty combination.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a provider.
    #[must_use]
    pub fn with(mut self, provider: impl InstallationProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }
}

impl InstallationProvider for CombinedInstallations {
    fn installations(&self) -> Vec<Installation> {
        self.providers
            .iter()
            .flat_map(|p| p.installations())
            .collect()
    }
}
