//! Library location and caching.
//!
//! [`LibraryResolver`] walks the search path for a `(name, version)` request
//! and keeps every library it loads. Library files are treated as immutable
//! for the life of the resolver, so the cache is never invalidated. Failed
//! lookups are not cached.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::element::decode_text;
use super::{
    build_search_path, Candidate, EagleError, EagleResult, EagleVersion, InstallationProvider,
    Library, OfflineFetcher, RemoteFetcher, StaticInstallations, DEFAULT_REMOTE_URL,
};

type CacheKey = (String, Option<EagleVersion>);

/// Finds, parses and caches libraries.
pub struct LibraryResolver {
    installations: Box<dyn InstallationProvider>,
    fetcher: Box<dyn RemoteFetcher>,
    remote_base_url: String,
    cache: HashMap<CacheKey, Arc<Library>>,
}

impl LibraryResolver {
    /// Creates a resolver.
    pub fn new(
        installations: impl InstallationProvider + 'static,
        fetcher: impl RemoteFetcher + 'static,
        remote_base_url: impl Into<String>,
    ) -> Self {
        Self {
            installations: Box::new(installations),
            fetcher: Box::new(fetcher),
            remote_base_url: remote_base_url.into(),
            cache: HashMap::new(),
        }
    }

    /// Creates a resolver with no installations and no network access.
    #[must_use]
    pub fn offline() -> Self {
        Self::new(
            StaticInstallations::default(),
            OfflineFetcher,
            DEFAULT_REMOTE_URL,
        )
    }

    /// Returns the ordered candidate list for a request.
    #[must_use]
    pub fn search_path(&self, version: Option<&EagleVersion>) -> Vec<Candidate> {
        build_search_path(
            &self.installations.installations(),
            version,
            &self.remote_base_url,
        )
    }

    /// Returns the library for `(name, version)`, loading it on first use.
    ///
    /// # Errors
    ///
    /// Returns `LibraryNotFound` if no candidate yields the file, or the
    /// parse error of a local file that exists but is malformed.
    pub fn library(
        &mut self,
        name: &str,
        version: Option<&EagleVersion>,
    ) -> EagleResult<Arc<Library>> {
        let key = (name.to_string(), version.copied());
        if let Some(library) = self.cache.get(&key) {
            tracing::trace!(library = name, "Library cache hit");
            return Ok(Arc::clone(library));
        }

        let library = Arc::new(self.locate(name, version)?);
        self.cache.insert(key, Arc::clone(&library));
        Ok(library)
    }

    /// Like [`Self::library`], taking the version as text. An empty string
    /// requests the newest installed version.
    ///
    /// # Errors
    ///
    /// Returns `InvalidVersion` for an unparseable version, otherwise as
    /// [`Self::library`].
    pub fn library_str(&mut self, name: &str, version: &str) -> EagleResult<Arc<Library>> {
        let version = super::version::parse_request(version)?;
        self.library(name, version.as_ref())
    }

    /// Number of libraries currently cached.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Walks the search path without consulting the cache.
    ///
    /// # Errors
    ///
    /// As [`Self::library`].
    pub fn locate(&self, name: &str, version: Option<&EagleVersion>) -> EagleResult<Library> {
        let search_path = self.search_path(version);

        for candidate in &search_path {
            let loaded = if let Some(path) = candidate.local_file(name) {
                Self::load_local(name, &path)?
            } else {
                candidate
                    .remote_url(name)
                    .and_then(|url| self.load_remote(name, &url))
            };

            if let Some(library) = loaded {
                return Ok(library);
            }
        }

        Err(EagleError::LibraryNotFound {
            name: name.to_string(),
            candidates: search_path.len(),
        })
    }

    fn load_local(name: &str, path: &Path) -> EagleResult<Option<Library>> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Library candidate unavailable");
                return Ok(None);
            }
        };
        tracing::info!(path = %path.display(), "Opening library file");
        Library::parse(name, path.display().to_string(), &decode_text(&bytes)).map(Some)
    }

    fn load_remote(&self, name: &str, url: &str) -> Option<Library> {
        tracing::info!(url, "Fetching library file");
        let text = self.fetcher.fetch(url)?;
        match Library::parse(name, url, &text) {
            Ok(library) => Some(library),
            Err(e) => {
                tracing::debug!(url, error = %e, "Remote library unusable");
                None
            }
        }
    }
}

impl std::fmt::Debug for LibraryResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryResolver")
            .field("remote_base_url", &self.remote_base_url)
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}
