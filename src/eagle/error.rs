//! Error types for EAGLE document resolution.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for EAGLE operations.
pub type EagleResult<T> = Result<T, EagleError>;

/// Errors that can occur while reading schematics and resolving libraries.
#[derive(Debug, Error)]
pub enum EagleError {
    /// Version string is not a valid dotted version.
    #[error("Invalid version: '{version}'")]
    InvalidVersion {
        /// The rejected version string.
        version: String,
    },

    /// No candidate in the search path yielded a library document.
    #[error("Library not found: {name} (tried {candidates} locations)")]
    LibraryNotFound {
        /// Library name, without the `.lbr` extension.
        name: String,
        /// Number of candidate locations that were tried.
        candidates: usize,
    },

    /// Library has no device set with the requested name.
    #[error("Device set '{deviceset}' not found in library '{library}'")]
    DeviceSetNotFound {
        /// Library that was searched.
        library: String,
        /// Device set name that was not found.
        deviceset: String,
    },

    /// A gate references a symbol the library does not define.
    #[error("Symbol '{symbol}' not found in library '{library}'")]
    SymbolNotFound {
        /// Library that was searched.
        library: String,
        /// Symbol name that was not found.
        symbol: String,
    },

    /// A required attribute is absent.
    #[error("Missing attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        /// Tag name of the element.
        element: String,
        /// Name of the missing attribute.
        attribute: String,
    },

    /// A required child element is absent.
    #[error("Missing element <{element}> in <{parent}>")]
    MissingElement {
        /// Tag name of the parent element.
        parent: String,
        /// Tag name of the missing child.
        element: String,
    },

    /// Document is not well-formed XML.
    #[error("Malformed XML in {location}")]
    Xml {
        /// Path or URL of the document.
        location: String,
        /// Underlying parser error.
        #[source]
        source: roxmltree::Error,
    },

    /// Failed to read a schematic file.
    #[error("Failed to read file: {path}")]
    FileRead {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Pin coordinate could not be converted to a number.
    #[error("Invalid coordinate '{value}' on pin '{pin}'")]
    InvalidCoordinate {
        /// Pin name.
        pin: String,
        /// The coordinate text.
        value: String,
    },
}

impl EagleError {
    /// Creates an invalid version error.
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
        }
    }

    /// Creates a missing attribute error.
    pub fn missing_attribute(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates a missing element error.
    pub fn missing_element(parent: impl Into<String>, element: impl Into<String>) -> Self {
        Self::MissingElement {
            parent: parent.into(),
            element: element.into(),
        }
    }

    /// Creates a file read error.
    pub fn file_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates an XML error.
    pub fn xml(location: impl Into<String>, source: roxmltree::Error) -> Self {
        Self::Xml {
            location: location.into(),
            source,
        }
    }
}
