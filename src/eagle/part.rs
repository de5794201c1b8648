//! Schematic parts.
//!
//! Parts are referenced in a `.sch` file like so:
//!
//! ```xml
//! <part name="R1" library="rcl" deviceset="R-US_" device="0204/2V"/>
//! ```
//!
//! Everything beyond that identity comes from the named library file: the
//! device set's symbol supplies the pins, whose coordinates locate where the
//! part meets the surrounding schematic.

use std::sync::Arc;

use super::{EagleResult, EagleVersion, Element, Library, LibraryResolver, Pin};

/// A part placed in a schematic, with its pins resolved from its library.
#[derive(Debug, Clone)]
pub struct Part {
    name: String,
    deviceset: String,
    device: String,
    value: String,
    library: Arc<Library>,
    pins: Vec<Pin>,
}

impl Part {
    /// Builds a part from a `<part>` element, resolving its library through
    /// `resolver`.
    ///
    /// `version` selects which installed toolchain's libraries are preferred;
    /// `None` means the newest.
    ///
    /// # Errors
    ///
    /// Returns `MissingAttribute` for an incomplete part or pin node, and
    /// propagates library lookup errors (`LibraryNotFound`,
    /// `DeviceSetNotFound`, `SymbolNotFound`) unchanged.
    pub fn from_node(
        node: &Element,
        version: Option<&EagleVersion>,
        resolver: &mut LibraryResolver,
    ) -> EagleResult<Self> {
        let name = node.required_attr("name")?;
        let deviceset = node.required_attr("deviceset")?;
        let device = node.required_attr("device")?;
        let library_name = node.required_attr("library")?;
        let value = node.attr("value").unwrap_or_default();

        let library = resolver.library(library_name, version)?;
        let pins = library
            .symbol_node(deviceset)?
            .children_named("pin")
            .map(Pin::from_node)
            .collect::<EagleResult<Vec<_>>>()?;

        Ok(Self {
            name: name.to_string(),
            deviceset: deviceset.to_string(),
            device: device.to_string(),
            value: value.to_string(),
            library,
            pins,
        })
    }

    /// Returns the part name (`R1`, `U3`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the user-assigned value, or an empty string.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the device (footprint variant) name.
    #[must_use]
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Returns the device set name.
    #[must_use]
    pub fn deviceset(&self) -> &str {
        &self.deviceset
    }

    /// Returns the name of the library the part was resolved from.
    #[must_use]
    pub fn library(&self) -> &str {
        self.library.name()
    }

    /// Returns the pins in symbol order. Coordinates are relative to the
    /// part's origin.
    #[must_use]
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Returns the first pin with the given name.
    #[must_use]
    pub fn pin(&self, name: &str) -> Option<&Pin> {
        self.pins.iter().find(|p| p.name() == name)
    }
}
