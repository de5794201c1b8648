//! EAGLE library (`.lbr`) documents.
//!
//! A library file is rooted at `<eagle><drawing><library>`. Only the
//! `<library>` subtree is retained. Parts reference it through a device set:
//!
//! ```xml
//! <deviceset name="R-US_" prefix="R" uservalue="yes">
//!     <gates>
//!         <gate name="G$1" symbol="R-US" x="0" y="0"/>
//!     </gates>
//!     ...
//! </deviceset>
//! ```
//!
//! and the gate names the `<symbol>` that carries the pins. All devices in a
//! device set share that symbol; only their footprints differ.

use super::element::{descend, parse_document};
use super::{EagleError, EagleResult, Element};

/// A parsed library.
#[derive(Debug, Clone)]
pub struct Library {
    name: String,
    origin: String,
    node: Element,
}

impl Library {
    /// Parses a library document.
    ///
    /// `origin` is the path or URL the text came from and is used in errors.
    ///
    /// # Errors
    ///
    /// Returns `Xml` if the text is not well-formed, or `MissingElement` if
    /// the document has no `drawing/library`.
    pub fn parse(
        name: impl Into<String>,
        origin: impl Into<String>,
        text: &str,
    ) -> EagleResult<Self> {
        let origin = origin.into();
        let doc = parse_document(&origin, text)?;
        let library = descend(doc.root_element(), &["drawing", "library"])?;
        Ok(Self {
            name: name.into(),
            origin,
            node: Element::from_node(library),
        })
    }

    /// Returns the library name as requested (without `.lbr`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the path or URL the library was loaded from.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns the entries of a collection (`devicesets`, `symbols`). A
    /// library without the collection has no entries.
    fn collection<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Element> + 'a {
        self.node.child(name).into_iter().flat_map(Element::children)
    }

    /// Returns the device set names in document order.
    pub fn device_set_names(&self) -> impl Iterator<Item = &str> {
        self.collection("devicesets").filter_map(|ds| ds.attr("name"))
    }

    /// Translates a device set name into the name of its symbol, via the
    /// device set's first gate.
    ///
    /// # Errors
    ///
    /// Returns `DeviceSetNotFound` if no device set has that name, or
    /// `MissingElement`/`MissingAttribute` if its gate is malformed.
    pub fn symbol_name(&self, deviceset_name: &str) -> EagleResult<&str> {
        let deviceset = self
            .collection("devicesets")
            .find(|ds| ds.attr("name") == Some(deviceset_name))
            .ok_or_else(|| EagleError::DeviceSetNotFound {
                library: self.name.clone(),
                deviceset: deviceset_name.to_string(),
            })?;

        deviceset
            .required_child("gates")?
            .required_child("gate")?
            .required_attr("symbol")
    }

    /// Returns the `<symbol>` element used by the given device set.
    ///
    /// ```xml
    /// <symbol name="R-US">
    ///     ...
    ///     <pin name="1" x="-5.08" y="0" visible="off" length="short" direction="pas" swaplevel="1"/>
    /// </symbol>
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `DeviceSetNotFound` or `SymbolNotFound` when either lookup
    /// fails.
    pub fn symbol_node(&self, deviceset_name: &str) -> EagleResult<&Element> {
        let symbol_name = self.symbol_name(deviceset_name)?;

        self.collection("symbols")
            .find(|s| s.attr("name") == Some(symbol_name))
            .ok_or_else(|| EagleError::SymbolNotFound {
                library: self.name.clone(),
                symbol: symbol_name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RCL: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE eagle SYSTEM "eagle.dtd">
<eagle version="6.2">
  <drawing>
    <library>
      <symbols>
        <symbol name="R-US">
          <wire x1="-2.54" y1="0" x2="-2.159" y2="1.016" width="0.2032" layer="94"/>
          <pin name="1" x="-5.08" y="0" visible="off" length="short" direction="pas" swaplevel="1"/>
          <pin name="2" x="5.08" y="0" visible="off" length="short" direction="pas" swaplevel="1" rot="R180"/>
        </symbol>
      </symbols>
      <devicesets>
        <deviceset name="R-US_" prefix="R" uservalue="yes">
          <gates>
            <gate name="G$1" symbol="R-US" x="0" y="0"/>
          </gates>
        </deviceset>
        <deviceset name="BROKEN">
          <gates>
            <gate name="G$1" symbol="NOPE" x="0" y="0"/>
          </gates>
        </deviceset>
      </devicesets>
    </library>
  </drawing>
</eagle>"#;

    fn rcl() -> Library {
        Library::parse("rcl", "memory", RCL).unwrap()
    }

    #[test]
    fn symbol_node_resolves_through_gate() {
        let lib = rcl();
        let symbol = lib.symbol_node("R-US_").unwrap();
        assert_eq!(symbol.attr("name"), Some("R-US"));

        let pins: Vec<_> = symbol
            .children_named("pin")
            .map(|p| (p.attr("name").unwrap(), p.attr("x").unwrap(), p.attr("y").unwrap()))
            .collect();
        assert_eq!(pins, [("1", "-5.08", "0"), ("2", "5.08", "0")]);
    }

    #[test]
    fn unknown_device_set() {
        let err = rcl().symbol_node("C-US").unwrap_err();
        assert!(matches!(
            err,
            EagleError::DeviceSetNotFound { ref deviceset, .. } if deviceset == "C-US"
        ));
    }

    #[test]
    fn dangling_symbol_reference() {
        let err = rcl().symbol_node("BROKEN").unwrap_err();
        assert!(matches!(
            err,
            EagleError::SymbolNotFound { ref symbol, .. } if symbol == "NOPE"
        ));
    }

    #[test]
    fn device_set_names_in_document_order() {
        let lib = rcl();
        let names: Vec<_> = lib.device_set_names().collect();
        assert_eq!(names, ["R-US_", "BROKEN"]);
        assert_eq!(lib.name(), "rcl");
        assert_eq!(lib.origin(), "memory");
    }

    #[test]
    fn library_without_devicesets() {
        let lib = Library::parse(
            "footprints",
            "memory",
            "<eagle><drawing><library><packages/><symbols/></library></drawing></eagle>",
        )
        .unwrap();
        assert_eq!(lib.device_set_names().count(), 0);
        assert!(matches!(
            lib.symbol_node("R-US_"),
            Err(EagleError::DeviceSetNotFound { ref deviceset, .. }) if deviceset == "R-US_"
        ));
    }

    #[test]
    fn library_without_symbols() {
        let lib = Library::parse(
            "nosym",
            "memory",
            r#"<eagle><drawing><library><devicesets>
                <deviceset name="R-US_"><gates><gate name="G$1" symbol="R-US"/></gates></deviceset>
            </devicesets></library></drawing></eagle>"#,
        )
        .unwrap();
        assert!(matches!(
            lib.symbol_node("R-US_"),
            Err(EagleError::SymbolNotFound { ref symbol, .. }) if symbol == "R-US"
        ));
    }

    #[test]
    fn document_without_library_section() {
        let err = Library::parse("x", "memory", "<eagle><drawing><schematic/></drawing></eagle>")
            .unwrap_err();
        assert!(matches!(err, EagleError::MissingElement { .. }));
    }

    #[test]
    fn malformed_document() {
        let err = Library::parse("x", "memory", "<eagle><drawing>").unwrap_err();
        assert!(matches!(err, EagleError::Xml { .. }));
    }
}
