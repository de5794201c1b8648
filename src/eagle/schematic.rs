//! EAGLE schematic (`.sch`) documents.
//!
//! Only the part list is read:
//!
//! ```text
//! <eagle version="6.2">
//!   <drawing>
//!     <schematic>
//!       <parts>
//!         <part name="R1" library="rcl" deviceset="R-US_" device="0204/2V"/>
//! ```
//!
//! The root `version` attribute is the default toolchain version used when
//! resolving each part's library.

use std::path::Path;

use super::element::{descend, parse_document};
use super::{EagleError, EagleResult, EagleVersion, Element, LibraryResolver, Part};

/// The parts section of a schematic.
#[derive(Debug, Clone)]
pub struct Schematic {
    version: Option<EagleVersion>,
    parts: Vec<Element>,
}

impl Schematic {
    /// Reads and parses a schematic file.
    ///
    /// # Errors
    ///
    /// Returns `FileRead` if the file cannot be read, otherwise as
    /// [`Self::parse`].
    pub fn open(path: impl AsRef<Path>) -> EagleResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| EagleError::file_read(path, e))?;
        Self::parse_from(&path.display().to_string(), &text)
    }

    /// Parses schematic text.
    ///
    /// # Errors
    ///
    /// Returns `Xml` for malformed text, `MissingElement` if there is no
    /// `drawing/schematic/parts`, or `InvalidVersion` if the root `version`
    /// attribute is present but unparseable.
    pub fn parse(text: &str) -> EagleResult<Self> {
        Self::parse_from("<schematic>", text)
    }

    fn parse_from(location: &str, text: &str) -> EagleResult<Self> {
        let doc = parse_document(location, text)?;
        let root = doc.root_element();

        let version = root.attribute("version").map(EagleVersion::parse).transpose()?;
        let parts = descend(root, &["drawing", "schematic", "parts"])?
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "part")
            .map(Element::from_node)
            .collect();

        Ok(Self { version, parts })
    }

    /// Returns the toolchain version that wrote the file, if recorded.
    #[must_use]
    pub const fn version(&self) -> Option<&EagleVersion> {
        self.version.as_ref()
    }

    /// Returns the `<part>` elements in document order.
    #[must_use]
    pub fn part_nodes(&self) -> &[Element] {
        &self.parts
    }

    /// Resolves every part, stopping at the first failure.
    ///
    /// `version` overrides the schematic's own version when given.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`Part::from_node`].
    pub fn resolve_parts(
        &self,
        resolver: &mut LibraryResolver,
        version: Option<&EagleVersion>,
    ) -> EagleResult<Vec<Part>> {
        let version = version.or(self.version.as_ref());
        self.parts
            .iter()
            .map(|node| Part::from_node(node, version, resolver))
            .collect()
    }

    /// Resolves every part it can. Failures are returned alongside the name
    /// of the part that caused them (or `"?"` if the node has no name).
    pub fn resolve_parts_lenient(
        &self,
        resolver: &mut LibraryResolver,
        version: Option<&EagleVersion>,
    ) -> (Vec<Part>, Vec<(String, EagleError)>) {
        let version = version.or(self.version.as_ref());
        let mut parts = Vec::with_capacity(self.parts.len());
        let mut failures = Vec::new();

        for node in &self.parts {
            match Part::from_node(node, version, resolver) {
                Ok(part) => parts.push(part),
                Err(e) => {
                    let name = node.attr("name").unwrap_or("?").to_string();
                    tracing::warn!(part = %name, error = %e, "Skipping unresolved part");
                    failures.push((name, e));
                }
            }
        }

        (parts, failures)
    }
}

/// Returns the first part matching both device set and device.
#[must_use]
pub fn find_part<'a>(parts: &'a [Part], deviceset: &str, device: &str) -> Option<&'a Part> {
    parts
        .iter()
        .find(|p| p.deviceset() == deviceset && p.device() == device)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_version_and_parts() {
        let sch = Schematic::parse(
            r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE eagle SYSTEM "eagle.dtd">
<eagle version="6.2">
  <drawing>
    <schematic>
      <libraries/>
      <parts>
        <part name="R1" library="rcl" deviceset="R-US_" device="0204/2V"/>
        <part name="U1" library="SparkFun-Boards" deviceset="ARDUINO-MEGA" device="FULL" value="MEGA"/>
      </parts>
    </schematic>
  </drawing>
</eagle>"#,
        )
        .unwrap();

        assert_eq!(sch.version(), Some(&EagleVersion::new(6, 2, 0)));
        let names: Vec<_> = sch.part_nodes().iter().filter_map(|p| p.attr("name")).collect();
        assert_eq!(names, ["R1", "U1"]);
    }

    #[test]
    fn version_is_optional() {
        let sch = Schematic::parse("<eagle><drawing><schematic><parts/></schematic></drawing></eagle>")
            .unwrap();
        assert_eq!(sch.version(), None);
        assert!(sch.part_nodes().is_empty());
    }

    #[test]
    fn invalid_version_is_rejected() {
        let err = Schematic::parse(
            r#"<eagle version="six"><drawing><schematic><parts/></schematic></drawing></eagle>"#,
        )
        .unwrap_err();
        assert!(matches!(err, EagleError::InvalidVersion { .. }));
    }

    #[test]
    fn missing_parts_section() {
        let err = Schematic::parse("<eagle><drawing><schematic/></drawing></eagle>").unwrap_err();
        assert!(matches!(
            err,
            EagleError::MissingElement { ref element, .. } if element == "parts"
        ));
    }

    #[test]
    fn missing_file() {
        let err = Schematic::open("/no/such/Layout.sch").unwrap_err();
        assert!(matches!(err, EagleError::FileRead { .. }));
    }
}
