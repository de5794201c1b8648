//! EAGLE schematic and library handling.
//!
//! A schematic references each part by `(library, deviceset, device)`. To
//! find where a part's pins are, the named `.lbr` file has to be located
//! (across local installations and a remote repository, preferring the
//! schematic's own toolchain version), its device set mapped through a gate
//! to a symbol, and the symbol's pins read.
//!
//! # File Format
//!
//! Both `.sch` and `.lbr` files are XML rooted at `<eagle><drawing>`:
//!
//! - Schematics: `drawing/schematic/parts/part` with `name`, `library`,
//!   `deviceset`, `device` and optional `value` attributes.
//! - Libraries: `drawing/library/devicesets/deviceset/gates/gate@symbol` and
//!   `drawing/library/symbols/symbol/pin` with `name`, `x`, `y`.
//!
//! This is not a netlist engine: wires, junctions and connectivity are not
//! read.

pub mod element;
pub mod error;
pub mod fetch;
pub mod installations;
pub mod library;
pub mod part;
pub mod pin;
pub mod resolver;
pub mod schematic;
pub mod search_path;
pub mod version;

pub use element::Element;
pub use error::{EagleError, EagleResult};
pub use fetch::{HttpFetcher, OfflineFetcher, RemoteFetcher};
pub use installations::{
    CombinedInstallations, DirectoryScan, Installation, InstallationProvider, StaticInstallations,
};
pub use library::Library;
pub use part::Part;
pub use pin::{Pin, PinPosition};
pub use resolver::LibraryResolver;
pub use schematic::{find_part, Schematic};
pub use search_path::{build_search_path, Candidate, DEFAULT_REMOTE_URL};
pub use version::EagleVersion;
