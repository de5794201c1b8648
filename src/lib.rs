//! eagle-parts: resolve EAGLE schematic parts to library symbols and pins
//!
//! This library reads EAGLE schematic (`.sch`) and library (`.lbr`) files so
//! that tooling can find a specific part (an Arduino footprint, say) and the
//! coordinates of its pins.
//!
//! # Architecture
//!
//! - **Schematic**: the part list of a `.sch` file plus its toolchain version
//! - **Part**: identity attributes and the pins resolved from its library
//! - **Library**: one `.lbr` document, answering device set → symbol queries
//! - **Resolver**: finds library files across installed EAGLE versions and a
//!   remote repository, caching what it loads
//!
//! # Modules
//!
//! - [`config`] — Configuration loading and validation
//! - [`error`] — Configuration error types
//! - [`eagle`] — Schematic/library parsing and resolution

pub mod config;
pub mod eagle;
pub mod error;
