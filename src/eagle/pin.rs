//! Symbol pins.
//!
//! A pin node inside a library `<symbol>` looks like:
//!
//! ```xml
//! <pin name="2" x="5.08" y="0" visible="off" length="short" direction="pas" swaplevel="1" rot="R180"/>
//! ```
//!
//! Coordinates are relative to the part's origin. They are kept exactly as
//! written in the library file; [`Pin::position`] is the explicit step for
//! callers that need arithmetic.

use super::{EagleError, EagleResult, Element};

/// A named connection point on a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pin {
    name: String,
    x: String,
    y: String,
}

/// Numeric pin position, in the library's units (millimetres for EAGLE).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinPosition {
    /// X offset from the part origin.
    pub x: f64,
    /// Y offset from the part origin.
    pub y: f64,
}

impl Pin {
    /// Builds a pin from a `<pin>` element.
    ///
    /// # Errors
    ///
    /// Returns `MissingAttribute` if `name`, `x` or `y` is absent.
    pub fn from_node(node: &Element) -> EagleResult<Self> {
        Ok(Self {
            name: node.required_attr("name")?.to_string(),
            x: node.required_attr("x")?.to_string(),
            y: node.required_attr("y")?.to_string(),
        })
    }

    /// Returns the pin name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the X coordinate as written in the library.
    #[must_use]
    pub fn x(&self) -> &str {
        &self.x
    }

    /// Returns the Y coordinate as written in the library.
    #[must_use]
    pub fn y(&self) -> &str {
        &self.y
    }

    /// Parses the coordinates into numbers.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` if either coordinate is not a number.
    pub fn position(&self) -> EagleResult<PinPosition> {
        Ok(PinPosition {
            x: self.coordinate(&self.x)?,
            y: self.coordinate(&self.y)?,
        })
    }

    fn coordinate(&self, value: &str) -> EagleResult<f64> {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| EagleError::InvalidCoordinate {
                pin: self.name.clone(),
                value: value.to_string(),
            })
    }
}
