//! Bounding box value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::numeric::parse_leading_float;
use crate::value_objects::Position;

/// Rectangular extent of a route, in the service's coordinate system
///
/// Components are kept as read from the service. A malformed bounds string
/// produces `NaN` components rather than an error so that callers can see
/// exactly what the service sent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum x (west)
    pub left: f64,
    /// Minimum y (south)
    pub bottom: f64,
    /// Maximum x (east)
    pub right: f64,
    /// Maximum y (north)
    pub top: f64,
}

impl BoundingBox {
    /// Create a bounding box from its four edges
    #[must_use]
    pub const fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Read a bounds string such as `"2.3,48.8;2.4,48.9"`
    ///
    /// The text is split on `,` and `;` and the first four parts are read
    /// positionally as left, bottom, right, top. Missing or non-numeric parts
    /// become `NaN`; extra parts are ignored.
    #[must_use]
    pub fn from_delimited(bounds: &str) -> Self {
        let mut parts = bounds.split([',', ';']).map(parse_leading_float);
        let mut next = || parts.next().unwrap_or(f64::NAN);
        let left = next();
        let bottom = next();
        let right = next();
        let top = next();
        Self::new(left, bottom, right, top)
    }

    /// Create a bounding box from its lower-left and upper-right corners
    #[must_use]
    pub const fn from_corners(lower_left: Position, upper_right: Position) -> Self {
        Self::new(lower_left[0], lower_left[1], upper_right[0], upper_right[1])
    }

    /// Whether all four components are finite numbers
    #[must_use]
    pub fn is_finite(&self) -> bool {
        [self.left, self.bottom, self.right, self.top]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Horizontal extent
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical extent
    #[must_use]
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Whether a position lies inside the box (edges included)
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        (self.left..=self.right).contains(&position[0])
            && (self.bottom..=self.top).contains(&position[1])
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{};{},{}",
            self.left, self.bottom, self.right, self.top
        )
    }
}
