//! Value Objects - Immutable, identity-less domain primitives

mod bounding_box;
mod geometry;
mod maneuver_code;

pub use bounding_box::BoundingBox;
pub use geometry::{Geometry, Position};
pub use maneuver_code::ManeuverCode;
