//! Domain layer for route normalization
//!
//! Contains the canonical route model every service dialect is normalized
//! into: responses, turn-by-turn instructions, bounding boxes and geometries.
//! This layer has no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod numeric;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use numeric::parse_leading_float;
pub use value_objects::*;
