//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Geometry does not have enough positions for its type
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Coordinate text could not be read as a position
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

impl DomainError {
    /// Create an invalid geometry error
    pub fn invalid_geometry(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry(reason.into())
    }

    /// Create an invalid coordinate error
    pub fn invalid_coordinate(text: impl Into<String>) -> Self {
        Self::InvalidCoordinate(text.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_geometry_error_message() {
        let err = DomainError::invalid_geometry("LineString needs at least 2 positions");
        assert_eq!(
            err.to_string(),
            "Invalid geometry: LineString needs at least 2 positions"
        );
    }

    #[test]
    fn invalid_coordinate_error_message() {
        let err = DomainError::invalid_coordinate("2.3 abc");
        assert_eq!(err.to_string(), "Invalid coordinate: 2.3 abc");
    }

    #[test]
    fn errors_compare_by_value() {
        assert_eq!(
            DomainError::invalid_coordinate("x"),
            DomainError::InvalidCoordinate("x".to_string())
        );
        assert_ne!(
            DomainError::invalid_coordinate("x"),
            DomainError::invalid_geometry("x")
        );
    }
}
