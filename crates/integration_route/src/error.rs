//! Route response error types

use std::fmt;

use thiserror::Error;

/// Errors reported by the route response factory
///
/// Each variant carries a human-readable detail produced by the message
/// catalog in the configured locale.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteServiceError {
    /// No payload was given
    #[error("{0}")]
    EmptyResponse(String),

    /// No builder handles the requested output format and API family
    #[error("{0}")]
    UnsupportedFormat(String),

    /// The payload could not be parsed, or held no route
    #[error("{0}")]
    ParseFailure(String),

    /// The payload parsed but reports a service-level failure
    #[error("{0}")]
    ServiceException(String),

    /// The route geometry could not be converted
    #[error("{0}")]
    GeometryFormatError(String),
}

/// Discriminant of a [`RouteServiceError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`RouteServiceError::EmptyResponse`]
    EmptyResponse,
    /// See [`RouteServiceError::UnsupportedFormat`]
    UnsupportedFormat,
    /// See [`RouteServiceError::ParseFailure`]
    ParseFailure,
    /// See [`RouteServiceError::ServiceException`]
    ServiceException,
    /// See [`RouteServiceError::GeometryFormatError`]
    GeometryFormatError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::EmptyResponse => "empty_response",
            Self::UnsupportedFormat => "unsupported_format",
            Self::ParseFailure => "parse_failure",
            Self::ServiceException => "service_exception",
            Self::GeometryFormatError => "geometry_format_error",
        };
        write!(f, "{label}")
    }
}

impl RouteServiceError {
    /// The kind of failure
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyResponse(_) => ErrorKind::EmptyResponse,
            Self::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Self::ParseFailure(_) => ErrorKind::ParseFailure,
            Self::ServiceException(_) => ErrorKind::ServiceException,
            Self::GeometryFormatError(_) => ErrorKind::GeometryFormatError,
        }
    }

    /// The human-readable detail
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::EmptyResponse(detail)
            | Self::UnsupportedFormat(detail)
            | Self::ParseFailure(detail)
            | Self::ServiceException(detail)
            | Self::GeometryFormatError(detail) => detail,
        }
    }

    /// Returns true if the service itself reported the failure
    #[must_use]
    pub const fn is_service_error(&self) -> bool {
        matches!(self, Self::ServiceException(_))
    }
}
