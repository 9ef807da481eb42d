//! Intermediate parse results
//!
//! Builders produce a [`ParsedRoute`] candidate; the classifier decides
//! whether it becomes a route or a service error.

use domain::RouteResponse;
use serde::{Deserialize, Serialize};

/// Service-embedded marker that a request failed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExceptionReport {
    /// Service error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Service error text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ExceptionReport {
    /// Create a report with a text
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            code: None,
            text: Some(text.into()),
        }
    }

    /// Set the error code
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Candidate produced by a builder
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedRoute {
    /// The route read from the payload
    pub response: RouteResponse,
    /// Present when the payload reports a service failure
    pub exception_report: Option<ExceptionReport>,
}

impl ParsedRoute {
    /// A candidate without exception report
    #[must_use]
    pub fn new(response: RouteResponse) -> Self {
        Self {
            response,
            exception_report: None,
        }
    }

    /// A candidate that only carries an exception report
    #[must_use]
    pub fn exception(report: ExceptionReport) -> Self {
        Self {
            response: RouteResponse::default(),
            exception_report: Some(report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_report() {
        assert!(ParsedRoute::new(RouteResponse::new()).exception_report.is_none());
    }

    #[test]
    fn test_exception_candidate() {
        let parsed = ParsedRoute::exception(ExceptionReport::with_text("boom").with_code("E1"));
        let report = parsed.exception_report.unwrap();
        assert_eq!(report.text.as_deref(), Some("boom"));
        assert_eq!(report.code.as_deref(), Some("E1"));
    }
}
