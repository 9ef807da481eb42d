//! Service error classification

use domain::RouteResponse;
use tracing::warn;

use crate::error::RouteServiceError;
use crate::messages::{MessageKey, Messages};
use crate::models::ParsedRoute;

/// Decide whether a built candidate is a route or a service failure
///
/// A candidate carrying an exception report is discarded and becomes a
/// [`RouteServiceError::ServiceException`].
pub fn classify(parsed: ParsedRoute, messages: &Messages) -> Result<RouteResponse, RouteServiceError> {
    let Some(report) = parsed.exception_report else {
        return Ok(parsed.response);
    };

    warn!(
        code = report.code.as_deref().unwrap_or("-"),
        text = report.text.as_deref().unwrap_or("-"),
        "Route service reported an exception"
    );

    let detail = match report.text.as_deref() {
        Some(text) => messages.get(MessageKey::ServiceResponseException, &[text]),
        None => messages.get(MessageKey::ServiceResponseException2, &[]),
    };
    Err(RouteServiceError::ServiceException(detail))
}
