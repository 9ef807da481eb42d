//! JSON response builder for the REST API

use std::fmt;
use std::sync::Arc;

use domain::{BoundingBox, RouteResponse, parse_leading_float};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::builder::ResponseBuilder;
use crate::error::RouteServiceError;
use crate::messages::{MessageKey, Messages};
use crate::models::{ExceptionReport, ParsedRoute};
use crate::request::RoutePayload;
use crate::steps::{WireStep, flatten_legs, seconds_from_text};
use crate::translator::InstructionTranslator;
use crate::wkt::{GeometryConverter, convert_required};

/// Route result as sent by the service
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRouteResult {
    duration_seconds: Option<WireNumber>,
    distance: Option<WireNumber>,
    bounds: Option<String>,
    geometry_wkt: Option<String>,
    legs: Option<Vec<RawLeg>>,
}

#[derive(Debug, Deserialize)]
struct RawLeg {
    steps: Option<Vec<RawStep>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStep {
    duration: Option<WireNumber>,
    distance: Option<WireNumber>,
    nav_instruction: Option<String>,
    name: Option<String>,
}

/// A number the service may send either bare or as text
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireNumber {
    Number(f64),
    Text(String),
}

impl WireNumber {
    fn value(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(text) => parse_leading_float(text),
        }
    }

    /// Like [`Self::value`] but also reads `H:MM:SS` clock text
    fn seconds(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(text) => seconds_from_text(text),
        }
    }
}

impl From<RawStep> for WireStep {
    fn from(step: RawStep) -> Self {
        Self {
            duration: step.duration.as_ref().map_or(0.0, WireNumber::seconds),
            distance: step.distance.as_ref().map_or(0.0, WireNumber::value),
            code: step.nav_instruction,
            name: step.name.unwrap_or_default(),
        }
    }
}

/// Builder for REST JSON payloads
pub struct JsonResponseBuilder {
    converter: Arc<dyn GeometryConverter>,
    translator: InstructionTranslator,
    messages: Messages,
}

impl fmt::Debug for JsonResponseBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonResponseBuilder")
            .field("translator", &self.translator)
            .field("messages", &self.messages)
            .finish_non_exhaustive()
    }
}

impl JsonResponseBuilder {
    /// Create a builder
    #[must_use]
    pub fn new(
        converter: Arc<dyn GeometryConverter>,
        translator: InstructionTranslator,
        messages: Messages,
    ) -> Self {
        Self {
            converter,
            translator,
            messages,
        }
    }

    fn parse_failure(&self) -> RouteServiceError {
        RouteServiceError::ParseFailure(
            self.messages.get(MessageKey::ServiceResponseAnalyse, &["JSON"]),
        )
    }

    /// Service-reported failure, if the object carries one
    ///
    /// A set `message` always wins; `status: "ERROR"` alone yields a report
    /// without text.
    fn exception_report(object: &Map<String, Value>) -> Option<ExceptionReport> {
        if let Some(message) = object.get("message").and_then(message_text) {
            return Some(ExceptionReport::with_text(message));
        }

        object
            .get("status")
            .and_then(Value::as_str)
            .filter(|status| status.eq_ignore_ascii_case("ERROR"))
            .map(|_| ExceptionReport::default())
    }

    /// Map the route fields; `None` when none of them is set
    fn read_route(&self, raw: RawRouteResult) -> Result<Option<RouteResponse>, RouteServiceError> {
        let mut response = RouteResponse::new();
        let mut populated = false;

        if let Some(duration) = raw.duration_seconds {
            response.total_time = duration.value();
            populated = true;
        }
        if let Some(distance) = raw.distance {
            response.total_distance = distance.value();
            populated = true;
        }
        if let Some(bounds) = raw.bounds {
            response.bbox = BoundingBox::from_delimited(&bounds);
            populated = true;
        }
        if let Some(wkt) = raw.geometry_wkt {
            let geometry = convert_required(self.converter.as_ref(), &wkt).map_err(|e| {
                debug!(error = %e, "Route geometry conversion failed");
                RouteServiceError::GeometryFormatError(
                    self.messages.get(MessageKey::ParamFormat, &["geometryWkt"]),
                )
            })?;
            response.route_geometry = Some(geometry);
            populated = true;
        }

        let legs = raw
            .legs
            .unwrap_or_default()
            .into_iter()
            .map(|leg| {
                leg.steps
                    .unwrap_or_default()
                    .into_iter()
                    .map(WireStep::from)
                    .collect()
            })
            .collect();
        response.route_instructions = flatten_legs(legs, &self.translator);

        Ok((populated || !response.route_instructions.is_empty()).then_some(response))
    }
}

impl ResponseBuilder for JsonResponseBuilder {
    fn build(&self, payload: RoutePayload) -> Result<ParsedRoute, RouteServiceError> {
        let value = match payload {
            RoutePayload::Json(value) => value,
            RoutePayload::Text(text) => serde_json::from_str(&text).map_err(|e| {
                debug!(error = %e, "Failed to parse JSON route response");
                self.parse_failure()
            })?,
            RoutePayload::Document(_) => {
                debug!("XML document given to the JSON builder");
                return Err(self.parse_failure());
            },
        };

        let Some(object) = value.as_object() else {
            debug!("JSON route response is not an object");
            return Err(self.parse_failure());
        };

        if let Some(report) = Self::exception_report(object) {
            return Ok(ParsedRoute::exception(report));
        }

        let raw: RawRouteResult = serde_json::from_value(value).map_err(|e| {
            debug!(error = %e, "Unexpected JSON route response shape");
            self.parse_failure()
        })?;

        match self.read_route(raw)? {
            Some(route) => Ok(ParsedRoute::new(route)),
            None => {
                debug!("JSON object holds no route field");
                Err(self.parse_failure())
            },
        }
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

/// Text of a `message` value that signals a failure
///
/// `null`, `false`, `0` and `""` are unset; other non-string values are
/// reported as their JSON text.
fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
