//! Route response requests and outputs

use std::fmt;
use std::str::FromStr;

use domain::RouteResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::xml::XmlDocument;

/// Serialization the service was asked to answer in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// XML, REST or OLS dialect
    Xml,
    /// JSON, REST dialect
    #[default]
    Json,
}

impl OutputFormat {
    /// Wire name of the format
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {s}. Use 'xml' or 'json'")),
        }
    }
}

/// API family that produced the response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApiFamily {
    /// REST itinerary API
    #[default]
    #[serde(alias = "rest")]
    Rest,
    /// OpenLS (OLS) route determination API
    #[serde(alias = "ols")]
    Ols,
}

impl ApiFamily {
    /// Wire name of the API family
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rest => "REST",
            Self::Ols => "OLS",
        }
    }
}

impl fmt::Display for ApiFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ApiFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "REST" => Ok(Self::Rest),
            "OLS" => Ok(Self::Ols),
            _ => Err(format!("Invalid API family: {s}. Use 'REST' or 'OLS'")),
        }
    }
}

/// A service response as handed to the factory
#[derive(Debug, Clone, PartialEq)]
pub enum RoutePayload {
    /// Serialized text (XML or JSON)
    Text(String),
    /// Already-parsed JSON value
    Json(Value),
    /// Already-parsed XML document
    Document(XmlDocument),
}

impl RoutePayload {
    /// Whether the payload carries nothing at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Json(value) => value.is_null(),
            Self::Document(_) => false,
        }
    }

    /// Short label for logging
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Json(_) => "json",
            Self::Document(_) => "document",
        }
    }
}

impl From<String> for RoutePayload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for RoutePayload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Value> for RoutePayload {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<XmlDocument> for RoutePayload {
    fn from(document: XmlDocument) -> Self {
        Self::Document(document)
    }
}

/// One request to normalize a service response
///
/// Consumed by [`RouteResponseFactory::build`](crate::RouteResponseFactory::build).
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResponseRequest {
    /// The response to normalize
    pub payload: Option<RoutePayload>,
    /// Hand the payload back untouched
    pub raw_response: bool,
    /// Serialization of the payload
    pub output_format: OutputFormat,
    /// API family that produced the payload
    pub api: ApiFamily,
}

impl RouteResponseRequest {
    /// Create a request for a payload in the given format (REST API)
    #[must_use]
    pub fn new(payload: impl Into<RoutePayload>, output_format: OutputFormat) -> Self {
        Self {
            payload: Some(payload.into()),
            raw_response: false,
            output_format,
            api: ApiFamily::default(),
        }
    }

    /// Create a JSON request
    #[must_use]
    pub fn json(payload: impl Into<RoutePayload>) -> Self {
        Self::new(payload, OutputFormat::Json)
    }

    /// Create an XML request for an API family
    #[must_use]
    pub fn xml(payload: impl Into<RoutePayload>, api: ApiFamily) -> Self {
        Self::new(payload, OutputFormat::Xml).with_api(api)
    }

    /// Create a request without payload
    #[must_use]
    pub fn without_payload(output_format: OutputFormat) -> Self {
        Self {
            payload: None,
            raw_response: false,
            output_format,
            api: ApiFamily::default(),
        }
    }

    /// Set the API family
    #[must_use]
    pub const fn with_api(mut self, api: ApiFamily) -> Self {
        self.api = api;
        self
    }

    /// Request raw passthrough
    #[must_use]
    pub const fn raw(mut self) -> Self {
        self.raw_response = true;
        self
    }
}

/// Successful outcome of a build
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutput {
    /// Normalized route
    Route(RouteResponse),
    /// Payload passed through untouched
    Raw(RoutePayload),
}

impl RouteOutput {
    /// The normalized route, if any
    #[must_use]
    pub const fn as_route(&self) -> Option<&RouteResponse> {
        match self {
            Self::Route(route) => Some(route),
            Self::Raw(_) => None,
        }
    }

    /// Take the normalized route, if any
    #[must_use]
    pub fn into_route(self) -> Option<RouteResponse> {
        match self {
            Self::Route(route) => Some(route),
            Self::Raw(_) => None,
        }
    }
}
