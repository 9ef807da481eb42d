//! Response builder strategies
//!
//! A builder turns one payload into a [`ParsedRoute`] candidate. The factory
//! holds one builder per output format and API family.

use std::fmt;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;
use tracing::debug;

use crate::error::RouteServiceError;
use crate::messages::{MessageKey, Messages};
use crate::models::ParsedRoute;
use crate::request::RoutePayload;
use crate::xml::{ReaderError, RouteReader, XmlDocument};

/// Builds a route candidate from a payload
#[cfg_attr(test, automock)]
pub trait ResponseBuilder: Send + Sync {
    /// Build a candidate
    fn build(&self, payload: RoutePayload) -> Result<ParsedRoute, RouteServiceError>;

    /// Name used in logs
    fn name(&self) -> &'static str;
}

/// Builder for XML payloads
///
/// Loads the document and hands it to a [`RouteReader`]; the reader decides
/// what the document means, this builder only maps outcomes to errors.
pub struct XmlResponseBuilder {
    reader: Arc<dyn RouteReader>,
    messages: Messages,
}

impl fmt::Debug for XmlResponseBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlResponseBuilder")
            .field("messages", &self.messages)
            .finish_non_exhaustive()
    }
}

impl XmlResponseBuilder {
    /// Create a builder around a reader
    #[must_use]
    pub fn new(reader: Arc<dyn RouteReader>, messages: Messages) -> Self {
        Self { reader, messages }
    }

    fn parse_failure(&self) -> RouteServiceError {
        RouteServiceError::ParseFailure(
            self.messages.get(MessageKey::ServiceResponseAnalyse, &["XML"]),
        )
    }
}

impl ResponseBuilder for XmlResponseBuilder {
    fn build(&self, payload: RoutePayload) -> Result<ParsedRoute, RouteServiceError> {
        let document = match payload {
            RoutePayload::Document(document) => document,
            RoutePayload::Text(text) => XmlDocument::parse(&text).map_err(|e| {
                debug!(error = %e, "Failed to load XML route response");
                self.parse_failure()
            })?,
            RoutePayload::Json(_) => {
                debug!("JSON payload given to the XML builder");
                return Err(self.parse_failure());
            },
        };

        match self.reader.read(&document) {
            Ok(Some(parsed)) => Ok(parsed),
            Ok(None) => {
                debug!(
                    root = document.root().name(),
                    "Reader did not recognize the document"
                );
                Err(self.parse_failure())
            },
            Err(ReaderError::Geometry(e)) => {
                debug!(error = %e, "Route geometry conversion failed");
                Err(RouteServiceError::GeometryFormatError(
                    self.messages.get(MessageKey::ParamFormat, &["geometryWkt"]),
                ))
            },
            Err(e) => {
                debug!(error = %e, "Failed to read XML route response");
                Err(self.parse_failure())
            },
        }
    }

    fn name(&self) -> &'static str {
        "xml"
    }
}
