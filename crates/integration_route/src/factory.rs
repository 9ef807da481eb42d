//! Route response dispatcher

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument, trace};

use crate::builder::{ResponseBuilder, XmlResponseBuilder};
use crate::classifier::classify;
use crate::config::RouteResponseConfig;
use crate::error::RouteServiceError;
use crate::json::JsonResponseBuilder;
use crate::messages::{MessageKey, Messages};
use crate::request::{ApiFamily, OutputFormat, RouteOutput, RouteResponseRequest};
use crate::translator::InstructionTranslator;
use crate::wkt::{GeometryConverter, WktConverter};
use crate::xml::{OlsRouteReader, RestRouteReader};

type BuilderKey = (OutputFormat, ApiFamily);

/// Normalizes route service responses into [`RouteResponse`](domain::RouteResponse)
///
/// Holds one [`ResponseBuilder`] per output format and API family. The
/// factory keeps no per-call state and can be shared between threads.
pub struct RouteResponseFactory {
    builders: HashMap<BuilderKey, Arc<dyn ResponseBuilder>>,
    messages: Messages,
}

impl fmt::Debug for RouteResponseFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteResponseFactory")
            .field("supported", &self.supported())
            .field("messages", &self.messages)
            .finish()
    }
}

impl RouteResponseFactory {
    /// Create a factory with the default builders and a WKT converter
    #[must_use]
    pub fn new(config: &RouteResponseConfig) -> Self {
        Self::with_converter(config, Arc::new(WktConverter))
    }

    /// Create a factory with the default builders and a custom converter
    #[must_use]
    pub fn with_converter(
        config: &RouteResponseConfig,
        converter: Arc<dyn GeometryConverter>,
    ) -> Self {
        let messages = Messages::new(config.locale);
        let translator = InstructionTranslator::from_config(config);

        let rest: Arc<dyn ResponseBuilder> = Arc::new(XmlResponseBuilder::new(
            Arc::new(RestRouteReader::new(Arc::clone(&converter), translator.clone())),
            messages,
        ));
        let ols: Arc<dyn ResponseBuilder> =
            Arc::new(XmlResponseBuilder::new(Arc::new(OlsRouteReader::new()), messages));
        let json: Arc<dyn ResponseBuilder> =
            Arc::new(JsonResponseBuilder::new(converter, translator, messages));

        Self::empty(config)
            .with_builder(OutputFormat::Xml, ApiFamily::Rest, rest)
            .with_builder(OutputFormat::Xml, ApiFamily::Ols, ols)
            .with_builder(OutputFormat::Json, ApiFamily::Rest, Arc::clone(&json))
            .with_builder(OutputFormat::Json, ApiFamily::Ols, json)
    }

    /// Create a factory without builders
    #[must_use]
    pub fn empty(config: &RouteResponseConfig) -> Self {
        Self {
            builders: HashMap::new(),
            messages: Messages::new(config.locale),
        }
    }

    /// Register or replace the builder for a format and API family
    #[must_use]
    pub fn with_builder(
        mut self,
        format: OutputFormat,
        api: ApiFamily,
        builder: Arc<dyn ResponseBuilder>,
    ) -> Self {
        self.builders.insert((format, api), builder);
        self
    }

    /// Whether a builder is registered for a format and API family
    #[must_use]
    pub fn supports(&self, format: OutputFormat, api: ApiFamily) -> bool {
        self.builders.contains_key(&(format, api))
    }

    /// Registered pairs as `format/API`, sorted
    #[must_use]
    pub fn supported(&self) -> Vec<String> {
        let mut pairs: Vec<String> = self
            .builders
            .keys()
            .map(|(format, api)| format!("{format}/{api}"))
            .collect();
        pairs.sort();
        pairs
    }

    /// Normalize one service response
    ///
    /// # Errors
    ///
    /// Returns exactly one [`RouteServiceError`] when the payload is empty,
    /// no builder handles the request, the payload cannot be read, or the
    /// service reported a failure.
    #[instrument(skip_all, fields(format = %request.output_format, api = %request.api, raw = request.raw_response))]
    pub fn build(&self, request: RouteResponseRequest) -> Result<RouteOutput, RouteServiceError> {
        let payload = match request.payload {
            Some(payload) if !payload.is_empty() => payload,
            _ => {
                debug!("Route service response is empty");
                return Err(RouteServiceError::EmptyResponse(
                    self.messages.get(MessageKey::ServiceResponseEmpty, &[]),
                ));
            },
        };

        if request.raw_response {
            trace!(kind = payload.kind(), "Returning raw route response");
            return Ok(RouteOutput::Raw(payload));
        }

        let key = (request.output_format, request.api);
        let Some(builder) = self.builders.get(&key) else {
            debug!("No builder registered");
            let requested = format!("{}/{}", request.output_format, request.api);
            return Err(RouteServiceError::UnsupportedFormat(self.messages.get(
                MessageKey::ServiceResponseFormat,
                &[&requested, &self.supported().join(", ")],
            )));
        };

        trace!(builder = builder.name(), kind = payload.kind(), "Building route response");
        let parsed = builder.build(payload)?;
        let route = classify(parsed, &self.messages)?;

        debug!(
            instructions = route.instruction_count(),
            has_geometry = route.route_geometry.is_some(),
            "Route response normalized"
        );
        Ok(RouteOutput::Route(route))
    }

    /// Normalize one service response and report through callbacks
    ///
    /// Exactly one of `on_success` and `on_error` is called.
    pub fn build_with_callbacks<S, E>(&self, request: RouteResponseRequest, on_success: S, on_error: E)
    where
        S: FnOnce(RouteOutput),
        E: FnOnce(RouteServiceError),
    {
        match self.build(request) {
            Ok(output) => on_success(output),
            Err(error) => on_error(error),
        }
    }
}

impl Default for RouteResponseFactory {
    fn default() -> Self {
        Self::new(&RouteResponseConfig::default())
    }
}
