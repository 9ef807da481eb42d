//! Route service response normalization
//!
//! Turns itinerary service responses into the canonical
//! [`RouteResponse`](domain::RouteResponse). Three dialects are handled:
//! REST XML (`<routeResult>`), OpenLS XML (`<XLS>`) and REST JSON.
//!
//! # Architecture
//!
//! [`RouteResponseFactory`] dispatches on output format and API family to a
//! [`ResponseBuilder`]. The XML builder delegates to a [`RouteReader`]
//! ([`RestRouteReader`], [`OlsRouteReader`]); the JSON builder reads the
//! object directly. Every candidate then goes through [`classify`], which
//! turns embedded service exceptions into [`RouteServiceError::ServiceException`].
//!
//! Geometry text goes through a [`GeometryConverter`] ([`WktConverter`] by
//! default) and maneuver codes through the [`InstructionTranslator`].
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_route::{RouteResponseConfig, RouteResponseFactory, RouteResponseRequest};
//!
//! let factory = RouteResponseFactory::new(&RouteResponseConfig::default());
//! let output = factory.build(RouteResponseRequest::json(r#"{"distance": 2.5}"#))?;
//! ```

mod builder;
mod classifier;
mod config;
mod error;
mod factory;
mod json;
mod messages;
mod models;
mod request;
mod steps;
mod translator;
mod wkt;
mod xml;

pub use builder::{ResponseBuilder, XmlResponseBuilder};
pub use classifier::classify;
pub use config::{RouteResponseConfig, UNNAMED_ROAD_SENTINEL};
pub use error::{ErrorKind, RouteServiceError};
pub use factory::RouteResponseFactory;
pub use json::JsonResponseBuilder;
pub use messages::{Locale, MessageKey, Messages};
pub use models::{ExceptionReport, ParsedRoute};
pub use request::{ApiFamily, OutputFormat, RouteOutput, RoutePayload, RouteResponseRequest};
pub use translator::InstructionTranslator;
pub use wkt::{GeometryConverter, GeometryError, WktConverter};
pub use xml::{
    MAX_DEPTH, OlsRouteReader, ReaderError, RestRouteReader, RouteReader, XmlDocument, XmlElement,
    XmlError, parse_iso8601_duration,
};
