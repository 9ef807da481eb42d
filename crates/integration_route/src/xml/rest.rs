//! Reader for the REST route document (`<routeResult>`)

use std::fmt;
use std::sync::Arc;

use domain::{BoundingBox, RouteResponse, parse_leading_float};
use tracing::debug;

use super::{ReaderError, RouteReader, XmlDocument, XmlElement, ows_exception_report};
use crate::models::{ExceptionReport, ParsedRoute};
use crate::steps::{WireStep, flatten_legs, seconds_from_text};
use crate::translator::InstructionTranslator;
use crate::wkt::{GeometryConverter, WktConverter, convert_required};

const ROOT: &str = "routeResult";

/// Reads `<routeResult>` documents from the REST API
///
/// The element names mirror the JSON keys of the same API, so both dialects
/// share leg flattening and scalar rules.
pub struct RestRouteReader {
    converter: Arc<dyn GeometryConverter>,
    translator: InstructionTranslator,
}

impl fmt::Debug for RestRouteReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestRouteReader")
            .field("translator", &self.translator)
            .finish_non_exhaustive()
    }
}

impl RestRouteReader {
    /// Create a reader
    #[must_use]
    pub fn new(converter: Arc<dyn GeometryConverter>, translator: InstructionTranslator) -> Self {
        Self {
            converter,
            translator,
        }
    }

    fn exception_report(root: &XmlElement) -> Option<ExceptionReport> {
        let message = root.child_text("message");
        let failed = root
            .child_text("status")
            .is_some_and(|status| status.eq_ignore_ascii_case("ERROR"));

        (failed || message.is_some()).then(|| ExceptionReport {
            code: None,
            text: message.map(str::to_string),
        })
    }

    /// Map the route fields; `None` when the result holds none of them
    fn read_route(&self, root: &XmlElement) -> Result<Option<RouteResponse>, ReaderError> {
        let mut response = RouteResponse::new();
        let mut populated = false;

        if let Some(text) = root.child_text("durationSeconds") {
            response.total_time = parse_leading_float(text);
            populated = true;
        }
        if let Some(text) = root.child_text("distance") {
            response.total_distance = parse_leading_float(text);
            populated = true;
        }
        if let Some(text) = root.child_text("bounds") {
            response.bbox = BoundingBox::from_delimited(text);
            populated = true;
        }
        if let Some(text) = root.child_text("geometryWkt") {
            response.route_geometry = Some(convert_required(self.converter.as_ref(), text)?);
            populated = true;
        }

        let legs = root
            .child("legs")
            .map(|legs| legs.children_named("leg").map(read_leg).collect())
            .unwrap_or_default();
        response.route_instructions = flatten_legs(legs, &self.translator);

        Ok((populated || !response.route_instructions.is_empty()).then_some(response))
    }
}

impl Default for RestRouteReader {
    fn default() -> Self {
        Self::new(Arc::new(WktConverter), InstructionTranslator::default())
    }
}

impl RouteReader for RestRouteReader {
    fn read(&self, document: &XmlDocument) -> Result<Option<ParsedRoute>, ReaderError> {
        let root = document.root();

        match root.name() {
            ROOT => {},
            "ExceptionReport" => {
                return Ok(Some(ParsedRoute::exception(ows_exception_report(root))));
            },
            other => {
                debug!(root = other, "Document is not a REST route result");
                return Ok(None);
            },
        }

        if let Some(report) = Self::exception_report(root) {
            return Ok(Some(ParsedRoute::exception(report)));
        }

        let route = self.read_route(root)?;
        if route.is_none() {
            debug!("REST route result holds no route field");
        }
        Ok(route.map(ParsedRoute::new))
    }
}

fn read_leg(leg: &XmlElement) -> Vec<WireStep> {
    leg.child("steps")
        .map(|steps| steps.children_named("step").map(read_step).collect())
        .unwrap_or_default()
}

fn read_step(step: &XmlElement) -> WireStep {
    WireStep {
        duration: step.child_text("duration").map_or(0.0, seconds_from_text),
        distance: step.child_text("distance").map_or(0.0, parse_leading_float),
        code: step.child_text("navInstruction").map(str::to_string),
        name: step.child_text("name").unwrap_or_default().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wkt::{GeometryError, MockGeometryConverter};
    use domain::{Geometry, RouteInstruction};

    const ROUTE: &str = r"<routeResult>
        <status>OK</status>
        <message/>
        <distance>2.5 Km</distance>
        <durationSeconds>312.7</durationSeconds>
        <bounds>2.3,48.8;2.4,48.9</bounds>
        <geometryWkt>LINESTRING (2.3 48.8, 2.4 48.9)</geometryWkt>
        <legs>
            <leg><steps>
                <step><navInstruction>F</navInstruction><name>Rue X</name>
                      <duration>12.4</duration><distance>120</distance></step>
                <step><navInstruction>L</navInstruction><name>Rue Y</name>
                      <duration>0:01:05</duration><distance>300</distance></step>
            </steps></leg>
            <leg><steps>
                <step><name>Avenue Z</name><duration>30</duration><distance>80</distance></step>
            </steps></leg>
        </legs>
    </routeResult>";

    fn read(xml: &str) -> Result<Option<ParsedRoute>, ReaderError> {
        RestRouteReader::default().read(&XmlDocument::parse(xml).unwrap())
    }

    #[test]
    fn test_reads_full_route() {
        let parsed = read(ROUTE).unwrap().unwrap();
        assert!(parsed.exception_report.is_none());

        let route = parsed.response;
        assert!((route.total_time - 312.7).abs() < f64::EPSILON);
        assert!((route.total_distance - 2.5).abs() < f64::EPSILON);
        assert_eq!(route.bbox, BoundingBox::new(2.3, 48.8, 2.4, 48.9));
        assert_eq!(
            route.route_geometry,
            Some(Geometry::LineString(vec![[2.3, 48.8], [2.4, 48.9]]))
        );

        let texts: Vec<&str> = route
            .route_instructions
            .iter()
            .map(RouteInstruction::instruction)
            .collect();
        assert_eq!(
            texts,
            vec!["straight ahead onto Rue X", "turn left Rue Y", "take Avenue Z"]
        );
        assert!((route.route_instructions[1].duration() - 65.0).abs() < f64::EPSILON);
        assert_eq!(route.route_instructions[2].code(), None);
    }

    #[test]
    fn test_other_root_is_not_recognized() {
        assert_eq!(read("<XLS/>").unwrap(), None);
    }

    #[test]
    fn test_error_status_is_exception() {
        let parsed = read(
            "<routeResult><status>ERROR</status><message>No route found</message></routeResult>",
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            parsed.exception_report,
            Some(ExceptionReport::with_text("No route found"))
        );
    }

    #[test]
    fn test_error_status_without_message() {
        let parsed = read("<routeResult><status>ERROR</status></routeResult>")
            .unwrap()
            .unwrap();
        assert_eq!(parsed.exception_report, Some(ExceptionReport::default()));
    }

    #[test]
    fn test_ows_exception_root() {
        let parsed = read(
            "<ExceptionReport><Exception exceptionCode=\"E1\"><ExceptionText>bad</ExceptionText></Exception></ExceptionReport>",
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            parsed.exception_report,
            Some(ExceptionReport::with_text("bad").with_code("E1"))
        );
    }

    #[test]
    fn test_missing_fields_keep_defaults() {
        let route = read("<routeResult><distance>10</distance></routeResult>")
            .unwrap()
            .unwrap()
            .response;
        assert!((route.total_distance - 10.0).abs() < f64::EPSILON);
        assert_eq!(route.bbox, BoundingBox::default());
        assert!(route.route_geometry.is_none());
        assert!(route.route_instructions.is_empty());
    }

    #[test]
    fn test_result_without_route_fields_is_not_a_route() {
        for xml in [
            "<routeResult/>",
            "<routeResult><status>OK</status><message/></routeResult>",
            "<routeResult><distance/><legs><leg><steps/></leg></legs></routeResult>",
        ] {
            assert_eq!(read(xml).unwrap(), None, "{xml}");
        }
    }

    #[test]
    fn test_steps_alone_make_a_route() {
        let route = read("<routeResult><legs><leg><steps><step><navInstruction>L</navInstruction></step></steps></leg></legs></routeResult>")
            .unwrap()
            .unwrap()
            .response;
        assert_eq!(route.instruction_count(), 1);
        assert!(route.total_distance.abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_geometry_is_error() {
        let err = read("<routeResult><geometryWkt>LINESTRING EMPTY</geometryWkt></routeResult>")
            .unwrap_err();
        assert!(matches!(err, ReaderError::Geometry(GeometryError::Empty(_))));
    }

    #[test]
    fn test_converter_error_propagates() {
        let mut converter = MockGeometryConverter::new();
        converter
            .expect_convert()
            .returning(|text| Err(GeometryError::Malformed(text.to_string())));
        let reader = RestRouteReader::new(Arc::new(converter), InstructionTranslator::default());
        let document =
            XmlDocument::parse("<routeResult><geometryWkt>junk</geometryWkt></routeResult>")
                .unwrap();

        assert!(matches!(
            reader.read(&document),
            Err(ReaderError::Geometry(GeometryError::Malformed(_)))
        ));
    }
}
