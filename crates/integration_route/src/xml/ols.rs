//! Reader for OpenLS `DetermineRouteResponse` documents

use domain::{BoundingBox, Geometry, Position, RouteInstruction, RouteResponse, parse_leading_float};
use tracing::debug;

use super::{ReaderError, RouteReader, XmlDocument, XmlElement, ows_exception_report};
use crate::models::{ExceptionReport, ParsedRoute};

const SECONDS_PER_WEEK: f64 = 604_800.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Reads OpenLS (`<XLS>`) route responses
///
/// Geometry comes as GML positions rather than WKT, and instructions carry
/// the service's own text, so no converter or translator is involved.
#[derive(Debug, Clone, Copy, Default)]
pub struct OlsRouteReader;

impl OlsRouteReader {
    /// Create a reader
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl RouteReader for OlsRouteReader {
    fn read(&self, document: &XmlDocument) -> Result<Option<ParsedRoute>, ReaderError> {
        let root = document.root();

        match root.name() {
            "XLS" => {},
            "ExceptionReport" => {
                return Ok(Some(ParsedRoute::exception(ows_exception_report(root))));
            },
            other => {
                debug!(root = other, "Document is not an OpenLS response");
                return Ok(None);
            },
        }

        if let Some(report) = root.find("ExceptionReport") {
            return Ok(Some(ParsedRoute::exception(ows_exception_report(report))));
        }
        if let Some(error) = root.find("ErrorList").and_then(|list| list.child("Error")) {
            return Ok(Some(ParsedRoute::exception(ExceptionReport {
                code: error.attribute("errorCode").map(str::to_string),
                text: error.attribute("message").map(str::to_string),
            })));
        }

        let Some(determine) = root.find("DetermineRouteResponse") else {
            debug!("OpenLS response holds no DetermineRouteResponse");
            return Ok(None);
        };

        let route = read_route(determine)?;
        if route.is_none() {
            debug!("DetermineRouteResponse holds no route content");
        }
        Ok(route.map(ParsedRoute::new))
    }
}

/// Map a `DetermineRouteResponse`; `None` when it holds no route content
fn read_route(determine: &XmlElement) -> Result<Option<RouteResponse>, ReaderError> {
    let mut response = RouteResponse::new();
    let mut populated = false;

    if let Some(summary) = determine.child("RouteSummary") {
        if let Some(text) = summary.child_text("TotalTime") {
            response.total_time = duration_seconds("TotalTime", text)?;
            populated = true;
        }
        if let Some(distance) = summary.child("TotalDistance") {
            response.total_distance = measure(distance);
            populated = true;
        }
        if let Some(bbox) = summary.child("BoundingBox") {
            response.bbox = bounding_box(bbox)?;
            populated = true;
        }
    }

    if let Some(line) = determine
        .child("RouteGeometry")
        .and_then(|geometry| geometry.find("LineString"))
    {
        response.route_geometry = Some(Geometry::line_string(line_positions(line)?)?);
        populated = true;
    }

    if let Some(list) = determine.child("RouteInstructionsList") {
        response.route_instructions = list
            .children_named("RouteInstruction")
            .map(read_instruction)
            .collect::<Result<_, _>>()?;
    }

    Ok((populated || !response.route_instructions.is_empty()).then_some(response))
}

fn read_instruction(element: &XmlElement) -> Result<RouteInstruction, ReaderError> {
    let duration = element
        .attribute("duration")
        .map_or(Ok(0.0), |text| duration_seconds("duration", text))?;
    let distance = element.child("distance").map_or(0.0, measure);
    let text = element.child_text("Instruction").unwrap_or_default();

    Ok(RouteInstruction::new(duration, distance, None, text))
}

/// Read a `value` attribute, or a `<value>` child, as a number
fn measure(element: &XmlElement) -> f64 {
    element
        .attribute("value")
        .or_else(|| element.child_text("value"))
        .map_or(f64::NAN, parse_leading_float)
}

fn bounding_box(element: &XmlElement) -> Result<BoundingBox, ReaderError> {
    let corners = element
        .children_named("pos")
        .map(|pos| Geometry::parse_position(pos.text()))
        .collect::<Result<Vec<_>, _>>()?;

    match corners.as_slice() {
        [lower_left, upper_right] => Ok(BoundingBox::from_corners(*lower_left, *upper_right)),
        _ => Err(ReaderError::invalid(
            "BoundingBox",
            format!("{} corners", corners.len()),
        )),
    }
}

fn line_positions(line: &XmlElement) -> Result<Vec<Position>, ReaderError> {
    if let Some(list) = line.child("posList") {
        return pos_list(list);
    }
    line.children_named("pos")
        .map(|pos| Geometry::parse_position(pos.text()).map_err(ReaderError::from))
        .collect()
}

fn pos_list(list: &XmlElement) -> Result<Vec<Position>, ReaderError> {
    let dimension = match list.attribute("srsDimension") {
        None => 2,
        Some(text) => text
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|d| (2..=3).contains(d))
            .ok_or_else(|| ReaderError::invalid("srsDimension", text))?,
    };

    let values: Vec<&str> = list.text().split_whitespace().collect();
    if values.len() % dimension != 0 {
        return Err(ReaderError::invalid("posList", list.text()));
    }

    values
        .chunks(dimension)
        .map(|ordinates| Geometry::parse_position(&ordinates.join(" ")).map_err(ReaderError::from))
        .collect()
}

fn duration_seconds(element: &str, text: &str) -> Result<f64, ReaderError> {
    parse_iso8601_duration(text).ok_or_else(|| ReaderError::invalid(element, text))
}

/// Convert an ISO-8601 duration (`PT5M12S`, `P1DT2H`) to seconds
///
/// Weeks and days are accepted in the date part; years and months are not,
/// since their length in seconds is undefined. A leading `-` negates.
#[must_use]
pub fn parse_iso8601_duration(text: &str) -> Option<f64> {
    let text = text.trim();
    let (negative, text) = text
        .strip_prefix('-')
        .map_or((false, text), |rest| (true, rest));
    let body = text.strip_prefix('P')?;

    let (date, time) = match body.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (body, None),
    };
    if time == Some("") || (date.is_empty() && time.is_none()) {
        return None;
    }

    let mut seconds = components(date, &[('W', SECONDS_PER_WEEK), ('D', SECONDS_PER_DAY)])?;
    if let Some(time) = time {
        seconds += components(
            time,
            &[
                ('H', SECONDS_PER_HOUR),
                ('M', SECONDS_PER_MINUTE),
                ('S', 1.0),
            ],
        )?;
    }

    Some(if negative { -seconds } else { seconds })
}

/// Sum `<number><designator>` pairs; designators must follow `units` order
fn components(part: &str, units: &[(char, f64)]) -> Option<f64> {
    let mut total = 0.0;
    let mut rest = part;
    let mut allowed = units;

    while !rest.is_empty() {
        let end = rest.find(|c: char| c.is_ascii_alphabetic())?;
        let (number, tail) = rest.split_at(end);
        let designator = tail.chars().next()?;
        let index = allowed.iter().position(|(unit, _)| *unit == designator)?;

        let value: f64 = number.replace(',', ".").parse().ok()?;
        total = value.mul_add(allowed[index].1, total);

        allowed = &allowed[index + 1..];
        rest = &tail[designator.len_utf8()..];
    }

    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTE: &str = r#"<xls:XLS xmlns:xls="http://www.opengis.net/xls" xmlns:gml="http://www.opengis.net/gml" version="1.2">
        <xls:Response requestID="1" version="1.2" numberOfResponses="1">
            <xls:DetermineRouteResponse>
                <xls:RouteSummary>
                    <xls:TotalTime>PT5M12.7S</xls:TotalTime>
                    <xls:TotalDistance uom="KM" value="2.5"/>
                    <xls:BoundingBox srsName="EPSG:4326">
                        <gml:pos>2.3 48.8</gml:pos>
                        <gml:pos>2.4 48.9</gml:pos>
                    </xls:BoundingBox>
                </xls:RouteSummary>
                <xls:RouteGeometry>
                    <gml:LineString srsName="EPSG:4326">
                        <gml:pos>2.3 48.8</gml:pos>
                        <gml:pos>2.4 48.9</gml:pos>
                    </gml:LineString>
                </xls:RouteGeometry>
                <xls:RouteInstructionsList>
                    <xls:RouteInstruction duration="PT12S" description="1">
                        <xls:Instruction>Tout droit Rue X</xls:Instruction>
                        <xls:distance uom="M"><xls:value>120</xls:value></xls:distance>
                    </xls:RouteInstruction>
                    <xls:RouteInstruction duration="PT1M5S" description="2">
                        <xls:Instruction>Tourner à gauche Rue Y</xls:Instruction>
                        <xls:distance uom="M" value="300"/>
                    </xls:RouteInstruction>
                </xls:RouteInstructionsList>
            </xls:DetermineRouteResponse>
        </xls:Response>
    </xls:XLS>"#;

    fn read(xml: &str) -> Result<Option<ParsedRoute>, ReaderError> {
        OlsRouteReader.read(&XmlDocument::parse(xml).unwrap())
    }

    #[test]
    fn test_reads_full_route() {
        let route = read(ROUTE).unwrap().unwrap().response;

        assert!((route.total_time - 312.7).abs() < 1e-9);
        assert!((route.total_distance - 2.5).abs() < f64::EPSILON);
        assert_eq!(route.bbox, BoundingBox::new(2.3, 48.8, 2.4, 48.9));
        assert_eq!(
            route.route_geometry,
            Some(Geometry::LineString(vec![[2.3, 48.8], [2.4, 48.9]]))
        );

        assert_eq!(route.route_instructions.len(), 2);
        let first = &route.route_instructions[0];
        assert_eq!(first.instruction(), "Tout droit Rue X");
        assert_eq!(first.code(), None);
        assert!((first.duration() - 12.0).abs() < f64::EPSILON);
        assert!((first.distance() - 120.0).abs() < f64::EPSILON);
        assert!((route.route_instructions[1].duration() - 65.0).abs() < f64::EPSILON);
        assert!((route.route_instructions[1].distance() - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pos_list_geometry() {
        let xml = r#"<XLS><Response><DetermineRouteResponse>
            <RouteGeometry><LineString><posList srsDimension="3">0 0 5 1 1 6 2 2 7</posList></LineString></RouteGeometry>
        </DetermineRouteResponse></Response></XLS>"#;
        let route = read(xml).unwrap().unwrap().response;
        assert_eq!(
            route.route_geometry,
            Some(Geometry::LineString(vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]))
        );
    }

    #[test]
    fn test_ragged_pos_list_is_invalid() {
        let xml = "<XLS><DetermineRouteResponse><RouteGeometry><LineString><posList>0 0 1</posList></LineString></RouteGeometry></DetermineRouteResponse></XLS>";
        assert!(matches!(read(xml), Err(ReaderError::InvalidValue { .. })));
    }

    #[test]
    fn test_single_corner_bbox_is_invalid() {
        let xml = "<XLS><DetermineRouteResponse><RouteSummary><BoundingBox><pos>1 2</pos></BoundingBox></RouteSummary></DetermineRouteResponse></XLS>";
        assert!(matches!(read(xml), Err(ReaderError::InvalidValue { .. })));
    }

    #[test]
    fn test_bad_total_time_is_invalid() {
        let xml = "<XLS><DetermineRouteResponse><RouteSummary><TotalTime>five minutes</TotalTime></RouteSummary></DetermineRouteResponse></XLS>";
        assert_eq!(
            read(xml).unwrap_err(),
            ReaderError::invalid("TotalTime", "five minutes")
        );
    }

    #[test]
    fn test_nested_exception_report() {
        let xml = r#"<XLS><Response><ExceptionReport>
            <Exception exceptionCode="NoRoute"><ExceptionText>No route between points</ExceptionText></Exception>
        </ExceptionReport></Response></XLS>"#;
        let parsed = read(xml).unwrap().unwrap();
        assert_eq!(
            parsed.exception_report,
            Some(ExceptionReport::with_text("No route between points").with_code("NoRoute"))
        );
    }

    #[test]
    fn test_error_list() {
        let xml = r#"<XLS><Response><ErrorList><Error errorCode="Unknown" message="Routing failed"/></ErrorList></Response></XLS>"#;
        let parsed = read(xml).unwrap().unwrap();
        assert_eq!(
            parsed.exception_report,
            Some(ExceptionReport::with_text("Routing failed").with_code("Unknown"))
        );
    }

    #[test]
    fn test_unrelated_documents_are_not_recognized() {
        assert_eq!(read("<routeResult/>").unwrap(), None);
        assert_eq!(read("<XLS><Response/></XLS>").unwrap(), None);
    }

    #[test]
    fn test_empty_determine_response_is_not_a_route() {
        for xml in [
            "<XLS><Response><DetermineRouteResponse/></Response></XLS>",
            "<XLS><Response><DetermineRouteResponse><RouteSummary/><RouteInstructionsList/></DetermineRouteResponse></Response></XLS>",
        ] {
            assert_eq!(read(xml).unwrap(), None, "{xml}");
        }
    }

    #[test]
    fn test_iso8601_durations() {
        assert_eq!(parse_iso8601_duration("PT1H2M3.5S"), Some(3723.5));
        assert_eq!(parse_iso8601_duration("P1DT0H"), Some(86_400.0));
        assert_eq!(parse_iso8601_duration("P1W"), Some(604_800.0));
        assert_eq!(parse_iso8601_duration("PT0,5S"), Some(0.5));
        assert_eq!(parse_iso8601_duration("-PT30S"), Some(-30.0));
        assert_eq!(parse_iso8601_duration("PT12S"), Some(12.0));
    }

    #[test]
    fn test_iso8601_rejects_bad_durations() {
        for text in ["", "P", "PT", "T5S", "P1Y", "P2M", "PT5", "PT5S3M", "PTxS", "5M"] {
            assert_eq!(parse_iso8601_duration(text), None, "{text}");
        }
    }
}
