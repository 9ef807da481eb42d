//! Well-known text geometry conversion
//!
//! Converts the WKT geometries route services embed (`LINESTRING (...)`,
//! optionally with an EWKT `SRID=...;` prefix or a `Z`/`M` modifier) into
//! GeoJSON-shaped [`Geometry`] values.

use domain::{DomainError, Geometry, Position};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Errors that can occur while converting a geometry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The WKT names a geometry type routes never use
    #[error("Unsupported geometry type: {0}")]
    UnsupportedType(String),

    /// The text is not well-formed WKT
    #[error("Malformed WKT: {0}")]
    Malformed(String),

    /// The geometry violates a shape rule
    #[error(transparent)]
    Invalid(#[from] DomainError),

    /// Conversion finished without a geometry
    #[error("Geometry is empty: {0}")]
    Empty(String),
}

/// Converts a textual geometry into the canonical form
///
/// `Ok(None)` means the conversion finished without producing a geometry
/// (for instance `LINESTRING EMPTY`); callers treat that as a failure.
#[cfg_attr(test, automock)]
pub trait GeometryConverter: Send + Sync {
    /// Convert one geometry
    fn convert(&self, text: &str) -> Result<Option<Geometry>, GeometryError>;
}

/// WKT reader for points, line strings and multi line strings
#[derive(Debug, Clone, Copy, Default)]
pub struct WktConverter;

impl WktConverter {
    /// Parse a WKT geometry
    pub fn parse(wkt: &str) -> Result<Option<Geometry>, GeometryError> {
        let text = strip_srid(wkt.trim());
        let keyword_end = text
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(text.len());
        let (keyword, rest) = text.split_at(keyword_end);
        let keyword = keyword.to_ascii_uppercase();

        match keyword.as_str() {
            "POINT" | "LINESTRING" | "MULTILINESTRING" => {},
            "" => return Err(GeometryError::Malformed(wkt.trim().to_string())),
            _ => return Err(GeometryError::UnsupportedType(keyword)),
        }

        let rest = strip_dimension(rest.trim_start());
        if rest.eq_ignore_ascii_case("EMPTY") {
            return Ok(None);
        }

        let body = rest
            .strip_prefix('(')
            .and_then(|r| r.strip_suffix(')'))
            .ok_or_else(|| GeometryError::Malformed(wkt.trim().to_string()))?;

        let geometry = match keyword.as_str() {
            "POINT" => Geometry::Point(Geometry::parse_position(body)?),
            "LINESTRING" => Geometry::line_string(parse_positions(body)?)?,
            _ => {
                let lines = split_groups(body)
                    .ok_or_else(|| GeometryError::Malformed(wkt.trim().to_string()))?
                    .into_iter()
                    .map(parse_positions)
                    .collect::<Result<Vec<_>, _>>()?;
                Geometry::multi_line_string(lines)?
            },
        };

        Ok(Some(geometry))
    }
}

impl GeometryConverter for WktConverter {
    fn convert(&self, text: &str) -> Result<Option<Geometry>, GeometryError> {
        Self::parse(text)
    }
}

/// Convert a geometry that must be present
///
/// A converter returning `Ok(None)` yields [`GeometryError::Empty`].
pub(crate) fn convert_required(
    converter: &dyn GeometryConverter,
    text: &str,
) -> Result<Geometry, GeometryError> {
    converter
        .convert(text)?
        .ok_or_else(|| GeometryError::Empty(text.trim().to_string()))
}

/// Drop an EWKT `SRID=4326;` prefix
fn strip_srid(text: &str) -> &str {
    match text.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("SRID=") => text
            .split_once(';')
            .map_or(text, |(_, geometry)| geometry.trim_start()),
        _ => text,
    }
}

/// Drop a `Z`, `M` or `ZM` dimension modifier
fn strip_dimension(text: &str) -> &str {
    for modifier in ["ZM", "Z", "M"] {
        if let Some(rest) = text.strip_prefix(modifier) {
            if rest.starts_with(|c: char| c == '(' || c.is_whitespace()) {
                return rest.trim_start();
            }
        }
    }
    text
}

fn parse_positions(body: &str) -> Result<Vec<Position>, DomainError> {
    body.split(',').map(Geometry::parse_position).collect()
}

/// Split `(a), (b)` into the inner texts
fn split_groups(body: &str) -> Option<Vec<&str>> {
    let mut groups = Vec::new();
    let mut rest = body.trim();

    while !rest.is_empty() {
        let inner = rest.strip_prefix('(')?;
        let close = inner.find(')')?;
        groups.push(&inner[..close]);
        rest = inner[close + 1..].trim_start();

        if let Some(next) = rest.strip_prefix(',') {
            rest = next.trim_start();
            if rest.is_empty() {
                return None;
            }
        } else if !rest.is_empty() {
            return None;
        }
    }

    Some(groups)
}
