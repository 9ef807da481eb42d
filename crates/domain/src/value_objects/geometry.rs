//! Route geometry value object
//!
//! Geometries serialize to GeoJSON geometry objects
//! (`{"type": "LineString", "coordinates": [[x, y], ...]}`).

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A single `[x, y]` coordinate pair
pub type Position = [f64; 2];

/// GeoJSON-shaped geometry of a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    /// A single position
    Point(Position),
    /// An ordered path of at least two positions
    LineString(Vec<Position>),
    /// Several disjoint paths
    MultiLineString(Vec<Vec<Position>>),
}

impl Geometry {
    /// Create a point
    #[must_use]
    pub const fn point(x: f64, y: f64) -> Self {
        Self::Point([x, y])
    }

    /// Create a line string
    ///
    /// # Errors
    ///
    /// Returns `InvalidGeometry` if fewer than two positions are given.
    pub fn line_string(positions: Vec<Position>) -> Result<Self, DomainError> {
        if positions.len() < 2 {
            return Err(DomainError::invalid_geometry(format!(
                "LineString needs at least 2 positions, got {}",
                positions.len()
            )));
        }
        Ok(Self::LineString(positions))
    }

    /// Create a multi line string
    ///
    /// # Errors
    ///
    /// Returns `InvalidGeometry` if there are no lines or a line has fewer
    /// than two positions.
    pub fn multi_line_string(lines: Vec<Vec<Position>>) -> Result<Self, DomainError> {
        if lines.is_empty() {
            return Err(DomainError::invalid_geometry(
                "MultiLineString needs at least 1 line",
            ));
        }
        if let Some(short) = lines.iter().find(|line| line.len() < 2) {
            return Err(DomainError::invalid_geometry(format!(
                "MultiLineString lines need at least 2 positions, got {}",
                short.len()
            )));
        }
        Ok(Self::MultiLineString(lines))
    }

    /// Read a position from whitespace-separated text (`"2.35 48.85"`)
    ///
    /// A third ordinate (elevation) is accepted and dropped.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` unless the text holds two or three numbers.
    pub fn parse_position(text: &str) -> Result<Position, DomainError> {
        let values: Vec<f64> = text
            .split_whitespace()
            .map(str::parse::<f64>)
            .collect::<Result<_, _>>()
            .map_err(|_| DomainError::invalid_coordinate(text.trim()))?;

        match values.as_slice() {
            [x, y] | [x, y, _] => Ok([*x, *y]),
            _ => Err(DomainError::invalid_coordinate(text.trim())),
        }
    }

    /// GeoJSON type name
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Point(_) => "Point",
            Self::LineString(_) => "LineString",
            Self::MultiLineString(_) => "MultiLineString",
        }
    }

    /// Total number of positions
    #[must_use]
    pub fn position_count(&self) -> usize {
        match self {
            Self::Point(_) => 1,
            Self::LineString(positions) => positions.len(),
            Self::MultiLineString(lines) => lines.iter().map(Vec::len).sum(),
        }
    }

    /// First position of the geometry
    #[must_use]
    pub fn start(&self) -> Option<Position> {
        match self {
            Self::Point(position) => Some(*position),
            Self::LineString(positions) => positions.first().copied(),
            Self::MultiLineString(lines) => lines.first().and_then(|l| l.first()).copied(),
        }
    }

    /// Last position of the geometry
    #[must_use]
    pub fn end(&self) -> Option<Position> {
        match self {
            Self::Point(position) => Some(*position),
            Self::LineString(positions) => positions.last().copied(),
            Self::MultiLineString(lines) => lines.last().and_then(|l| l.last()).copied(),
        }
    }
}
