//! Traverse segment records
//!
//! A `SegmentRecord` is one row of a traverse as the caller supplies it;
//! a `ResolvedSegment` is the same row once its starting azimuth is known.

use crate::defaults::TABLE_PRECISION;
use crate::errors::TraverseError;
use crate::types::{Azimuth, Point};

/// Direction token meaning "tangent to the previous segment"
pub const TANGENT_TOKEN: &str = "*";

/// Whether a direction token asks for tangent continuation (`""` or `*`)
pub fn is_tangent_token(token: &str) -> bool {
    let token = token.trim();
    token.is_empty() || token == TANGENT_TOKEN
}

/// Line or arc
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Line,
    Arc,
}

/// One traverse element as supplied by the caller
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SegmentRecord {
    /// Decimal degrees, quadrant bearing, `""` or `*`
    pub direction: String,
    pub distance: f64,
    /// Signed: positive turns right, negative turns left, zero is straight
    pub radius: f64,
    pub arc_length: f64,
}

impl SegmentRecord {
    /// A straight segment
    pub fn line(direction: impl Into<String>, distance: f64) -> Self {
        Self {
            direction: direction.into(),
            distance,
            radius: 0.0,
            arc_length: 0.0,
        }
    }

    /// A circular arc. The distance is set to the arc length.
    pub fn curve(direction: impl Into<String>, radius: f64, arc_length: f64) -> Self {
        Self {
            direction: direction.into(),
            distance: arc_length,
            radius,
            arc_length,
        }
    }

    /// A straight segment continuing the previous segment's exit direction
    pub fn tangent_line(distance: f64) -> Self {
        Self::line(TANGENT_TOKEN, distance)
    }

    /// An arc continuing the previous segment's exit direction
    pub fn tangent_curve(radius: f64, arc_length: f64) -> Self {
        Self::curve(TANGENT_TOKEN, radius, arc_length)
    }

    /// Digitize a straight segment from two picked points.
    ///
    /// Coincident points give a zero-length segment pointing north.
    pub fn from_points(from: Point, to: Point) -> Self {
        let azimuth = from.azimuth_to(to).unwrap_or(Azimuth::NORTH);
        Self::line(format!("{:.2}°", azimuth.degrees()), from.distance(to))
    }

    /// Both radius and arc length must be non-zero for a curve
    pub fn is_curve(&self) -> bool {
        self.radius != 0.0 && self.arc_length != 0.0
    }

    pub fn kind(&self) -> SegmentKind {
        if self.is_curve() {
            SegmentKind::Arc
        } else {
            SegmentKind::Line
        }
    }

    pub fn is_tangent(&self) -> bool {
        is_tangent_token(&self.direction)
    }
}

/// A record after tangent resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSegment {
    pub start_azimuth: Azimuth,
    pub kind: SegmentKind,
    pub distance: f64,
    pub radius: f64,
    pub arc_length: f64,
}

impl ResolvedSegment {
    pub fn new(record: &SegmentRecord, start_azimuth: Azimuth) -> Self {
        Self {
            start_azimuth,
            kind: record.kind(),
            distance: record.distance,
            radius: record.radius,
            arc_length: record.arc_length,
        }
    }
}

/// A record in tabular text form, one string per cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableRow {
    pub direction: String,
    pub distance: String,
    pub radius: String,
    pub arc_length: String,
}

impl TableRow {
    pub fn new(
        direction: impl Into<String>,
        distance: impl Into<String>,
        radius: impl Into<String>,
        arc_length: impl Into<String>,
    ) -> Self {
        Self {
            direction: direction.into(),
            distance: distance.into(),
            radius: radius.into(),
            arc_length: arc_length.into(),
        }
    }

    /// A freshly inserted row: tangent direction, zero magnitudes
    pub fn blank() -> Self {
        let zero = format!("{:.*}", TABLE_PRECISION, 0.0);
        Self::new("", zero.clone(), zero.clone(), zero)
    }

    /// Parse the numeric cells.
    ///
    /// The distance cell is required; empty radius and arc-length cells mean 0.
    pub fn to_record(&self) -> Result<SegmentRecord, TraverseError> {
        Ok(SegmentRecord {
            direction: self.direction.trim().to_string(),
            distance: parse_cell("distance", &self.distance, None)?,
            radius: parse_cell("radius", &self.radius, Some(0.0))?,
            arc_length: parse_cell("arc length", &self.arc_length, Some(0.0))?,
        })
    }
}

impl From<&SegmentRecord> for TableRow {
    fn from(record: &SegmentRecord) -> Self {
        Self {
            direction: record.direction.clone(),
            distance: format!("{:.*}", TABLE_PRECISION, record.distance),
            radius: format!("{:.*}", TABLE_PRECISION, record.radius),
            arc_length: format!("{:.*}", TABLE_PRECISION, record.arc_length),
        }
    }
}

fn parse_cell(field: &'static str, text: &str, empty: Option<f64>) -> Result<f64, TraverseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        if let Some(value) = empty {
            return Ok(value);
        }
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| TraverseError::MalformedNumericField {
            field,
            text: text.to_string(),
        })
}
