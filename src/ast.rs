//! Syntax tree for the flat-text record stream
//!
//! One `Directive` per non-blank line; a `TraverseDocument` is what a whole
//! stream adds up to.

use std::fmt;

use crate::config::TraverseConfig;
use crate::defaults::STREAM_PRECISION;
use crate::errors::StreamError;
use crate::record::SegmentRecord;
use crate::types::Point;
use crate::walker::{self, WalkResult};

/// A single line of the record stream
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// `DT <name>`
    FormatTag(String),
    /// `DU <name>`
    UnitTag(String),
    /// `SP <x> <y>`
    StartPoint(Point),
    /// `EP <x> <y>`
    EndPoint(Point),
    /// `DD <direction> <distance>`
    Line(SegmentRecord),
    /// `CV <direction> <radius> <arc_length>`
    Curve(SegmentRecord),
}

impl Directive {
    pub fn keyword(&self) -> &'static str {
        match self {
            Directive::FormatTag(_) => "DT",
            Directive::UnitTag(_) => "DU",
            Directive::StartPoint(_) => "SP",
            Directive::EndPoint(_) => "EP",
            Directive::Line(_) => "DD",
            Directive::Curve(_) => "CV",
        }
    }

    /// `DD` for lines, `CV` for curves
    pub fn segment(record: SegmentRecord) -> Self {
        if record.is_curve() {
            Directive::Curve(record)
        } else {
            Directive::Line(record)
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = STREAM_PRECISION;
        let kw = self.keyword();
        match self {
            Directive::FormatTag(name) | Directive::UnitTag(name) => write!(f, "{kw} {name}"),
            Directive::StartPoint(pt) | Directive::EndPoint(pt) => {
                write!(f, "{kw} {:.p$} {:.p$}", pt.x, pt.y)
            }
            Directive::Line(r) => write!(f, "{kw} {} {:.p$}", r.direction, r.distance),
            Directive::Curve(r) => {
                write!(f, "{kw} {} {:.p$} {:.p$}", r.direction, r.radius, r.arc_length)
            }
        }
    }
}

/// Everything a record stream declares
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TraverseDocument {
    pub format_tag: Option<String>,
    pub unit_tag: Option<String>,
    pub start: Option<Point>,
    /// Explicit closing point from `EP`
    pub closing: Option<Point>,
    pub records: Vec<SegmentRecord>,
}

impl TraverseDocument {
    pub fn new(start: Point, records: Vec<SegmentRecord>) -> Self {
        Self {
            start: Some(start),
            records,
            ..Self::default()
        }
    }

    /// Fold one directive in. Later `SP`/`EP`/tags replace earlier ones.
    pub fn apply(&mut self, directive: Directive) {
        match directive {
            Directive::FormatTag(name) => self.format_tag = Some(name),
            Directive::UnitTag(name) => self.unit_tag = Some(name),
            Directive::StartPoint(pt) => self.start = Some(pt),
            Directive::EndPoint(pt) => self.closing = Some(pt),
            Directive::Line(record) | Directive::Curve(record) => self.records.push(record),
        }
    }

    pub fn start(&self) -> Result<Point, StreamError> {
        self.start.ok_or(StreamError::MissingStartPoint)
    }

    pub fn walk(&self, config: &TraverseConfig) -> Result<WalkResult, StreamError> {
        Ok(walker::walk(self.start()?, &self.records, config))
    }

    /// The explicit `EP` if there is one, otherwise the walked end point
    pub fn closing_point(&self, config: &TraverseConfig) -> Result<Point, StreamError> {
        match self.closing {
            Some(pt) => Ok(pt),
            None => Ok(walker::closing_point(self.start()?, &self.records, config)),
        }
    }
}

impl FromIterator<Directive> for TraverseDocument {
    fn from_iter<I: IntoIterator<Item = Directive>>(iter: I) -> Self {
        let mut document = TraverseDocument::default();
        for directive in iter {
            document.apply(directive);
        }
        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_render_six_decimals() {
        assert_eq!(
            Directive::StartPoint(Point::new(1.5, -2.0)).to_string(),
            "SP 1.500000 -2.000000"
        );
        assert_eq!(
            Directive::Line(SegmentRecord::line("N45-0-0E", 10.0)).to_string(),
            "DD N45-0-0E 10.000000"
        );
        assert_eq!(
            Directive::Curve(SegmentRecord::curve("*", -25.0, 12.5)).to_string(),
            "CV * -25.000000 12.500000"
        );
        assert_eq!(Directive::FormatTag("QB".into()).to_string(), "DT QB");
    }

    #[test]
    fn segment_picks_keyword() {
        assert_eq!(Directive::segment(SegmentRecord::line("N", 1.0)).keyword(), "DD");
        assert_eq!(Directive::segment(SegmentRecord::curve("N", 5.0, 1.0)).keyword(), "CV");
        assert_eq!(Directive::segment(SegmentRecord::curve("N", 0.0, 1.0)).keyword(), "DD");
    }

    #[test]
    fn later_points_override() {
        let document: TraverseDocument = [
            Directive::StartPoint(Point::new(1.0, 1.0)),
            Directive::Line(SegmentRecord::line("N", 1.0)),
            Directive::StartPoint(Point::new(2.0, 2.0)),
            Directive::EndPoint(Point::new(9.0, 9.0)),
        ]
        .into_iter()
        .collect();
        assert_eq!(document.start, Some(Point::new(2.0, 2.0)));
        assert_eq!(document.closing, Some(Point::new(9.0, 9.0)));
        assert_eq!(document.records.len(), 1);
    }

    #[test]
    fn closing_point_prefers_explicit() {
        let mut document =
            TraverseDocument::new(Point::ORIGIN, vec![SegmentRecord::line("E", 3.0)]);
        let config = TraverseConfig::default();
        let walked = document.closing_point(&config).unwrap();
        assert!(walked.distance(Point::new(3.0, 0.0)) < 1e-9);

        document.closing = Some(Point::new(7.0, 7.0));
        assert_eq!(document.closing_point(&config), Ok(Point::new(7.0, 7.0)));
    }

    #[test]
    fn walking_needs_a_start() {
        let document = TraverseDocument::default();
        assert_eq!(
            document.walk(&TraverseConfig::default()).unwrap_err(),
            StreamError::MissingStartPoint
        );
    }
}
