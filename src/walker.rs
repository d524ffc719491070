//! Traverse walker
//!
//! One pass over the records, threading the current point and the last exit
//! azimuth from segment to segment. Drawing, closing-point computation and
//! export all go through this walk.

use crate::bearing::format_bearing;
use crate::config::TraverseConfig;
use crate::errors::{RowDiagnostic, TraverseError};
use crate::geometry::SegmentPath;
use crate::log::{debug, warn};
use crate::record::{ResolvedSegment, SegmentRecord, TableRow};
use crate::tangent::resolve;
use crate::types::{Azimuth, Point};

/// Position and heading between two segments.
///
/// `Copy`, so a caller can checkpoint it and resume a walk later.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraverseState {
    pub current_point: Point,
    /// `None` until the first segment has been walked
    pub last_exit_azimuth: Option<Azimuth>,
}

impl TraverseState {
    pub fn new(start: Point) -> Self {
        Self {
            current_point: start,
            last_exit_azimuth: None,
        }
    }

    /// Walk one record. On error the state is left untouched.
    ///
    /// `row` is the record's index in the whole traverse; row 0 must carry
    /// an explicit direction.
    pub fn step(
        &mut self,
        row: usize,
        record: &SegmentRecord,
        config: &TraverseConfig,
    ) -> Result<WalkedSegment, TraverseError> {
        let resolved = resolve(record, row, self.last_exit_azimuth)?;
        let geometry = SegmentPath::from_resolved(self.current_point, &resolved)
            .generate(config.segments_per_arc);

        self.current_point = geometry.end_point();
        self.last_exit_azimuth = Some(geometry.exit_azimuth);

        Ok(WalkedSegment {
            row,
            vertices: geometry.vertices,
            exit_azimuth: geometry.exit_azimuth,
            resolved,
            record: record.clone(),
        })
    }
}

/// A record that was successfully walked
#[derive(Debug, Clone, PartialEq)]
pub struct WalkedSegment {
    /// Index of the source record
    pub row: usize,
    pub vertices: Vec<Point>,
    pub exit_azimuth: Azimuth,
    pub resolved: ResolvedSegment,
    pub record: SegmentRecord,
}

impl WalkedSegment {
    /// Attribute row stored alongside the segment's geometry
    pub fn attributes(&self) -> SegmentAttributes {
        SegmentAttributes {
            segment_id: self.row,
            direction: format_bearing(self.resolved.start_azimuth.degrees()),
            distance: self.record.distance,
            radius: self.record.radius,
            arc_length: self.record.arc_length,
        }
    }
}

/// Per-segment attributes: id, effective direction as a bearing, and the
/// magnitudes as entered
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentAttributes {
    pub segment_id: usize,
    pub direction: String,
    pub distance: f64,
    pub radius: f64,
    pub arc_length: f64,
}

/// Everything a walk produced
#[derive(Debug, Clone, PartialEq)]
pub struct WalkResult {
    /// Walked segments in record order; skipped rows are absent
    pub segments: Vec<WalkedSegment>,
    pub final_point: Point,
    pub final_exit_azimuth: Option<Azimuth>,
    /// One entry per skipped row, in row order
    pub diagnostics: Vec<RowDiagnostic>,
}

impl WalkResult {
    /// All vertices as one connected polyline, without repeated joints
    pub fn polyline(&self) -> Vec<Point> {
        let mut points: Vec<Point> = Vec::new();
        for segment in &self.segments {
            let skip = usize::from(!points.is_empty());
            points.extend(segment.vertices.iter().skip(skip).copied());
        }
        points
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// State to resume from when the traverse continues in another chunk
    pub fn state(&self) -> TraverseState {
        TraverseState {
            current_point: self.final_point,
            last_exit_azimuth: self.final_exit_azimuth,
        }
    }
}

/// Walk a whole traverse from `start`
pub fn walk(start: Point, records: &[SegmentRecord], config: &TraverseConfig) -> WalkResult {
    walk_from(TraverseState::new(start), records, 0, config)
}

/// Continue a walk from a saved state.
///
/// `first_row` is the global index of `records[0]`, so tangent rules and
/// diagnostics line up with a single uninterrupted walk.
pub fn walk_from(
    state: TraverseState,
    records: &[SegmentRecord],
    first_row: usize,
    config: &TraverseConfig,
) -> WalkResult {
    fold(
        state,
        records
            .iter()
            .enumerate()
            .map(|(i, record)| (first_row + i, Ok(record.clone()))),
        config,
    )
}

/// Walk tabular rows whose cells are still text.
///
/// Rows with non-numeric magnitudes are skipped with `MalformedNumericField`.
pub fn walk_rows(start: Point, rows: &[TableRow], config: &TraverseConfig) -> WalkResult {
    fold(
        TraverseState::new(start),
        rows.iter().enumerate().map(|(i, row)| (i, row.to_record())),
        config,
    )
}

/// Where the traverse ends, computed with the same walk used for drawing
pub fn closing_point(start: Point, records: &[SegmentRecord], config: &TraverseConfig) -> Point {
    walk(start, records, config).final_point
}

fn fold<I>(mut state: TraverseState, rows: I, config: &TraverseConfig) -> WalkResult
where
    I: Iterator<Item = (usize, Result<SegmentRecord, TraverseError>)>,
{
    let mut segments = Vec::new();
    let mut diagnostics = Vec::new();

    for (row, record) in rows {
        match record.and_then(|record| state.step(row, &record, config)) {
            Ok(segment) => {
                debug!(
                    row,
                    vertices = segment.vertices.len(),
                    exit = segment.exit_azimuth.degrees(),
                    "walked segment"
                );
                segments.push(segment);
            }
            Err(error) => {
                warn!(row, %error, "skipping row");
                diagnostics.push(RowDiagnostic { row, error });
            }
        }
    }

    WalkResult {
        segments,
        final_point: state.current_point,
        final_exit_azimuth: state.last_exit_azimuth,
        diagnostics,
    }
}
