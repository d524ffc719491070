//! Coordinate geometry for survey traverses.
//!
//! A traverse is a chain of straight lines and circular arcs described by
//! bearings and distances. This crate decodes and formats quadrant bearings,
//! resolves tangent continuation between segments, discretizes arcs, walks
//! the chain into coordinates, and reads and writes the flat-text record
//! stream (`DT`/`DU`/`SP`/`EP`/`DD`/`CV`).
//!
//! ```
//! let result = traverse_cogo::traverse("SP 0 0\nDD N 10\nDD * 5\n").unwrap();
//! assert!((result.final_point.y - 15.0).abs() < 1e-9);
//! ```

use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "traverse.pest"]
pub struct RecordParser;

pub mod ast;
pub mod bearing;
pub mod config;
pub mod defaults;
pub mod errors;
pub mod export;
pub mod geometry;
pub mod log;
pub mod parse;
pub mod record;
pub mod tangent;
pub mod types;
pub mod walker;

pub use ast::{Directive, TraverseDocument};
pub use bearing::{Bearing, Cardinal, Quadrant, format_bearing, parse_bearing, parse_direction};
pub use config::TraverseConfig;
pub use errors::{ErrorKind, RowDiagnostic, StreamError, TraverseError};
pub use export::{Export, export};
pub use geometry::{GeneratedGeometry, SegmentPath, Trace, TurnDirection, generate};
pub use parse::{Import, import};
pub use record::{ResolvedSegment, SegmentKind, SegmentRecord, TableRow};
pub use tangent::{resolve, resolve_azimuth};
pub use types::{Azimuth, Point};
pub use walker::{
    SegmentAttributes, TraverseState, WalkResult, WalkedSegment, closing_point, walk, walk_from,
    walk_rows,
};

/// Import a record stream and walk it from its start point.
///
/// Any line the importer had to skip is an error here; use [`import`] for a
/// lenient read. Rows that fail during the walk are reported in
/// [`WalkResult::diagnostics`].
pub fn traverse(source: &str) -> Result<WalkResult, miette::Report> {
    let Import {
        document,
        diagnostics,
    } = import(source);

    if let Some(error) = diagnostics.first() {
        return Err(error.to_report("traverse", source));
    }

    Ok(document.walk(&TraverseConfig::default())?)
}
