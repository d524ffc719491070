//! Default settings and fixed tolerances

/// Straight pieces used to approximate one circular arc
pub const SEGMENTS_PER_ARC: usize = 20;

/// Azimuths this close (degrees) to 0/90/180/270 format as a bare cardinal
pub const CARDINAL_TOLERANCE_DEG: f64 = 0.0001;

/// Decimal places for numbers written to the record stream
pub const STREAM_PRECISION: usize = 6;

/// Decimal places for distances, radii and arc lengths in table cells
pub const TABLE_PRECISION: usize = 3;

/// Tags written at the head of an exported record stream
pub const EXPORT_FORMAT_TAG: &str = "QB";
pub const EXPORT_UNIT_TAG: &str = "DMS";
