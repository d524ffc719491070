//! Tangent resolution: the starting azimuth of each segment

use crate::bearing::parse_direction;
use crate::errors::TraverseError;
use crate::log::debug;
use crate::record::{ResolvedSegment, SegmentRecord, is_tangent_token};
use crate::types::Azimuth;

/// Determine the azimuth a segment starts along.
///
/// The first record must carry an explicit direction. Later records with an
/// empty or `*` direction continue along `previous_exit`.
pub fn resolve_azimuth(
    record: &SegmentRecord,
    index: usize,
    previous_exit: Option<Azimuth>,
) -> Result<Azimuth, TraverseError> {
    let token = record.direction.trim();

    if is_tangent_token(token) {
        if index == 0 {
            return Err(TraverseError::MissingFirstDirection);
        }
        let azimuth = previous_exit.ok_or(TraverseError::NoTangentReference)?;
        debug!(row = index, azimuth = azimuth.degrees(), "using tangent from previous segment");
        return Ok(azimuth);
    }

    // parse_direction already normalizes into [0, 360)
    parse_direction(token)
}

/// Resolve a record into its starting azimuth and kind
pub fn resolve(
    record: &SegmentRecord,
    index: usize,
    previous_exit: Option<Azimuth>,
) -> Result<ResolvedSegment, TraverseError> {
    let azimuth = resolve_azimuth(record, index, previous_exit)?;
    Ok(ResolvedSegment::new(record, azimuth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::record::SegmentKind;

    #[test]
    fn first_row_needs_explicit_direction() {
        for token in ["", "*", "  "] {
            let record = SegmentRecord::line(token, 10.0);
            assert_eq!(
                resolve_azimuth(&record, 0, Some(Azimuth::EAST)),
                Err(TraverseError::MissingFirstDirection)
            );
        }
    }

    #[test]
    fn tangent_reuses_previous_exit() {
        let record = SegmentRecord::tangent_line(10.0);
        let prev = Azimuth::new(123.4);
        assert_eq!(resolve_azimuth(&record, 3, Some(prev)), Ok(prev));
        let blank = SegmentRecord::line("", 10.0);
        assert_eq!(resolve_azimuth(&blank, 1, Some(prev)), Ok(prev));
    }

    #[test]
    fn tangent_without_reference() {
        let record = SegmentRecord::tangent_line(10.0);
        assert_eq!(
            resolve_azimuth(&record, 2, None),
            Err(TraverseError::NoTangentReference)
        );
    }

    #[test]
    fn explicit_direction_ignores_previous() {
        let record = SegmentRecord::line("S60E", 10.0);
        assert_eq!(
            resolve_azimuth(&record, 1, Some(Azimuth::NORTH)).unwrap().degrees(),
            120.0
        );
    }

    #[test]
    fn explicit_direction_is_normalized() {
        for (token, expected) in [("-45", 315.0), ("720.5", 0.5), ("360", 0.0)] {
            let record = SegmentRecord::line(token, 1.0);
            let azimuth = resolve_azimuth(&record, 0, None).unwrap().degrees();
            assert_eq!(azimuth, expected, "{token}");
            assert!((0.0..360.0).contains(&azimuth));
        }
    }

    #[test]
    fn unparseable_direction() {
        let record = SegmentRecord::line("up-left", 1.0);
        assert_eq!(
            resolve_azimuth(&record, 1, Some(Azimuth::NORTH)).unwrap_err().kind(),
            ErrorKind::InvalidDirection
        );
    }

    #[test]
    fn resolve_carries_kind() {
        let record = SegmentRecord::curve("N", 50.0, 20.0);
        let resolved = resolve(&record, 0, None).unwrap();
        assert_eq!(resolved.kind, SegmentKind::Arc);
        assert_eq!(resolved.start_azimuth, Azimuth::NORTH);
        assert_eq!(resolved.radius, 50.0);
    }
}
