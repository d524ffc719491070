//! Segment geometry: straight runs and discretized circular arcs
//!
//! Azimuths are clockwise from north; internally arcs work in standard math
//! angles (radians, counter-clockwise from east) around their centre.

use std::f64::consts::FRAC_PI_2;

use enum_dispatch::enum_dispatch;
use glam::DVec2;

use crate::record::{ResolvedSegment, SegmentKind};
use crate::types::{Azimuth, Point};

/// Which way an arc bends, taken from the sign of its radius
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    /// Positive radius: a right turn
    Clockwise,
    /// Negative radius: a left turn
    CounterClockwise,
}

impl TurnDirection {
    pub fn from_radius(radius: f64) -> Self {
        if radius < 0.0 {
            TurnDirection::CounterClockwise
        } else {
            TurnDirection::Clockwise
        }
    }

    /// Sign of the radial angle's rate of change while travelling the arc
    #[inline]
    pub fn sense(self) -> f64 {
        match self {
            TurnDirection::Clockwise => -1.0,
            TurnDirection::CounterClockwise => 1.0,
        }
    }
}

/// Vertices of one segment plus the direction it leaves along
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedGeometry {
    /// At least two points; arcs have `segments_per_arc + 1`
    pub vertices: Vec<Point>,
    pub exit_azimuth: Azimuth,
}

impl GeneratedGeometry {
    pub fn start_point(&self) -> Point {
        self.vertices[0]
    }

    /// # Panics
    ///
    /// If `vertices` is empty, which `generate` never produces.
    pub fn end_point(&self) -> Point {
        self.vertices[self.vertices.len() - 1]
    }
}

/// Common behavior for segment paths
#[enum_dispatch]
pub trait Trace {
    fn start(&self) -> Point;

    fn end(&self) -> Point;

    /// Tangent direction at the end point, in the direction of travel
    fn exit_azimuth(&self) -> Azimuth;

    /// Travelled length along the path
    fn length(&self) -> f64;

    /// Points from start to end inclusive. Lines ignore `segments_per_arc`.
    fn vertices(&self, segments_per_arc: usize) -> Vec<Point>;
}

/// A line or an arc, ready to be traced
#[enum_dispatch(Trace)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentPath {
    LinePath,
    ArcPath,
}

impl SegmentPath {
    /// Lines when either `radius` or `arc_length` is zero, arcs otherwise
    pub fn new(
        start: Point,
        azimuth: Azimuth,
        distance: f64,
        radius: f64,
        arc_length: f64,
    ) -> Self {
        if radius == 0.0 || arc_length == 0.0 {
            LinePath::new(start, azimuth, distance).into()
        } else {
            ArcPath::new(start, azimuth, radius, arc_length).into()
        }
    }

    pub fn from_resolved(start: Point, segment: &ResolvedSegment) -> Self {
        match segment.kind {
            SegmentKind::Line => {
                LinePath::new(start, segment.start_azimuth, segment.distance).into()
            }
            SegmentKind::Arc => ArcPath::new(
                start,
                segment.start_azimuth,
                segment.radius,
                segment.arc_length,
            )
            .into(),
        }
    }

    pub fn generate(&self, segments_per_arc: usize) -> GeneratedGeometry {
        GeneratedGeometry {
            vertices: self.vertices(segments_per_arc),
            exit_azimuth: self.exit_azimuth(),
        }
    }
}

// ============================================================================
// Path Types
// ============================================================================

/// A straight run along a fixed azimuth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePath {
    start: Point,
    azimuth: Azimuth,
    distance: f64,
}

impl LinePath {
    pub fn new(start: Point, azimuth: Azimuth, distance: f64) -> Self {
        Self {
            start,
            azimuth,
            distance,
        }
    }

    pub fn azimuth(&self) -> Azimuth {
        self.azimuth
    }
}

impl Trace for LinePath {
    fn start(&self) -> Point {
        self.start
    }

    fn end(&self) -> Point {
        // dx = d sin(az), dy = d cos(az)
        self.start + self.azimuth.unit_vector() * self.distance
    }

    fn exit_azimuth(&self) -> Azimuth {
        self.azimuth
    }

    fn length(&self) -> f64 {
        self.distance
    }

    fn vertices(&self, _segments_per_arc: usize) -> Vec<Point> {
        vec![self.start, self.end()]
    }
}

/// A circular arc entered tangent to a given azimuth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    start: Point,
    center: DVec2,
    radius: f64,
    turn: TurnDirection,
    /// Radial angle of `start` seen from the centre
    start_angle: f64,
    /// Radial angle of the end point; never behind `start_angle` for the turn
    end_angle: f64,
}

impl ArcPath {
    /// `radius` is signed (positive turns right); `arc_length` is measured along the curve.
    pub fn new(start: Point, azimuth: Azimuth, radius: f64, arc_length: f64) -> Self {
        let turn = TurnDirection::from_radius(radius);
        let sense = turn.sense();
        let radius = radius.abs();

        // Centre sits a quarter turn off the tangent, toward the inside of the bend
        let toward_center = azimuth.math_angle() + sense * FRAC_PI_2;
        let center = start.to_dvec2() + DVec2::from_angle(toward_center) * radius;

        let offset = start.to_dvec2() - center;
        let start_angle = offset.y.atan2(offset.x);
        // Only the magnitude of the arc length matters; the radius sign picks the side
        let sweep = arc_length.abs() / radius;
        let end_angle = start_angle + sense * sweep;

        Self {
            start,
            center,
            radius,
            turn,
            start_angle,
            end_angle,
        }
    }

    pub fn center(&self) -> Point {
        Point::from(self.center)
    }

    /// Unsigned radius
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn turn(&self) -> TurnDirection {
        self.turn
    }

    /// Signed central angle in radians (negative for clockwise)
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    fn point_at_angle(&self, angle: f64) -> Point {
        Point::from(self.center + DVec2::from_angle(angle) * self.radius)
    }
}

impl Trace for ArcPath {
    fn start(&self) -> Point {
        self.start
    }

    fn end(&self) -> Point {
        self.point_at_angle(self.end_angle)
    }

    fn exit_azimuth(&self) -> Azimuth {
        // Direction of travel is a quarter turn from the radius, in the turn's sense
        Azimuth::from_math_angle(self.end_angle + self.turn.sense() * FRAC_PI_2)
    }

    fn length(&self) -> f64 {
        self.sweep().abs() * self.radius
    }

    fn vertices(&self, segments_per_arc: usize) -> Vec<Point> {
        let segments = segments_per_arc.max(1);
        let step = self.sweep() / segments as f64;

        let mut points = Vec::with_capacity(segments + 1);
        points.push(self.start);
        for i in 1..segments {
            points.push(self.point_at_angle(self.start_angle + i as f64 * step));
        }
        points.push(self.end());
        points
    }
}

/// Generate the vertices and exit azimuth of one segment.
///
/// Never fails: zero or negative magnitudes are traced literally.
pub fn generate(
    start: Point,
    azimuth_deg: f64,
    distance: f64,
    radius: f64,
    arc_length: f64,
    segments_per_arc: usize,
) -> GeneratedGeometry {
    SegmentPath::new(start, Azimuth::new(azimuth_deg), distance, radius, arc_length)
        .generate(segments_per_arc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    const EPS: f64 = 1e-9;

    fn close(a: Point, b: Point) -> bool {
        a.distance(b) < EPS
    }

    #[test]
    fn straight_line_east() {
        let g = generate(Point::ORIGIN, 90.0, 100.0, 0.0, 0.0, 20);
        assert_eq!(g.vertices.len(), 2);
        assert_eq!(g.vertices[0], Point::ORIGIN);
        assert!(close(g.vertices[1], Point::new(100.0, 0.0)), "{:?}", g.vertices[1]);
        assert_eq!(g.exit_azimuth, Azimuth::EAST);
    }

    #[test]
    fn zero_radius_or_arc_length_is_a_line() {
        let g = generate(Point::ORIGIN, 0.0, 10.0, 50.0, 0.0, 20);
        assert_eq!(g.vertices.len(), 2);
        assert!(close(g.end_point(), Point::new(0.0, 10.0)));

        let g = generate(Point::ORIGIN, 0.0, 10.0, 0.0, 30.0, 20);
        assert_eq!(g.vertices.len(), 2);
        assert!(close(g.end_point(), Point::new(0.0, 10.0)));
    }

    #[test]
    fn right_quarter_turn() {
        let r = 50.0;
        let g = generate(Point::ORIGIN, 0.0, 0.0, r, PI * r / 2.0, 20);
        assert_eq!(g.vertices.len(), 21);
        assert_eq!(g.start_point(), Point::ORIGIN);

        let end = g.end_point();
        assert!(close(end, Point::new(50.0, 50.0)), "{end:?}");
        assert!((Point::ORIGIN.distance(end) - r * 2f64.sqrt()).abs() < EPS);
        let chord = Point::ORIGIN.azimuth_to(end).unwrap().degrees();
        assert!((chord - 45.0).abs() < 1e-9);

        assert!((g.exit_azimuth.degrees() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn left_quarter_turn() {
        let r = 50.0;
        let g = generate(Point::ORIGIN, 0.0, 0.0, -r, PI * r / 2.0, 20);
        assert!(close(g.end_point(), Point::new(-50.0, 50.0)), "{:?}", g.end_point());
        assert!((g.exit_azimuth.degrees() - 270.0).abs() < 1e-9);
    }

    #[test]
    fn arc_vertices_lie_on_the_circle() {
        let path = ArcPath::new(Point::new(10.0, -4.0), Azimuth::new(33.0), 25.0, 40.0);
        let center = path.center();
        for p in path.vertices(20) {
            assert!((p.distance(center) - 25.0).abs() < 1e-9);
        }
        assert!((path.length() - 40.0).abs() < 1e-9);
        assert_eq!(path.turn(), TurnDirection::Clockwise);
        assert!(path.sweep() < 0.0);
    }

    #[test]
    fn arc_sweep_is_monotonic() {
        for radius in [30.0, -30.0] {
            let path = ArcPath::new(Point::ORIGIN, Azimuth::new(200.0), radius, 70.0);
            let center = path.center().to_dvec2();
            let angles: Vec<f64> = path
                .vertices(12)
                .iter()
                .map(|p| {
                    let d = p.to_dvec2() - center;
                    d.y.atan2(d.x)
                })
                .collect();
            // Consecutive steps turn the same way (unwrapped)
            for pair in angles.windows(2) {
                let mut delta = pair[1] - pair[0];
                if delta > PI {
                    delta -= TAU;
                } else if delta < -PI {
                    delta += TAU;
                }
                assert_eq!(delta.signum(), path.turn().sense(), "radius {radius}");
            }
        }
    }

    #[test]
    fn full_circle_returns_to_start() {
        let r = 10.0;
        let g = generate(Point::new(5.0, 5.0), 45.0, 0.0, r, TAU * r, 20);
        assert!(close(g.end_point(), Point::new(5.0, 5.0)));
        assert!((g.exit_azimuth.degrees() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn negative_arc_length_draws_the_same_arc() {
        let r = 50.0;
        for radius in [r, -r] {
            let forward = generate(Point::ORIGIN, 0.0, 0.0, radius, PI * r / 2.0, 20);
            let negated = generate(Point::ORIGIN, 0.0, 0.0, radius, -PI * r / 2.0, 20);
            assert_eq!(negated.vertices, forward.vertices, "radius {radius}");
            assert_eq!(negated.exit_azimuth, forward.exit_azimuth, "radius {radius}");
        }

        let path = ArcPath::new(Point::ORIGIN, Azimuth::NORTH, r, -PI * r / 2.0);
        assert!((path.sweep() + FRAC_PI_2).abs() < 1e-9);
        assert!(close(path.end(), Point::new(50.0, 50.0)), "{:?}", path.end());
        assert!((path.length() - PI * r / 2.0).abs() < 1e-9);
    }

    #[test]
    fn arc_radius_is_unsigned() {
        let left = ArcPath::new(Point::ORIGIN, Azimuth::EAST, -12.5, 3.0);
        assert_eq!(left.radius(), 12.5);
        assert_eq!(left.turn(), TurnDirection::CounterClockwise);
        assert!(left.sweep() > 0.0);
    }

    #[test]
    fn line_keeps_its_azimuth() {
        let line = LinePath::new(Point::new(2.0, 3.0), Azimuth::new(-45.0), 4.0);
        assert_eq!(line.azimuth(), Azimuth::new(315.0));
        assert_eq!(line.exit_azimuth(), line.azimuth());
        assert_eq!(line.vertices(20).len(), 2);
    }

    #[test]
    fn degenerate_lines_are_traced_literally() {
        let g = generate(Point::new(1.0, 1.0), 0.0, 0.0, 0.0, 0.0, 20);
        assert_eq!(g.vertices, vec![Point::new(1.0, 1.0), Point::new(1.0, 1.0)]);

        let g = generate(Point::ORIGIN, 0.0, -10.0, 0.0, 0.0, 20);
        assert!(close(g.end_point(), Point::new(0.0, -10.0)));
    }

    #[test]
    fn exit_azimuth_is_normalized() {
        for az in [-30.0, 725.0, -720.0, 359.999] {
            for (radius, arc) in [(0.0, 0.0), (15.0, 9.0), (-15.0, 9.0), (15.0, 200.0)] {
                let g = generate(Point::ORIGIN, az, 10.0, radius, arc, 20);
                let exit = g.exit_azimuth.degrees();
                assert!((0.0..360.0).contains(&exit), "az {az} r {radius}: {exit}");
            }
        }
    }

    #[test]
    fn zero_segments_still_reaches_the_end() {
        let g = generate(Point::ORIGIN, 0.0, 0.0, 50.0, PI * 25.0, 0);
        assert_eq!(g.vertices.len(), 2);
        assert!(close(g.end_point(), Point::new(50.0, 50.0)));
    }

    #[test]
    fn path_dispatch_matches_kind() {
        let line = SegmentPath::new(Point::ORIGIN, Azimuth::EAST, 5.0, 0.0, 0.0);
        assert!(matches!(line, SegmentPath::LinePath(_)));
        assert!((line.length() - 5.0).abs() < EPS);

        let arc = SegmentPath::new(Point::ORIGIN, Azimuth::EAST, 5.0, 10.0, 5.0);
        assert!(matches!(arc, SegmentPath::ArcPath(_)));
    }
}
