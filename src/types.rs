//! Strongly-typed values for traverse geometry.
//!
//! - `Point` is a plane coordinate pair (x east, y north)
//! - `Azimuth` is a direction in degrees clockwise from north, always in `[0, 360)`

use std::fmt;
use std::ops::{Add, Sub};

use glam::{DVec2, dvec2};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
        }
    }
}

impl std::error::Error for NumericError {}

/// A plane coordinate pair. No identity beyond its value.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn to_dvec2(self) -> DVec2 {
        dvec2(self.x, self.y)
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.to_dvec2().distance(other.to_dvec2())
    }

    /// Azimuth of the direction from `self` toward `other`.
    ///
    /// Returns `None` when the two points coincide.
    pub fn azimuth_to(self, other: Point) -> Option<Azimuth> {
        let d = other.to_dvec2() - self.to_dvec2();
        if d == DVec2::ZERO {
            return None;
        }
        // atan2(dx, dy): clockwise from north
        Some(Azimuth::from_radians(d.x.atan2(d.y)))
    }
}

impl From<DVec2> for Point {
    #[inline]
    fn from(v: DVec2) -> Self {
        Point { x: v.x, y: v.y }
    }
}

impl From<Point> for DVec2 {
    #[inline]
    fn from(p: Point) -> Self {
        p.to_dvec2()
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

/// Translate a point by a displacement vector
impl Add<DVec2> for Point {
    type Output = Point;
    fn add(self, rhs: DVec2) -> Point {
        Point::from(self.to_dvec2() + rhs)
    }
}

/// Subtract two points to get the displacement between them
impl Sub<Point> for Point {
    type Output = DVec2;
    fn sub(self, rhs: Point) -> DVec2 {
        self.to_dvec2() - rhs.to_dvec2()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Direction in degrees clockwise from north, normalized into `[0, 360)`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Azimuth(f64);

impl Azimuth {
    pub const NORTH: Azimuth = Azimuth(0.0);
    pub const EAST: Azimuth = Azimuth(90.0);
    pub const SOUTH: Azimuth = Azimuth(180.0);
    pub const WEST: Azimuth = Azimuth(270.0);

    /// Normalize any degree value into `[0, 360)`.
    ///
    /// Non-finite input stays non-finite; use `try_new` for user-provided values.
    #[inline]
    pub fn new(degrees: f64) -> Azimuth {
        let wrapped = degrees.rem_euclid(360.0);
        // rem_euclid of a tiny negative value rounds up to exactly 360.0
        if wrapped >= 360.0 {
            Azimuth(0.0)
        } else {
            Azimuth(wrapped)
        }
    }

    /// Create an Azimuth with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(degrees: f64) -> Result<Azimuth, NumericError> {
        if degrees.is_nan() {
            Err(NumericError::NaN)
        } else if degrees.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(Azimuth::new(degrees))
        }
    }

    #[inline]
    pub fn from_radians(radians: f64) -> Azimuth {
        Azimuth::new(radians.to_degrees())
    }

    /// Convert a standard math angle (radians, counter-clockwise from east)
    /// to an azimuth.
    #[inline]
    pub fn from_math_angle(radians: f64) -> Azimuth {
        Azimuth::new(90.0 - radians.to_degrees())
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Standard math angle in radians, counter-clockwise from east.
    #[inline]
    pub fn math_angle(self) -> f64 {
        (90.0 - self.0).to_radians()
    }

    /// Unit vector pointing along this azimuth: `(sin az, cos az)`.
    #[inline]
    pub fn unit_vector(self) -> DVec2 {
        let (sin, cos) = self.radians().sin_cos();
        dvec2(sin, cos)
    }
}

impl fmt::Display for Azimuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}°", self.0)
    }
}

impl From<Azimuth> for f64 {
    #[inline]
    fn from(a: Azimuth) -> f64 {
        a.0
    }
}
