//! Bearing codec: surveyor quadrant bearings <-> azimuths
//!
//! A quadrant bearing names the meridian it is measured from (N or S), the
//! angle off that meridian, and the side it turns toward (E or W):
//! `N45-30-15E` is 45°30'15" east of north. Azimuths are degrees clockwise
//! from north in `[0, 360)`.

use std::fmt;

use crate::defaults::CARDINAL_TOLERANCE_DEG;
use crate::errors::TraverseError;
use crate::types::Azimuth;

/// The four cardinal directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinal {
    North,
    East,
    South,
    West,
}

impl Cardinal {
    pub fn azimuth(self) -> Azimuth {
        match self {
            Cardinal::North => Azimuth::NORTH,
            Cardinal::East => Azimuth::EAST,
            Cardinal::South => Azimuth::SOUTH,
            Cardinal::West => Azimuth::WEST,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Cardinal::North => 'N',
            Cardinal::East => 'E',
            Cardinal::South => 'S',
            Cardinal::West => 'W',
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'N' => Some(Cardinal::North),
            'E' => Some(Cardinal::East),
            'S' => Some(Cardinal::South),
            'W' => Some(Cardinal::West),
            _ => None,
        }
    }
}

/// Quadrant of a bearing, named by its meridian letter then its side letter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
}

impl Quadrant {
    pub fn from_letters(meridian: char, side: char) -> Option<Self> {
        match (meridian, side) {
            ('N', 'E') => Some(Quadrant::NorthEast),
            ('S', 'E') => Some(Quadrant::SouthEast),
            ('S', 'W') => Some(Quadrant::SouthWest),
            ('N', 'W') => Some(Quadrant::NorthWest),
            _ => None,
        }
    }

    pub fn letters(self) -> (char, char) {
        match self {
            Quadrant::NorthEast => ('N', 'E'),
            Quadrant::SouthEast => ('S', 'E'),
            Quadrant::SouthWest => ('S', 'W'),
            Quadrant::NorthWest => ('N', 'W'),
        }
    }

    /// Azimuth of a bearing `magnitude` degrees off the meridian
    pub fn to_azimuth(self, magnitude: f64) -> Azimuth {
        Azimuth::new(match self {
            Quadrant::NorthEast => magnitude,
            Quadrant::SouthEast => 180.0 - magnitude,
            Quadrant::SouthWest => 180.0 + magnitude,
            Quadrant::NorthWest => 360.0 - magnitude,
        })
    }

    /// Quadrant whose open interval contains `azimuth`, with the in-quadrant
    /// magnitude. Azimuths exactly on a cardinal belong to no quadrant.
    pub fn of_azimuth(azimuth: Azimuth) -> Option<(Quadrant, f64)> {
        let az = azimuth.degrees();
        if az > 0.0 && az < 90.0 {
            Some((Quadrant::NorthEast, az))
        } else if az > 90.0 && az < 180.0 {
            Some((Quadrant::SouthEast, 180.0 - az))
        } else if az > 180.0 && az < 270.0 {
            Some((Quadrant::SouthWest, az - 180.0))
        } else if az > 270.0 && az < 360.0 {
            Some((Quadrant::NorthWest, 360.0 - az))
        } else {
            None
        }
    }

    /// The cardinal a 90° bearing in this quadrant points at
    pub fn side(self) -> Cardinal {
        match self {
            Quadrant::NorthEast | Quadrant::SouthEast => Cardinal::East,
            Quadrant::SouthWest | Quadrant::NorthWest => Cardinal::West,
        }
    }
}

/// A direction in surveyor notation, rounded to whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bearing {
    Cardinal(Cardinal),
    Quadrant {
        quadrant: Quadrant,
        degrees: u32,
        minutes: u32,
        seconds: u32,
    },
}

impl Bearing {
    /// Round an azimuth to the nearest whole-second bearing.
    ///
    /// Returns `None` for NaN or infinite input.
    pub fn from_azimuth(azimuth_deg: f64) -> Option<Bearing> {
        let azimuth = Azimuth::try_new(azimuth_deg).ok()?;
        let az = azimuth.degrees();

        for (target, cardinal) in [
            (0.0, Cardinal::North),
            (90.0, Cardinal::East),
            (180.0, Cardinal::South),
            (270.0, Cardinal::West),
            (360.0, Cardinal::North),
        ] {
            if (az - target).abs() < CARDINAL_TOLERANCE_DEG {
                return Some(Bearing::Cardinal(cardinal));
            }
        }

        let (quadrant, magnitude) = Quadrant::of_azimuth(azimuth)?;

        let mut degrees = magnitude.trunc();
        let minutes_float = (magnitude - degrees) * 60.0;
        let mut minutes = minutes_float.trunc();
        let mut seconds = ((minutes_float - minutes) * 60.0).round();

        if seconds >= 60.0 {
            minutes += 1.0;
            seconds = 0.0;
        }
        if minutes >= 60.0 {
            degrees += 1.0;
            minutes = 0.0;
        }
        // Rounding carried all the way to 90: the bearing lies on the E-W line
        if degrees >= 90.0 {
            return Some(Bearing::Cardinal(quadrant.side()));
        }

        Some(Bearing::Quadrant {
            quadrant,
            degrees: degrees as u32,
            minutes: minutes as u32,
            seconds: seconds as u32,
        })
    }

    pub fn azimuth(&self) -> Azimuth {
        match *self {
            Bearing::Cardinal(cardinal) => cardinal.azimuth(),
            Bearing::Quadrant {
                quadrant,
                degrees,
                minutes,
                seconds,
            } => quadrant.to_azimuth(dms_to_degrees(
                degrees as f64,
                minutes as f64,
                seconds as f64,
            )),
        }
    }
}

impl fmt::Display for Bearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Bearing::Cardinal(cardinal) => write!(f, "{}", cardinal.letter()),
            Bearing::Quadrant {
                quadrant,
                degrees,
                minutes,
                seconds,
            } => {
                let (meridian, side) = quadrant.letters();
                write!(f, "{meridian}{degrees}-{minutes}-{seconds}{side}")
            }
        }
    }
}

#[inline]
fn dms_to_degrees(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}

/// Parse a quadrant bearing (`N45-30-15E`, `S60E`, `N45.5E`, `NW`, `N`) into an azimuth.
pub fn parse_bearing(text: &str) -> Result<Azimuth, TraverseError> {
    let normalized = text.trim().to_uppercase();
    let chars: Vec<char> = normalized.chars().collect();

    let (first, last) = match chars.as_slice() {
        [] => return Err(TraverseError::invalid_bearing(text, "empty bearing")),
        [letter] => {
            return Cardinal::from_letter(*letter)
                .map(Cardinal::azimuth)
                .ok_or_else(|| TraverseError::invalid_bearing(text, "bearing string too short"));
        }
        [first, .., last] => (*first, *last),
    };

    if matches!(first, 'E' | 'W') {
        return Err(TraverseError::invalid_bearing(
            text,
            "bearing must start with N or S",
        ));
    }

    // Intercardinals without an angle: NE, SE, SW, NW
    if chars.len() == 2 {
        if let Some(quadrant) = Quadrant::from_letters(first, last) {
            return Ok(quadrant.to_azimuth(45.0));
        }
    }

    let inner: String = chars[1..chars.len() - 1].iter().collect();
    let magnitude =
        parse_magnitude(&inner).map_err(|reason| TraverseError::invalid_bearing(text, reason))?;

    match (first, last) {
        ('N', 'S') => {
            if magnitude == 0.0 {
                Ok(Azimuth::NORTH)
            } else {
                Err(TraverseError::invalid_bearing(
                    text,
                    "N/S followed by S/N is not a standard bearing",
                ))
            }
        }
        _ => Quadrant::from_letters(first, last)
            .map(|quadrant| quadrant.to_azimuth(magnitude))
            .ok_or_else(|| {
                TraverseError::invalid_bearing(
                    text,
                    format!("invalid quadrant specification: {first}{last}"),
                )
            }),
    }
}

/// `deg[-min[-sec]]`, or a single decimal number
fn parse_magnitude(inner: &str) -> Result<f64, String> {
    if inner.is_empty() {
        return Err("missing angle between quadrant letters".to_string());
    }

    let parts: Vec<&str> = inner.split('-').collect();
    if parts.len() > 3 {
        return Err(format!("too many angle components in '{inner}'"));
    }

    let mut dms = [0.0_f64; 3];
    for (slot, part) in dms.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("could not parse degree/minute/second part: {inner}"))?;
    }

    Ok(dms_to_degrees(dms[0], dms[1], dms[2]))
}

/// Format an azimuth as a quadrant bearing rounded to whole seconds.
///
/// Non-finite input falls back to plain decimal degrees.
pub fn format_bearing(azimuth_deg: f64) -> String {
    match Bearing::from_azimuth(azimuth_deg) {
        Some(bearing) => bearing.to_string(),
        None => format!("{azimuth_deg:.2}"),
    }
}

/// Parse a direction token: decimal degrees (optionally with a trailing `°`),
/// falling back to a quadrant bearing.
pub fn parse_direction(token: &str) -> Result<Azimuth, TraverseError> {
    let trimmed = token.trim();
    let numeric = trimmed.strip_suffix('°').unwrap_or(trimmed).trim_end();

    if let Ok(value) = numeric.parse::<f64>() {
        if let Ok(azimuth) = Azimuth::try_new(value) {
            return Ok(azimuth);
        }
    }

    parse_bearing(trimmed).map_err(|err| match err {
        TraverseError::InvalidBearing { reason, .. } => TraverseError::InvalidDirection {
            text: trimmed.to_string(),
            reason,
        },
        other => other,
    })
}
