//! Engine configuration

use crate::defaults;

/// Settings shared by every segment of a walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraverseConfig {
    /// Straight pieces per arc; arcs emit `segments_per_arc + 1` vertices
    pub segments_per_arc: usize,
}

impl Default for TraverseConfig {
    fn default() -> Self {
        Self {
            segments_per_arc: defaults::SEGMENTS_PER_ARC,
        }
    }
}

impl TraverseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the arc resolution. Zero is treated as one.
    pub fn with_segments_per_arc(mut self, segments: usize) -> Self {
        self.segments_per_arc = segments.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_resolution() {
        assert_eq!(TraverseConfig::default().segments_per_arc, 20);
    }

    #[test]
    fn zero_resolution_is_clamped() {
        assert_eq!(TraverseConfig::new().with_segments_per_arc(0).segments_per_arc, 1);
        assert_eq!(TraverseConfig::new().with_segments_per_arc(8).segments_per_arc, 8);
    }
}
