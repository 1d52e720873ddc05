mod builder;
mod cavity;
mod connect;

pub use builder::{BuildOutline, OutlineSpec, SlottedWall};
pub use cavity::{CavityShape, WallAccumulator};
pub use connect::{round_trip, RoundTrip};

use crate::error::{OutlineError, Result};
use crate::math::Point2;

/// Integer tag identifying the physical boundary type of an outline segment,
/// passed through to the mesh engine for boundary-condition assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FacetMarker(pub u32);

/// A directed pair of vertex indices.
///
/// Direction is bookkeeping only; the mesh engine treats the segment as an
/// undirected boundary edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

impl Segment {
    /// Creates a new segment between two vertex indices.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// The closed boundary description of a device cross-section.
///
/// `points` holds the cathode loop followed by the anode loop; `segments`
/// holds both loops' cyclic connectivity, concatenated in the same order;
/// `markers` aligns positionally with `segments`. Because every loop is
/// closed, the three collections have equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub points: Vec<Point2>,
    pub segments: Vec<Segment>,
    pub markers: Vec<FacetMarker>,
}

impl Outline {
    /// Checks the outline invariants: equal collection lengths and every
    /// segment index within `[0, points.len())`.
    ///
    /// # Errors
    ///
    /// Returns an [`OutlineError`] describing the first violation found.
    pub fn validate(&self) -> Result<()> {
        if self.points.len() != self.segments.len() || self.segments.len() != self.markers.len() {
            return Err(OutlineError::Inconsistent {
                points: self.points.len(),
                segments: self.segments.len(),
                markers: self.markers.len(),
            }
            .into());
        }
        for seg in &self.segments {
            if seg.start >= self.points.len() || seg.end >= self.points.len() {
                return Err(OutlineError::SegmentOutOfRange {
                    start: seg.start,
                    end: seg.end,
                    point_count: self.points.len(),
                }
                .into());
            }
        }
        Ok(())
    }
}
