use std::fmt;

use crate::error::Result;
use crate::math::arc_2d::ArcPoints;
use crate::math::Point2;

use super::FacetMarker;

/// Growable point/marker buffer pair that cavity shapes append into.
///
/// The buffers are deliberately independent — a shape owns the geometry it
/// appends — but every point must be matched by exactly one facet marker.
/// The outline builder checks the counts after each cavity and rejects
/// strategies that let them drift apart.
#[derive(Debug, Default)]
pub struct WallAccumulator {
    pub points: Vec<Point2>,
    pub markers: Vec<FacetMarker>,
}

impl WallAccumulator {
    /// Appends a single point with its marker.
    pub fn push(&mut self, point: Point2, marker: FacetMarker) {
        self.points.push(point);
        self.markers.push(marker);
    }

    /// Appends every point of an arc, repeating `marker` for each.
    pub fn extend_arc(&mut self, arc: ArcPoints, marker: FacetMarker) {
        for point in arc {
            self.push(point, marker);
        }
    }

    pub(super) fn into_parts(self) -> (Vec<Point2>, Vec<FacetMarker>) {
        (self.points, self.markers)
    }
}

/// Wall-geometry strategy for one cavity of the anode boundary.
///
/// Implementations append the boundary points for the cavity starting at
/// `start_angle_deg` and spanning `angle_step_deg` degrees, one facet
/// marker per point. A strategy is free to use entirely custom geometry,
/// but it must keep the point and marker counts equal.
pub trait CavityShape: fmt::Debug {
    /// Appends this cavity's wall points and markers.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape's arc spans are degenerate for the
    /// given angles.
    fn append_wall(
        &self,
        start_angle_deg: f64,
        angle_step_deg: f64,
        wall: &mut WallAccumulator,
    ) -> Result<()>;
}
