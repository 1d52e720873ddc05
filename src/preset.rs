use std::collections::BTreeMap;

use crate::error::Result;
use crate::math::arc_2d::ArcPoints;
use crate::math::Point2;
use crate::meshing::{MeshProblem, TriangleMesh, Triangulate};
use crate::outline::{
    BuildOutline, CavityShape, FacetMarker, Outline, OutlineSpec, WallAccumulator,
};
use crate::refine::MaxAreaRefinement;

/// The A6 six-cavity relativistic magnetron cross-section.
///
/// All radii are in meters. Cavity 0 carries the [`HornCavity`] override:
/// an aperture-facing protrusion feeding the output waveguide, tagged with
/// the open-aperture marker so the field solver can apply an outflow
/// boundary condition there.
#[derive(Debug, Clone, Copy)]
pub struct A6Magnetron {
    /// Angular width of each cavity slot, in degrees.
    pub cavity_angle_deg: f64,
    /// Inner conductor radius.
    pub radius_cathode: f64,
    /// Anode wall radius between cavities.
    pub radius_anode: f64,
    /// Cavity slot floor radius.
    pub radius_outer: f64,
    /// Radial extent of the output horn.
    pub horn_radius: f64,
    /// Arc discretization step, in degrees.
    pub subdiv_deg: f64,
}

impl Default for A6Magnetron {
    fn default() -> Self {
        Self {
            cavity_angle_deg: 20.0,
            radius_cathode: 0.0158,
            radius_anode: 0.0211,
            radius_outer: 0.0411,
            horn_radius: 0.07,
            subdiv_deg: 5.0,
        }
    }
}

impl A6Magnetron {
    /// Number of anode cavities.
    pub const CAVITY_COUNT: usize = 6;
    /// Marker for the inner conductor boundary.
    pub const CATHODE_MARKER: FacetMarker = FacetMarker(1);
    /// Marker for the anode wall boundary.
    pub const ANODE_MARKER: FacetMarker = FacetMarker(2);
    /// Marker for the open output aperture.
    pub const OPEN_MARKER: FacetMarker = FacetMarker(3);

    /// Builds the outline configuration with the horn registered at cavity 0.
    #[must_use]
    pub fn outline_spec(&self) -> OutlineSpec {
        let horn = HornCavity {
            horn_radius: self.horn_radius,
            cavity_angle_deg: self.cavity_angle_deg,
            radius_anode: self.radius_anode,
            subdiv_deg: self.subdiv_deg,
            open_marker: Self::OPEN_MARKER,
            anode_marker: Self::ANODE_MARKER,
        };
        OutlineSpec {
            cavity_count: Self::CAVITY_COUNT,
            cavity_angle_deg: self.cavity_angle_deg,
            radius_cathode: self.radius_cathode,
            radius_anode: self.radius_anode,
            radius_outer: self.radius_outer,
            subdiv_deg: self.subdiv_deg,
            cathode_marker: Self::CATHODE_MARKER,
            anode_marker: Self::ANODE_MARKER,
            overrides: BTreeMap::new(),
        }
        .with_override(0, Box::new(horn))
    }

    /// Builds the device outline.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn outline(&self) -> Result<Outline> {
        BuildOutline::new(&self.outline_spec()).execute()
    }

    /// Builds the complete problem handed to the triangulation engine.
    ///
    /// The hole point at the origin marks the cathode interior as the
    /// unmeshed void.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or the area bound is invalid.
    pub fn mesh_problem(&self, max_area: f64) -> Result<MeshProblem> {
        Ok(MeshProblem {
            outline: self.outline()?,
            hole: Point2::new(0.0, 0.0),
            refinement: Box::new(MaxAreaRefinement::new(max_area)?),
        })
    }

    /// Builds the outline and triangulates it with the given area bound.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or meshing fails.
    pub fn mesh(&self, max_area: f64) -> Result<TriangleMesh> {
        let problem = self.mesh_problem(max_area)?;
        Triangulate::new(&problem).execute()
    }
}

/// Output horn replacing the slot wall of one cavity.
///
/// Appends two points at the horn radius — the aperture face, tagged
/// open-aperture then anode — and resumes the standard anode-radius arc for
/// the remainder of the cavity's angular span. The aperture coordinates
/// assume the horn sits on the first cavity (start angle 0°).
#[derive(Debug, Clone, Copy)]
pub struct HornCavity {
    pub horn_radius: f64,
    pub cavity_angle_deg: f64,
    pub radius_anode: f64,
    pub subdiv_deg: f64,
    pub open_marker: FacetMarker,
    pub anode_marker: FacetMarker,
}

impl CavityShape for HornCavity {
    fn append_wall(
        &self,
        start_angle_deg: f64,
        angle_step_deg: f64,
        wall: &mut WallAccumulator,
    ) -> Result<()> {
        wall.push(Point2::new(self.horn_radius, 0.0), self.open_marker);
        wall.push(
            Point2::new(
                self.horn_radius,
                self.cavity_angle_deg.to_radians().sin() * self.horn_radius,
            ),
            self.anode_marker,
        );
        wall.extend_arc(
            ArcPoints::new(
                self.radius_anode,
                start_angle_deg + self.cavity_angle_deg,
                start_angle_deg + angle_step_deg,
                self.subdiv_deg,
                false,
            )?,
            self.anode_marker,
        );
        Ok(())
    }
}
