use std::collections::BTreeMap;

use log::debug;

use crate::error::{ConfigError, OutlineError, Result};
use crate::math::arc_2d::ArcPoints;
use crate::math::Point2;

use super::{round_trip, CavityShape, FacetMarker, Outline, Segment, WallAccumulator};

/// Immutable configuration bundle for a rotationally-periodic cavity outline.
///
/// The anode boundary is split into `cavity_count` equal angular steps of
/// `360 / cavity_count` degrees. Each step carries either the default
/// two-arc [`SlottedWall`] or a registered [`CavityShape`] override. All
/// radii and angles must be positive; the cavity angle must be smaller than
/// the angular step so the remainder arc has a real span.
#[derive(Debug)]
pub struct OutlineSpec {
    /// Number of identical angular steps around the anode.
    pub cavity_count: usize,
    /// Angular width of the cavity slot within each step, in degrees.
    pub cavity_angle_deg: f64,
    /// Radius of the inner (cathode) circle.
    pub radius_cathode: f64,
    /// Radius of the anode wall between cavities.
    pub radius_anode: f64,
    /// Radius of the cavity slot floor.
    pub radius_outer: f64,
    /// Upper bound on the angular step used to discretize arcs, in degrees.
    pub subdiv_deg: f64,
    /// Marker tagging every cathode segment.
    pub cathode_marker: FacetMarker,
    /// Marker tagging default anode wall segments.
    pub anode_marker: FacetMarker,
    /// Per-cavity geometry overrides, keyed by cavity index.
    pub overrides: BTreeMap<usize, Box<dyn CavityShape>>,
}

impl OutlineSpec {
    /// Registers a cavity shape override, replacing the default wall for
    /// the cavity at `index`.
    #[must_use]
    pub fn with_override(mut self, index: usize, shape: Box<dyn CavityShape>) -> Self {
        self.overrides.insert(index, shape);
        self
    }

    /// The angular step covered by one cavity, in degrees.
    #[must_use]
    pub fn angle_step_deg(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let count = self.cavity_count as f64;
        360.0 / count
    }

    /// Checks the configuration, failing fast before any point is produced.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for non-positive dimensions, a zero cavity
    /// count, a cavity angle at or beyond the angular step, or an override
    /// registered for a cavity index out of range.
    pub fn validate(&self) -> Result<()> {
        if self.cavity_count == 0 {
            return Err(ConfigError::NoCavities.into());
        }
        for (parameter, value) in [
            ("radius_cathode", self.radius_cathode),
            ("radius_anode", self.radius_anode),
            ("radius_outer", self.radius_outer),
            ("subdiv_deg", self.subdiv_deg),
            ("cavity_angle_deg", self.cavity_angle_deg),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { parameter, value }.into());
            }
        }
        let angle_step_deg = self.angle_step_deg();
        if self.cavity_angle_deg >= angle_step_deg {
            return Err(ConfigError::CavityAngleTooWide {
                cavity_angle_deg: self.cavity_angle_deg,
                angle_step_deg,
            }
            .into());
        }
        for &index in self.overrides.keys() {
            if index >= self.cavity_count {
                return Err(ConfigError::OverrideOutOfRange {
                    index,
                    cavity_count: self.cavity_count,
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Default two-segment cavity wall: a slot arc at the outer radius followed
/// by an anode-radius arc over the remainder of the angular step, every
/// point tagged with the anode marker.
///
/// Both arcs exclude their end point; the next arc (or the loop-closing
/// segment) supplies it, and the radial jump between the two radii becomes
/// the slot side wall implicitly.
#[derive(Debug, Clone, Copy)]
pub struct SlottedWall {
    pub cavity_angle_deg: f64,
    pub radius_anode: f64,
    pub radius_outer: f64,
    pub subdiv_deg: f64,
    pub anode_marker: FacetMarker,
}

impl CavityShape for SlottedWall {
    fn append_wall(
        &self,
        start_angle_deg: f64,
        angle_step_deg: f64,
        wall: &mut WallAccumulator,
    ) -> Result<()> {
        let slot_end_deg = start_angle_deg + self.cavity_angle_deg;
        wall.extend_arc(
            ArcPoints::new(
                self.radius_outer,
                start_angle_deg,
                slot_end_deg,
                self.subdiv_deg,
                false,
            )?,
            self.anode_marker,
        );
        wall.extend_arc(
            ArcPoints::new(
                self.radius_anode,
                slot_end_deg,
                start_angle_deg + angle_step_deg,
                self.subdiv_deg,
                false,
            )?,
            self.anode_marker,
        );
        Ok(())
    }
}

/// Assembles a full rotationally-repeated cavity outline: the cathode
/// circle as one closed loop and the per-cavity anode wall as another.
pub struct BuildOutline<'a> {
    spec: &'a OutlineSpec,
}

impl<'a> BuildOutline<'a> {
    /// Creates a new `BuildOutline` operation.
    #[must_use]
    pub fn new(spec: &'a OutlineSpec) -> Self {
        Self { spec }
    }

    /// Executes the operation, producing the outline.
    ///
    /// The cathode points occupy indices `[0, n_cathode)` and the anode
    /// points `[n_cathode, n_cathode + n_anode)`; each range is closed
    /// into its own loop. Building is deterministic — the same spec yields
    /// an identical outline every time.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an invalid spec and an
    /// [`OutlineError`] when a cavity shape appends mismatched point and
    /// marker counts or leaves a loop empty.
    pub fn execute(&self) -> Result<Outline> {
        let spec = self.spec;
        spec.validate()?;

        let angle_step_deg = spec.angle_step_deg();
        let default_wall = SlottedWall {
            cavity_angle_deg: spec.cavity_angle_deg,
            radius_anode: spec.radius_anode,
            radius_outer: spec.radius_outer,
            subdiv_deg: spec.subdiv_deg,
            anode_marker: spec.anode_marker,
        };

        let mut anode = WallAccumulator::default();
        for cavity in 0..spec.cavity_count {
            #[allow(clippy::cast_precision_loss)]
            let start_angle_deg = angle_step_deg * cavity as f64;

            let points_before = anode.points.len();
            let markers_before = anode.markers.len();
            match spec.overrides.get(&cavity) {
                Some(shape) => shape.append_wall(start_angle_deg, angle_step_deg, &mut anode)?,
                None => default_wall.append_wall(start_angle_deg, angle_step_deg, &mut anode)?,
            }

            let points = anode.points.len() - points_before;
            let markers = anode.markers.len() - markers_before;
            if points != markers {
                return Err(OutlineError::CavityMarkerMismatch {
                    cavity,
                    points,
                    markers,
                }
                .into());
            }
        }

        // The round-trip connector closes the circle, so the cathode skips
        // its duplicate end point.
        let cathode: Vec<Point2> =
            ArcPoints::new(spec.radius_cathode, 0.0, 360.0, spec.subdiv_deg, false)?.collect();
        let n_cathode = cathode.len();

        let (anode_points, anode_markers) = anode.into_parts();
        let n_anode = anode_points.len();
        if n_anode == 0 {
            return Err(OutlineError::EmptyLoop { loop_name: "anode" }.into());
        }

        let mut points = cathode;
        points.extend(anode_points);

        let segments: Vec<Segment> = round_trip(0, n_cathode - 1)
            .chain(round_trip(n_cathode, n_cathode + n_anode - 1))
            .collect();

        let mut markers = vec![spec.cathode_marker; n_cathode];
        markers.extend(anode_markers);

        let outline = Outline {
            points,
            segments,
            markers,
        };
        outline.validate()?;

        debug!("built outline: {n_cathode} cathode points, {n_anode} anode points");
        Ok(outline)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::CavmeshError;

    fn six_cavity_spec() -> OutlineSpec {
        OutlineSpec {
            cavity_count: 6,
            cavity_angle_deg: 20.0,
            radius_cathode: 1.0,
            radius_anode: 2.0,
            radius_outer: 4.0,
            subdiv_deg: 5.0,
            cathode_marker: FacetMarker(1),
            anode_marker: FacetMarker(2),
            overrides: BTreeMap::new(),
        }
    }

    #[test]
    fn six_cavity_anode_loop_has_72_points() {
        // Per cavity: ceil(20/5) slot points + ceil(40/5) wall points.
        let outline = BuildOutline::new(&six_cavity_spec()).execute().unwrap();
        let n_cathode = 72; // full circle at 5° steps, end point elided
        assert_eq!(outline.points.len() - n_cathode, 72);
        assert!(outline.markers[n_cathode..]
            .iter()
            .all(|&m| m == FacetMarker(2)));
    }

    #[test]
    fn cathode_points_precede_anode_points() {
        let spec = six_cavity_spec();
        let outline = BuildOutline::new(&spec).execute().unwrap();
        let n_cathode = 72;
        for p in &outline.points[..n_cathode] {
            let r = (p.x * p.x + p.y * p.y).sqrt();
            assert!((r - spec.radius_cathode).abs() < 1e-9);
        }
        for p in &outline.points[n_cathode..] {
            let r = (p.x * p.x + p.y * p.y).sqrt();
            assert!(r > spec.radius_cathode, "anode point inside cathode");
        }
        assert!(outline.markers[..n_cathode]
            .iter()
            .all(|&m| m == FacetMarker(1)));
    }

    #[test]
    fn collections_have_equal_length_and_valid_indices() {
        let outline = BuildOutline::new(&six_cavity_spec()).execute().unwrap();
        assert_eq!(outline.points.len(), outline.segments.len());
        assert_eq!(outline.segments.len(), outline.markers.len());
        outline.validate().unwrap();
    }

    #[test]
    fn both_loops_close_back_to_their_start() {
        let outline = BuildOutline::new(&six_cavity_spec()).execute().unwrap();
        let n_cathode = 72;
        assert_eq!(outline.segments[n_cathode - 1], Segment::new(n_cathode - 1, 0));
        let last = *outline.segments.last().unwrap();
        assert_eq!(last, Segment::new(outline.points.len() - 1, n_cathode));
    }

    #[test]
    fn building_twice_is_bit_identical() {
        let spec = six_cavity_spec();
        let a = BuildOutline::new(&spec).execute().unwrap();
        let b = BuildOutline::new(&spec).execute().unwrap();
        assert_eq!(a, b);
    }

    /// Strategy that appends points without matching markers.
    #[derive(Debug)]
    struct LopsidedShape;

    impl CavityShape for LopsidedShape {
        fn append_wall(
            &self,
            _start_angle_deg: f64,
            _angle_step_deg: f64,
            wall: &mut WallAccumulator,
        ) -> Result<()> {
            wall.points.push(Point2::new(1.0, 0.0));
            wall.points.push(Point2::new(1.0, 1.0));
            wall.markers.push(FacetMarker(9));
            Ok(())
        }
    }

    #[test]
    fn mismatched_override_fails_fast() {
        let spec = six_cavity_spec().with_override(2, Box::new(LopsidedShape));
        let err = BuildOutline::new(&spec).execute().unwrap_err();
        assert!(matches!(
            err,
            CavmeshError::Outline(OutlineError::CavityMarkerMismatch {
                cavity: 2,
                points: 2,
                markers: 1,
            })
        ));
    }

    #[test]
    fn override_index_out_of_range_is_rejected() {
        let spec = six_cavity_spec().with_override(6, Box::new(LopsidedShape));
        let err = BuildOutline::new(&spec).execute().unwrap_err();
        assert!(matches!(
            err,
            CavmeshError::Config(ConfigError::OverrideOutOfRange {
                index: 6,
                cavity_count: 6,
            })
        ));
    }

    #[test]
    fn zero_cavities_is_rejected() {
        let spec = OutlineSpec {
            cavity_count: 0,
            ..six_cavity_spec()
        };
        let err = BuildOutline::new(&spec).execute().unwrap_err();
        assert!(matches!(
            err,
            CavmeshError::Config(ConfigError::NoCavities)
        ));
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        for field in ["radius_cathode", "radius_anode", "radius_outer", "subdiv_deg"] {
            let mut spec = six_cavity_spec();
            match field {
                "radius_cathode" => spec.radius_cathode = 0.0,
                "radius_anode" => spec.radius_anode = -1.0,
                "radius_outer" => spec.radius_outer = 0.0,
                _ => spec.subdiv_deg = -5.0,
            }
            let err = BuildOutline::new(&spec).execute().unwrap_err();
            assert!(
                matches!(err, CavmeshError::Config(ConfigError::NonPositive { .. })),
                "{field}: {err}"
            );
        }
    }

    #[test]
    fn cavity_angle_must_leave_room_for_the_wall_arc() {
        let spec = OutlineSpec {
            cavity_angle_deg: 60.0,
            ..six_cavity_spec()
        };
        let err = BuildOutline::new(&spec).execute().unwrap_err();
        assert!(matches!(
            err,
            CavmeshError::Config(ConfigError::CavityAngleTooWide { .. })
        ));
    }
}
