use std::fmt;

use crate::error::{ConfigError, Result};
use crate::math::Point2;

/// Per-triangle accept/reject rule driving adaptive mesh refinement.
///
/// The mesh engine calls this once per candidate triangle, potentially many
/// times per build, so implementations must be cheap and side-effect-free.
pub trait RefinementPredicate: fmt::Debug {
    /// Returns `true` when the triangle should be split further.
    fn should_refine(&self, triangle: &[Point2; 3], area: f64) -> bool;
}

/// Refines every triangle whose area exceeds a fixed threshold.
#[derive(Debug, Clone, Copy)]
pub struct MaxAreaRefinement {
    max_area: f64,
}

impl MaxAreaRefinement {
    /// Creates a refinement rule bounding triangle area by `max_area`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the threshold is not positive.
    pub fn new(max_area: f64) -> Result<Self> {
        if max_area <= 0.0 {
            return Err(ConfigError::NonPositive {
                parameter: "max_area",
                value: max_area,
            }
            .into());
        }
        Ok(Self { max_area })
    }

    /// The area threshold above which triangles are refined.
    #[must_use]
    pub fn max_area(&self) -> f64 {
        self.max_area
    }
}

impl RefinementPredicate for MaxAreaRefinement {
    fn should_refine(&self, _triangle: &[Point2; 3], area: f64) -> bool {
        area > self.max_area
    }
}
