use crate::error::{ConfigError, Result};
use crate::math::Point2;

/// Lazily samples points along an origin-centered circular arc.
///
/// Angles are given in degrees, measured from +x, counter-clockwise
/// positive. The requested angular step is an upper bound: the sampler
/// takes `ceil(span / step)` subdivisions and recomputes the actual step
/// as `span / count`, so the arc is never under-resolved when the span is
/// not an exact multiple of the step.
///
/// The iterator is finite, stateless over a fixed range, and restartable
/// via `Clone`.
#[derive(Debug, Clone)]
pub struct ArcPoints {
    radius: f64,
    start_deg: f64,
    actual_step_deg: f64,
    index: usize,
    total: usize,
}

impl ArcPoints {
    /// Creates an arc sampler from `start_angle_deg` to `end_angle_deg`.
    ///
    /// With `include_end` the final point at `end_angle_deg` is emitted;
    /// without it the sequence stops one step short, which is the right
    /// choice when a cycle connector closes the loop.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the radius or step is non-positive, or
    /// if the angular span is empty or reversed. Zero-span arcs are a fatal
    /// configuration error rather than a single-point degenerate sequence.
    pub fn new(
        radius: f64,
        start_angle_deg: f64,
        end_angle_deg: f64,
        step_deg: f64,
        include_end: bool,
    ) -> Result<Self> {
        if radius <= 0.0 {
            return Err(ConfigError::NonPositive {
                parameter: "radius",
                value: radius,
            }
            .into());
        }
        if step_deg <= 0.0 {
            return Err(ConfigError::NonPositive {
                parameter: "step_deg",
                value: step_deg,
            }
            .into());
        }

        let span = end_angle_deg - start_angle_deg;
        if span == 0.0 {
            return Err(ConfigError::EmptyArcSpan {
                angle_deg: start_angle_deg,
            }
            .into());
        }
        if span < 0.0 {
            return Err(ConfigError::ReversedArcSpan {
                start_deg: start_angle_deg,
                end_deg: end_angle_deg,
            }
            .into());
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = (span / step_deg).ceil() as usize;
        #[allow(clippy::cast_precision_loss)]
        let actual_step_deg = span / count as f64;
        let total = if include_end { count + 1 } else { count };

        Ok(Self {
            radius,
            start_deg: start_angle_deg,
            actual_step_deg,
            index: 0,
            total,
        })
    }

    /// Returns the angular increment actually used, in degrees.
    ///
    /// Always `<=` the requested step.
    #[must_use]
    pub fn actual_step_deg(&self) -> f64 {
        self.actual_step_deg
    }
}

impl Iterator for ArcPoints {
    type Item = Point2;

    fn next(&mut self) -> Option<Point2> {
        if self.index >= self.total {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let phi = (self.start_deg + self.index as f64 * self.actual_step_deg).to_radians();
        self.index += 1;
        Some(Point2::new(self.radius * phi.cos(), self.radius * phi.sin()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ArcPoints {}
