use thiserror::Error;

/// Top-level error type for the cavmesh outline builder.
#[derive(Debug, Error)]
pub enum CavmeshError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Outline(#[from] OutlineError),

    #[error(transparent)]
    Meshing(#[from] MeshingError),
}

/// Errors in the geometric configuration, detected before any point is produced.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parameter {parameter} = {value} must be positive")]
    NonPositive { parameter: &'static str, value: f64 },

    #[error("cavity count must be at least 1")]
    NoCavities,

    #[error("cavity angle {cavity_angle_deg}° must be smaller than the angular step {angle_step_deg}°")]
    CavityAngleTooWide {
        cavity_angle_deg: f64,
        angle_step_deg: f64,
    },

    #[error("cavity override index {index} is out of range for {cavity_count} cavities")]
    OverrideOutOfRange { index: usize, cavity_count: usize },

    #[error("arc span is empty: start and end angle are both {angle_deg}°")]
    EmptyArcSpan { angle_deg: f64 },

    #[error("arc span is reversed: start {start_deg}° lies past end {end_deg}°")]
    ReversedArcSpan { start_deg: f64, end_deg: f64 },
}

/// Invariant violations detected after outline assembly.
#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("cavity {cavity} appended {points} points but {markers} facet markers")]
    CavityMarkerMismatch {
        cavity: usize,
        points: usize,
        markers: usize,
    },

    #[error("the {loop_name} loop of the outline is empty")]
    EmptyLoop { loop_name: &'static str },

    #[error("outline has {points} points, {segments} segments and {markers} markers")]
    Inconsistent {
        points: usize,
        segments: usize,
        markers: usize,
    },

    #[error("segment ({start}, {end}) references a vertex outside [0, {point_count})")]
    SegmentOutOfRange {
        start: usize,
        end: usize,
        point_count: usize,
    },
}

/// Errors raised by the triangulation engine. Opaque to the outline core.
#[derive(Debug, Error)]
pub enum MeshingError {
    #[error("point insertion failed: {0}")]
    Insertion(String),

    #[error("hole point ({x}, {y}) lies inside the meshed region")]
    HoleInsideRegion { x: f64, y: f64 },

    #[error("meshing failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`CavmeshError`].
pub type Result<T> = std::result::Result<T, CavmeshError>;
