/// Length of the initial two-section curve seeded by region-add, in world units.
pub const INITIAL_CURVE_LENGTH: f32 = 1.0;

/// Radius of the canonical shape-vertex ring produced by a shape reset.
pub const DEFAULT_RING_RADIUS: f32 = 0.1;

/// Default number of interpolation steps between consecutive sections.
pub const DEFAULT_CURVE_RESOLUTION: u32 = 12;

/// Default number of hair guides requested per bundle.
pub const DEFAULT_GUIDES_COUNT: u32 = 64;

/// Default taper length for new regions (distance at which final thickness is reached).
pub const DEFAULT_TAPER_LENGTH: f32 = 0.1;

/// Default relative strand thickness for new regions.
pub const DEFAULT_TAPER_THICKNESS: f32 = 1.0;
