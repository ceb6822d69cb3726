// Floating point comparisons
pub const FEQ_EPSILON: f64 = 1e-12;

// Geometric predicates: degenerate areas, projected directions,
// barycentric containment
pub const GEOM_EPSILON: f64 = 1e-9;

// Classifying a hit point as cap rather than lateral surface
pub const SURFACE_EPSILON: f64 = 1e-6;

// Display colors
pub const DISPLAY_MAX: f64 = 255.0;

// Fallback material
pub const DEFAULT_REFLECTIVITY: f64 = 0.7;
pub const DEFAULT_SHININESS: f64 = 10.0;
