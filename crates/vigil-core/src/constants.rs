//! Engine constants and tuning defaults.

// --- Distance bands (meters) ---

pub const DISTANCE_CRITICAL: f64 = 10.0;
pub const DISTANCE_HIGH: f64 = 20.0;
pub const DISTANCE_MEDIUM: f64 = 35.0;
pub const DISTANCE_LOW: f64 = 50.0;

// --- Angle-off bands (degrees) ---

pub const ANGLE_DIRECT: f64 = 30.0;
pub const ANGLE_OBLIQUE: f64 = 90.0;
pub const ANGLE_LATERAL: f64 = 150.0;

// --- Speed ---

/// Below this speed (m/s) a target counts as static.
pub const STATIC_SPEED: f64 = 0.5;

/// Infantry medium / high speed thresholds (m/s).
pub const INFANTRY_SPEED_MEDIUM: f64 = 2.0;
pub const INFANTRY_SPEED_HIGH: f64 = 5.0;

/// Drone medium / high speed thresholds (m/s).
pub const DRONE_SPEED_MEDIUM: f64 = 6.0;
pub const DRONE_SPEED_HIGH: f64 = 15.0;

/// Vehicle medium / high speed thresholds (m/s), light and armored alike.
pub const VEHICLE_SPEED_MEDIUM: f64 = 5.0;
pub const VEHICLE_SPEED_HIGH: f64 = 10.0;

// --- Threat level cut-points (score S = mu - nu) ---

pub const INDICATOR_CRITICAL_CUT: f64 = 0.7;
pub const INDICATOR_HIGH_CUT: f64 = 0.4;
pub const INDICATOR_MEDIUM_CUT: f64 = 0.0;

pub const COMPREHENSIVE_CRITICAL_CUT: f64 = 0.6;
pub const COMPREHENSIVE_HIGH_CUT: f64 = 0.3;
pub const COMPREHENSIVE_MEDIUM_CUT: f64 = 0.0;

// --- Terrain ---

/// Radius (m) of the disc sampled for environment complexity.
pub const COMPLEXITY_RADIUS: f64 = 10.0;

/// Largest accepted complexity radius (m). Sampling cost grows with its square.
pub const MAX_COMPLEXITY_RADIUS: f64 = 200.0;

/// Grid step (m) used when sampling the complexity disc.
pub const COMPLEXITY_SAMPLE_STEP: f64 = 1.0;

/// Combined density below which terrain counts as open.
pub const OPEN_DENSITY: f64 = 0.2;

/// Combined density below which terrain counts as moderate.
pub const MODERATE_DENSITY: f64 = 0.5;

// --- Heuristic fallback ---

pub const HEURISTIC_ARMORED_FACTOR: f64 = 2.0;
pub const HEURISTIC_LIGHT_VEHICLE_FACTOR: f64 = 1.5;
pub const HEURISTIC_DEFAULT_FACTOR: f64 = 1.0;
