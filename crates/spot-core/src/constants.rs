/// Vitals ratio at or below which a marker is tinted as `Low`.
pub const LOW_TIER_CEILING: f64 = 0.333;

/// Vitals ratio at or below which a marker is tinted as `Medium`.
pub const MEDIUM_TIER_CEILING: f64 = 0.666;

/// Blocks per chunk; view distance is configured in chunks.
pub const BLOCKS_PER_CHUNK: f64 = 16.0;

/// Label anchor height above the top of a marker's bounding box.
pub const LABEL_LIFT: f64 = 0.5;

/// Default player hitbox width, used when the host sends no bounds.
pub const PLAYER_WIDTH: f64 = 0.6;

/// Default player hitbox height, used when the host sends no bounds.
pub const PLAYER_HEIGHT: f64 = 1.8;

/// Default client view distance in chunks.
pub const DEFAULT_VIEW_DISTANCE_CHUNKS: u32 = 12;
