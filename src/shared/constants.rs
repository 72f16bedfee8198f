/// Default page size for paginated listings; override with `PAGE_SIZE`.
/// The service uses a single page size everywhere.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

// =============================================================================
// LOCATION PLACEHOLDERS
// =============================================================================

/// Placeholder coordinates for locations created implicitly by name during
/// user creation (the caller supplies no coordinates there).
pub const PLACEHOLDER_LAT: f64 = 11.111111;
pub const PLACEHOLDER_LNG: f64 = 22.111111;
