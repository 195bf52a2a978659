//! Inch to pixel conversion.
//!
//! All geometry in the engine works in pixel space relative to a section's
//! content origin. Templates are authored in inches.

/// Pixels per real-world inch.
pub const INCH_TO_PIXEL: f64 = 10.0;

/// Horizontal grid step, in inches.
pub const GRID_SIZE: f64 = 1.0;

/// Distance within which an item is pulled flush against a shelf-mate.
pub const DEFAULT_SNAP_THRESHOLD_PX: f64 = 20.0;

/// Convert inches to pixels.
pub fn to_pixels(inches: f64) -> f64 {
    inches * INCH_TO_PIXEL
}

/// Convert pixels back to inches.
pub fn to_inches(pixels: f64) -> f64 {
    pixels / INCH_TO_PIXEL
}

/// Grid step in pixels.
pub fn grid_step_px() -> f64 {
    to_pixels(GRID_SIZE)
}
