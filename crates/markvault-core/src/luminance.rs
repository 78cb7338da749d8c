//! Luminance calculation using ITU-R BT.601 coefficients.
//!
//! The grayscale transform writes `floor(L)` back to every color channel,
//! so the integer variant here truncates rather than rounds. It works in
//! thousandths so that gray input maps exactly to itself.

/// ITU-R BT.601 coefficient for red channel in luminance calculation.
pub const LUMINANCE_R: f64 = 0.299;

/// ITU-R BT.601 coefficient for green channel in luminance calculation.
pub const LUMINANCE_G: f64 = 0.587;

/// ITU-R BT.601 coefficient for blue channel in luminance calculation.
pub const LUMINANCE_B: f64 = 0.114;

/// BT.601 weights scaled by 1000 for exact integer evaluation.
const WEIGHT_R: u32 = 299;
const WEIGHT_G: u32 = 587;
const WEIGHT_B: u32 = 114;

/// Calculate luminance from u8 RGB values as a real number (0.0 to 255.0).
#[inline]
pub fn calculate_luminance(r: u8, g: u8, b: u8) -> f64 {
    LUMINANCE_R * r as f64 + LUMINANCE_G * g as f64 + LUMINANCE_B * b as f64
}

/// Calculate luminance from u8 RGB values, truncated toward zero.
///
/// # Arguments
/// * `r` - Red channel value (0-255)
/// * `g` - Green channel value (0-255)
/// * `b` - Blue channel value (0-255)
///
/// # Returns
/// `floor(0.299 * r + 0.587 * g + 0.114 * b)`
#[inline]
pub fn calculate_luminance_u8(r: u8, g: u8, b: u8) -> u8 {
    let sum = WEIGHT_R * r as u32 + WEIGHT_G * g as u32 + WEIGHT_B * b as u32;
    // At most 255_000, so the quotient always fits
    (sum / 1000) as u8
}
