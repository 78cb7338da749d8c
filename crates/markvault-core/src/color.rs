//! Watermark text color.
//!
//! Colors arrive from the UI as strings. Both hex notation (`#RGB`,
//! `#RRGGBB`) and the common CSS color keywords are accepted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The string was empty after trimming.
    #[error("Color string is empty")]
    Empty,

    /// A `#` color with the wrong number of digits.
    #[error("Color must be #RGB or #RRGGBB format, got {0} hex digits")]
    InvalidLength(usize),

    /// A `#` color containing non-hex characters.
    #[error("Invalid hex digit in color: {0}")]
    InvalidHexDigit(String),

    /// Neither hex nor a known color keyword.
    #[error("Unknown color name: {0}")]
    UnknownName(String),
}

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// White, the default watermark color.
    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// Black, used for the drop shadow.
    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// Lowercase `#rrggbb` notation.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::white()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// CSS color keywords (CSS Color Level 3 basic set plus a few extended names).
const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("black", Rgb::new(0, 0, 0)),
    ("silver", Rgb::new(192, 192, 192)),
    ("gray", Rgb::new(128, 128, 128)),
    ("grey", Rgb::new(128, 128, 128)),
    ("white", Rgb::new(255, 255, 255)),
    ("maroon", Rgb::new(128, 0, 0)),
    ("red", Rgb::new(255, 0, 0)),
    ("purple", Rgb::new(128, 0, 128)),
    ("fuchsia", Rgb::new(255, 0, 255)),
    ("magenta", Rgb::new(255, 0, 255)),
    ("green", Rgb::new(0, 128, 0)),
    ("lime", Rgb::new(0, 255, 0)),
    ("olive", Rgb::new(128, 128, 0)),
    ("yellow", Rgb::new(255, 255, 0)),
    ("navy", Rgb::new(0, 0, 128)),
    ("blue", Rgb::new(0, 0, 255)),
    ("teal", Rgb::new(0, 128, 128)),
    ("aqua", Rgb::new(0, 255, 255)),
    ("cyan", Rgb::new(0, 255, 255)),
    ("orange", Rgb::new(255, 165, 0)),
    ("pink", Rgb::new(255, 192, 203)),
    ("gold", Rgb::new(255, 215, 0)),
    ("brown", Rgb::new(165, 42, 42)),
    ("darkgray", Rgb::new(169, 169, 169)),
    ("darkgrey", Rgb::new(169, 169, 169)),
    ("lightgray", Rgb::new(211, 211, 211)),
    ("lightgrey", Rgb::new(211, 211, 211)),
];

/// Parse a color string.
///
/// # Examples
///
/// ```
/// use markvault_core::color::{parse_color, Rgb};
///
/// assert_eq!(parse_color("#FFF").unwrap(), Rgb::new(255, 255, 255));
/// assert_eq!(parse_color("#ff0000").unwrap(), Rgb::new(255, 0, 0));
/// assert_eq!(parse_color("Navy").unwrap(), Rgb::new(0, 0, 128));
/// ```
pub fn parse_color(input: &str) -> Result<Rgb, ColorParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ColorParseError::Empty);
    }

    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex);
    }

    let name = trimmed.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, c)| *c)
        .ok_or_else(|| ColorParseError::UnknownName(trimmed.to_string()))
}

fn parse_hex(hex: &str) -> Result<Rgb, ColorParseError> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorParseError::InvalidHexDigit(hex.to_string()));
    }

    let digit = |s: &str| {
        u8::from_str_radix(s, 16).map_err(|_| ColorParseError::InvalidHexDigit(hex.to_string()))
    };

    match hex.len() {
        // #RGB: each digit doubled, 0xF -> 0xFF
        3 => Ok(Rgb::new(
            digit(&hex[0..1])? * 17,
            digit(&hex[1..2])? * 17,
            digit(&hex[2..3])? * 17,
        )),
        6 => Ok(Rgb::new(
            digit(&hex[0..2])?,
            digit(&hex[2..4])?,
            digit(&hex[4..6])?,
        )),
        n => Err(ColorParseError::InvalidLength(n)),
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_color(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}
