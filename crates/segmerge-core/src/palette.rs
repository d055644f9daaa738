//! Palette - finite list of display colors
//!
//! A palette maps small color indices (as produced by graph coloring) to
//! RGB triples. The palette never grows on its own: running out of entries
//! is a configuration problem for the caller.

use crate::error::{Error, Result};

/// RGB color entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red component
    pub red: u8,
    /// Green component
    pub green: u8,
    /// Blue component
    pub blue: u8,
}

impl Rgb {
    /// Create a new RGB color
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Create a grayscale color
    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    /// Parse a `#rrggbb` color string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] if the string is not exactly seven
    /// characters, does not start with `#`, or contains non-hex digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use segmerge_core::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex("#84cc16").unwrap(), Rgb::new(0x84, 0xcc, 0x16));
    /// assert!(Rgb::from_hex("84cc16").is_err());
    /// ```
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.len() != 7 {
            return Err(Error::InvalidColor(format!(
                "'{}' has length {}, expected 7",
                s,
                s.len()
            )));
        }
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| Error::InvalidColor(format!("'{}' does not start with '#'", s)))?;

        let channel = |range: std::ops::Range<usize>| {
            digits
                .get(range)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .ok_or_else(|| Error::InvalidColor(format!("'{}' is not valid hex", s)))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Format as a `#rrggbb` string.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// Colors used by default for region maps.
const REGION_DEFAULT_HEX: [&str; 6] = [
    "#84cc16", "#ef4444", "#14b8a6", "#0ea5e9", "#a855f7", "#f43f5e",
];

/// Ordered list of display colors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create an empty palette
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a palette from a list of colors
    pub fn from_colors(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    /// Create a palette from `#rrggbb` strings
    pub fn from_hex_strings<S: AsRef<str>>(strings: &[S]) -> Result<Self> {
        let colors = strings
            .iter()
            .map(|s| Rgb::from_hex(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { colors })
    }

    /// Six well-separated colors, enough for typical region maps.
    pub fn region_default() -> Self {
        Self {
            colors: REGION_DEFAULT_HEX
                .iter()
                .filter_map(|s| Rgb::from_hex(s).ok())
                .collect(),
        }
    }

    /// Get the number of colors
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get a color by index
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    /// Append a color and return its index
    pub fn add_color(&mut self, color: Rgb) -> usize {
        self.colors.push(color);
        self.colors.len() - 1
    }

    /// Get all colors as a slice
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}
