//! Display colors
//!
//! Scenario files may spell a color as a hex string or as an `[r, g, b]` /
//! `[r, g, b, a]` array. Both are normalized into [`Rgba`] when the scenario
//! is built; nothing downstream sees how it was written

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional)
    pub fn from_hex(s: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        // from_str_radix alone would accept a leading '+'
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                // #abc is shorthand for #aabbcc
                let nibble = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid())
                };
                Ok(Self::opaque(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Self::opaque(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid()),
        }
    }

    pub fn from_components(c: &[u8]) -> Result<Self, ConfigError> {
        match *c {
            [r, g, b] => Ok(Self::opaque(r, g, b)),
            [r, g, b, a] => Ok(Self::new(r, g, b, a)),
            _ => Err(ConfigError::InvalidColor(format!("{c:?}"))),
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Color as written in a scenario file
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ColorConfig {
    Hex(String),          // "#44AF69"
    Components(Vec<u8>),  // [68, 175, 105, 90]
}

impl ColorConfig {
    pub fn hex(s: &str) -> Self {
        ColorConfig::Hex(s.to_string())
    }
}

impl TryFrom<&ColorConfig> for Rgba {
    type Error = ConfigError;

    fn try_from(c: &ColorConfig) -> Result<Self, Self::Error> {
        match c {
            ColorConfig::Hex(s) => Rgba::from_hex(s),
            ColorConfig::Components(v) => Rgba::from_components(v),
        }
    }
}

/// Fixed set of colors regular particles are painted with
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Palette {
    pub fn new(colors: Vec<Rgba>) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    pub fn from_config(entries: &[ColorConfig]) -> Result<Self, ConfigError> {
        let colors = entries.iter().map(Rgba::try_from).collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Uniform pick; the palette is never empty
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgba {
        *self.colors.choose(rng).unwrap_or(&Rgba::BLACK)
    }
}
