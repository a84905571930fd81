//! Cell fill colour and its hex form.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a fourth (alpha) channel is carried into cell fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlphaMode {
    /// Emit alpha-first `AARRGGBB` fills for 4-channel images.
    #[default]
    Argb,
    /// Drop the alpha channel; every fill is `RRGGBB`.
    Ignore,
}

/// A solid cell fill colour.
///
/// Fills built from 3-channel pixels carry no alpha and render as six hex
/// digits; fills built from 4-channel pixels (with [`AlphaMode::Argb`]) render
/// as eight digits in alpha-red-green-blue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fill {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: Option<u8>,
}

impl Fill {
    /// Create an opaque RGB fill.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: None }
    }

    /// Create a fill with an explicit alpha byte.
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: Some(a) }
    }

    /// Build a fill from one pixel's channels, stored in R, G, B[, A] order.
    ///
    /// The caller guarantees at least three channels.
    #[inline]
    pub fn from_pixel(channels: &[u8], alpha: AlphaMode) -> Self {
        match (channels, alpha) {
            ([r, g, b, a, ..], AlphaMode::Argb) => Self::argb(*a, *r, *g, *b),
            ([r, g, b, ..], _) => Self::rgb(*r, *g, *b),
            _ => Self::rgb(0, 0, 0),
        }
    }

    /// Whether the fill carries an alpha byte.
    pub fn has_alpha(self) -> bool {
        self.a.is_some()
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.a {
            Some(a) => write!(f, "{:02X}{:02X}{:02X}{:02X}", a, self.r, self.g, self.b),
            None => write!(f, "{:02X}{:02X}{:02X}", self.r, self.g, self.b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_hex() {
        let fill = Fill::from_pixel(&[255, 0, 16], AlphaMode::Argb);
        assert_eq!(fill.to_string(), "FF0010");
    }

    #[test]
    fn test_rgba_hex_is_alpha_first() {
        let fill = Fill::from_pixel(&[10, 20, 30, 255], AlphaMode::Argb);
        assert_eq!(fill.to_string(), "FF0A141E");
    }

    #[test]
    fn test_rgba_hex_ignoring_alpha() {
        let fill = Fill::from_pixel(&[10, 20, 30, 128], AlphaMode::Ignore);
        assert_eq!(fill.to_string(), "0A141E");
        assert!(!fill.has_alpha());
    }

    #[test]
    fn test_zero_padding() {
        assert_eq!(Fill::rgb(0, 1, 2).to_string(), "000102");
        assert_eq!(Fill::argb(0, 0, 0, 0).to_string(), "00000000");
    }

    #[test]
    fn test_fills_differ_by_alpha() {
        let opaque = Fill::argb(0xFF, 10, 20, 30);
        let half = Fill::argb(0x80, 10, 20, 30);
        assert_ne!(opaque, half);
        assert_ne!(Fill::rgb(10, 20, 30), opaque);
    }

    #[test]
    fn test_alpha_mode_default() {
        assert_eq!(AlphaMode::default(), AlphaMode::Argb);
    }
}
