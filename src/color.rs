//! RGBA colours for sprites and the render sink

use serde::{Deserialize, Serialize};

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same colour with a new alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Brighter companion colour used for the inner ring of a burst.
    ///
    /// Pushes red to full unless red is already high, in which case green
    /// is pushed instead (red + green reads as yellow).
    pub const fn accent(self) -> Self {
        if self.r < 200 {
            Self { r: 255, ..self }
        } else {
            Self { g: 255, ..self }
        }
    }

    /// Compare colour channels only, ignoring alpha
    pub const fn rgb_eq(self, other: Self) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }

    /// Normalized components for GPU upload
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// Named palette
pub mod palette {
    use super::Rgba;

    pub const SLATE_BLUE: Rgba = Rgba::rgb(106, 90, 205);
    pub const DEEP_PINK: Rgba = Rgba::rgb(255, 20, 147);
    pub const STEEL_BLUE: Rgba = Rgba::rgb(70, 130, 180);
    pub const DARK_SLATE_GRAY: Rgba = Rgba::rgb(47, 79, 79);

    // Background detail
    pub const INDIGO: Rgba = Rgba::rgb(75, 0, 130);
    pub const DARK_BLUE: Rgba = Rgba::rgb(0, 0, 139);
    pub const DARK_RED: Rgba = Rgba::rgb(139, 0, 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_pushes_red_or_green() {
        assert_eq!(palette::STEEL_BLUE.accent(), Rgba::rgb(255, 130, 180));
        assert_eq!(palette::DEEP_PINK.accent(), Rgba::rgb(255, 255, 147));
    }

    #[test]
    fn test_with_alpha_keeps_rgb() {
        let faded = palette::SLATE_BLUE.with_alpha(10);
        assert_eq!((faded.r, faded.g, faded.b, faded.a), (106, 90, 205, 10));
    }
}
