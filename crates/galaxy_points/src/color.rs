use crate::error::GalaxyError;
use std::str::FromStr;

/// An RGB triple with channels nominally in `[0, 1]`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_srgb_u8(rgb: [u8; 3]) -> Self {
        Self::new(
            rgb[0] as f32 / 255.0,
            rgb[1] as f32 / 255.0,
            rgb[2] as f32 / 255.0,
        )
    }

    pub fn to_srgb_u8(self) -> [u8; 3] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }

    /// Parses `#rrggbb`, `rrggbb`, `#rgb` or `rgb`.
    pub fn from_hex(hex: &str) -> Result<Self, GalaxyError> {
        let invalid = || GalaxyError::InvalidColor(hex.to_string());
        let digits = hex.trim().strip_prefix('#').unwrap_or(hex.trim());

        if !digits.is_ascii() {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            6 => Ok(Self::from_srgb_u8([
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            ])),
            // #abc is shorthand for #aabbcc
            3 => {
                let expand = |s: &str| channel(s).map(|c| c * 17);
                Ok(Self::from_srgb_u8([
                    expand(&digits[0..1])?,
                    expand(&digits[1..2])?,
                    expand(&digits[2..3])?,
                ]))
            }
            _ => Err(invalid()),
        }
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_srgb_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Per-channel linear blend, `alpha = 0` gives `self` and `alpha = 1` gives `other`.
    pub fn lerp(self, other: Self, alpha: f32) -> Self {
        let mix = |a: f32, b: f32| a * (1.0 - alpha) + b * alpha;
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[f32; 3]> for Rgb {
    fn from(c: [f32; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl FromStr for Rgb {
    type Err = GalaxyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Rgb::from_hex("#ff0000").unwrap(), Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(Rgb::from_hex("00FF00").unwrap(), Rgb::new(0.0, 1.0, 0.0));
        assert_eq!("#fff".parse::<Rgb>().unwrap(), Rgb::WHITE);
        assert_eq!(Rgb::from_hex("#1b3984").unwrap().to_srgb_u8(), [0x1b, 0x39, 0x84]);
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#", "#ff00", "#gg0000", "#ff00000", "#ééé"] {
            assert!(
                matches!(Rgb::from_hex(bad), Err(GalaxyError::InvalidColor(_))),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn hex_survives_formatting() {
        assert_eq!(Rgb::from_hex("#FF6030").unwrap().to_hex(), "#ff6030");
    }

    #[test]
    fn lerp_hits_both_ends_and_midpoint() {
        let a = Rgb::new(1.0, 0.0, 0.5);
        let b = Rgb::new(0.0, 1.0, 0.5);

        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(0.5, 0.5, 0.5));
    }
}
