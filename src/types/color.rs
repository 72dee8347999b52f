//! 24-bit RGB color.

/// An opaque RGB color.
///
/// The packed form follows the Java `Color.getRGB()` convention used by
/// the `FJC L` configuration lines: `0xFFRRGGBB` interpreted as a signed
/// 32-bit integer, so packed values are usually negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a color from its components.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// White.
    pub fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// Pack into the signed `0xFFRRGGBB` form.
    pub fn rgb(&self) -> i32 {
        (0xFF00_0000u32 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32) as i32
    }

    /// Unpack from the signed `0xFFRRGGBB` form. The alpha byte is
    /// ignored.
    pub fn from_rgb(packed: i32) -> Self {
        let v = packed as u32;
        Self {
            r: ((v >> 16) & 0xFF) as u8,
            g: ((v >> 8) & 0xFF) as u8,
            b: (v & 0xFF) as u8,
        }
    }

    /// Two-digit lowercase hex form, `rrggbb`, as used by the SVG
    /// emitter.
    pub fn to_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack() {
        let c = Color::new(0, 128, 128);
        let packed = c.rgb();
        assert!(packed < 0);
        assert_eq!(Color::from_rgb(packed), c);
    }

    #[test]
    fn test_known_packed_values() {
        // Values as they appear in real FJC L lines.
        assert_eq!(Color::black().rgb(), -16777216);
        assert_eq!(Color::from_rgb(-16711681), Color::new(0, 255, 255));
        assert_eq!(Color::from_rgb(-16744448), Color::new(0, 128, 0));
    }

    #[test]
    fn test_hex() {
        assert_eq!(Color::new(255, 20, 147).to_hex(), "ff1493");
        assert_eq!(Color::black().to_hex(), "000000");
    }
}
