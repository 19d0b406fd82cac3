//! RGBA color type and color string parsing.

/// A single RGBA8 color value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black, the value of every blank pixel.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    /// Opaque black, the default stroke color.
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    /// Opaque white, the default canvas background.
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    /// Create a color from individual channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB channels.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// The four channel bytes in `[r, g, b, a]` order.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build a color from `[r, g, b, a]` channel bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Pack into `0x00RRGGBB`, the layout pixel-buffer windows expect.
    /// Alpha is dropped; composite first if it matters.
    #[inline]
    pub const fn to_packed_rgb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Alpha-blend `self` over an opaque background color.
    pub fn over(self, background: Rgba) -> Rgba {
        let a = self.a as u32;
        let inv = 255 - a;
        let blend = |fg: u8, bg: u8| (((fg as u32) * a + (bg as u32) * inv) / 255) as u8;
        Rgba::opaque(
            blend(self.r, background.r),
            blend(self.g, background.g),
            blend(self.b, background.b),
        )
    }
}

/// Parse a color string into an [`Rgba`] (always opaque).
///
/// Supports:
/// - Named colors: black, white, red, green, blue, yellow, cyan, magenta,
///   gray/grey, orange, purple, pink, brown
/// - Hex: `#RGB` (expanded to `#RRGGBB`), `#RRGGBB`
/// - Case-insensitive, trims whitespace
pub fn parse_color(s: &str) -> Option<Rgba> {
    let s = s.trim();
    if s.starts_with('#') {
        parse_hex(s)
    } else {
        parse_named(s)
    }
}

fn parse_hex(s: &str) -> Option<Rgba> {
    let hex = s.strip_prefix('#')?;
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            Some(Rgba::opaque(r * 17, g * 17, b * 17))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Rgba::opaque(r, g, b))
        }
        _ => None,
    }
}

fn parse_named(s: &str) -> Option<Rgba> {
    match s.to_lowercase().as_str() {
        "black"         => Some(Rgba::opaque(0, 0, 0)),
        "white"         => Some(Rgba::opaque(255, 255, 255)),
        "red"           => Some(Rgba::opaque(255, 0, 0)),
        "green"         => Some(Rgba::opaque(0, 128, 0)),
        "blue"          => Some(Rgba::opaque(0, 0, 255)),
        "yellow"        => Some(Rgba::opaque(255, 255, 0)),
        "cyan"          => Some(Rgba::opaque(0, 255, 255)),
        "magenta"       => Some(Rgba::opaque(255, 0, 255)),
        "gray" | "grey" => Some(Rgba::opaque(128, 128, 128)),
        "orange"        => Some(Rgba::opaque(255, 165, 0)),
        "purple"        => Some(Rgba::opaque(128, 0, 128)),
        "pink"          => Some(Rgba::opaque(255, 192, 203)),
        "brown"         => Some(Rgba::opaque(139, 69, 19)),
        _               => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors() {
        assert_eq!(parse_color("black"),  Some(Rgba::opaque(0, 0, 0)));
        assert_eq!(parse_color("white"),  Some(Rgba::opaque(255, 255, 255)));
        assert_eq!(parse_color("red"),    Some(Rgba::opaque(255, 0, 0)));
        assert_eq!(parse_color("grey"),   Some(Rgba::opaque(128, 128, 128)));
        assert_eq!(parse_color("orange"), Some(Rgba::opaque(255, 165, 0)));
    }

    #[test]
    fn named_colors_case_insensitive() {
        assert_eq!(parse_color("Black"), Some(Rgba::opaque(0, 0, 0)));
        assert_eq!(parse_color("WHITE"), Some(Rgba::opaque(255, 255, 255)));
    }

    #[test]
    fn hex_rrggbb() {
        assert_eq!(parse_color("#000000"), Some(Rgba::opaque(0, 0, 0)));
        assert_eq!(parse_color("#FF0000"), Some(Rgba::opaque(255, 0, 0)));
        assert_eq!(parse_color("#f6f6f6"), Some(Rgba::opaque(246, 246, 246)));
    }

    #[test]
    fn hex_rgb_shorthand() {
        assert_eq!(parse_color("#000"), Some(Rgba::opaque(0, 0, 0)));
        assert_eq!(parse_color("#fff"), Some(Rgba::opaque(255, 255, 255)));
        assert_eq!(parse_color("#abc"), Some(Rgba::opaque(170, 187, 204)));
    }

    #[test]
    fn invalid_colors() {
        assert_eq!(parse_color(""),          None);
        assert_eq!(parse_color("notacolor"), None);
        assert_eq!(parse_color("#"),         None);
        assert_eq!(parse_color("#12345"),    None);
    }

    #[test]
    fn packed_rgb() {
        assert_eq!(Rgba::opaque(0xAB, 0xCD, 0xEF).to_packed_rgb(), 0x00ABCDEF);
        assert_eq!(Rgba::WHITE.to_packed_rgb(), 0x00FFFFFF);
    }

    #[test]
    fn over_opaque_background() {
        // Fully transparent shows the background
        assert_eq!(Rgba::TRANSPARENT.over(Rgba::WHITE), Rgba::WHITE);
        // Fully opaque hides it
        assert_eq!(Rgba::BLACK.over(Rgba::WHITE), Rgba::BLACK);
        // Half-transparent black over white lands near mid gray
        let mixed = Rgba::new(0, 0, 0, 128).over(Rgba::WHITE);
        assert!(mixed.r > 120 && mixed.r < 132);
        assert_eq!(mixed.a, 255);
    }

    #[test]
    fn byte_round_trip() {
        let c = Rgba::new(1, 2, 3, 4);
        assert_eq!(Rgba::from_bytes(c.to_bytes()), c);
    }
}
