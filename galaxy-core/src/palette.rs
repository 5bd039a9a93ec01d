use std::fmt;

use glam::Vec3;

/// Linear RGB color with components in `[0, 1]`.
pub type Color = Vec3;

/// Componentwise linear interpolation between two colors.
///
/// `t = 0` yields `a`, `t = 1` yields `b`.
#[inline]
pub fn lerp(a: Color, b: Color, t: f32) -> Color {
    a + (b - a) * t
}

/// Error returned when a hex color string cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseHexError {
    /// The string is not of the form `#rrggbb`.
    BadFormat,
    /// A character is not a hexadecimal digit.
    BadDigit,
}

impl fmt::Display for ParseHexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseHexError::BadFormat => write!(f, "expected a color of the form #rrggbb"),
            ParseHexError::BadDigit => write!(f, "invalid hexadecimal digit in color"),
        }
    }
}

impl std::error::Error for ParseHexError {}

/// Parses a `#rrggbb` string into a [`Color`].
pub fn parse_hex(s: &str) -> Result<Color, ParseHexError> {
    let digits = s.strip_prefix('#').ok_or(ParseHexError::BadFormat)?;
    if digits.len() != 6 {
        return Err(ParseHexError::BadFormat);
    }
    let value = u32::from_str_radix(digits, 16).map_err(|_| ParseHexError::BadDigit)?;
    Ok(from_rgb24(value))
}

/// Formats a [`Color`] as a `#rrggbb` string.
pub fn to_hex(c: Color) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
    format!(
        "#{:02x}{:02x}{:02x}",
        channel(c.x),
        channel(c.y),
        channel(c.z)
    )
}

#[inline]
fn from_rgb24(value: u32) -> Color {
    Color::new(
        ((value >> 16) & 0xff) as f32 / 255.0,
        ((value >> 8) & 0xff) as f32 / 255.0,
        (value & 0xff) as f32 / 255.0,
    )
}

/// A named pair of gradient endpoints.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    inside: u32,
    outside: u32,
}

/// The built-in theme table. Selecting a theme overwrites the
/// `inside_color` / `outside_color` fields of a config.
pub static THEMES: [Theme; 6] = [
    Theme::new("Classic", 0xff6030, 0x1b3984),
    Theme::new("Alien Glow", 0x00ffcc, 0x330066),
    Theme::new("Fire", 0xffcc66, 0x990000),
    Theme::new("Ice", 0xccffff, 0x003366),
    Theme::new("Plasma", 0xff66ff, 0x3300aa),
    Theme::new("Ocean", 0x66ffcc, 0x001a4d),
];

impl Theme {
    const fn new(name: &'static str, inside: u32, outside: u32) -> Self {
        Self {
            name,
            inside,
            outside,
        }
    }

    /// Looks a theme up by its exact display name.
    pub fn lookup(name: &str) -> Option<&'static Theme> {
        THEMES.iter().find(|t| t.name == name)
    }

    /// Returns the `(inside, outside)` gradient endpoints.
    pub fn colors(&self) -> (Color, Color) {
        (from_rgb24(self.inside), from_rgb24(self.outside))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_hits_both_endpoints() {
        let a = Color::new(1.0, 0.0, 0.5);
        let b = Color::new(0.0, 1.0, 0.0);
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
        assert_eq!(lerp(a, b, 0.5), Color::new(0.5, 0.5, 0.25));
    }

    #[test]
    fn parse_hex_accepts_well_formed_colors() {
        assert_eq!(parse_hex("#000000"), Ok(Color::ZERO));
        assert_eq!(parse_hex("#ffffff"), Ok(Color::ONE));
        assert_eq!(parse_hex("#00ffcc"), Ok(Color::new(0.0, 1.0, 0.8)));
    }

    #[test]
    fn parse_hex_rejects_malformed_input() {
        assert_eq!(parse_hex("00ffcc"), Err(ParseHexError::BadFormat));
        assert_eq!(parse_hex("#00ffc"), Err(ParseHexError::BadFormat));
        assert_eq!(parse_hex("#00ffcg"), Err(ParseHexError::BadDigit));
    }

    #[test]
    fn hex_roundtrips_through_parse_and_format() {
        for s in ["#ff6030", "#1b3984", "#330066", "#000000", "#ffffff"] {
            assert_eq!(to_hex(parse_hex(s).unwrap()), s);
        }
    }

    #[test]
    fn alien_glow_theme_has_exact_endpoints() {
        let theme = Theme::lookup("Alien Glow").unwrap();
        let (inside, outside) = theme.colors();
        assert_eq!(inside, parse_hex("#00ffcc").unwrap());
        assert_eq!(outside, parse_hex("#330066").unwrap());
    }

    #[test]
    fn lookup_is_exact_and_misses_return_none() {
        assert!(Theme::lookup("Classic").is_some());
        assert!(Theme::lookup("classic").is_none());
        assert!(Theme::lookup("No Such Theme").is_none());
    }

    #[test]
    fn theme_table_has_six_unique_names() {
        let mut names: Vec<_> = THEMES.iter().map(|t| t.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 6);
    }
}
