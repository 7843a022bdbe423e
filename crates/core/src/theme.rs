//! Card color themes.
//!
//! Themes live in a registry keyed by name. The two built-in themes can be
//! extended or overridden from a JSON document such as:
//!
//! ```json
//! { "night": { "header": "#1F2937", "subheader": "#9CA3AF", "alt_row": "#E5E7EB" } }
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Named colors accepted in theme files, with their RGB values.
const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("white", Rgb(0xFF, 0xFF, 0xFF)),
    ("black", Rgb(0x00, 0x00, 0x00)),
    ("steelblue", Rgb(0x46, 0x82, 0xB4)),
    ("lightgray", Rgb(0xD3, 0xD3, 0xD3)),
    ("lightgrey", Rgb(0xD3, 0xD3, 0xD3)),
    ("lightblue", Rgb(0xAD, 0xD8, 0xE6)),
    ("lightgreen", Rgb(0x90, 0xEE, 0x90)),
    ("lightyellow", Rgb(0xFF, 0xFF, 0xE0)),
];

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);

    /// Parse `#RRGGBB`, `#RGB` or a known color name.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let lower = text.to_lowercase();

        if let Some((_, rgb)) = NAMED_COLORS.iter().find(|(name, _)| *name == lower) {
            return Ok(*rgb);
        }

        let hex = lower
            .strip_prefix('#')
            .ok_or_else(|| Error::Config(format!("unknown color '{}'", text)))?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::Config(format!("invalid color '{}'", text)));
        }
        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| Error::Config(format!("invalid color '{}'", text)))
        };

        match hex.len() {
            6 => Ok(Rgb(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            3 => {
                let double = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Rgb(double(0)?, double(1)?, double(2)?))
            }
            _ => Err(Error::Config(format!("invalid color '{}'", text))),
        }
    }

    /// `#RRGGBB` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Rgb::parse(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

/// The three fill colors of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Header band behind the class name.
    pub header: Rgb,
    /// "Last Name" / "First Name" band.
    pub subheader: Rgb,
    /// Fill of every odd student row.
    pub alt_row: Rgb,
}

impl Theme {
    pub const GREEN_YELLOW: Theme = Theme {
        header: Rgb(0xC6, 0xEF, 0xCE),
        subheader: Rgb(0xFF, 0xF2, 0xCC),
        alt_row: Rgb(0xE2, 0xEF, 0xDA),
    };

    pub const BLUE_WHITE: Theme = Theme {
        header: Rgb(0x46, 0x82, 0xB4),
        subheader: Rgb(0xD3, 0xD3, 0xD3),
        alt_row: Rgb(0xAD, 0xD8, 0xE6),
    };
}

/// Name → theme lookup table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, Theme>,
}

impl ThemeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in "green-yellow" and "blue-white" themes.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.insert("green-yellow", Theme::GREEN_YELLOW);
        registry.insert("blue-white", Theme::BLUE_WHITE);
        registry
    }

    /// Add or replace a theme.
    pub fn insert(&mut self, name: impl Into<String>, theme: Theme) {
        self.themes.insert(name.into(), theme);
    }

    /// Look up a theme by exact name.
    pub fn get(&self, name: &str) -> Result<Theme> {
        self.themes.get(name).copied().ok_or_else(|| {
            let known: Vec<&str> = self.names().collect();
            Error::Theme(format!("{} (known themes: {})", name, known.join(", ")))
        })
    }

    /// Theme names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    /// Merge themes from a JSON object of `name → {header, subheader, alt_row}`.
    ///
    /// Returns the number of themes read.
    pub fn extend_from_json(&mut self, json: &str) -> Result<usize> {
        let themes: BTreeMap<String, Theme> =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        let count = themes.len();
        for (name, theme) in themes {
            log::debug!("Registering theme '{}'", name);
            self.themes.insert(name, theme);
        }
        Ok(count)
    }
}

/// Colors of a built-in theme.
pub fn get_theme_colors(name: &str) -> Result<Theme> {
    ThemeRegistry::builtin().get(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_themes() {
        let gy = get_theme_colors("green-yellow").unwrap();
        assert_eq!(gy.header.to_hex(), "#C6EFCE");
        assert_eq!(gy.subheader.to_hex(), "#FFF2CC");
        assert_eq!(gy.alt_row.to_hex(), "#E2EFDA");

        let bw = get_theme_colors("blue-white").unwrap();
        assert_eq!(bw.header, Rgb::parse("steelblue").unwrap());
        assert_eq!(bw.subheader, Rgb::parse("lightgray").unwrap());
        assert_eq!(bw.alt_row, Rgb::parse("lightblue").unwrap());
    }

    #[test]
    fn test_unknown_theme() {
        let err = get_theme_colors("purple").unwrap_err();
        assert!(matches!(err, Error::Theme(_)));
        assert!(err.to_string().contains("purple"));
        assert!(err.to_string().contains("blue-white, green-yellow"));
    }

    #[test]
    fn test_theme_lookup_is_exact() {
        assert!(get_theme_colors("Green-Yellow").is_err());
        assert!(get_theme_colors("").is_err());
    }

    #[test]
    fn test_parse_colors() {
        assert_eq!(Rgb::parse("#ffffff").unwrap(), Rgb::WHITE);
        assert_eq!(Rgb::parse("#FFF").unwrap(), Rgb::WHITE);
        assert_eq!(Rgb::parse(" SteelBlue ").unwrap(), Rgb(0x46, 0x82, 0xB4));
        assert!(Rgb::parse("#12345").is_err());
        assert!(Rgb::parse("#GGGGGG").is_err());
        assert!(Rgb::parse("chartreuse-ish").is_err());
    }

    #[test]
    fn test_extend_from_json() {
        let mut registry = ThemeRegistry::builtin();
        let count = registry
            .extend_from_json(
                r##"{"night": {"header": "#1F2937", "subheader": "lightgrey", "alt_row": "#EEE"}}"##,
            )
            .unwrap();

        assert_eq!(count, 1);
        let night = registry.get("night").unwrap();
        assert_eq!(night.header, Rgb(0x1F, 0x29, 0x37));
        assert_eq!(night.alt_row, Rgb(0xEE, 0xEE, 0xEE));
        assert_eq!(registry.names().count(), 3);
    }

    #[test]
    fn test_extend_from_json_rejects_bad_colors() {
        let mut registry = ThemeRegistry::builtin();
        let err = registry
            .extend_from_json(r##"{"bad": {"header": "nope", "subheader": "#000", "alt_row": "#000"}}"##)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(registry.get("bad").is_err());
    }

    #[test]
    fn test_theme_serializes_as_hex() {
        let json = serde_json::to_string(&Theme::BLUE_WHITE).unwrap();
        assert_eq!(
            json,
            r##"{"header":"#4682B4","subheader":"#D3D3D3","alt_row":"#ADD8E6"}"##
        );
    }
}
