//ecal/src/color_utils.rs

// The eight-colour ANSI palette event tags can name, and the escape codes a
// terminal renderer needs for them. No terminal or rendering dependencies
// here so the loader, tests and renderers can all share it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

pub const STYLE_RESET: &str = "\x1b[0m";
pub const STYLE_BOLD: &str = "\x1b[1m";

static ANSI_SGR: Lazy<Regex> =
    Lazy::new(|| Regex::new("\x1b\\[[0-9;]*m").expect("valid ANSI regex"));

/// Colour names accepted inside an event tag, matched case-insensitively.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Palette {
    Black,
    Red,
    #[default]
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Palette {
    /// Parse a colour name; `None` for empty or unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        name.parse().ok()
    }

    fn ansi_index(self) -> u8 {
        match self {
            Palette::Black => 0,
            Palette::Red => 1,
            Palette::Green => 2,
            Palette::Yellow => 3,
            Palette::Blue => 4,
            Palette::Magenta => 5,
            Palette::Cyan => 6,
            Palette::White => 7,
        }
    }

    /// Foreground escape sequence (`ESC[30m` .. `ESC[37m`).
    pub fn fg_code(self) -> String {
        format!("\x1b[{}m", 30 + self.ansi_index())
    }

    /// Background escape sequence (`ESC[40m` .. `ESC[47m`).
    pub fn bg_code(self) -> String {
        format!("\x1b[{}m", 40 + self.ansi_index())
    }
}

/// Removes SGR escape codes, leaving only the visible text.
pub fn strip_ansi(s: &str) -> String {
    ANSI_SGR.replace_all(s, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_palette_names_round_trip() {
        for color in Palette::iter() {
            let name = color.to_string();
            assert_eq!(Palette::from_name(&name), Some(color));
            assert_eq!(Palette::from_name(&name.to_uppercase()), Some(color));
        }
        assert_eq!(Palette::from_name("  Magenta "), Some(Palette::Magenta));
        assert_eq!(Palette::from_name("orange"), None);
        assert_eq!(Palette::from_name(""), None);
    }

    #[test]
    fn test_escape_codes() {
        assert_eq!(Palette::Black.fg_code(), "\x1b[30m");
        assert_eq!(Palette::White.fg_code(), "\x1b[37m");
        assert_eq!(Palette::Red.bg_code(), "\x1b[41m");
        assert_eq!(Palette::from_name("WHITE").map(Palette::bg_code).as_deref(), Some("\x1b[47m"));
    }

    #[test]
    fn test_strip_ansi() {
        let s = format!("{}{} 4{}", Palette::Red.fg_code(), STYLE_BOLD, STYLE_RESET);
        assert_eq!(strip_ansi(&s), " 4");
    }
}
