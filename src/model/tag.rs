// File: ./src/model/tag.rs
use crate::color_utils::Palette;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Event category taken from the first field of a `[category, fg, bg, emoji]` tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Global,
    Anniversary,
    Birthday,
    Holiday,
    Church,
    Fun,
    Hr,
    Ie,
    Us,
    #[default]
    Default,
    /// Any other tag; keeps the name as written.
    Other(String),
}

impl Category {
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        match name.to_lowercase().as_str() {
            "" | "default" => Category::Default,
            "global" => Category::Global,
            "anniversary" => Category::Anniversary,
            "birthday" => Category::Birthday,
            "holiday" => Category::Holiday,
            "church" => Category::Church,
            "fun" => Category::Fun,
            "hr" => Category::Hr,
            "ie" => Category::Ie,
            "us" => Category::Us,
            _ => Category::Other(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Global => "global",
            Category::Anniversary => "anniversary",
            Category::Birthday => "birthday",
            Category::Holiday => "holiday",
            Category::Church => "church",
            Category::Fun => "fun",
            Category::Hr => "hr",
            Category::Ie => "ie",
            Category::Us => "us",
            Category::Default => "default",
            Category::Other(name) => name,
        }
    }

    /// Emoji shown when the tag does not carry its own.
    pub fn default_emoji(&self) -> &'static str {
        match self {
            Category::Global => "🌍",
            Category::Anniversary => "📌",
            Category::Birthday => "🎂",
            Category::Holiday => "🏖️",
            Category::Church => "✝️",
            Category::Fun => "🎉",
            Category::Hr => "🇭🇷",
            Category::Ie => "🇮🇪",
            Category::Us => "🇺🇸",
            Category::Default | Category::Other(_) => "📅",
        }
    }

    /// Birthdays and anniversaries recur yearly from an absolute base date.
    pub fn is_anniversary_like(&self) -> bool {
        matches!(self, Category::Birthday | Category::Anniversary)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::from_name(&s)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}

/// Presentation metadata split off an event description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    pub category: Category,
    pub fg: Palette,
    pub bg: Option<Palette>,
    pub emoji: Option<String>,
    pub description: String,
    /// False when no `[...]` tag was found and defaults were applied.
    pub tagged: bool,
}

/// Split the optional leading `[category, fg, bg, emoji]` tag off `text`.
///
/// Trailing fields may be left out. Unknown or missing colours fall back to
/// `default_fg` and "no background"; a missing emoji stays `None` so the
/// renderer can use [`Category::default_emoji`].
pub fn decorate(text: &str, default_fg: Palette) -> Decoration {
    let text = text.trim();

    let tag = text
        .strip_prefix('[')
        .and_then(|inner| inner.split_once(']'));

    let Some((inner, rest)) = tag else {
        return Decoration {
            category: Category::Default,
            fg: default_fg,
            bg: None,
            emoji: None,
            description: text.to_string(),
            tagged: false,
        };
    };

    let fields: Vec<&str> = inner.split(',').map(str::trim).collect();
    let field = |idx: usize| fields.get(idx).copied().filter(|f| !f.is_empty());

    Decoration {
        category: field(0).map(Category::from_name).unwrap_or_default(),
        fg: field(1).and_then(Palette::from_name).unwrap_or(default_fg),
        bg: field(2).and_then(Palette::from_name),
        emoji: field(3).map(str::to_string),
        description: rest.trim().to_string(),
        tagged: true,
    }
}
