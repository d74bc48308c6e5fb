// File: tests/tag_decorator.rs
use ecal::color_utils::Palette;
use ecal::model::{Category, decorate};

#[test]
fn test_full_tag() {
    let d = decorate("[holiday,red,white,🎄] Christmas", Palette::Green);
    assert!(d.tagged);
    assert_eq!(d.category, Category::Holiday);
    assert_eq!(d.fg, Palette::Red);
    assert_eq!(d.bg, Some(Palette::White));
    assert_eq!(d.emoji.as_deref(), Some("🎄"));
    assert_eq!(d.description, "Christmas");
}

#[test]
fn test_tag_without_emoji_falls_back_to_category_emoji() {
    let d = decorate("[holiday,red,white] Christmas", Palette::Green);
    assert_eq!(d.category, Category::Holiday);
    assert_eq!(d.fg, Palette::Red);
    assert_eq!(d.bg, Some(Palette::White));
    assert_eq!(d.emoji, None);
    assert_eq!(d.category.default_emoji(), "🏖️");
}

#[test]
fn test_omitted_trailing_fields() {
    let d = decorate("[church,magenta] Easter Monday", Palette::Green);
    assert_eq!(d.category, Category::Church);
    assert_eq!(d.fg, Palette::Magenta);
    assert_eq!(d.bg, None);
    assert_eq!(d.description, "Easter Monday");

    let d = decorate("[birthday] Alex's birthday", Palette::Green);
    assert_eq!(d.category, Category::Birthday);
    assert_eq!(d.fg, Palette::Green);
    assert_eq!(d.bg, None);
    assert_eq!(d.emoji, None);
    assert_eq!(d.description, "Alex's birthday");
}

#[test]
fn test_default_fg_is_caller_supplied() {
    let d = decorate("[fun] Party", Palette::White);
    assert_eq!(d.fg, Palette::White);
}

#[test]
fn test_unknown_colors_fall_back() {
    let d = decorate("[fun,orange,purple] Party", Palette::Green);
    assert_eq!(d.fg, Palette::Green);
    assert_eq!(d.bg, None);
}

#[test]
fn test_color_names_are_case_insensitive_and_trimmed() {
    let d = decorate("[ us , BLUE ,  Yellow ] Independence Day", Palette::Green);
    assert_eq!(d.category, Category::Us);
    assert_eq!(d.fg, Palette::Blue);
    assert_eq!(d.bg, Some(Palette::Yellow));
    assert_eq!(d.description, "Independence Day");
}

#[test]
fn test_empty_fields_use_defaults() {
    let d = decorate("[, cyan] Something", Palette::Green);
    assert_eq!(d.category, Category::Default);
    assert_eq!(d.fg, Palette::Cyan);

    let d = decorate("[holiday,,red] Only background", Palette::Green);
    assert_eq!(d.fg, Palette::Green);
    assert_eq!(d.bg, Some(Palette::Red));

    let d = decorate("[] Bare", Palette::Green);
    assert!(d.tagged);
    assert_eq!(d.category, Category::Default);
    assert_eq!(d.description, "Bare");
}

#[test]
fn test_no_tag_keeps_whole_text() {
    let d = decorate("  Plain description  ", Palette::Green);
    assert!(!d.tagged);
    assert_eq!(d.category, Category::Default);
    assert_eq!(d.fg, Palette::Green);
    assert_eq!(d.bg, None);
    assert_eq!(d.emoji, None);
    assert_eq!(d.description, "Plain description");
}

#[test]
fn test_unknown_category_keeps_name_and_default_emoji() {
    let d = decorate("[work,blue] Release", Palette::Green);
    assert_eq!(d.category, Category::Other("work".to_string()));
    assert_eq!(d.category.to_string(), "work");
    assert_eq!(d.category.default_emoji(), "📅");
}

#[test]
fn test_default_emoji_table() {
    let table = [
        ("global", "🌍"),
        ("anniversary", "📌"),
        ("birthday", "🎂"),
        ("holiday", "🏖️"),
        ("church", "✝️"),
        ("fun", "🎉"),
        ("hr", "🇭🇷"),
        ("ie", "🇮🇪"),
        ("us", "🇺🇸"),
        ("default", "📅"),
    ];
    for (name, emoji) in table {
        assert_eq!(Category::from_name(name).default_emoji(), emoji, "{}", name);
    }
}
