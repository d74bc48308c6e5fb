// File: tests/period_tests.rs
use chrono::NaiveDate;
use ecal::cli::format_event_line;
use ecal::color_utils::strip_ansi;
use ecal::context::TestContext;
use ecal::loader::EventLoader;
use ecal::period::{Period, display_month_year, events_in_period, load_period};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_display_month_without_week() {
    let today = ymd(2026, 10, 15);
    assert_eq!(display_month_year(2025, 7, None, today), (7, 2025));
}

#[test]
fn test_display_month_from_week() {
    let today = ymd(2026, 10, 15);
    // 2025-W01 starts on 2024-12-30
    assert_eq!(display_month_year(2025, 5, Some(1), today), (12, 2024));
    // 2026-W50 starts on 2026-12-07
    assert_eq!(display_month_year(2026, 1, Some(50), today), (12, 2026));
}

#[test]
fn test_display_month_falls_back_to_today() {
    let today = ymd(2026, 10, 15);
    assert_eq!(display_month_year(2025, 5, Some(53), today), (10, 2026));
}

#[test]
fn test_period_bounds() {
    let p = Period::new(2025, 11, 3);
    assert_eq!(p.start(), Some(ymd(2025, 11, 1)));
    assert_eq!(p.end(), Some(ymd(2026, 1, 31)));
    assert_eq!(p.years(), vec![2025, 2026]);
    assert!(p.contains(ymd(2026, 1, 31)));
    assert!(!p.contains(ymd(2025, 10, 31)));
    assert!(!p.contains(ymd(2026, 2, 1)));

    let year = Period::new(2025, 1, 12);
    assert_eq!(year.end(), Some(ymd(2025, 12, 31)));
    assert_eq!(year.years(), vec![2025]);

    let feb = Period::new(2024, 2, 1);
    assert_eq!(feb.end(), Some(ymd(2024, 2, 29)));

    // Zero months is treated as one
    assert_eq!(Period::new(2025, 3, 0).months, 1);
}

#[test]
fn test_events_in_period_dedups_and_sorts() {
    let loader = EventLoader::default();
    let text = "\
12/25;[holiday] Christmas
12/24;[holiday] Christmas Eve
12/25;[holiday] Christmas
11/30;[fun] Too early
";
    let events = loader.parse_str(text, 2025).events;
    let period = Period::new(2025, 12, 1);
    let kept = events_in_period(events, &period);
    let got: Vec<(NaiveDate, &str)> = kept
        .iter()
        .map(|e| (e.date, e.description.as_str()))
        .collect();
    assert_eq!(
        got,
        vec![
            (ymd(2025, 12, 24), "Christmas Eve"),
            (ymd(2025, 12, 25), "Christmas"),
        ]
    );
}

#[test]
fn test_load_period_spans_year_boundary() {
    let ctx = TestContext::new();
    let path = ctx.write_file(
        "events.txt",
        "01/01;[holiday] New Year\n12/25;[holiday] Christmas\n07/04/1990;[birthday] Alex\n",
    );
    let period = Period::new(2025, 11, 3);
    let events = load_period(&EventLoader::default(), &path, &period);
    let got: Vec<(NaiveDate, &str)> = events
        .iter()
        .map(|e| (e.date, e.description.as_str()))
        .collect();
    assert_eq!(
        got,
        vec![
            (ymd(2025, 12, 25), "Christmas"),
            (ymd(2026, 1, 1), "New Year"),
        ]
    );
}

#[test]
fn test_load_period_missing_file_is_empty() {
    let ctx = TestContext::new();
    let period = Period::new(2025, 1, 12);
    let events = load_period(&EventLoader::default(), &ctx.root.join("nope.txt"), &period);
    assert!(events.is_empty());
}

#[test]
fn test_anniversary_age_and_listing() {
    let events = EventLoader::default()
        .parse_str("07/04/1990;[birthday] Alex's birthday", 2025)
        .events;
    let birthday = &events[0];

    assert_eq!(birthday.age_on(ymd(2025, 7, 3)), Some(34));
    assert_eq!(birthday.age_on(ymd(2025, 7, 4)), Some(35));
    assert_eq!(birthday.days_until(ymd(2025, 7, 1)), 3);

    let line = strip_ansi(&format_event_line(birthday, ymd(2025, 7, 4)));
    assert_eq!(line, "2025-07-04 Fri 🎂 Alex's birthday (Age: 35) (Today)");

    let line = strip_ansi(&format_event_line(birthday, ymd(2025, 7, 5)));
    assert!(line.ends_with("(1 day ago)"), "{}", line);
    let line = strip_ansi(&format_event_line(birthday, ymd(2025, 6, 30)));
    assert!(line.ends_with("(In 4 days)"), "{}", line);
}

#[test]
fn test_non_anniversary_has_no_age() {
    let events = EventLoader::default()
        .parse_str("12/25;[holiday] Christmas", 2025)
        .events;
    assert_eq!(events[0].age_on(ymd(2030, 1, 1)), None);
}
