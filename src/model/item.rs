// File: ./src/model/item.rs
use crate::color_utils::Palette;
use crate::model::tag::Category;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A resolved event for one context year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Date of the occurrence in the context year it was loaded for.
    pub date: NaiveDate,
    /// Rule text exactly as written before the `;`.
    pub original_rule: String,
    pub description: String,
    pub category: Category,
    pub is_annual: bool,
    pub is_anniversary: bool,
    /// Full historical date for anniversary candidates (`07/04/1990`).
    pub anniversary_base: Option<NaiveDate>,
    /// Set for recurring rules (Easter, Nth weekday, month/day).
    pub recurrence_rule: Option<String>,
    pub specific_year_rule: bool,
    pub fg: Palette,
    pub bg: Option<Palette>,
    pub emoji: Option<String>,
}

impl Event {
    /// The tag's own emoji, or the category default.
    pub fn display_emoji(&self) -> &str {
        match &self.emoji {
            Some(e) => e,
            None => self.category.default_emoji(),
        }
    }

    /// Completed years since the anniversary base date as of `today`.
    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        if !self.is_anniversary {
            return None;
        }
        let base = self.anniversary_base?;
        let mut age = today.year() - base.year();
        if (today.month(), today.day()) < (base.month(), base.day()) {
            age -= 1;
        }
        (age >= 0).then_some(age)
    }

    /// Whole days from `today` to the event; negative once it has passed.
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.date - today).num_days()
    }

    /// Key used to collapse the same event loaded for overlapping years.
    pub fn dedup_key(&self) -> (NaiveDate, &str) {
        (self.date, self.description.as_str())
    }

    /// Foreground + background escape codes for highlighting this event.
    pub fn color_codes(&self) -> String {
        let mut codes = self.fg.fg_code();
        if let Some(bg) = self.bg {
            codes.push_str(&bg.bg_code());
        }
        codes
    }
}
