// File: ./src/period.rs
//! The span of months being displayed and the events that fall inside it.
use crate::dates::{add_days, first_day_of_iso_week};
use crate::loader::EventLoader;
use crate::model::Event;
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;
use std::path::Path;

/// Month counts a multi-month view may show.
pub const ALLOWED_MONTH_SPANS: [u32; 4] = [1, 3, 6, 12];

/// Month/year to display. With a week, that week's Monday decides; a week
/// that cannot be resolved falls back to `today` with a warning.
pub fn display_month_year(
    year: i32,
    month: u32,
    week: Option<u32>,
    today: NaiveDate,
) -> (u32, i32) {
    let Some(week) = week else {
        return (month, year);
    };
    match first_day_of_iso_week(year, week) {
        Ok(monday) => (monday.month(), monday.year()),
        Err(e) => {
            log::warn!(
                "Error determining date from year/week: {}. Falling back to current month/year.",
                e
            );
            (today.month(), today.year())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start_year: i32,
    pub start_month: u32,
    pub months: u32,
}

impl Period {
    pub fn new(start_year: i32, start_month: u32, months: u32) -> Self {
        Self {
            start_year,
            start_month,
            months: months.max(1),
        }
    }

    /// `(month, year)` of the `offset`-th month in the span.
    fn month_at(&self, offset: u32) -> (u32, i32) {
        let idx = self.start_month as i32 - 1 + offset as i32;
        ((idx.rem_euclid(12) + 1) as u32, self.start_year + idx.div_euclid(12))
    }

    pub fn start(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.start_year, self.start_month, 1)
    }

    /// Last day of the final month.
    pub fn end(&self) -> Option<NaiveDate> {
        let (month, year) = self.month_at(self.months);
        let first_after = NaiveDate::from_ymd_opt(year, month, 1)?;
        add_days(first_after, -1).ok()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => start <= date && date <= end,
            _ => false,
        }
    }

    /// Every calendar year the span touches, in order.
    pub fn years(&self) -> Vec<i32> {
        let (_, last_year) = self.month_at(self.months.saturating_sub(1));
        (self.start_year..=last_year).collect()
    }
}

/// Events inside `period`, one per (date, description), sorted by date.
pub fn events_in_period(events: impl IntoIterator<Item = Event>, period: &Period) -> Vec<Event> {
    let mut seen = HashSet::new();
    let mut kept: Vec<Event> = events
        .into_iter()
        .filter(|e| period.contains(e.date))
        .filter(|e| {
            let (date, desc) = e.dedup_key();
            seen.insert((date, desc.to_owned()))
        })
        .collect();
    kept.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.description.cmp(&b.description)));
    kept
}

/// Load `path` once per year the period touches and keep what falls inside.
/// A year that fails to load is logged and skipped.
pub fn load_period(loader: &EventLoader, path: &Path, period: &Period) -> Vec<Event> {
    let mut all = Vec::new();
    for year in period.years() {
        match loader.load(path, year) {
            Ok(events) => all.extend(events),
            Err(e) => log::warn!("Could not load events for year {}: {}", year, e),
        }
    }
    events_in_period(all, period)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_at_wraps_years() {
        let p = Period::new(2025, 11, 3);
        assert_eq!(p.month_at(0), (11, 2025));
        assert_eq!(p.month_at(1), (12, 2025));
        assert_eq!(p.month_at(2), (1, 2026));
        assert_eq!(p.month_at(14), (1, 2027));
    }
}
