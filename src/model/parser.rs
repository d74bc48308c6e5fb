// File: ./src/model/parser.rs
//! Date-rule grammar.
//!
//! A rule is the part of an events-file line before the first `;`. Five
//! surface forms are recognised and tried in a fixed order; the first one
//! that matches decides the [`DateRule`] variant:
//!
//! | form          | example      | meaning                                   |
//! |---------------|--------------|-------------------------------------------|
//! | Easter offset | `E+1`        | days relative to Easter Sunday            |
//! | Nth weekday   | `5/1#1`      | 1st Monday of May (1=Mon .. 7=Sun)        |
//! | Month/day     | `12/25`      | annual; `?2026` pins a year               |
//! |               | `03/17?0+1`  | +1 day when it falls on a Sunday (0=Sun)  |
//! | US date       | `07/04/1990` | absolute date, anniversary candidate      |
//! | Day-first     | `04-07-1990` | absolute date, anniversary candidate      |
use crate::dates::{weekday_from_iso_number, weekday_from_sunday_index};
use crate::error::{RuleError, RuleResult};
use chrono::Weekday;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::str::FromStr;

static RE_EASTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^E([+-]?)(\d*)$").expect("valid easter regex"));
static RE_NTH_WEEKDAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/([1-7])#([1-5])$").expect("valid nth weekday regex"));
static RE_MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})/(\d{1,2})(\?(?:(\d{4})|([0-6])([+-])(\d+)|))?$")
        .expect("valid month/day regex")
});
static RE_US_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("valid US date regex"));
static RE_DAY_FIRST_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})-(\d{1,2})-(\d{4})$").expect("valid day-first regex"));

/// A conditional shift: move the date by `offset_days` only when it falls on `weekday`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekendShift {
    pub weekday: Weekday,
    pub offset_days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRule {
    EasterOffset {
        days: i64,
    },
    NthWeekday {
        month: u32,
        weekday: Weekday,
        nth: u32,
    },
    MonthDay {
        month: u32,
        day: u32,
        year: Option<i32>,
        weekend_shift: Option<WeekendShift>,
    },
    AbsoluteDate {
        year: i32,
        month: u32,
        day: u32,
    },
}

impl DateRule {
    /// Range checks shared by the parser and the resolver.
    pub fn validate(&self) -> RuleResult<()> {
        match *self {
            DateRule::EasterOffset { .. } => Ok(()),
            DateRule::NthWeekday { month, nth, .. } => {
                if !(1..=12).contains(&month) {
                    return Err(RuleError::parse(format!(
                        "invalid month in MM/DOW#N: {}",
                        month
                    )));
                }
                if !(1..=5).contains(&nth) {
                    return Err(RuleError::parse(format!("invalid nth in MM/DOW#N: {}", nth)));
                }
                Ok(())
            }
            DateRule::MonthDay { month, day, .. } => check_month_day(month, day, "MM/DD"),
            DateRule::AbsoluteDate { month, day, .. } => check_month_day(month, day, "absolute date"),
        }
    }

    /// Absolute dates pin an anniversary; every other kind keeps its rule text
    /// as a recurrence description.
    pub fn is_absolute(&self) -> bool {
        matches!(self, DateRule::AbsoluteDate { .. })
    }
}

impl FromStr for DateRule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        classify(s)
    }
}

type Matcher = fn(&Captures) -> RuleResult<DateRule>;

/// Priority order matters: `12/25` must be tried as month/day before the
/// absolute forms, and `5/1#1` before month/day.
static MATCHERS: Lazy<[(&'static Regex, Matcher); 5]> = Lazy::new(|| {
    [
        (&*RE_EASTER, easter_rule as Matcher),
        (&*RE_NTH_WEEKDAY, nth_weekday_rule),
        (&*RE_MONTH_DAY, month_day_rule),
        (&*RE_US_DATE, us_date_rule),
        (&*RE_DAY_FIRST_DATE, day_first_rule),
    ]
});

/// Classify a raw rule string into a [`DateRule`].
pub fn classify(text: &str) -> RuleResult<DateRule> {
    let text = text.trim();
    for (re, build) in MATCHERS.iter() {
        if let Some(caps) = re.captures(text) {
            let rule = build(&caps)?;
            rule.validate()?;
            return Ok(rule);
        }
    }
    Err(RuleError::parse(format!("unknown date format: '{}'", text)))
}

fn check_month_day(month: u32, day: u32, form: &str) -> RuleResult<()> {
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(RuleError::parse(format!(
            "invalid month/day in {} rule: {}/{}",
            form, month, day
        )));
    }
    Ok(())
}

fn group<'a>(caps: &'a Captures, idx: usize) -> &'a str {
    caps.get(idx).map(|m| m.as_str()).unwrap_or("")
}

fn number<T: FromStr>(caps: &Captures, idx: usize) -> RuleResult<T> {
    let raw = group(caps, idx);
    raw.parse::<T>()
        .map_err(|_| RuleError::parse(format!("number out of range: '{}'", raw)))
}

fn easter_rule(caps: &Captures) -> RuleResult<DateRule> {
    let mut days = if group(caps, 2).is_empty() {
        0
    } else {
        number::<i64>(caps, 2)?
    };
    if group(caps, 1) == "-" {
        days = -days;
    }
    Ok(DateRule::EasterOffset { days })
}

fn nth_weekday_rule(caps: &Captures) -> RuleResult<DateRule> {
    let month = number::<u32>(caps, 1)?;
    let dow = number::<u32>(caps, 2)?;
    let weekday = weekday_from_iso_number(dow)
        .ok_or_else(|| RuleError::parse(format!("invalid weekday in MM/DOW#N: {}", dow)))?;
    Ok(DateRule::NthWeekday {
        month,
        weekday,
        nth: number(caps, 3)?,
    })
}

fn month_day_rule(caps: &Captures) -> RuleResult<DateRule> {
    let year = if group(caps, 4).is_empty() {
        None
    } else {
        Some(number::<i32>(caps, 4)?)
    };

    let weekend_shift = if group(caps, 5).is_empty() {
        None
    } else {
        let dow = number::<u32>(caps, 5)?;
        let weekday = weekday_from_sunday_index(dow)
            .ok_or_else(|| RuleError::parse(format!("invalid weekday in shift rule: {}", dow)))?;
        let mut offset_days = number::<i64>(caps, 7)?;
        if group(caps, 6) == "-" {
            offset_days = -offset_days;
        }
        Some(WeekendShift {
            weekday,
            offset_days,
        })
    };

    Ok(DateRule::MonthDay {
        month: number(caps, 1)?,
        day: number(caps, 2)?,
        year,
        weekend_shift,
    })
}

fn us_date_rule(caps: &Captures) -> RuleResult<DateRule> {
    Ok(DateRule::AbsoluteDate {
        month: number(caps, 1)?,
        day: number(caps, 2)?,
        year: number(caps, 3)?,
    })
}

fn day_first_rule(caps: &Captures) -> RuleResult<DateRule> {
    Ok(DateRule::AbsoluteDate {
        day: number(caps, 1)?,
        month: number(caps, 2)?,
        year: number(caps, 3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matchers_are_exclusive() {
        let samples = [
            "E", "E+1", "E-46", "5/1#1", "11/4#4", "12/25", "12/25?", "12/25?2026", "12/25?6+2",
            "07/04/1990", "04-07-1990",
        ];
        for s in samples {
            let hits = MATCHERS.iter().filter(|(re, _)| re.is_match(s)).count();
            assert_eq!(hits, 1, "'{}' matched {} forms", s, hits);
        }
    }

    #[test]
    fn test_huge_offset_is_a_parse_error() {
        let err = classify("E+99999999999999999999999").unwrap_err();
        assert!(matches!(err, RuleError::Parse(_)));
    }
}
