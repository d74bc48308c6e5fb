// File: ./src/model/resolver.rs
use crate::dates::{add_days, easter_sunday, normalized_date, nth_weekday_of_month};
use crate::error::RuleResult;
use crate::model::parser::DateRule;
use chrono::{Datelike, NaiveDate};

/// A rule resolved against one context year, before any loader reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOccurrence {
    pub date: NaiveDate,
    pub is_annual: bool,
    pub is_anniversary_candidate: bool,
    pub anniversary_base: Option<NaiveDate>,
    pub specific_year_in_rule: bool,
}

impl ResolvedOccurrence {
    fn annual(date: NaiveDate) -> Self {
        Self {
            date,
            is_annual: true,
            is_anniversary_candidate: false,
            anniversary_base: None,
            specific_year_in_rule: false,
        }
    }
}

/// Resolve `rule` to a concrete date for `context_year`.
pub fn resolve(rule: &DateRule, context_year: i32) -> RuleResult<ResolvedOccurrence> {
    rule.validate()?;

    match *rule {
        DateRule::EasterOffset { days } => {
            let date = add_days(easter_sunday(context_year)?, days)?;
            Ok(ResolvedOccurrence::annual(date))
        }
        DateRule::NthWeekday {
            month,
            weekday,
            nth,
        } => {
            let date = nth_weekday_of_month(context_year, month, nth, weekday)?;
            Ok(ResolvedOccurrence::annual(date))
        }
        DateRule::MonthDay {
            month,
            day,
            year,
            weekend_shift,
        } => {
            let base = normalized_date(year.unwrap_or(context_year), month, day)?;
            let date = match weekend_shift {
                Some(shift) if base.weekday() == shift.weekday => {
                    add_days(base, shift.offset_days)?
                }
                _ => base,
            };
            Ok(ResolvedOccurrence {
                date,
                is_annual: year.is_none(),
                is_anniversary_candidate: false,
                anniversary_base: None,
                specific_year_in_rule: year.is_some(),
            })
        }
        DateRule::AbsoluteDate { year, month, day } => {
            let date = normalized_date(year, month, day)?;
            Ok(ResolvedOccurrence {
                date,
                is_annual: false,
                is_anniversary_candidate: true,
                anniversary_base: Some(date),
                specific_year_in_rule: true,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleError;
    use chrono::Weekday;

    #[test]
    fn test_hand_built_rule_is_validated() {
        let rule = DateRule::MonthDay {
            month: 13,
            day: 1,
            year: None,
            weekend_shift: None,
        };
        assert!(matches!(resolve(&rule, 2025), Err(RuleError::Parse(_))));

        let rule = DateRule::NthWeekday {
            month: 5,
            weekday: Weekday::Mon,
            nth: 0,
        };
        assert!(resolve(&rule, 2025).is_err());
    }

    #[test]
    fn test_easter_offset_out_of_range() {
        let rule = DateRule::EasterOffset { days: i64::MAX };
        assert!(matches!(resolve(&rule, 2025), Err(RuleError::Resolve(_))));
    }
}
