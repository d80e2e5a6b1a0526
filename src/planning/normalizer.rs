use crate::models::goal::{Goal, NormalizedGoal};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

/// Whole calendar months from `today` to `deadline`, never less than 1.
///
/// Only year and month are compared; the day of the month is ignored, so a
/// deadline on the 1st of next month counts as a full month away.
pub fn months_between(today: NaiveDate, deadline: NaiveDate) -> u32 {
    let months = (deadline.year() as i64 * 12 + deadline.month() as i64)
        - (today.year() as i64 * 12 + today.month() as i64);
    months.max(1) as u32
}

pub fn required_monthly(goal: &Goal, months_left: u32) -> Decimal {
    let shortfall = goal.target_amount - goal.current_amount;
    (shortfall / Decimal::from(months_left)).max(Decimal::ZERO)
}

/// Derives months left and the required monthly contribution for each goal,
/// keeping input order.
pub fn normalize(goals: &[Goal], today: NaiveDate) -> Vec<NormalizedGoal> {
    goals
        .iter()
        .map(|goal| {
            let months_left = months_between(today, goal.deadline);
            let required_monthly = required_monthly(goal, months_left);
            debug!(
                goal = %goal.name,
                months_left,
                required_monthly = %required_monthly,
                "normalized goal"
            );
            NormalizedGoal {
                goal: goal.clone(),
                months_left,
                required_monthly,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn goal(target: &str, current: &str, deadline: &str) -> Goal {
        Goal::new(
            "Goal".to_string(),
            Decimal::from_str(target).unwrap(),
            Decimal::from_str(current).unwrap(),
            date(deadline),
            3,
        )
    }

    #[test]
    fn test_months_between_ignores_day_of_month() {
        assert_eq!(months_between(date("2025-09-24"), date("2026-01-01")), 4);
        assert_eq!(months_between(date("2025-09-01"), date("2026-01-31")), 4);
        assert_eq!(months_between(date("2025-09-24"), date("2025-12-01")), 3);
    }

    #[test]
    fn test_months_between_across_years() {
        assert_eq!(months_between(date("2025-09-24"), date("2045-01-01")), 232);
    }

    #[test]
    fn test_months_between_due_today_clamps_to_one() {
        let today = date("2025-09-24");
        assert_eq!(months_between(today, today), 1);
    }

    #[test]
    fn test_months_between_overdue_clamps_to_one() {
        assert_eq!(months_between(date("2025-09-24"), date("2024-03-10")), 1);
    }

    #[test]
    fn test_normalize_required_monthly() {
        let today = date("2025-09-24");
        let goals = vec![
            goal("6000", "2000", "2026-01-01"),
            goal("3000", "500", "2025-11-15"),
        ];
        let normalized = normalize(&goals, today);

        assert_eq!(normalized[0].months_left, 4);
        assert_eq!(normalized[0].required_monthly, Decimal::from(1000));
        assert_eq!(normalized[1].months_left, 2);
        assert_eq!(normalized[1].required_monthly, Decimal::from(1250));
    }

    #[test]
    fn test_normalize_overfunded_clamps_to_zero() {
        let normalized = normalize(&[goal("1000", "1500", "2026-06-01")], date("2025-09-24"));
        assert_eq!(normalized[0].required_monthly, Decimal::ZERO);
    }

    #[test]
    fn test_normalize_deadline_today_no_division_by_zero() {
        let today = date("2025-09-24");
        let normalized = normalize(&[goal("900", "0", "2025-09-24")], today);
        assert_eq!(normalized[0].months_left, 1);
        assert_eq!(normalized[0].required_monthly, Decimal::from(900));
    }

    #[test]
    fn test_normalize_empty() {
        assert!(normalize(&[], date("2025-09-24")).is_empty());
    }
}
