//! Monthly savings planner.
//!
//! Pure functions over a goal snapshot: [`normalize`] derives months left and
//! required contributions, [`allocate`] splits savings across goals, and
//! [`explain`] renders a sentence per goal. Nothing here reads the clock or
//! touches storage; callers pass `today` and persist results themselves.

pub mod allocator;
pub mod explain;
pub mod normalizer;
pub mod suggestions;

pub use allocator::{allocate, Allocation, Reason, ReasonFlags};
pub use explain::{explain, round_cents, select_template, Template};
pub use normalizer::{months_between, normalize};
pub use suggestions::{suggest, Suggestion, SuggestionKind};

use crate::models::goal::{Goal, NormalizedGoal};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub today: NaiveDate,
    pub available_savings: Decimal,
    pub goals: Vec<NormalizedGoal>,
    pub allocations: HashMap<String, Decimal>,
    pub reasons: Vec<Reason>,
    pub explanations: HashMap<String, String>,
    pub unallocated: Decimal,
}

impl Plan {
    pub fn allocated_to(&self, goal_name: &str) -> Decimal {
        self.allocations
            .get(goal_name)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn total_allocated(&self) -> Decimal {
        self.allocations
            .values()
            .fold(Decimal::ZERO, |acc, v| acc + *v)
    }
}

/// Runs the full cycle: normalize, allocate, explain.
pub fn plan(goals: &[Goal], available_savings: Decimal, today: NaiveDate) -> Plan {
    if goals.is_empty() {
        warn!("planning with no goals; all savings stay unallocated");
    }
    if available_savings < Decimal::ZERO {
        warn!(savings = %available_savings, "monthly savings are negative; nothing to allocate");
    }

    let normalized = normalize(goals, today);
    let allocation = allocate(&normalized, available_savings);
    let unallocated = allocation.unallocated(available_savings);
    let Allocation {
        allocations,
        reasons,
    } = allocation;
    let explanations = explain(&reasons);

    Plan {
        today,
        available_savings,
        goals: normalized,
        allocations,
        reasons,
        explanations,
        unallocated,
    }
}

/// Adds each goal's allocation to its current amount. Goals without an entry
/// are returned unchanged.
pub fn apply_allocations(goals: &[Goal], allocations: &HashMap<String, Decimal>) -> Vec<Goal> {
    goals
        .iter()
        .map(|goal| {
            let mut updated = goal.clone();
            if let Some(amount) = allocations.get(&goal.name) {
                updated.current_amount += *amount;
            }
            updated
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn goal(name: &str, target: &str, current: &str, deadline: &str, priority: u8) -> Goal {
        Goal::new(name.to_string(), d(target), d(current), date(deadline), priority)
    }

    fn required(plan: &Plan, name: &str) -> Decimal {
        plan.goals
            .iter()
            .find(|g| g.name() == name)
            .unwrap()
            .required_monthly
    }

    fn demo_goals() -> Vec<Goal> {
        vec![
            goal("Emergency Fund", "6000", "2000", "2026-01-01", 5),
            goal("Vacation", "3000", "500", "2025-11-01", 3),
        ]
    }

    #[test]
    fn test_plan_concrete_scenario() {
        let plan = plan(&demo_goals(), d("500"), date("2025-09-24"));

        assert_eq!(required(&plan, "Emergency Fund"), d("1000"));
        assert_eq!(required(&plan, "Vacation"), d("1250"));
        assert_eq!(plan.allocated_to("Emergency Fund"), d("500"));
        assert_eq!(plan.allocated_to("Vacation"), Decimal::ZERO);
        assert_eq!(plan.unallocated, Decimal::ZERO);

        let vacation = plan.reasons.iter().find(|r| r.goal_name == "Vacation").unwrap();
        assert!(vacation.tag().contains("UNDERFUNDED"));
        assert_eq!(
            plan.explanations["Emergency Fund"],
            "Allocating to Emergency Fund as per your plan. Allocating $500.00 (4 months left)."
        );
    }

    #[test]
    fn test_plan_leaves_leftover_unallocated() {
        let goals = vec![goal("Vacation", "1200", "0", "2026-09-01", 3)];
        let plan = plan(&goals, d("500"), date("2025-09-24"));

        assert_eq!(plan.allocated_to("Vacation"), d("100"));
        assert_eq!(plan.unallocated, d("400"));
        assert_eq!(
            plan.explanations["Vacation"],
            "This goal is on track with the current allocation. Allocating $100.00 (12 months left)."
        );
    }

    #[test]
    fn test_plan_explanation_rounds_to_cents() {
        let goals = vec![goal("House", "15000", "0", "2027-06-01", 4)];
        let plan = plan(&goals, d("5000"), date("2025-09-24"));

        assert!(required(&plan, "House") > d("714.285"));
        assert!(required(&plan, "House") < d("714.286"));
        assert_eq!(
            plan.explanations["House"],
            "Allocating to House as per your plan. Allocating $714.29 (21 months left)."
        );
    }

    #[test]
    fn test_plan_all_complete() {
        let goals = vec![
            goal("Car", "1000", "1000", "2026-09-01", 2),
            goal("Phone", "500", "900", "2026-02-01", 1),
        ];
        let plan = plan(&goals, d("800"), date("2025-09-24"));

        for reason in &plan.reasons {
            assert!(reason.flags.goal_complete);
            assert_eq!(reason.allocated_amount, Decimal::ZERO);
        }
        assert_eq!(plan.unallocated, d("800"));
    }

    #[test]
    fn test_plan_no_goals() {
        let plan = plan(&[], d("800"), date("2025-09-24"));
        assert!(plan.allocations.is_empty());
        assert!(plan.explanations.is_empty());
        assert_eq!(plan.unallocated, d("800"));
    }

    #[test]
    fn test_apply_allocations() {
        let goals = demo_goals();
        let mut allocations = HashMap::new();
        allocations.insert("Emergency Fund".to_string(), d("500"));

        let updated = apply_allocations(&goals, &allocations);
        assert_eq!(updated[0].current_amount, d("2500"));
        assert_eq!(updated[1].current_amount, d("500"));
        assert_eq!(goals[0].current_amount, d("2000"));
    }
}
