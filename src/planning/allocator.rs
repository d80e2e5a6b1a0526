use crate::models::goal::NormalizedGoal;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

pub const HIGH_PRIORITY_THRESHOLD: u8 = 4;
pub const DEADLINE_APPROACHING_MONTHS: u32 = 3;

/// Why a goal received its allocation. Flags are independent; any number of
/// them can be set at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ReasonFlags {
    pub high_priority: bool,
    pub deadline_approaching: bool,
    pub on_track: bool,
    pub underfunded: bool,
    pub goal_complete: bool,
}

impl ReasonFlags {
    pub fn evaluate(goal: &NormalizedGoal, allocated: Decimal) -> Self {
        let required = goal.required_monthly;
        Self {
            high_priority: goal.priority() >= HIGH_PRIORITY_THRESHOLD,
            deadline_approaching: goal.months_left <= DEADLINE_APPROACHING_MONTHS,
            on_track: required > Decimal::ZERO && allocated >= required,
            underfunded: required > Decimal::ZERO && allocated < required,
            goal_complete: required == Decimal::ZERO,
        }
    }

    /// Machine-readable tag, e.g. `HIGH_PRIORITY_UNDERFUNDED`, or `STANDARD`
    /// when no flag is set.
    pub fn tag(&self) -> String {
        let labels = [
            (self.high_priority, "HIGH_PRIORITY"),
            (self.deadline_approaching, "DEADLINE_APPROACHING"),
            (self.on_track, "ON_TRACK"),
            (self.underfunded, "UNDERFUNDED"),
            (self.goal_complete, "GOAL_COMPLETE"),
        ];
        let set: Vec<&str> = labels
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, label)| *label)
            .collect();
        if set.is_empty() {
            "STANDARD".to_string()
        } else {
            set.join("_")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reason {
    pub goal_name: String,
    pub flags: ReasonFlags,
    pub allocated_amount: Decimal,
    pub required_monthly: Decimal,
    pub months_left: u32,
    pub priority: u8,
}

impl Reason {
    pub fn tag(&self) -> String {
        self.flags.tag()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Allocation {
    pub allocations: HashMap<String, Decimal>,
    /// One entry per goal, in processing order.
    pub reasons: Vec<Reason>,
}

impl Allocation {
    pub fn total_allocated(&self) -> Decimal {
        self.allocations
            .values()
            .fold(Decimal::ZERO, |acc, v| acc + *v)
    }

    /// Savings left over after every goal got its required amount.
    pub fn unallocated(&self, available_savings: Decimal) -> Decimal {
        (available_savings - self.total_allocated()).max(Decimal::ZERO)
    }
}

/// Processing order: priority descending, then months left ascending.
/// The sort is stable, so remaining ties keep input order.
pub fn processing_order(goals: &[NormalizedGoal]) -> Vec<&NormalizedGoal> {
    let mut ordered: Vec<&NormalizedGoal> = goals.iter().collect();
    ordered.sort_by(|a, b| {
        b.priority()
            .cmp(&a.priority())
            .then(a.months_left.cmp(&b.months_left))
    });
    ordered
}

/// Splits `available_savings` across goals in processing order, giving each
/// goal up to its required monthly amount until savings run out.
pub fn allocate(goals: &[NormalizedGoal], available_savings: Decimal) -> Allocation {
    let mut remaining = available_savings;
    let mut allocation = Allocation::default();

    for goal in processing_order(goals) {
        let allocated = if remaining <= Decimal::ZERO {
            Decimal::ZERO
        } else {
            remaining.min(goal.required_monthly.max(Decimal::ZERO))
        };
        remaining -= allocated;

        let flags = ReasonFlags::evaluate(goal, allocated);
        debug!(
            goal = %goal.name(),
            allocated = %allocated,
            remaining = %remaining,
            tag = %flags.tag(),
            "allocated"
        );

        allocation
            .allocations
            .insert(goal.name().to_string(), allocated);
        allocation.reasons.push(Reason {
            goal_name: goal.name().to_string(),
            flags,
            allocated_amount: allocated,
            required_monthly: goal.required_monthly,
            months_left: goal.months_left,
            priority: goal.priority(),
        });
    }

    allocation
}
