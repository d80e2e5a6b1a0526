use super::allocator::{Reason, ReasonFlags};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;

/// Rounds to whole cents, half away from zero. `{:.2}` on a `Decimal`
/// truncates, so amounts are rounded before they are shown.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    HighPriority,
    DeadlineApproaching,
    HighPriorityDeadlineApproaching,
    OnTrack,
    Underfunded,
    GoalComplete,
    Standard,
}

impl Template {
    fn text(self) -> &'static str {
        match self {
            Template::HighPriority => "I'm prioritizing {goal} because it's high-priority.",
            Template::DeadlineApproaching => "The deadline for {goal} is approaching soon.",
            Template::HighPriorityDeadlineApproaching => {
                "I'm prioritizing {goal} because it's high-priority and the deadline is near."
            }
            Template::OnTrack => "This goal is on track with the current allocation.",
            Template::Underfunded => "This goal is underfunded this month due to limited savings.",
            Template::GoalComplete => "{goal} is already fully funded.",
            Template::Standard => "Allocating to {goal} as per your plan.",
        }
    }

    pub fn render(self, goal: &str) -> String {
        self.text().replace("{goal}", goal)
    }
}

const fn flags(
    high_priority: bool,
    deadline_approaching: bool,
    on_track: bool,
    underfunded: bool,
    goal_complete: bool,
) -> ReasonFlags {
    ReasonFlags {
        high_priority,
        deadline_approaching,
        on_track,
        underfunded,
        goal_complete,
    }
}

/// Exact flag combinations with bespoke phrasing. Anything not listed here
/// renders with `Template::Standard`.
pub const TEMPLATE_RULES: &[(ReasonFlags, Template)] = &[
    (flags(true, false, false, false, false), Template::HighPriority),
    (flags(false, true, false, false, false), Template::DeadlineApproaching),
    (flags(true, true, false, false, false), Template::HighPriorityDeadlineApproaching),
    (flags(false, false, true, false, false), Template::OnTrack),
    (flags(false, false, false, true, false), Template::Underfunded),
    (flags(false, false, false, false, true), Template::GoalComplete),
    (flags(false, false, false, false, false), Template::Standard),
];

pub fn select_template(reason_flags: &ReasonFlags) -> Template {
    TEMPLATE_RULES
        .iter()
        .find(|(rule, _)| rule == reason_flags)
        .map(|(_, template)| *template)
        .unwrap_or(Template::Standard)
}

pub fn explain_reason(reason: &Reason) -> String {
    let mut explanation = select_template(&reason.flags).render(&reason.goal_name);
    if reason.allocated_amount > Decimal::ZERO {
        explanation.push_str(&format!(
            " Allocating ${:.2} ({} months left).",
            round_cents(reason.allocated_amount),
            reason.months_left
        ));
    } else if reason.flags.goal_complete {
        explanation.push_str(" No allocation needed.");
    }
    explanation
}

/// Plain-language explanation per goal name.
pub fn explain(reasons: &[Reason]) -> HashMap<String, String> {
    reasons
        .iter()
        .map(|reason| (reason.goal_name.clone(), explain_reason(reason)))
        .collect()
}
