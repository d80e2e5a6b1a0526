use crate::models::goal::Goal;
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::LazyLock;

/// Monthly savings below this are flagged as low.
pub const LOW_SAVINGS_THRESHOLD: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SuggestionKind {
    MissingEmergencyFund,
    MissingRetirement,
    LowSavings,
    PastDeadline,
    HomeLoanReminder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub message: String,
}

/// Whether a rule fires when some goal name matches, or when none does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Missing,
    Present,
}

struct GoalNameRule {
    pattern: Regex,
    trigger: Trigger,
    kind: SuggestionKind,
    message: &'static str,
}

static GOAL_NAME_RULES: LazyLock<Vec<GoalNameRule>> = LazyLock::new(|| {
    vec![
        GoalNameRule {
            pattern: Regex::new(r"(?i)emergency").expect("valid regex"),
            trigger: Trigger::Missing,
            kind: SuggestionKind::MissingEmergencyFund,
            message: "Consider adding an Emergency Fund goal to cover 3-6 months of expenses.",
        },
        GoalNameRule {
            pattern: Regex::new(r"(?i)retirement").expect("valid regex"),
            trigger: Trigger::Missing,
            kind: SuggestionKind::MissingRetirement,
            message: "Plan for the long term: add a Retirement goal if you haven't already.",
        },
        GoalNameRule {
            pattern: HOME_LOAN.clone(),
            trigger: Trigger::Present,
            kind: SuggestionKind::HomeLoanReminder,
            message: HOME_LOAN_REMINDER,
        },
    ]
});

static HOME_LOAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)home\s+loan").expect("valid regex"));

pub const HOME_LOAN_REMINDER: &str =
    "Home Loan Reminder: you have a Home Loan goal. Don't forget to review your repayment plan and deadlines!";

/// Goals whose name mentions a home loan.
pub fn home_loan_goals(goals: &[Goal]) -> Vec<&Goal> {
    goals.iter().filter(|g| HOME_LOAN.is_match(&g.name)).collect()
}

/// Rule-based hints about the goal set and cash flow. Goals named in
/// `completed` are not reported as past their deadline.
pub fn suggest(
    goals: &[Goal],
    completed: &[String],
    monthly_savings: Decimal,
    today: NaiveDate,
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    for rule in GOAL_NAME_RULES.iter() {
        let matched = goals.iter().any(|g| rule.pattern.is_match(&g.name));
        if matched == (rule.trigger == Trigger::Present) {
            suggestions.push(Suggestion {
                kind: rule.kind,
                message: rule.message.to_string(),
            });
        }
    }

    if monthly_savings < Decimal::from(LOW_SAVINGS_THRESHOLD) {
        suggestions.push(Suggestion {
            kind: SuggestionKind::LowSavings,
            message: "Your monthly savings are low. Review your expenses or increase your income to achieve your goals faster.".to_string(),
        });
    }

    for goal in goals {
        if goal.deadline < today && !completed.iter().any(|c| c == &goal.name) {
            suggestions.push(Suggestion {
                kind: SuggestionKind::PastDeadline,
                message: format!(
                    "Goal '{}' is past its deadline. Consider updating or completing it.",
                    goal.name
                ),
            });
        }
    }

    suggestions
}
