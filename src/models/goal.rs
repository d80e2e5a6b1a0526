use crate::error::InvalidGoalError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;

pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Goal {
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: NaiveDate,
    /// 1 (lowest) to 5 (highest)
    pub priority: u8,
}

impl Goal {
    pub fn new(
        name: String,
        target_amount: Decimal,
        current_amount: Decimal,
        deadline: NaiveDate,
        priority: u8,
    ) -> Self {
        Self {
            name,
            target_amount,
            current_amount,
            deadline,
            priority,
        }
    }

    pub fn validate(&self) -> Result<(), InvalidGoalError> {
        if self.name.trim().is_empty() {
            return Err(InvalidGoalError::EmptyName);
        }
        if self.name.len() > 100 {
            return Err(InvalidGoalError::NameTooLong(self.name.clone()));
        }
        if self.target_amount < Decimal::ZERO {
            return Err(InvalidGoalError::NegativeAmount {
                name: self.name.clone(),
                field: "Target amount",
            });
        }
        if self.current_amount < Decimal::ZERO {
            return Err(InvalidGoalError::NegativeAmount {
                name: self.name.clone(),
                field: "Current amount",
            });
        }
        if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&self.priority) {
            return Err(InvalidGoalError::PriorityOutOfRange(self.priority.to_string()));
        }
        Ok(())
    }
}

/// Validates every goal and checks that names are unique (case-insensitive).
pub fn validate_goals(goals: &[Goal]) -> Result<(), InvalidGoalError> {
    let mut seen = HashSet::new();
    for goal in goals {
        goal.validate()?;
        if !seen.insert(goal.name.to_lowercase()) {
            return Err(InvalidGoalError::DuplicateName {
                name: goal.name.clone(),
            });
        }
    }
    Ok(())
}

/// A stored goal. Completed goals are kept for history but left out of
/// planning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalRecord {
    pub id: i64,
    #[serde(flatten)]
    pub goal: Goal,
    pub completed: bool,
}

/// A goal plus the figures the planner derives for the current month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedGoal {
    #[serde(flatten)]
    pub goal: Goal,
    pub months_left: u32,
    pub required_monthly: Decimal,
}

impl NormalizedGoal {
    pub fn name(&self) -> &str {
        &self.goal.name
    }

    pub fn priority(&self) -> u8 {
        self.goal.priority
    }
}
