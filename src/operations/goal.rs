use crate::db::{activity_repository, goal_repository};
use crate::error::{AdvisorError, InvalidGoalError, Result};
use crate::models::goal::{Goal, GoalRecord, NormalizedGoal};
use crate::planning::normalizer;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::info;

pub fn parse_amount(field: &'static str, value: &str) -> std::result::Result<Decimal, InvalidGoalError> {
    Decimal::from_str(value.trim()).map_err(|_| InvalidGoalError::MalformedAmount {
        field,
        value: value.to_string(),
    })
}

pub fn parse_deadline(value: &str) -> std::result::Result<NaiveDate, InvalidGoalError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| InvalidGoalError::MalformedDeadline(value.to_string()))
}

pub fn parse_priority(value: &str) -> std::result::Result<u8, InvalidGoalError> {
    value
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|p| (1..=5).contains(p))
        .ok_or_else(|| InvalidGoalError::PriorityOutOfRange(value.to_string()))
}

/// Builds a validated goal from raw user input.
pub fn create_goal(
    name: &str,
    target: &str,
    current: &str,
    deadline: &str,
    priority: &str,
) -> std::result::Result<Goal, InvalidGoalError> {
    let goal = Goal::new(
        name.trim().to_string(),
        parse_amount("target amount", target)?,
        parse_amount("current amount", current)?,
        parse_deadline(deadline)?,
        parse_priority(priority)?,
    );
    goal.validate()?;
    Ok(goal)
}

pub fn add_goal_db(conn: &Connection, goal: &Goal) -> Result<()> {
    goal.validate()?;
    goal_repository::add_goal(conn, goal)?;
    info!(goal = %goal.name, "goal added");
    activity_repository::log_activity(
        conn,
        "Added new goal",
        &format!(
            "{} (Target: {}, Deadline: {})",
            goal.name, goal.target_amount, goal.deadline
        ),
    )
}

/// Optional replacements for a stored goal's fields, as raw user input.
#[derive(Debug, Default)]
pub struct GoalChanges {
    pub name: Option<String>,
    pub target: Option<String>,
    pub current: Option<String>,
    pub deadline: Option<String>,
    pub priority: Option<String>,
}

pub fn update_goal_db(conn: &Connection, name: &str, changes: &GoalChanges) -> Result<Goal> {
    let mut goal = goal_repository::get_goal(conn, name)?
        .ok_or_else(|| AdvisorError::NotFound(format!("Goal '{}' not found", name)))?
        .goal;

    if let Some(new_name) = &changes.name {
        goal.name = new_name.trim().to_string();
    }
    if let Some(target) = &changes.target {
        goal.target_amount = parse_amount("target amount", target)?;
    }
    if let Some(current) = &changes.current {
        goal.current_amount = parse_amount("current amount", current)?;
    }
    if let Some(deadline) = &changes.deadline {
        goal.deadline = parse_deadline(deadline)?;
    }
    if let Some(priority) = &changes.priority {
        goal.priority = parse_priority(priority)?;
    }
    goal.validate()?;

    goal_repository::update_goal(conn, name, &goal)?;
    info!(goal = %goal.name, "goal updated");
    activity_repository::log_activity(
        conn,
        "Updated goal",
        &format!(
            "{} (Target: {}, Current: {}, Deadline: {})",
            goal.name, goal.target_amount, goal.current_amount, goal.deadline
        ),
    )?;
    Ok(goal)
}

pub fn remove_goal_db(conn: &Connection, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(InvalidGoalError::EmptyName.into());
    }
    goal_repository::remove_goal(conn, name.trim())?;
    info!(goal = %name.trim(), "goal removed");
    activity_repository::log_activity(conn, "Removed goal", name.trim())
}

pub fn complete_goal_db(conn: &Connection, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(InvalidGoalError::EmptyName.into());
    }
    goal_repository::mark_completed(conn, name.trim())?;
    info!(goal = %name.trim(), "goal marked complete");
    activity_repository::log_activity(conn, "Completed goal", name.trim())
}

/// Every stored goal with its current-month figures.
pub fn list_goals_db(conn: &Connection, today: NaiveDate) -> Result<Vec<(GoalRecord, NormalizedGoal)>> {
    let records = goal_repository::get_all_goals(conn)?;
    let goals: Vec<Goal> = records.iter().map(|r| r.goal.clone()).collect();
    let normalized = normalizer::normalize(&goals, today);
    Ok(records.into_iter().zip(normalized).collect())
}
