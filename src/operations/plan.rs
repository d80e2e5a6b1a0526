use crate::db::{activity_repository, goal_repository, profile_repository};
use crate::error::Result;
use crate::models::goal::validate_goals;
use crate::planning::{self, round_cents, Plan, Suggestion};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use tracing::info;

fn monthly_savings(conn: &Connection) -> Result<Decimal> {
    Ok(profile_repository::get_profile(conn)?
        .map(|p| p.monthly_savings())
        .unwrap_or(Decimal::ZERO))
}

/// Builds this month's plan over the active goals and the profile's savings.
pub fn build_plan_db(conn: &Connection, today: NaiveDate) -> Result<Plan> {
    let goals = goal_repository::get_active_goals(conn)?;
    validate_goals(&goals)?;
    Ok(planning::plan(&goals, monthly_savings(conn)?, today))
}

/// Builds the plan and adds every allocation to the stored goals. New amounts
/// and their activity entries are committed together.
pub fn apply_plan_db(conn: &Connection, today: NaiveDate) -> Result<Plan> {
    let goals = goal_repository::get_active_goals(conn)?;
    validate_goals(&goals)?;
    let plan = planning::plan(&goals, monthly_savings(conn)?, today);

    let updated = planning::apply_allocations(&goals, &plan.allocations);
    let tx = conn.unchecked_transaction()?;
    goal_repository::save_current_amounts(&tx, &updated)?;
    for reason in plan.reasons.iter().filter(|r| r.allocated_amount > Decimal::ZERO) {
        activity_repository::log_activity(
            &tx,
            "Allocated savings",
            &format!(
                "{}: {} ({})",
                reason.goal_name,
                round_cents(reason.allocated_amount),
                reason.tag()
            ),
        )?;
    }
    tx.commit()?;

    info!(
        goals = goals.len(),
        allocated = %plan.total_allocated(),
        unallocated = %plan.unallocated,
        "plan applied"
    );
    Ok(plan)
}

pub fn suggestions_db(conn: &Connection, today: NaiveDate) -> Result<Vec<Suggestion>> {
    let goals: Vec<_> = goal_repository::get_all_goals(conn)?
        .into_iter()
        .map(|r| r.goal)
        .collect();
    let completed = goal_repository::get_completed_goal_names(conn)?;
    Ok(planning::suggest(&goals, &completed, monthly_savings(conn)?, today))
}
