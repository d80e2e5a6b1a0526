use crate::db::{activity_repository, goal_repository};
use crate::error::Result;
use crate::operations::plan::build_plan_db;
use crate::planning::{round_cents, Plan};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Goals,
    Activity,
    Plan,
}

pub fn write_goals_csv<W: io::Write>(conn: &Connection, writer: W) -> Result<usize> {
    let goals = goal_repository::get_all_goals(conn)?;
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "name",
        "target_amount",
        "current_amount",
        "deadline",
        "priority",
        "completed",
    ])?;
    for record in &goals {
        wtr.write_record([
            record.goal.name.clone(),
            record.goal.target_amount.to_string(),
            record.goal.current_amount.to_string(),
            record.goal.deadline.to_string(),
            record.goal.priority.to_string(),
            record.completed.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(goals.len())
}

pub fn write_activity_csv<W: io::Write>(conn: &Connection, writer: W) -> Result<usize> {
    let entries = activity_repository::get_recent_activity(conn, None, 1000)?;
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["timestamp", "action", "details"])?;
    for entry in &entries {
        wtr.write_record([&entry.timestamp, &entry.action, &entry.details])?;
    }
    wtr.flush()?;
    Ok(entries.len())
}

/// One row per goal in processing order.
pub fn write_plan_csv<W: io::Write>(plan: &Plan, writer: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "goal",
        "allocated",
        "required_monthly",
        "months_left",
        "priority",
        "tag",
    ])?;
    for reason in &plan.reasons {
        wtr.write_record([
            reason.goal_name.clone(),
            format!("{:.2}", round_cents(reason.allocated_amount)),
            format!("{:.2}", round_cents(reason.required_monthly)),
            reason.months_left.to_string(),
            reason.priority.to_string(),
            reason.tag(),
        ])?;
    }
    wtr.flush()?;
    Ok(plan.reasons.len())
}

pub fn plan_to_json(plan: &Plan) -> Result<String> {
    Ok(serde_json::to_string_pretty(plan)?)
}

/// Writes the requested export to `path`. Plan exports are built for `today`.
/// Nothing is written when building the export fails.
pub fn export_to_file(
    conn: &Connection,
    kind: ExportKind,
    today: NaiveDate,
    path: &Path,
) -> Result<usize> {
    let mut buf = Vec::new();
    let rows = match kind {
        ExportKind::Goals => write_goals_csv(conn, &mut buf)?,
        ExportKind::Activity => write_activity_csv(conn, &mut buf)?,
        ExportKind::Plan => write_plan_csv(&build_plan_db(conn, today)?, &mut buf)?,
    };
    fs::write(path, buf)?;
    info!(?kind, rows, path = %path.display(), "exported");
    Ok(rows)
}
