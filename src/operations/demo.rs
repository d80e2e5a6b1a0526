use super::goal::{add_goal_db, create_goal};
use super::profile::{update_profile_db, ProfileChanges};
use crate::error::Result;
use rusqlite::Connection;
use tracing::info;

const DEMO_GOALS: &[(&str, &str, &str, &str, &str)] = &[
    ("Emergency Fund", "6000.0", "2000.0", "2026-01-01", "5"),
    ("Vacation", "3000.0", "500.0", "2025-12-01", "3"),
    ("House Down Payment", "20000.0", "5000.0", "2027-06-01", "4"),
    ("Retirement", "100000.0", "10000.0", "2045-01-01", "2"),
];

/// Seeds the demo profile (5000 income, 3000 expenses, medium risk) and four
/// sample goals.
pub fn seed_demo_data(conn: &Connection) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    update_profile_db(
        &tx,
        &ProfileChanges {
            income: Some("5000.0".to_string()),
            expenses: Some("3000.0".to_string()),
            risk_profile: Some("Medium".to_string()),
            email: None,
        },
    )?;
    for (name, target, current, deadline, priority) in DEMO_GOALS {
        add_goal_db(&tx, &create_goal(name, target, current, deadline, priority)?)?;
    }
    tx.commit()?;
    info!(goals = DEMO_GOALS.len(), "demo data seeded");
    Ok(DEMO_GOALS.len())
}
