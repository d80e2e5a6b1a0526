use crate::db::{activity_repository, goal_repository};
use crate::error::{AdvisorError, Result};
use crate::operations::profile::get_profile_db;
use crate::planning::suggestions::home_loan_goals;
use rusqlite::Connection;
use serde::Serialize;
use tracing::info;

pub const HOME_LOAN_SUBJECT: &str = "Home Loan Goal Reminder";
pub const HOME_LOAN_BODY: &str =
    "This is a reminder to review your Home Loan goal and repayment plan in your goal advisor.";

/// An email that was rendered but not delivered. There is no mail transport;
/// callers display it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reminder {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub goals: Vec<String>,
}

/// Renders the home loan reminder for the profile's email address. Returns
/// `None` when no active goal mentions a home loan.
pub fn send_home_loan_reminder(conn: &Connection) -> Result<Option<Reminder>> {
    let goals = goal_repository::get_active_goals(conn)?;
    let matching: Vec<String> = home_loan_goals(&goals)
        .into_iter()
        .map(|g| g.name.clone())
        .collect();
    if matching.is_empty() {
        return Ok(None);
    }

    let Some(to) = get_profile_db(conn)?.email else {
        return Err(AdvisorError::InvalidProfile(
            "No email on file. Set one with: advisor profile set --email ADDRESS".to_string(),
        ));
    };

    let reminder = Reminder {
        to,
        subject: HOME_LOAN_SUBJECT.to_string(),
        body: HOME_LOAN_BODY.to_string(),
        goals: matching,
    };
    info!(to = %reminder.to, subject = %reminder.subject, "simulated email sent");
    activity_repository::log_activity(
        conn,
        "Sent reminder",
        &format!("{} to {} ({})", reminder.subject, reminder.to, reminder.goals.join(", ")),
    )?;
    Ok(Some(reminder))
}
