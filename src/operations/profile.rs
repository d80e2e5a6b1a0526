use crate::db::{activity_repository, profile_repository};
use crate::error::{AdvisorError, Result};
use crate::models::profile::{Profile, RiskProfile};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::info;

/// Raw profile fields; `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct ProfileChanges {
    pub income: Option<String>,
    pub expenses: Option<String>,
    pub risk_profile: Option<String>,
    pub email: Option<String>,
}

fn parse_money(field: &str, value: &str) -> Result<Decimal> {
    let amount = Decimal::from_str(value.trim()).map_err(|_| {
        AdvisorError::InvalidProfile(format!(
            "Invalid {} '{}'. Must be a valid number",
            field, value
        ))
    })?;
    if amount < Decimal::ZERO {
        return Err(AdvisorError::InvalidProfile(format!("{} cannot be negative", field)));
    }
    Ok(amount)
}

/// The stored profile, or an all-zero default when none was saved yet.
pub fn get_profile_db(conn: &Connection) -> Result<Profile> {
    Ok(profile_repository::get_profile(conn)?.unwrap_or_default())
}

pub fn update_profile_db(conn: &Connection, changes: &ProfileChanges) -> Result<Profile> {
    let mut profile = get_profile_db(conn)?;

    if let Some(income) = &changes.income {
        profile.income = parse_money("income", income)?;
    }
    if let Some(expenses) = &changes.expenses {
        profile.expenses = parse_money("expenses", expenses)?;
    }
    if let Some(risk) = &changes.risk_profile {
        profile.risk_profile = RiskProfile::from_str(risk)?;
    }
    if let Some(email) = &changes.email {
        let email = email.trim();
        if !email.is_empty() && !email.contains('@') {
            return Err(AdvisorError::InvalidProfile(format!(
                "Invalid email '{}'",
                email
            )));
        }
        profile.email = (!email.is_empty()).then(|| email.to_string());
    }

    profile_repository::save_profile(conn, &profile)?;
    info!(savings = %profile.monthly_savings(), "profile updated");
    activity_repository::log_activity(
        conn,
        "Updated profile",
        &format!(
            "Income: {}, Expenses: {}, Risk: {}, Email: {}",
            profile.income,
            profile.expenses,
            profile.risk_profile,
            profile.email.as_deref().unwrap_or("-")
        ),
    )?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_test_connection;

    #[test]
    fn test_get_profile_default() {
        let conn = establish_test_connection().unwrap();
        let profile = get_profile_db(&conn).unwrap();
        assert_eq!(profile.monthly_savings(), Decimal::ZERO);
        assert_eq!(profile.risk_profile, RiskProfile::Medium);
    }

    #[test]
    fn test_update_profile_partial() {
        let conn = establish_test_connection().unwrap();
        let changes = ProfileChanges {
            income: Some("5000".to_string()),
            expenses: Some("3000".to_string()),
            ..ProfileChanges::default()
        };
        update_profile_db(&conn, &changes).unwrap();

        let changes = ProfileChanges {
            risk_profile: Some("high".to_string()),
            ..ProfileChanges::default()
        };
        let profile = update_profile_db(&conn, &changes).unwrap();

        assert_eq!(profile.income, Decimal::from(5000));
        assert_eq!(profile.risk_profile, RiskProfile::High);
        assert_eq!(get_profile_db(&conn).unwrap(), profile);
    }

    #[test]
    fn test_update_profile_rejects_negative_income() {
        let conn = establish_test_connection().unwrap();
        let changes = ProfileChanges {
            income: Some("-1".to_string()),
            ..ProfileChanges::default()
        };
        let err = update_profile_db(&conn, &changes).unwrap_err();
        assert!(err.to_string().contains("cannot be negative"));
    }

    #[test]
    fn test_update_profile_rejects_bad_email() {
        let conn = establish_test_connection().unwrap();
        let changes = ProfileChanges {
            email: Some("not-an-email".to_string()),
            ..ProfileChanges::default()
        };
        assert!(update_profile_db(&conn, &changes).is_err());
    }
}
