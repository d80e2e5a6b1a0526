use crate::error::Result;
use crate::models::profile::{Profile, RiskProfile};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::str::FromStr;

pub fn save_profile(conn: &Connection, profile: &Profile) -> Result<()> {
    conn.execute(
        "INSERT INTO profile (id, income, expenses, risk_profile, email) VALUES (1, ?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET income = excluded.income, expenses = excluded.expenses,
             risk_profile = excluded.risk_profile, email = excluded.email",
        params![
            profile.income.to_string(),
            profile.expenses.to_string(),
            profile.risk_profile.as_str(),
            &profile.email,
        ],
    )?;
    Ok(())
}

/// The stored profile, if one has been saved.
pub fn get_profile(conn: &Connection) -> Result<Option<Profile>> {
    let profile = conn
        .query_row(
            "SELECT income, expenses, risk_profile, email FROM profile WHERE id = 1",
            [],
            |row| {
                let income_str: String = row.get(0)?;
                let expenses_str: String = row.get(1)?;
                let risk_str: String = row.get(2)?;
                Ok(Profile {
                    income: Decimal::from_str(&income_str).map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e))
                    })?,
                    expenses: Decimal::from_str(&expenses_str).map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e))
                    })?,
                    risk_profile: RiskProfile::from_str(&risk_str).map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e))
                    })?,
                    email: row.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(profile)
}
