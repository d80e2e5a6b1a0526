use crate::error::{AdvisorError, InvalidGoalError, Result};
use crate::models::goal::{Goal, GoalRecord};
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::str::FromStr;

const GOAL_COLUMNS: &str =
    "id, name, target_amount, current_amount, deadline, priority, completed";

fn conversion_error<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<GoalRecord> {
    let target_str: String = row.get(2)?;
    let current_str: String = row.get(3)?;
    let deadline_str: String = row.get(4)?;
    let completed: i64 = row.get(6)?;

    Ok(GoalRecord {
        id: row.get(0)?,
        goal: Goal {
            name: row.get(1)?,
            target_amount: Decimal::from_str(&target_str).map_err(|e| conversion_error(2, e))?,
            current_amount: Decimal::from_str(&current_str).map_err(|e| conversion_error(3, e))?,
            deadline: NaiveDate::parse_from_str(&deadline_str, "%Y-%m-%d")
                .map_err(|e| conversion_error(4, e))?,
            priority: row.get(5)?,
        },
        completed: completed != 0,
    })
}

pub fn add_goal(conn: &Connection, goal: &Goal) -> Result<i64> {
    if get_goal(conn, &goal.name)?.is_some() {
        return Err(InvalidGoalError::DuplicateName {
            name: goal.name.clone(),
        }
        .into());
    }
    conn.execute(
        "INSERT INTO goals (name, target_amount, current_amount, deadline, priority) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            &goal.name,
            goal.target_amount.to_string(),
            goal.current_amount.to_string(),
            goal.deadline.to_string(),
            goal.priority,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_goal(conn: &Connection, name: &str) -> Result<Option<GoalRecord>> {
    let sql = format!("SELECT {} FROM goals WHERE LOWER(name) = LOWER(?1)", GOAL_COLUMNS);
    let record = conn.query_row(&sql, [name], row_to_record).optional()?;
    Ok(record)
}

pub fn get_all_goals(conn: &Connection) -> Result<Vec<GoalRecord>> {
    let sql = format!("SELECT {} FROM goals ORDER BY deadline ASC, id ASC", GOAL_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let iter = stmt.query_map([], row_to_record)?;

    let mut goals = Vec::new();
    for goal in iter {
        goals.push(goal?);
    }
    Ok(goals)
}

/// Goals that have not been marked complete, in insertion order.
pub fn get_active_goals(conn: &Connection) -> Result<Vec<Goal>> {
    let sql = format!(
        "SELECT {} FROM goals WHERE completed = 0 ORDER BY id ASC",
        GOAL_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let iter = stmt.query_map([], row_to_record)?;

    let mut goals = Vec::new();
    for record in iter {
        goals.push(record?.goal);
    }
    Ok(goals)
}

pub fn get_completed_goal_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM goals WHERE completed = 1 ORDER BY id ASC")?;
    let iter = stmt.query_map([], |row| row.get(0))?;

    let mut names = Vec::new();
    for name in iter {
        names.push(name?);
    }
    Ok(names)
}

/// Replaces every field of the goal stored under `name`. The goal may be
/// renamed as long as the new name is not taken.
pub fn update_goal(conn: &Connection, name: &str, goal: &Goal) -> Result<()> {
    if !goal.name.eq_ignore_ascii_case(name) && get_goal(conn, &goal.name)?.is_some() {
        return Err(InvalidGoalError::DuplicateName {
            name: goal.name.clone(),
        }
        .into());
    }
    let rows = conn.execute(
        "UPDATE goals SET name = ?1, target_amount = ?2, current_amount = ?3, deadline = ?4, priority = ?5
         WHERE LOWER(name) = LOWER(?6)",
        params![
            &goal.name,
            goal.target_amount.to_string(),
            goal.current_amount.to_string(),
            goal.deadline.to_string(),
            goal.priority,
            name,
        ],
    )?;

    if rows == 0 {
        return Err(AdvisorError::NotFound(format!("Goal '{}' not found", name)));
    }
    Ok(())
}

/// Writes new current amounts for the given goals. Callers wrap this in a
/// transaction so a missing goal leaves every amount untouched.
pub fn save_current_amounts(conn: &Connection, goals: &[Goal]) -> Result<()> {
    for goal in goals {
        let rows = conn.execute(
            "UPDATE goals SET current_amount = ?1 WHERE LOWER(name) = LOWER(?2)",
            params![goal.current_amount.to_string(), &goal.name],
        )?;
        if rows == 0 {
            return Err(AdvisorError::NotFound(format!("Goal '{}' not found", goal.name)));
        }
    }
    Ok(())
}

pub fn mark_completed(conn: &Connection, name: &str) -> Result<()> {
    let rows = conn.execute(
        "UPDATE goals SET completed = 1 WHERE LOWER(name) = LOWER(?1)",
        [name],
    )?;

    if rows == 0 {
        return Err(AdvisorError::NotFound(format!("Goal '{}' not found", name)));
    }
    Ok(())
}

pub fn remove_goal(conn: &Connection, name: &str) -> Result<()> {
    let rows = conn.execute("DELETE FROM goals WHERE LOWER(name) = LOWER(?1)", [name])?;

    if rows == 0 {
        return Err(AdvisorError::NotFound(format!("Goal '{}' not found", name)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_test_connection;

    fn create_test_goal(name: &str, priority: u8) -> Goal {
        Goal::new(
            name.to_string(),
            Decimal::new(600000, 2),
            Decimal::new(200000, 2),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            priority,
        )
    }

    #[test]
    fn test_add_goal_success() {
        let conn = establish_test_connection().unwrap();
        let result = add_goal(&conn, &create_test_goal("Emergency Fund", 5));
        assert!(result.is_ok());

        let stored = get_goal(&conn, "emergency fund").unwrap().unwrap();
        assert_eq!(stored.goal, create_test_goal("Emergency Fund", 5));
        assert!(!stored.completed);
    }

    #[test]
    fn test_add_goal_duplicate_name() {
        let conn = establish_test_connection().unwrap();
        add_goal(&conn, &create_test_goal("Vacation", 3)).unwrap();

        let result = add_goal(&conn, &create_test_goal("VACATION", 2));
        assert!(matches!(
            result,
            Err(AdvisorError::InvalidGoal(InvalidGoalError::DuplicateName { .. }))
        ));
    }

    #[test]
    fn test_get_goal_missing() {
        let conn = establish_test_connection().unwrap();
        assert!(get_goal(&conn, "Nope").unwrap().is_none());
    }

    #[test]
    fn test_get_all_goals_empty() {
        let conn = establish_test_connection().unwrap();
        assert!(get_all_goals(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_active_goals_exclude_completed() {
        let conn = establish_test_connection().unwrap();
        add_goal(&conn, &create_test_goal("A", 3)).unwrap();
        add_goal(&conn, &create_test_goal("B", 4)).unwrap();
        add_goal(&conn, &create_test_goal("C", 1)).unwrap();
        mark_completed(&conn, "b").unwrap();

        let active: Vec<String> = get_active_goals(&conn)
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(active, vec!["A", "C"]);
        assert_eq!(get_completed_goal_names(&conn).unwrap(), vec!["B"]);
        assert_eq!(get_all_goals(&conn).unwrap().len(), 3);
    }

    #[test]
    fn test_update_goal_rename() {
        let conn = establish_test_connection().unwrap();
        add_goal(&conn, &create_test_goal("Trip", 3)).unwrap();

        let mut updated = create_test_goal("Japan Trip", 4);
        updated.current_amount = Decimal::new(250000, 2);
        update_goal(&conn, "Trip", &updated).unwrap();

        assert!(get_goal(&conn, "Trip").unwrap().is_none());
        let stored = get_goal(&conn, "Japan Trip").unwrap().unwrap();
        assert_eq!(stored.goal.priority, 4);
        assert_eq!(stored.goal.current_amount, Decimal::from(2500));
    }

    #[test]
    fn test_update_goal_rename_collision() {
        let conn = establish_test_connection().unwrap();
        add_goal(&conn, &create_test_goal("Trip", 3)).unwrap();
        add_goal(&conn, &create_test_goal("Car", 3)).unwrap();

        let result = update_goal(&conn, "Trip", &create_test_goal("car", 3));
        assert!(matches!(result, Err(AdvisorError::InvalidGoal(_))));
    }

    #[test]
    fn test_update_goal_not_found() {
        let conn = establish_test_connection().unwrap();
        let result = update_goal(&conn, "Ghost", &create_test_goal("Ghost", 3));
        assert!(matches!(result, Err(AdvisorError::NotFound(_))));
    }

    #[test]
    fn test_save_current_amounts() {
        let conn = establish_test_connection().unwrap();
        add_goal(&conn, &create_test_goal("A", 3)).unwrap();

        let mut goal = create_test_goal("A", 3);
        goal.current_amount = Decimal::new(250050, 2);
        save_current_amounts(&conn, &[goal]).unwrap();

        let stored = get_goal(&conn, "A").unwrap().unwrap();
        assert_eq!(stored.goal.current_amount, Decimal::new(250050, 2));
    }

    #[test]
    fn test_save_current_amounts_rolls_back_on_missing_goal() {
        let conn = establish_test_connection().unwrap();
        add_goal(&conn, &create_test_goal("A", 3)).unwrap();

        let mut a = create_test_goal("A", 3);
        a.current_amount = Decimal::from(5000);
        let ghost = create_test_goal("Ghost", 3);

        {
            let tx = conn.unchecked_transaction().unwrap();
            assert!(save_current_amounts(&tx, &[a, ghost]).is_err());
        }
        let stored = get_goal(&conn, "A").unwrap().unwrap();
        assert_eq!(stored.goal.current_amount, Decimal::from(2000));
    }

    #[test]
    fn test_remove_goal_success() {
        let conn = establish_test_connection().unwrap();
        add_goal(&conn, &create_test_goal("A", 3)).unwrap();

        remove_goal(&conn, "A").unwrap();
        assert!(get_all_goals(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_remove_goal_not_found() {
        let conn = establish_test_connection().unwrap();
        let result = remove_goal(&conn, "A");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }
}
