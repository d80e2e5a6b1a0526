use super::goal::{add_goal_db, create_goal};
use crate::error::{AdvisorError, InvalidGoalError, Result};
use crate::models::goal::{validate_goals, Goal};
use rusqlite::Connection;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Imports goals from a header-less CSV of
/// `name,target,current,YYYY-MM-DD,priority` rows. Nothing is written unless
/// every row parses.
pub fn import_goals_to_db(conn: &Connection, path: &Path) -> Result<usize> {
    let goals = import_csv(path)?;
    validate_goals(&goals)?;

    let tx = conn.unchecked_transaction()?;
    for goal in &goals {
        add_goal_db(&tx, goal)?;
    }
    tx.commit()?;

    info!(count = goals.len(), path = %path.display(), "goals imported");
    Ok(goals.len())
}

fn import_csv(path: &Path) -> Result<Vec<Goal>> {
    let file = File::open(path)?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut goals = Vec::new();

    for (line_index, result) in reader.records().enumerate() {
        let line = line_index + 1;
        let record = result.map_err(|e| AdvisorError::Import {
            line,
            source: Box::new(e.into()),
        })?;

        if record.len() != 5 {
            return Err(AdvisorError::Import {
                line,
                source: Box::new(InvalidGoalError::WrongColumnCount(record.len()).into()),
            });
        }

        let goal = create_goal(&record[0], &record[1], &record[2], &record[3], &record[4])
            .map_err(|e| AdvisorError::Import {
                line,
                source: Box::new(e.into()),
            })?;

        goals.push(goal);
    }

    Ok(goals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_test_connection;
    use crate::db::goal_repository;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_csv(contents: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().expect("Failed to create temp file");
        write!(tmp, "{}", contents).expect("Failed to write test CSV");
        tmp
    }

    #[test]
    fn test_import_goals_success() {
        let conn = establish_test_connection().unwrap();
        let csv_data = "\
Emergency Fund,6000,2000,2026-01-01,5
Vacation, 3000 ,500,2025-12-01,3
";

        let tmp = write_temp_csv(csv_data);
        let result = import_goals_to_db(&conn, tmp.path());

        assert_eq!(result.unwrap(), 2);
        assert_eq!(goal_repository::get_all_goals(&conn).unwrap().len(), 2);
    }

    #[test]
    fn test_import_goals_invalid_data() {
        let conn = establish_test_connection().unwrap();
        let csv_data = "\
Emergency Fund,6000,2000,2026-01-01,5
Vacation,3000,500,bad-date,3
";

        let tmp = write_temp_csv(csv_data);
        let error = import_goals_to_db(&conn, tmp.path()).unwrap_err().to_string();

        assert!(error.contains("Line 2"));
        assert!(error.contains("Invalid deadline"));
        assert!(goal_repository::get_all_goals(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_import_goals_wrong_column_count() {
        let conn = establish_test_connection().unwrap();
        let tmp = write_temp_csv("Vacation,3000,500\n");

        let error = import_goals_to_db(&conn, tmp.path()).unwrap_err().to_string();
        assert!(error.contains("Line 1"));
        assert!(error.contains("expected 5, got 3"));
    }

    #[test]
    fn test_import_goals_duplicate_in_file() {
        let conn = establish_test_connection().unwrap();
        let csv_data = "\
Vacation,3000,500,2025-12-01,3
vacation,100,0,2026-12-01,1
";
        let tmp = write_temp_csv(csv_data);
        let result = import_goals_to_db(&conn, tmp.path());

        assert!(matches!(
            result,
            Err(AdvisorError::InvalidGoal(InvalidGoalError::DuplicateName { .. }))
        ));
        assert!(goal_repository::get_all_goals(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_import_goals_rolls_back_on_existing_name() {
        let conn = establish_test_connection().unwrap();
        let tmp = write_temp_csv("Vacation,3000,500,2025-12-01,3\n");
        import_goals_to_db(&conn, tmp.path()).unwrap();

        let tmp = write_temp_csv("Car,9000,0,2027-01-01,2\nVacation,1,0,2025-12-01,3\n");
        assert!(import_goals_to_db(&conn, tmp.path()).is_err());
        assert_eq!(goal_repository::get_all_goals(&conn).unwrap().len(), 1);
    }

    #[test]
    fn test_import_nonexistent_file() {
        let conn = establish_test_connection().unwrap();
        let result = import_goals_to_db(&conn, Path::new("nonexistent.csv"));

        assert!(matches!(result, Err(AdvisorError::Io(_))));
    }
}
