use rusqlite::{Connection, Result};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::exam::ExamScore;

/// A completed exam attempt as stored locally for the performance
/// dashboard.
#[derive(Debug, Clone)]
pub struct ExamResult {
    pub id: u64,
    pub subject: String,
    pub topic: String,
    pub score: u32,
    pub total_points: u32,
    pub percentage: u32,
    pub taken_at: u64,
}

/// Per-subject aggregate shown on the performance screen.
#[derive(Debug, Clone)]
pub struct SubjectAverage {
    pub subject: String,
    pub average_percentage: f64,
    pub attempts: u64,
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

pub fn record_result(
    conn: &Connection,
    subject: &str,
    topic: &str,
    score: ExamScore,
) -> Result<u64> {
    let created_at = now();
    let taken_at = created_at;

    conn.execute(
        "INSERT INTO exam_results (subject, topic, score, total_points, percentage, taken_at, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            subject,
            topic,
            score.score,
            score.total_points,
            score.percentage,
            taken_at,
            created_at,
            created_at
        ],
    )?;

    Ok(conn.last_insert_rowid() as u64)
}

pub fn list_recent(conn: &Connection, limit: usize) -> Result<Vec<ExamResult>> {
    let mut stmt = conn.prepare(
        "SELECT id, subject, topic, score, total_points, percentage, taken_at
         FROM exam_results ORDER BY taken_at DESC, id DESC LIMIT ?",
    )?;

    let rows = stmt.query_map([limit], |row| {
        Ok(ExamResult {
            id: row.get(0)?,
            subject: row.get(1)?,
            topic: row.get(2)?,
            score: row.get(3)?,
            total_points: row.get(4)?,
            percentage: row.get(5)?,
            taken_at: row.get(6)?,
        })
    })?;

    rows.collect()
}

pub fn subject_averages(conn: &Connection) -> Result<Vec<SubjectAverage>> {
    let mut stmt = conn.prepare(
        "SELECT subject, AVG(percentage), COUNT(*)
         FROM exam_results GROUP BY subject ORDER BY subject",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(SubjectAverage {
            subject: row.get(0)?,
            average_percentage: row.get(1)?,
            attempts: row.get(2)?,
        })
    })?;

    rows.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::run_migrations;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn score(score: u32, total: u32, percentage: u32) -> ExamScore {
        ExamScore {
            score,
            total_points: total,
            percentage,
        }
    }

    #[test]
    fn test_record_and_list() {
        let conn = test_conn();
        let id = record_result(&conn, "Biology", "Cells", score(60, 100, 60)).unwrap();
        assert_eq!(id, 1);

        let results = list_recent(&conn, 10).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].subject, "Biology");
        assert_eq!(results[0].topic, "Cells");
        assert_eq!(results[0].score, 60);
        assert_eq!(results[0].percentage, 60);
    }

    #[test]
    fn test_list_recent_newest_first_and_limited() {
        let conn = test_conn();
        record_result(&conn, "Biology", "Cells", score(40, 100, 40)).unwrap();
        record_result(&conn, "Physics", "Motion", score(80, 100, 80)).unwrap();
        record_result(&conn, "Chemistry", "Bonds", score(70, 100, 70)).unwrap();

        let results = list_recent(&conn, 2).unwrap();
        assert_eq!(results.len(), 2);
        // Same taken_at second is possible; id breaks the tie newest-first
        assert_eq!(results[0].subject, "Chemistry");
        assert_eq!(results[1].subject, "Physics");
    }

    #[test]
    fn test_subject_averages_aggregate() {
        let conn = test_conn();
        record_result(&conn, "Biology", "Cells", score(40, 100, 40)).unwrap();
        record_result(&conn, "Biology", "Genetics", score(80, 100, 80)).unwrap();
        record_result(&conn, "Physics", "Motion", score(90, 100, 90)).unwrap();

        let averages = subject_averages(&conn).unwrap();
        assert_eq!(averages.len(), 2);

        let biology = averages.iter().find(|a| a.subject == "Biology").unwrap();
        assert_eq!(biology.attempts, 2);
        assert!((biology.average_percentage - 60.0).abs() < f64::EPSILON);

        let physics = averages.iter().find(|a| a.subject == "Physics").unwrap();
        assert_eq!(physics.attempts, 1);
        assert!((physics.average_percentage - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_history() {
        let conn = test_conn();
        assert!(list_recent(&conn, 10).unwrap().is_empty());
        assert!(subject_averages(&conn).unwrap().is_empty());
    }
}
