use rusqlite::{Connection, Result};
use std::path::PathBuf;

pub mod result;

pub fn get_db_path() -> PathBuf {
    crate::utils::data_dir().join("classfi.db")
}

pub fn init_db() -> Result<Connection> {
    let db_path = get_db_path();

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let conn = Connection::open(&db_path)?;

    run_migrations(&conn)?;

    Ok(conn)
}

pub(crate) fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS exam_results (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            subject TEXT NOT NULL,
            topic TEXT NOT NULL,
            score INTEGER NOT NULL,
            total_points INTEGER NOT NULL,
            percentage INTEGER NOT NULL,
            taken_at INTEGER NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_exam_results_subject ON exam_results(subject)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_exam_results_taken ON exam_results(taken_at)",
        [],
    )?;

    Ok(())
}
