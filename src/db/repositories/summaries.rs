use anyhow::{Context, Result};
use rusqlite::{params, Row};

use crate::db::{
    helpers::{parse_datetime, to_u32},
    models::SessionSummary,
    Database,
};

fn row_to_summary(row: &Row) -> Result<SessionSummary> {
    let recorded_at: String = row.get("recorded_at")?;
    let reps: i64 = row.get("reps")?;

    Ok(SessionSummary {
        id: row.get("id")?,
        exercise: row.get("exercise")?,
        duration_secs: row.get("duration_secs")?,
        reps: to_u32(reps, "reps")?,
        recorded_at: parse_datetime(&recorded_at, "recorded_at")?,
    })
}

impl Database {
    /// Append one finished-session summary. The history is append-only;
    /// existing rows are never touched.
    pub fn insert_summary(&self, summary: &SessionSummary) -> Result<()> {
        let record = summary.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO session_summaries (id, exercise, duration_secs, reps, recorded_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.id,
                    record.exercise,
                    record.duration_secs,
                    i64::from(record.reps),
                    record.recorded_at.to_rfc3339(),
                ],
            )
            .with_context(|| "failed to insert session summary")?;
            Ok(())
        })
    }

    /// Full scan of the history, oldest first.
    pub fn list_summaries(&self) -> Result<Vec<SessionSummary>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, exercise, duration_secs, reps, recorded_at
                 FROM session_summaries
                 ORDER BY recorded_at ASC",
            )?;

            let mut rows = stmt.query([])?;
            let mut summaries = Vec::new();
            while let Some(row) = rows.next()? {
                summaries.push(row_to_summary(row)?);
            }

            Ok(summaries)
        })
    }
}
