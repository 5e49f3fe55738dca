//! Durable test-history store.
//!
//! One row per `"{pack_id}-{project_id}"` composite key; saving a new run for
//! an existing pair replaces the row and re-promotes it in recency order.
//! The run payload is one JSON column so every `TestRun`/`TestResult` field
//! round-trips verbatim; the denormalized display fields are real columns for
//! list views.

use crate::model::{composite_key, QuestionPack, SavedTestResult, TestRun};
use anyhow::Context;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct Store {
    pub conn: Arc<Mutex<Connection>>,
}

impl Store {
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let conn = Connection::open(path).context("open history db")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// In-memory store for tests.
    pub fn memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory history db")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn init_schema(&self) -> anyhow::Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS test_history (
                id TEXT PRIMARY KEY,
                pack_id TEXT NOT NULL,
                pack_name TEXT NOT NULL,
                project_id TEXT NOT NULL,
                project_name TEXT NOT NULL,
                run_json TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_history_pack ON test_history(pack_id);
            CREATE INDEX IF NOT EXISTS idx_history_project ON test_history(project_id);",
        )
        .context("init history schema")?;
        Ok(())
    }

    /// Upsert the run under its composite key. At most one row per
    /// (pack, project) pair survives; the replaced row's timestamp is
    /// discarded so the pair moves to the front of recency order.
    pub fn save(
        &self,
        run: &TestRun,
        pack: &QuestionPack,
        project_name: &str,
    ) -> anyhow::Result<SavedTestResult> {
        let id = composite_key(&pack.id, &run.project_id);
        // Second precision so the timestamp survives serialization exactly.
        let created_at = Utc::now().trunc_subsecs(0);
        let run_json = serde_json::to_string(run).context("serialize test run")?;

        let saved = SavedTestResult {
            id: id.clone(),
            pack_id: pack.id.clone(),
            pack_name: pack.name.clone(),
            project_id: run.project_id.clone(),
            project_name: project_name.to_string(),
            test_run: run.clone(),
            created_at,
        };

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO test_history
             (id, pack_id, pack_name, project_id, project_name, run_json, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                saved.id,
                saved.pack_id,
                saved.pack_name,
                saved.project_id,
                saved.project_name,
                run_json,
                created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            ],
        )
        .context("save test run")?;

        Ok(saved)
    }

    pub fn delete(&self, id: &str) -> anyhow::Result<bool> {
        let conn = self.conn.lock().unwrap();
        let n = conn
            .execute("DELETE FROM test_history WHERE id = ?1", params![id])
            .context("delete saved result")?;
        Ok(n > 0)
    }

    pub fn get(&self, pack_id: &str, project_id: &str) -> anyhow::Result<Option<SavedTestResult>> {
        let id = composite_key(pack_id, project_id);
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, pack_id, pack_name, project_id, project_name, run_json, created_at
             FROM test_history WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map(params![id], row_to_saved)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// All saved results, newest-saved first.
    pub fn list_all(&self) -> anyhow::Result<Vec<SavedTestResult>> {
        self.query_list(
            "SELECT id, pack_id, pack_name, project_id, project_name, run_json, created_at
             FROM test_history ORDER BY created_at DESC, id",
            params![],
        )
    }

    pub fn list_for_pack(&self, pack_id: &str) -> anyhow::Result<Vec<SavedTestResult>> {
        self.query_list(
            "SELECT id, pack_id, pack_name, project_id, project_name, run_json, created_at
             FROM test_history WHERE pack_id = ?1 ORDER BY created_at DESC, id",
            params![pack_id],
        )
    }

    pub fn list_for_project(&self, project_id: &str) -> anyhow::Result<Vec<SavedTestResult>> {
        self.query_list(
            "SELECT id, pack_id, pack_name, project_id, project_name, run_json, created_at
             FROM test_history WHERE project_id = ?1 ORDER BY created_at DESC, id",
            params![project_id],
        )
    }

    pub fn clear_all(&self) -> anyhow::Result<usize> {
        let conn = self.conn.lock().unwrap();
        let n = conn
            .execute("DELETE FROM test_history", [])
            .context("clear history")?;
        Ok(n)
    }

    fn query_list(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> anyhow::Result<Vec<SavedTestResult>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, row_to_saved)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

fn row_to_saved(row: &rusqlite::Row<'_>) -> rusqlite::Result<SavedTestResult> {
    let run_json: String = row.get(5)?;
    let test_run: TestRun = serde_json::from_str(&run_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let created_at_raw: String = row.get(6)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_raw)
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?
        .with_timezone(&Utc);

    Ok(SavedTestResult {
        id: row.get(0)?,
        pack_id: row.get(1)?,
        pack_name: row.get(2)?,
        project_id: row.get(3)?,
        project_name: row.get(4)?,
        test_run,
        created_at,
    })
}
