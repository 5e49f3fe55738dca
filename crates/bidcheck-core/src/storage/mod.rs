pub mod store;

pub use store::Store;

use crate::model::{QuestionPack, SavedTestResult, TestRun};

/// Repository seam for test history. The engine depends only on this trait;
/// the caller owns the concrete backing (SQLite on disk, SQLite in memory,
/// or anything else that honors the composite-key upsert contract).
pub trait HistoryStore: Send + Sync {
    /// Upsert under `"{pack_id}-{project_id}"`; replaces any prior entry for
    /// the pair and promotes it to the front of recency order.
    fn save(
        &self,
        run: &TestRun,
        pack: &QuestionPack,
        project_name: &str,
    ) -> anyhow::Result<SavedTestResult>;

    fn delete(&self, id: &str) -> anyhow::Result<bool>;

    fn get(&self, pack_id: &str, project_id: &str) -> anyhow::Result<Option<SavedTestResult>>;

    /// All saved results, newest-saved first.
    fn list_all(&self) -> anyhow::Result<Vec<SavedTestResult>>;
}

impl HistoryStore for Store {
    fn save(
        &self,
        run: &TestRun,
        pack: &QuestionPack,
        project_name: &str,
    ) -> anyhow::Result<SavedTestResult> {
        Store::save(self, run, pack, project_name)
    }

    fn delete(&self, id: &str) -> anyhow::Result<bool> {
        Store::delete(self, id)
    }

    fn get(&self, pack_id: &str, project_id: &str) -> anyhow::Result<Option<SavedTestResult>> {
        Store::get(self, pack_id, project_id)
    }

    fn list_all(&self) -> anyhow::Result<Vec<SavedTestResult>> {
        Store::list_all(self)
    }
}
