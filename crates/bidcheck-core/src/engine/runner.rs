//! Sequential test runner.
//!
//! One QA request per question, strictly in pack order, awaiting each
//! response before the next: the scoring contract assumes result order
//! matches question order, and sequential calls keep the upstream QA service
//! out of burst territory. A failed question becomes a failing sentinel
//! result and the run continues; only a run-level problem (unresolvable
//! project/pack) aborts before the first question.

use crate::errors::RunError;
use crate::evaluate::evaluate_answer;
use crate::extract::extract_answer;
use crate::model::{Question, QuestionPack, SavedTestResult, TestResult, TestRun};
use crate::parse::parse_sources;
use crate::prompt::build_prompt;
use crate::providers::qa::QaClient;
use crate::report::progress::{ProgressEvent, ProgressSink};
use crate::scoring::{score_results, ScoreStrategy};
use crate::storage::HistoryStore;
use chrono::Utc;
use std::sync::Arc;
use tokio::time::{timeout, Duration};
use uuid::Uuid;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A completed run plus the persistence outcome. A save failure is demoted to
/// `save_error`; the computed run is always returned.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub run: TestRun,
    pub saved: Option<SavedTestResult>,
    pub save_error: Option<String>,
}

pub struct Runner {
    pub client: Arc<dyn QaClient>,
    pub history: Option<Arc<dyn HistoryStore>>,
    pub timeout: Duration,
    pub strategy: ScoreStrategy,
}

impl Runner {
    pub fn new(client: Arc<dyn QaClient>) -> Self {
        Self {
            client,
            history: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            strategy: ScoreStrategy::default(),
        }
    }

    pub fn with_history(mut self, store: Arc<dyn HistoryStore>) -> Self {
        self.history = Some(store);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_strategy(mut self, strategy: ScoreStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Run every question of `pack` against `project_id`. Results arrive in
    /// question order; per-question failures are folded into sentinel results
    /// rather than aborting the run.
    pub async fn run_pack(
        &self,
        pack: &QuestionPack,
        project_id: &str,
        project_name: &str,
        progress: Option<ProgressSink>,
    ) -> Result<RunOutcome, RunError> {
        if project_id.trim().is_empty() {
            return Err(RunError::project_unresolved(project_id));
        }
        if pack.id.trim().is_empty() {
            return Err(RunError::empty_pack(pack.id.clone()));
        }

        let total = pack.questions.len();
        let mut results: Vec<TestResult> = Vec::with_capacity(total);

        for (i, question) in pack.questions.iter().enumerate() {
            tracing::debug!(
                question_id = %question.id,
                index = i,
                total,
                "running question"
            );
            let result = match self.ask_question(project_id, question).await {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!(
                        question_id = %question.id,
                        error = %e,
                        "question failed, continuing run"
                    );
                    error_result(question, &e)
                }
            };
            results.push(result);

            if let Some(ref sink) = progress {
                sink(ProgressEvent {
                    done: i + 1,
                    total,
                });
            }
        }

        let card = score_results(&results, self.strategy);
        let run = TestRun {
            id: Uuid::new_v4().to_string(),
            pack_id: pack.id.clone(),
            project_id: project_id.to_string(),
            results,
            base_score: card.base_score,
            final_score: card.final_score,
            has_critical_fail: card.has_critical_fail,
            verdict: card.verdict,
            completed_at: Utc::now(),
        };

        let (saved, save_error) = match &self.history {
            Some(store) => match store.save(&run, pack, project_name) {
                Ok(saved) => (Some(saved), None),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to persist test run");
                    (None, Some(e.to_string()))
                }
            },
            None => (None, None),
        };

        Ok(RunOutcome {
            run,
            saved,
            save_error,
        })
    }

    async fn ask_question(
        &self,
        project_id: &str,
        question: &Question,
    ) -> anyhow::Result<TestResult> {
        let prompt = build_prompt(question);

        let fut = self.client.query(project_id, &prompt);
        let raw = timeout(self.timeout, fut)
            .await
            .map_err(|_| anyhow::anyhow!("QA query timed out after {:?}", self.timeout))??;

        let parsed = parse_sources(&raw);
        let answer = extract_answer(&parsed.clean_response, question.qtype);
        let passed = evaluate_answer(question, &answer);

        Ok(TestResult {
            question_id: question.id.clone(),
            question: question.text.clone(),
            answer,
            raw_response: parsed.clean_response,
            passed,
            sources: parsed.sources,
            critical: question.critical,
            weight: question.weight,
        })
    }
}

/// Sentinel result for a failed question. Timeouts, network errors and parse
/// failures all land here; the distinction lives in the message only.
fn error_result(question: &Question, err: &anyhow::Error) -> TestResult {
    TestResult {
        question_id: question.id.clone(),
        question: question.text.clone(),
        answer: "Error".to_string(),
        raw_response: format!("Error: {}", err),
        passed: false,
        sources: vec![],
        critical: question.critical,
        weight: question.weight,
    }
}
