use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a question's extracted answer is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Boolean,
    Number,
    Enum,
    Lookup,
}

/// Numeric comparison operator for `QuestionType::Number` questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "==")]
    Eq,
}

impl Comparator {
    /// Standard f64 semantics; `Eq` is exact equality.
    pub fn apply(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparator::Ge => lhs >= rhs,
            Comparator::Le => lhs <= rhs,
            Comparator::Gt => lhs > rhs,
            Comparator::Lt => lhs < rhs,
            Comparator::Eq => lhs == rhs,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Comparator::Ge => ">=",
            Comparator::Le => "<=",
            Comparator::Gt => ">",
            Comparator::Lt => "<",
            Comparator::Eq => "==",
        }
    }
}

impl std::fmt::Display for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One typed question inside a pack. Immutable once the pack is saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    /// Catalog key, or "custom" for free-form questions.
    pub key: String,
    pub text: String,
    #[serde(rename = "type")]
    pub qtype: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparator: Option<Comparator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_boolean: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_enum: Option<String>,
    pub critical: bool,
    /// 0..=10; a zero-weight question contributes nothing to the score.
    pub weight: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackFilters {
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub markets: Vec<String>,
}

/// Named, ordered collection of questions used as one test specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPack {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub trades: Vec<String>,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub filters: PackFilters,
    pub created_at: DateTime<Utc>,
}

/// One citation (document + location) attached to an answer.
///
/// `page_num` and `sheet_number` use 0 for "absent".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub filename: String,
    pub human_readable: String,
    pub page_num: u32,
    pub sheet_number: u32,
    pub section: String,
}

/// Outcome for a single question. `critical` and `weight` are copied from the
/// question so scoring stays stable even if the pack is later edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub question_id: String,
    pub question: String,
    pub answer: String,
    pub raw_response: String,
    pub passed: bool,
    pub sources: Vec<Source>,
    pub critical: bool,
    pub weight: u32,
}

/// Three-way categorical outcome of a run, plus the degenerate empty case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Fail (critical)")]
    CriticalFail,
    Bid,
    Pass,
    #[serde(rename = "No questions")]
    NoQuestions,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::CriticalFail => "Fail (critical)",
            Verdict::Bid => "Bid",
            Verdict::Pass => "Pass",
            Verdict::NoQuestions => "No questions",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completed run of one pack against one project. Created atomically at the
/// end of a run; never updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRun {
    pub id: String,
    pub pack_id: String,
    pub project_id: String,
    pub results: Vec<TestResult>,
    pub base_score: u32,
    pub final_score: u32,
    pub has_critical_fail: bool,
    pub verdict: Verdict,
    pub completed_at: DateTime<Utc>,
}

/// A persisted run, denormalized with display names for history views.
/// Keyed by `"{pack_id}-{project_id}"`; at most one per pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTestResult {
    pub id: String,
    pub pack_id: String,
    pub pack_name: String,
    pub project_id: String,
    pub project_name: String,
    pub test_run: TestRun,
    pub created_at: DateTime<Utc>,
}

/// History key for a (pack, project) pair.
pub fn composite_key(pack_id: &str, project_id: &str) -> String {
    format!("{}-{}", pack_id, project_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparator_tokens_round_trip_through_serde() {
        for (cmp, tok) in [
            (Comparator::Ge, "\">=\""),
            (Comparator::Le, "\"<=\""),
            (Comparator::Gt, "\">\""),
            (Comparator::Lt, "\"<\""),
            (Comparator::Eq, "\"==\""),
        ] {
            assert_eq!(serde_json::to_string(&cmp).unwrap(), tok);
            let back: Comparator = serde_json::from_str(tok).unwrap();
            assert_eq!(back, cmp);
        }
    }

    #[test]
    fn verdict_display_matches_wire_strings() {
        assert_eq!(Verdict::CriticalFail.to_string(), "Fail (critical)");
        assert_eq!(
            serde_json::to_string(&Verdict::CriticalFail).unwrap(),
            "\"Fail (critical)\""
        );
        assert_eq!(Verdict::Bid.to_string(), "Bid");
        assert_eq!(Verdict::NoQuestions.to_string(), "No questions");
    }

    #[test]
    fn question_type_uses_lowercase_tags() {
        let q: QuestionType = serde_json::from_str("\"lookup\"").unwrap();
        assert_eq!(q, QuestionType::Lookup);
        assert_eq!(
            serde_json::to_string(&QuestionType::Boolean).unwrap(),
            "\"boolean\""
        );
    }
}
