//! bidcheck-core: pack-based document QA scoring engine.
//!
//! A question pack is run against a project's document set via a
//! document-grounded QA service: one query per question, citations parsed out
//! of the free-form answers, typed pass/fail judgment, weighted verdict, and
//! replace-on-rerun history.

pub mod engine;
pub mod errors;
pub mod evaluate;
pub mod extract;
pub mod model;
pub mod parse;
pub mod prompt;
pub mod providers;
pub mod report;
pub mod scoring;
pub mod storage;

pub use engine::{RunOutcome, Runner};
pub use errors::{RunError, RunErrorKind};
pub use scoring::{score_results, Scorecard, ScoreStrategy};
