//! Per-question progress reporting for interactive callers.

use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    pub done: usize,
    pub total: usize,
}

pub type ProgressSink = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

/// Format a single progress line for display. Deterministic, unit-testable.
#[must_use]
pub fn format_progress_line(done: usize, total: usize) -> String {
    format!("Running question {}/{}...", done, total)
}

/// Progress sink that prints to stderr. Skipped for single-question packs
/// (no "1/1" noise).
pub fn stderr_progress_sink(total: usize) -> Option<ProgressSink> {
    if total <= 1 {
        return None;
    }
    Some(Arc::new(|ev: ProgressEvent| {
        eprintln!("{}", format_progress_line(ev.done, ev.total));
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_line_is_stable() {
        assert_eq!(format_progress_line(2, 7), "Running question 2/7...");
    }

    #[test]
    fn single_question_packs_get_no_sink() {
        assert!(stderr_progress_sink(1).is_none());
        assert!(stderr_progress_sink(2).is_some());
    }
}
