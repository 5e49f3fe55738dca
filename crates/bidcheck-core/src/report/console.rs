//! Plain-text rendering of a completed run. Pure string building so the CLI
//! output stays unit-testable.

use crate::model::{Source, TestRun};

/// One-line location label for a source, e.g. `Civil Plans p.12`.
pub fn source_label(source: &Source) -> String {
    let mut label = source.human_readable.clone();
    if source.page_num > 0 {
        label.push_str(&format!(" p.{}", source.page_num));
    }
    if source.sheet_number > 0 {
        label.push_str(&format!(" sheet {}", source.sheet_number));
    }
    if !source.section.is_empty() {
        label.push_str(&format!(" §{}", source.section));
    }
    label
}

/// Full console report: verdict header, scores, then one block per question.
pub fn render_run(run: &TestRun) -> String {
    let mut out = String::new();
    out.push_str(&format!("Verdict: {}\n", run.verdict));
    out.push_str(&format!(
        "Score: {} (base {}){}\n",
        run.final_score,
        run.base_score,
        if run.has_critical_fail {
            " - critical question failed"
        } else {
            ""
        }
    ));
    out.push_str(&format!(
        "Questions: {} passed / {}\n",
        run.results.iter().filter(|r| r.passed).count(),
        run.results.len()
    ));

    for (i, r) in run.results.iter().enumerate() {
        let mark = if r.passed { "PASS" } else { "FAIL" };
        let critical = if r.critical { " [critical]" } else { "" };
        out.push_str(&format!(
            "\n{:>3}. [{}]{} {}\n     answer: {}\n",
            i + 1,
            mark,
            critical,
            r.question,
            r.answer
        ));
        for source in &r.sources {
            out.push_str(&format!("     source: {}\n", source_label(source)));
        }
    }

    out
}
