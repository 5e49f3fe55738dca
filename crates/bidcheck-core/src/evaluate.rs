//! Typed pass/fail judgment of an extracted answer.

use crate::model::{Question, QuestionType};

/// Judge `answer` against the question's rule. Deterministic and pure.
///
/// A question missing its judge parameters (`expected_boolean`, or
/// `threshold`/`comparator`, or `expected_enum`) fails rather than erroring;
/// the pack builder is expected to have filled them in, but a malformed pack
/// must not abort a run.
pub fn evaluate_answer(question: &Question, answer: &str) -> bool {
    match question.qtype {
        QuestionType::Boolean => {
            let lower = answer.to_lowercase();
            let bool_answer = lower.contains("yes") || lower.contains("true");
            match question.expected_boolean {
                Some(expected) => bool_answer == expected,
                None => false,
            }
        }
        QuestionType::Number => {
            let Ok(num) = answer.trim().parse::<f64>() else {
                return false;
            };
            match (question.threshold, question.comparator) {
                (Some(threshold), Some(comparator)) => comparator.apply(num, threshold),
                _ => false,
            }
        }
        QuestionType::Enum => match &question.expected_enum {
            Some(expected) => answer.to_lowercase().contains(&expected.to_lowercase()),
            None => false,
        },
        // No objective criterion; citation presence is the signal, judged by
        // the reader, not here.
        QuestionType::Lookup => true,
    }
}
