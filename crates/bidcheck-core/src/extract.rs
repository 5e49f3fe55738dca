//! Answer extraction: pull the judgeable fragment out of a cleaned response.

use crate::model::QuestionType;
use lazy_static::lazy_static;
use regex::Regex;

const MAX_SENTENCE_LEN: usize = 200;

lazy_static! {
    static ref FIRST_INTEGER: Regex = Regex::new(r"\d+").unwrap();
}

/// Extract the answer string to judge from `clean` (metadata already
/// stripped) according to the question type.
pub fn extract_answer(clean: &str, qtype: QuestionType) -> String {
    match qtype {
        // First integer-looking substring; "0" when the model gave none.
        QuestionType::Number => FIRST_INTEGER
            .find(clean)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "0".to_string()),
        // The evaluator interprets yes/no; keep the "Yes/No - reason" text.
        QuestionType::Boolean => clean.trim().to_string(),
        QuestionType::Enum | QuestionType::Lookup => first_sentence(clean),
    }
}

fn first_sentence(clean: &str) -> String {
    let sentence = clean
        .split(['.', '!', '?'])
        .next()
        .map(str::trim)
        .unwrap_or("");

    if !sentence.is_empty() {
        truncate_chars(sentence, MAX_SENTENCE_LEN, true)
    } else {
        truncate_chars(clean, MAX_SENTENCE_LEN, false)
    }
}

fn truncate_chars(s: &str, limit: usize, ellipsis: bool) -> String {
    if s.chars().count() <= limit {
        return s.to_string();
    }
    let cut: String = s.chars().take(limit).collect();
    if ellipsis {
        format!("{}...", cut)
    } else {
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_takes_the_first_integer() {
        assert_eq!(
            extract_answer("The building is 52000 sq ft over 3 floors.", QuestionType::Number),
            "52000"
        );
    }

    #[test]
    fn number_defaults_to_zero_when_no_digits_appear() {
        assert_eq!(
            extract_answer("No square footage is listed.", QuestionType::Number),
            "0"
        );
    }

    #[test]
    fn boolean_keeps_the_full_trimmed_text() {
        assert_eq!(
            extract_answer("  Yes - the pump room is on sheet M-301.  ", QuestionType::Boolean),
            "Yes - the pump room is on sheet M-301."
        );
    }

    #[test]
    fn enum_takes_the_first_sentence() {
        assert_eq!(
            extract_answer(
                "The roof system is TPO membrane. Details are on A-501.",
                QuestionType::Enum
            ),
            "The roof system is TPO membrane"
        );
    }

    #[test]
    fn long_first_sentences_are_truncated_with_an_ellipsis() {
        let long = "word ".repeat(60); // no sentence boundary inside
        let got = extract_answer(&format!("{}.", long.trim()), QuestionType::Lookup);
        assert_eq!(got.chars().count(), 203);
        assert!(got.ends_with("..."));
    }

    #[test]
    fn text_without_sentence_boundary_yields_the_leading_chars() {
        let long = "x".repeat(300);
        let got = extract_answer(&long, QuestionType::Lookup);
        assert_eq!(got.chars().count(), 200);
        assert!(!got.ends_with("..."));
    }
}
