//! Prompt construction for document-grounded QA queries.
//!
//! Pure functions of the question; the trailer pins the citation contract
//! that `parse::parse_sources` relies on.

use crate::model::{Question, QuestionType, Source};

/// Fixed instruction appended to every prompt. Asks for page/section
/// references, at most two sources in prose, and a fenced `metadata` block
/// per source in the key/value format the parser expects.
const CITATION_TRAILER: &str = "Please provide specific document references with page numbers and section numbers where applicable.\n\nPlease provide a clear, natural response fit for a chatbot widget to the question. Only provide explanation and sources for up to a maximum of 2 of the BEST, MOST RELEVANT sources. Do not say things like Introduction to Site Plans or provide multiple sections. One concise response. After your response, include source metadata in the following format for each source used:\n\n```metadata\nfilename: [filename] human_readable: [human readable] page_num: [page num] sheet_number: [sheet_number] section: [section reference if applicable]\n```\n\nEnsure each source has at least filename and human_readable fields but try to provide as much source information as possible.";

/// Build the full QA prompt for one question.
pub fn build_prompt(question: &Question) -> String {
    let mut prompt = question.text.clone();

    // Number questions embed the threshold so the model restates the check.
    if question.qtype == QuestionType::Number {
        if let (Some(threshold), Some(comparator)) = (question.threshold, question.comparator) {
            prompt.push_str(&format!(
                " (return only the number). Does it meet {} {}?",
                comparator, threshold
            ));
        }
    }

    if question.qtype == QuestionType::Boolean {
        prompt.push_str(
            " Please answer in the format: \"Yes/No - [reason]\" where the reason explains why.",
        );
    }

    if question.qtype == QuestionType::Lookup {
        prompt.push_str(
            " Please provide your answer followed by the reasoning: \"[answer] - [reason why]\"",
        );
    }

    format!("{}\n\n{}", prompt, CITATION_TRAILER)
}

/// Render one source as a fenced `metadata` block in the trailer's format.
/// Optional numeric fields are omitted when absent (0).
pub fn format_metadata_block(source: &Source) -> String {
    let mut line = format!(
        "filename: {} human_readable: {}",
        source.filename, source.human_readable
    );
    if source.page_num > 0 {
        line.push_str(&format!(" page_num: {}", source.page_num));
    }
    if source.sheet_number > 0 {
        line.push_str(&format!(" sheet_number: {}", source.sheet_number));
    }
    if !source.section.is_empty() {
        line.push_str(&format!(" section: {}", source.section));
    }
    format!("```metadata\n{}\n```", line)
}
