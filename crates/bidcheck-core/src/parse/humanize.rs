//! Filename-humanization heuristic.
//!
//! Construction document sets name files like `Arch_MEP_Plans_Rev.2024-03-11.pdf`
//! or `Project_Specs_22_Plumbing.pdf`. When the QA service omits a
//! `human_readable` label we derive one from the filename via an ordered rule
//! table: naming rules recognize domain conventions (most specific first, the
//! first match wins), cleanup rules then strip revision dates and collapse
//! underscores/whitespace. Keeping the rules as data makes order testable and
//! lets new conventions land without touching the parser.

use lazy_static::lazy_static;
use regex::Regex;

struct NamingRule {
    pattern: Regex,
    replacement: &'static str,
}

impl NamingRule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        NamingRule {
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        }
    }
}

lazy_static! {
    static ref EXTENSION: Regex = Regex::new(r"(?i)\.(pdf|dwg|doc|docx)$").unwrap();
    /// Ordered, first match wins. A matched rule replaces its match and ends
    /// the naming phase so replacements cannot re-match later rules.
    static ref NAMING_RULES: Vec<NamingRule> = vec![
        // Architectural/MEP plan sets, underscore or space separated
        NamingRule::new(r"(?i)Arch[_\s]*MEP[_\s]*Plans", "Architectural & MEP Plans"),
        NamingRule::new(r"(?i)MEP[_\s]*Plans", "MEP Plans"),
        NamingRule::new(r"(?i)Arch[_\s]*Plans", "Architectural Plans"),
        NamingRule::new(r"(?i)Civil[_\s]*Plans", "Civil Plans"),
        NamingRule::new(r"(?i)Structural[_\s]*Plans", "Structural Plans"),
        // CSI-division spec books in their common layouts
        NamingRule::new(r"(?i).*Specs?.*03.*Concrete", "Division 03 - Concrete Specifications"),
        NamingRule::new(r"(?i).*Specs?.*04.*Masonry", "Division 04 - Masonry Specifications"),
        NamingRule::new(r"(?i).*Specs?.*22.*Plumbing", "Division 22 - Plumbing Specifications"),
        NamingRule::new(r"(?i).*Specs?.*26.*Electrical", "Division 26 - Electrical Specifications"),
        // Generic document types
        NamingRule::new(r"(?i).*[_\s]?Plans[_\s]?Rev", "Project Plans"),
        NamingRule::new(r"(?i).*[_\s]?Drawings[_\s]?", "Project Drawings"),
        NamingRule::new(r"(?i).*[_\s]?Specs?[_\s]?", "Project Specifications"),
    ];
    static ref REV_DATE: Regex =
        Regex::new(r"(?i)[_\s]*Rev[._\s]*\d{4}[-_]\d{2}[-_]\d{2}").unwrap();
    static ref BARE_DATE: Regex = Regex::new(r"[_\s]*\d{4}[-_]\d{2}[-_]\d{2}").unwrap();
    static ref UNDERSCORES: Regex = Regex::new(r"_+").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Derive a human-readable document label from a technical filename.
/// Deterministic; falls back to the raw filename when cleanup erases
/// everything.
pub fn humanize_filename(filename: &str) -> String {
    if filename.is_empty() {
        return "Unknown Document".to_string();
    }

    let mut name = EXTENSION.replace(filename, "").into_owned();

    for rule in NAMING_RULES.iter() {
        if rule.pattern.is_match(&name) {
            name = rule.pattern.replace(&name, rule.replacement).into_owned();
            break;
        }
    }

    name = REV_DATE.replace_all(&name, "").into_owned();
    name = BARE_DATE.replace_all(&name, "").into_owned();
    name = UNDERSCORES.replace_all(&name, " ").into_owned();
    name = WHITESPACE.replace_all(&name, " ").into_owned();

    let titled = title_case(name.trim());
    if titled.is_empty() {
        filename.to_string()
    } else {
        titled
    }
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::humanize_filename;

    #[test]
    fn strips_known_extensions() {
        assert_eq!(humanize_filename("Civil_Plans.pdf"), "Civil Plans");
        assert_eq!(humanize_filename("Civil_Plans.DWG"), "Civil Plans");
    }

    #[test]
    fn specific_plan_rules_win_over_generic_ones() {
        assert_eq!(
            humanize_filename("Arch_MEP_Plans.pdf"),
            "Architectural & Mep Plans"
        );
        assert_eq!(humanize_filename("Structural Plans.pdf"), "Structural Plans");
    }

    #[test]
    fn division_specs_are_recognized() {
        assert_eq!(
            humanize_filename("Project_Specs_22_Plumbing.pdf"),
            "Division 22 - Plumbing Specifications"
        );
        assert_eq!(
            humanize_filename("Specs 03 Concrete.pdf"),
            "Division 03 - Concrete Specifications"
        );
    }

    #[test]
    fn first_matching_rule_ends_the_naming_phase() {
        // Without early exit the generic Specs rule would re-match its own
        // replacement text.
        assert_eq!(
            humanize_filename("Building_Specs.pdf"),
            "Project Specifications"
        );
    }

    #[test]
    fn revision_dates_are_stripped() {
        assert_eq!(
            humanize_filename("Site_Survey_Rev.2024-03-11.pdf"),
            "Site Survey"
        );
        assert_eq!(humanize_filename("Geotech_2023-07-01.pdf"), "Geotech");
    }

    #[test]
    fn generic_rules_apply_when_nothing_specific_matches() {
        assert_eq!(humanize_filename("Bid_Drawings.pdf"), "Project Drawings");
    }

    #[test]
    fn remainder_is_title_cased() {
        assert_eq!(
            humanize_filename("fire_alarm_riser_diagram.pdf"),
            "Fire Alarm Riser Diagram"
        );
    }

    #[test]
    fn falls_back_to_the_raw_filename_when_rules_erase_everything() {
        // A bare revision date reduces to nothing after cleanup.
        assert_eq!(humanize_filename("2024-01-02"), "2024-01-02");
        assert_eq!(humanize_filename(""), "Unknown Document");
    }
}
