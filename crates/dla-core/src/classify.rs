//! Ordered substring-rule classification for filenames and free text.
//!
//! Source files carry no explicit region or theme metadata; both tags are
//! derived from tokens embedded in the file name (for example
//! `CAWAORKeyStatutesCodesLocalAuthority.xlsx`). The same mechanism also
//! classifies free-text fields such as protection descriptions into a
//! fixed label set.
//!
//! A [`RuleTable`] is an ordered list of rules. Each rule maps one or more
//! substring patterns to a label; the first rule with any matching pattern
//! wins. Matching is case-insensitive (patterns are stored lower-cased and
//! input is lower-cased before the scan). Input that matches no rule, is
//! empty, or is missing entirely yields the table's fallback label, so
//! classification is total and never fails.

use once_cell::sync::Lazy;

/// A single classification rule: any of `patterns` appearing in the input
/// maps it to `label`.
#[derive(Debug, Clone)]
pub struct Rule {
    patterns: Vec<String>,
    label: String,
}

impl Rule {
    /// Create a rule. Patterns are stored lower-cased.
    pub fn new(patterns: &[&str], label: impl Into<String>) -> Self {
        Self {
            patterns: patterns.iter().map(|p| p.to_lowercase()).collect(),
            label: label.into(),
        }
    }

    /// The label this rule assigns.
    pub fn label(&self) -> &str {
        &self.label
    }

    fn matches(&self, lowered: &str) -> bool {
        self.patterns.iter().any(|p| lowered.contains(p.as_str()))
    }
}

/// An ordered list of rules with a fallback label. First match wins.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
    fallback: String,
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>, fallback: impl Into<String>) -> Self {
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    /// Classify a free-text value against the table.
    ///
    /// Total over its input: `None`, blank, and unmatched text all yield
    /// the fallback label. Never panics.
    pub fn classify(&self, text: Option<&str>) -> &str {
        let text = match text {
            Some(t) if !t.trim().is_empty() => t,
            _ => return &self.fallback,
        };
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(Rule::label)
            .unwrap_or(&self.fallback)
    }

    /// The label returned when nothing matches.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Every label the table can produce, in rule order, fallback last.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.rules.iter().map(Rule::label).collect();
        labels.push(&self.fallback);
        labels
    }
}

/// Filename token rules assigning each source file to a macro-region.
///
/// `Southern` and `MidAtlantic` intentionally share a label: the source
/// corpus names the same dataset both ways.
static REGION_RULES: Lazy<RuleTable> = Lazy::new(|| {
    RuleTable::new(
        vec![
            Rule::new(&["AKHI"], "Alaska/Hawaii"),
            Rule::new(&["Appalachia"], "Appalachia/Central"),
            Rule::new(&["CAWA"], "CA/WA/OR"),
            Rule::new(&["Midwest"], "Midwest"),
            Rule::new(&["MTN"], "Mountain West"),
            Rule::new(&["Northeast"], "Northeast"),
            Rule::new(&["Southern"], "Southern/Mid-Atlantic"),
            Rule::new(&["MidAtlantic"], "Southern/Mid-Atlantic"),
        ],
        "Other",
    )
});

/// Filename token rules assigning each source file a content theme.
static THEME_RULES: Lazy<RuleTable> = Lazy::new(|| {
    RuleTable::new(
        vec![
            Rule::new(&["KeyStatutes", "LocalAuthority"], "Legal Framework"),
            Rule::new(&["Emergency", "Declaration"], "Emergency Management"),
            Rule::new(&["Vulnerable", "Protection"], "Vulnerable Populations"),
            Rule::new(&["CivilRights", "Equity"], "Civil Rights/Equity"),
            Rule::new(&["FEMA", "Risk"], "FEMA/Risk Assessment"),
        ],
        "General",
    )
});

/// Free-text rules sorting protection descriptions into a fixed label set.
static PROTECTION_RULES: Lazy<RuleTable> = Lazy::new(|| {
    RuleTable::new(
        vec![
            Rule::new(&["medical", "health"], "Medical/Health"),
            Rule::new(
                &["disab", "functional needs", "access and functional"],
                "Disability/Functional Needs",
            ),
            Rule::new(
                &["language", "limited english", "interpret"],
                "Language Access",
            ),
            Rule::new(&["elder", "senior", "older adult", "aging"], "Older Adults"),
            Rule::new(&["child", "minor", "youth"], "Children/Youth"),
            Rule::new(&["evacuat", "shelter"], "Evacuation/Sheltering"),
        ],
        "Other",
    )
});

/// The built-in filename-to-region table.
pub fn region_rules() -> &'static RuleTable {
    &REGION_RULES
}

/// The built-in filename-to-theme table.
pub fn theme_rules() -> &'static RuleTable {
    &THEME_RULES
}

/// The built-in protection-description table.
pub fn protection_rules() -> &'static RuleTable {
    &PROTECTION_RULES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_from_filename() {
        let rules = region_rules();
        assert_eq!(
            rules.classify(Some("AKHIKeyStatutesCodes.xlsx")),
            "Alaska/Hawaii"
        );
        assert_eq!(
            rules.classify(Some("CAWAORKeyStatutesCodesLocalAuthority.xlsx")),
            "CA/WA/OR"
        );
        assert_eq!(
            rules.classify(Some("MTNWestEmergencyDeclaration.xlsx")),
            "Mountain West"
        );
        assert_eq!(
            rules.classify(Some("ImpactAreaSouthernStatesMidAtlantic.xlsx")),
            "Southern/Mid-Atlantic"
        );
    }

    #[test]
    fn test_theme_from_filename() {
        let rules = theme_rules();
        assert_eq!(
            rules.classify(Some("CAWAORKeyStatutesCodesLocalAuthority.xlsx")),
            "Legal Framework"
        );
        assert_eq!(
            rules.classify(Some("MidwestEmergencyDeclarations.xlsx")),
            "Emergency Management"
        );
        assert_eq!(
            rules.classify(Some("NortheastVulnerablePopulations.xlsx")),
            "Vulnerable Populations"
        );
        assert_eq!(
            rules.classify(Some("FEMARiskAssessmentByState.xlsx")),
            "FEMA/Risk Assessment"
        );
    }

    #[test]
    fn test_fallback_labels() {
        assert_eq!(region_rules().classify(Some("StateContacts.xlsx")), "Other");
        assert_eq!(theme_rules().classify(Some("StateContacts.xlsx")), "General");
        assert_eq!(region_rules().classify(None), "Other");
        assert_eq!(region_rules().classify(Some("")), "Other");
        assert_eq!(region_rules().classify(Some("   ")), "Other");
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let rules = region_rules();
        assert_eq!(rules.classify(Some("akhikeystatutes.xlsx")), "Alaska/Hawaii");
        assert_eq!(rules.classify(Some("AKHIKEYSTATUTES.XLSX")), "Alaska/Hawaii");
    }

    #[test]
    fn test_first_match_wins() {
        let table = RuleTable::new(
            vec![
                Rule::new(&["storm"], "First"),
                Rule::new(&["storm", "flood"], "Second"),
            ],
            "None",
        );
        assert_eq!(table.classify(Some("storm surge")), "First");
        assert_eq!(table.classify(Some("flood plain")), "Second");
        assert_eq!(table.classify(Some("wildfire")), "None");
    }

    #[test]
    fn test_any_pattern_within_rule_matches() {
        let rules = theme_rules();
        assert_eq!(rules.classify(Some("KeyStatutesOnly.xlsx")), "Legal Framework");
        assert_eq!(
            rules.classify(Some("LocalAuthorityOnly.xlsx")),
            "Legal Framework"
        );
    }

    #[test]
    fn test_protection_classification_is_total() {
        let rules = protection_rules();
        assert_eq!(
            rules.classify(Some("Requires accessible shelters for people with disabilities")),
            "Disability/Functional Needs"
        );
        assert_eq!(
            rules.classify(Some("Interpretation services during declared emergencies")),
            "Language Access"
        );
        assert_eq!(rules.classify(Some("unrelated text")), "Other");
        assert_eq!(rules.classify(None), "Other");
    }

    #[test]
    fn test_labels_include_fallback_last() {
        let labels = theme_rules().labels();
        assert_eq!(labels.first(), Some(&"Legal Framework"));
        assert_eq!(labels.last(), Some(&"General"));
    }
}
