//! Keyword classifier for citizen reports.
//!
//! Rules are checked in order and the first rule with a matching keyword
//! decides the category. Matching is a plain substring search on the
//! lower-cased text: no stemming, no word boundaries.

use crate::features::reports::models::ReportCategory;

/// A category together with the keywords that select it
#[derive(Debug)]
pub struct KeywordRule {
    pub category: ReportCategory,
    pub keywords: &'static [&'static str],
}

impl KeywordRule {
    /// `text` must already be lower-cased
    fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword))
    }
}

pub const GOVERNMENT_KEYWORDS: &[&str] = &["pothole", "road", "water", "garbage", "street light"];

pub const SERVICE_KEYWORDS: &[&str] = &["mechanic", "plumber", "electrician", "cleaner", "repair"];

/// Rules in priority order, government before service
pub const CLASSIFICATION_RULES: &[KeywordRule] = &[
    KeywordRule {
        category: ReportCategory::Government,
        keywords: GOVERNMENT_KEYWORDS,
    },
    KeywordRule {
        category: ReportCategory::Service,
        keywords: SERVICE_KEYWORDS,
    },
];

/// Classify free text into a report category
pub fn classify(text: &str) -> ReportCategory {
    let text = text.to_lowercase();

    CLASSIFICATION_RULES
        .iter()
        .find(|rule| rule.matches(&text))
        .map(|rule| rule.category)
        .unwrap_or(ReportCategory::Pending)
}

/// Text fed to the classifier for a report: description, a space, then title
pub fn classification_text(title: &str, description: &str) -> String {
    format!("{} {}", description, title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_government_keyword_classifies_as_government() {
        for keyword in GOVERNMENT_KEYWORDS {
            let text = format!("there is a {} problem near my house", keyword);
            assert_eq!(classify(&text), ReportCategory::Government, "{}", keyword);
        }
    }

    #[test]
    fn test_every_service_keyword_classifies_as_service() {
        for keyword in SERVICE_KEYWORDS {
            let text = format!("looking for a {} today", keyword);
            assert_eq!(classify(&text), ReportCategory::Service, "{}", keyword);
        }
    }

    #[test]
    fn test_government_wins_over_service() {
        assert_eq!(
            classify("need a plumber because the water main burst"),
            ReportCategory::Government
        );
        assert_eq!(
            classify("repair the pothole please"),
            ReportCategory::Government
        );
    }

    #[test]
    fn test_no_keyword_is_pending() {
        assert_eq!(classify("just checking in"), ReportCategory::Pending);
        assert_eq!(classify(""), ReportCategory::Pending);
    }

    #[test]
    fn test_matching_ignores_case() {
        assert_eq!(classify("GARBAGE everywhere"), ReportCategory::Government);
        assert_eq!(classify("Call An Electrician"), ReportCategory::Service);
        assert_eq!(classify("Street Light flickers"), ReportCategory::Government);
    }

    #[test]
    fn test_substring_matching_ignores_word_breaks() {
        // "broad" contains "road", "streetlight" does not contain "street light"
        assert_eq!(classify("a broad avenue"), ReportCategory::Government);
        assert_eq!(classify("streetlight"), ReportCategory::Pending);
        assert_eq!(classify("repairs needed"), ReportCategory::Service);
    }

    #[test]
    fn test_classification_text_puts_description_first() {
        assert_eq!(
            classification_text("Need help", "looking for a plumber"),
            "looking for a plumber Need help"
        );
        // The separating space lets a keyword span description and title
        assert_eq!(
            classify(&classification_text("light is out", "the street")),
            ReportCategory::Government
        );
    }

    #[test]
    fn test_report_scenarios() {
        let cases = [
            (
                "Streetlight out",
                "broken street light on 5th",
                ReportCategory::Government,
            ),
            (
                "Need help",
                "looking for a plumber to fix sink",
                ReportCategory::Service,
            ),
            ("General note", "just checking in", ReportCategory::Pending),
        ];

        for (title, description, expected) in cases {
            assert_eq!(
                classify(&classification_text(title, description)),
                expected,
                "{}",
                title
            );
        }
    }
}
