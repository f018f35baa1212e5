//! Include/exclude keyword filters for offer searches

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Offer;

/// Caller-supplied keyword filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Criteria {
    /// Keywords of which at least one must appear in the offer's name or tags
    pub include: Vec<String>,

    /// Keywords none of which may appear in the offer's name or tags
    pub exclude: Vec<String>,
}

impl Criteria {
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self { include, exclude }
    }

    /// Whether no keyword is set at all
    pub fn is_empty(&self) -> bool {
        self.include.iter().all(|k| k.trim().is_empty())
            && self.exclude.iter().all(|k| k.trim().is_empty())
    }

    /// Case-insensitive keyword test over the offer's name and tags
    pub fn matches(&self, offer: &Offer) -> bool {
        let haystack: Vec<String> = std::iter::once(offer.name())
            .chain(offer.tags().iter().map(String::as_str))
            .map(str::to_lowercase)
            .collect();
        let mentions = |keyword: &String| {
            let keyword = keyword.trim().to_lowercase();
            !keyword.is_empty() && haystack.iter().any(|field| field.contains(&keyword))
        };

        let included = self.include.iter().all(|k| k.trim().is_empty())
            || self.include.iter().any(mentions);
        included && !self.exclude.iter().any(mentions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer::ProgrammingLanguage;

    fn offer(name: &str, tags: &[&str]) -> Offer {
        Offer::new(
            ProgrammingLanguage::Rust,
            name,
            tags.iter().map(|t| t.to_string()),
            "/job",
        )
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let criteria = Criteria::default();
        assert!(criteria.is_empty());
        assert!(criteria.matches(&offer("Anything", &[])));
    }

    #[test]
    fn test_include_matches_name_or_tags() {
        let criteria = Criteria::new(vec!["tokio".to_string()], Vec::new());
        assert!(criteria.matches(&offer("Backend Engineer", &["Rust", "Tokio"])));
        assert!(criteria.matches(&offer("Tokio maintainer", &[])));
        assert!(!criteria.matches(&offer("Backend Engineer", &["Actix"])));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let criteria = Criteria::new(vec!["rust".to_string()], vec!["junior".to_string()]);
        assert!(criteria.matches(&offer("Senior Rust Developer", &[])));
        assert!(!criteria.matches(&offer("Junior Rust Developer", &[])));
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let criteria: Criteria = serde_json::from_str(r#"{"exclude": ["php"]}"#).unwrap();
        assert!(criteria.include.is_empty());
        assert_eq!(criteria.exclude, vec!["php".to_string()]);
    }
}
