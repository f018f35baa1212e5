//! # Offer Model
//!
//! The canonical record produced by the extraction pipeline. An [`Offer`] is built
//! once per extracted fragment and never mutated afterwards; its seniority and
//! scrape timestamp are derived by the constructor rather than supplied by callers.
//!
//! ## Key Components
//!
//! - `Offer`: one extracted job posting
//! - `Seniority`: seniority level inferred from the posting title
//! - `ProgrammingLanguage`: closed set of languages a search can target
//! - `Criteria`: include/exclude keyword filters threaded through to the sites

mod criteria;
mod language;
mod render;
mod seniority;

pub use criteria::Criteria;
pub use language::ProgrammingLanguage;
pub use seniority::Seniority;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicI64, Ordering};

static LAST_STAMP_MICROS: AtomicI64 = AtomicI64::new(i64::MIN);

/// Current time, never earlier than any stamp previously handed out in this process.
pub(crate) fn monotonic_now() -> DateTime<Utc> {
    let now = Utc::now();
    let micros = now.timestamp_micros();
    let previous = LAST_STAMP_MICROS.fetch_max(micros, Ordering::SeqCst);
    if previous > micros {
        DateTime::from_timestamp_micros(previous).unwrap_or(now)
    } else {
        now
    }
}

/// A single extracted job posting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Offer {
    language: ProgrammingLanguage,
    name: String,
    tags: Vec<String>,
    url: String,
    seniority: Seniority,
    scraped_on: DateTime<Utc>,
}

impl Offer {
    /// Build an offer, deriving its seniority from `name` and stamping the scrape time.
    ///
    /// Name and tags are trimmed and empty tags are dropped. An empty name is kept
    /// as-is so that a fragment with a missing title still yields an offer.
    pub fn new(
        language: ProgrammingLanguage,
        name: impl Into<String>,
        tags: impl IntoIterator<Item = String>,
        url: impl Into<String>,
    ) -> Self {
        let name = name.into().trim().to_string();
        let tags = tags
            .into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();

        Self {
            language,
            seniority: Seniority::infer(&name),
            name,
            tags,
            url: url.into().trim().to_string(),
            scraped_on: monotonic_now(),
        }
    }

    pub fn language(&self) -> ProgrammingLanguage {
        self.language
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn seniority(&self) -> Seniority {
        self.seniority
    }

    pub fn scraped_on(&self) -> DateTime<Utc> {
        self.scraped_on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_derives_seniority_from_name() {
        let offer = Offer::new(
            ProgrammingLanguage::Go,
            "Senior Go Developer",
            Vec::new(),
            "/jobs/1",
        );

        assert_eq!(offer.seniority(), Seniority::Senior);
        assert_eq!(offer.name(), "Senior Go Developer");
        assert_eq!(offer.url(), "/jobs/1");
        assert_eq!(offer.language(), ProgrammingLanguage::Go);
    }

    #[test]
    fn test_offer_trims_name_and_drops_empty_tags() {
        let offer = Offer::new(
            ProgrammingLanguage::Rust,
            "  Junior Rust Engineer \n",
            vec![" Rust ".to_string(), "   ".to_string(), "Tokio".to_string()],
            " https://example.com/job ",
        );

        assert_eq!(offer.name(), "Junior Rust Engineer");
        assert_eq!(offer.tags(), ["Rust".to_string(), "Tokio".to_string()]);
        assert_eq!(offer.url(), "https://example.com/job");
    }

    #[test]
    fn test_offer_with_empty_name_defaults_to_regular() {
        let offer = Offer::new(ProgrammingLanguage::Python, "", Vec::new(), "");
        assert_eq!(offer.name(), "");
        assert_eq!(offer.seniority(), Seniority::Regular);
    }

    #[test]
    fn test_scraped_on_is_non_decreasing() {
        let offers: Vec<Offer> = (0..200)
            .map(|i| {
                Offer::new(
                    ProgrammingLanguage::Java,
                    format!("Developer {}", i),
                    Vec::new(),
                    format!("/jobs/{}", i),
                )
            })
            .collect();

        for pair in offers.windows(2) {
            assert!(pair[0].scraped_on() <= pair[1].scraped_on());
        }
    }

    #[test]
    fn test_seniority_is_deterministic_for_same_name() {
        let first = Offer::new(ProgrammingLanguage::Java, "Lead Java Developer", Vec::new(), "/a");
        let second = Offer::new(ProgrammingLanguage::Java, "Lead Java Developer", Vec::new(), "/b");
        assert_eq!(first.seniority(), second.seniority());
        assert_eq!(first.seniority(), Seniority::Lead);
    }
}
