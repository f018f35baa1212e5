//! # Job Service Module
//!
//! The operations exposed to callers, as plain async methods. The MCP server and
//! the CLI are both thin wrappers around [`JobService`].
//!
//! Listing and probing never fail from the caller's point of view: network and
//! parsing failures are logged and turned into a short apologetic message.
//! Persistence failures propagate.

use futures::FutureExt;
use tracing::{error, info, instrument};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::offer::{Criteria, Offer, ProgrammingLanguage};
use crate::store::{Database, Posting, PostingSummary};
use crate::website::{BulldogJob, GenericSite, Website, browser_client};

/// Returned by [`JobService::get_offers`] when the board could not be scraped
pub const OFFERS_UNAVAILABLE: &str = "Unable to fetch offer";

/// Returned by [`JobService::get_offers`] when nothing matched
pub const NO_OFFERS: &str = "No offers found";

/// Returned by [`JobService::get_offer_information`] when the site could not be probed
pub const PAGE_UNAVAILABLE: &str = "Unable to fetch page name";

/// Scrapes job boards and manages saved postings
#[derive(Clone)]
pub struct JobService {
    config: Config,
    db: Database,
}

impl JobService {
    /// Open the configured database and build a service around it
    pub async fn new(config: Config) -> Result<Self> {
        let db = Database::new_from_path(&config.database_path).await?;
        Ok(Self::with_database(config, db))
    }

    pub fn with_database(config: Config, db: Database) -> Self {
        Self { config, db }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    async fn bulldogjob(&self) -> Result<Website> {
        let client = browser_client(self.config.request_timeout())?;
        let site = BulldogJob::connect_to(client, &self.config.bulldogjob_url).await?;
        Ok(site.into())
    }

    /// Scrape up to `limit` offers for `language` that satisfy `criteria`.
    ///
    /// Only the first `limit` fragments that pass the criteria are turned into
    /// offers; the rest of the page is never parsed.
    #[instrument(skip(self))]
    pub async fn fetch_offers(
        &self,
        language: ProgrammingLanguage,
        criteria: Criteria,
        limit: Option<usize>,
    ) -> Result<Vec<Offer>> {
        let limit = limit.unwrap_or(self.config.default_limit);
        let website = self.bulldogjob().await?;
        let offers = website.list_offers_for(language, criteria).await?;

        let offers: Vec<Offer> = offers.take(limit).collect();
        info!("Fetched {} {} offers", offers.len(), language);
        Ok(offers)
    }

    /// Rendered offers separated by a blank line
    pub async fn get_offers(
        &self,
        language: ProgrammingLanguage,
        criteria: Criteria,
        limit: Option<usize>,
    ) -> String {
        match self.fetch_offers(language, criteria, limit).await {
            Ok(offers) if offers.is_empty() => NO_OFFERS.to_string(),
            Ok(offers) => offers
                .iter()
                .map(Offer::to_string)
                .collect::<Vec<_>>()
                .join("\n\n"),
            Err(e) => {
                error!("Unable to fetch offer: {}", e);
                OFFERS_UNAVAILABLE.to_string()
            }
        }
    }

    /// Probe `posting_url` and describe the site as JSON. A blank URL probes the
    /// configured job board.
    #[instrument(skip(self))]
    pub async fn get_offer_information(&self, posting_url: &str) -> String {
        let target = if posting_url.trim().is_empty() {
            self.config.bulldogjob_url.as_str()
        } else {
            posting_url.trim()
        };

        match self.describe_site(target).await {
            Ok(description) => description,
            Err(e) => {
                error!("Unable to fetch offer: {}", e);
                PAGE_UNAVAILABLE.to_string()
            }
        }
    }

    async fn describe_site(&self, url: &str) -> Result<String> {
        let client = browser_client(self.config.request_timeout())?;
        let website: Website = GenericSite::connect(client, url).await?.into();
        Ok(serde_json::to_string(&website.metadata().describe())?)
    }

    /// Save a posting and return its id
    #[instrument(skip(self))]
    pub async fn save_posting(&self, name: &str, url: &str) -> Result<i64> {
        if url.trim().is_empty() {
            return Err(Error::InvalidRequest(
                "Posting URL cannot be empty".to_string(),
            ));
        }

        let posting = Posting::new(name, url);
        let id = self
            .db
            .scoped(move |session| async move { session.postings().add_one(&posting).await }.boxed())
            .await?;
        info!("Saved posting {}", id);
        Ok(id)
    }

    /// Delete a saved posting. Returns `false` when no posting had that id.
    #[instrument(skip(self))]
    pub async fn delete_posting(&self, id: i64) -> Result<bool> {
        let removed = self
            .db
            .scoped(move |session| async move { session.postings().delete_one(id).await }.boxed())
            .await?;
        if !removed {
            info!("No saved posting with id {}", id);
        }
        Ok(removed)
    }

    /// Every saved posting, oldest first
    pub async fn list_saved_postings(&self) -> Result<Vec<PostingSummary>> {
        let postings = self
            .db
            .scoped(|session| async move { session.postings().get_all().await }.boxed())
            .await?;
        Ok(postings.iter().map(PostingSummary::from).collect())
    }
}
