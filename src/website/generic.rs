//! Sites that are probed but never scraped

use reqwest::Client;
use tracing::{info, warn};

use crate::offer::{Criteria, ProgrammingLanguage};
use crate::parser::Offers;
use crate::website::error::WebsiteError;
use crate::website::metadata::SiteMetadata;

/// Any reachable URL. Used to inspect arbitrary sites without assuming they are
/// job boards.
#[derive(Debug, Clone)]
pub struct GenericSite {
    metadata: SiteMetadata,
}

impl GenericSite {
    pub async fn connect(client: Client, base_url: &str) -> Result<Self, WebsiteError> {
        info!("Initializing generic posting website with base URL: {}", base_url);
        let metadata = SiteMetadata::probe(&client, base_url).await?;
        Ok(Self { metadata })
    }

    pub fn metadata(&self) -> &SiteMetadata {
        &self.metadata
    }

    /// Always fails: a generic site has no known listing layout.
    pub fn list_offers_for(
        &self,
        language: ProgrammingLanguage,
        _criteria: Criteria,
    ) -> Result<Offers, WebsiteError> {
        warn!(
            "Listing {} offers is not implemented for generic website {}",
            language,
            self.metadata.host()
        );
        Err(WebsiteError::Unsupported(format!(
            "unable to list offers for generic posting website {}",
            self.metadata.host()
        )))
    }
}
