//! The bulldogjob.pl job board

use reqwest::Client;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::offer::{Criteria, ProgrammingLanguage};
use crate::parser::{Offers, Parser, Query};
use crate::website::error::WebsiteError;
use crate::website::metadata::SiteMetadata;

/// Production base URL of the board
pub const BULLDOGJOB_URL: &str = "https://bulldogjob.pl";

const OFFER_CONTAINER: &str = r#"a[class*="JobListItem_item"]"#;
const LINK_QUERY: &str = "a::attr(href)";
const NAME_QUERY: &str = "h3::text";
const TAGS_QUERY: &str = r#"div[class*="tags"] span::text"#;

/// bulldogjob.pl, or any host serving the same listing layout
#[derive(Debug, Clone)]
pub struct BulldogJob {
    client: Client,
    metadata: SiteMetadata,
}

impl BulldogJob {
    /// Connect to the production board
    pub async fn connect(client: Client) -> Result<Self, WebsiteError> {
        Self::connect_to(client, BULLDOGJOB_URL).await
    }

    /// Connect to a board served from `base_url`
    pub async fn connect_to(client: Client, base_url: &str) -> Result<Self, WebsiteError> {
        info!("Initializing BulldogJob with base URL: {}", base_url);
        let metadata = SiteMetadata::probe(&client, base_url).await?;
        Ok(Self { client, metadata })
    }

    pub fn metadata(&self) -> &SiteMetadata {
        &self.metadata
    }

    /// `<base>/companies/jobs/s/skills,<Language>`
    pub fn listing_url(&self, language: ProgrammingLanguage) -> Result<Url, WebsiteError> {
        let base = self.metadata.base_url();
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| WebsiteError::InvalidUrl(format!("{} cannot be a base", base)))?
            .pop_if_empty()
            .extend(["companies", "jobs", "s"])
            .push(&format!("skills,{}", language));
        Ok(url)
    }

    /// Fetch the listing page for `language` and stream the offers on it that
    /// satisfy `criteria`.
    #[instrument(skip(self), fields(host = %self.metadata.host()))]
    pub async fn list_offers_for(
        &self,
        language: ProgrammingLanguage,
        criteria: Criteria,
    ) -> Result<Offers, WebsiteError> {
        let url = self.listing_url(language)?;
        info!("Fetching offers for language: {}, criteria: {:?}", language, criteria);

        let unavailable = |source: reqwest::Error| {
            error!("Failed to fetch offers from {}: {}", url, source);
            WebsiteError::OffersUnavailable {
                url: url.to_string(),
                source,
            }
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(unavailable)?;
        let body = response.text().await.map_err(unavailable)?;
        debug!("Fetched {} bytes from {}", body.len(), url);

        let container = Query::parse(OFFER_CONTAINER)?;
        let link = Query::parse(LINK_QUERY)?;
        let name = Query::parse(NAME_QUERY)?;
        let tags = Query::parse(TAGS_QUERY)?;

        Ok(Parser::new(&body, &container)
            .extract_offers(language, &link, &name, &tags)
            .filtered_by(criteria))
    }
}
