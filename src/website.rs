//! # Posting Website Module
//!
//! Fetches listing pages from job boards and hands them to the parser.
//!
//! Every site is validated when it is constructed: a HEAD probe against its base
//! URL must succeed before a value exists at all, so a `Website` in hand is always
//! reachable as of construction. Listing calls then fetch the search page with a
//! browser-like header set and return a lazy [`Offers`] stream.
//!
//! ## Key Components
//!
//! - `SiteMetadata`: host and response headers captured by the probe
//! - `BulldogJob`: the bulldogjob.pl job board
//! - `GenericSite`: any reachable URL; probing only, listing is unsupported
//! - `Website`: closed set of the sites above
//! - `browser_client`: per-call HTTP client carrying the browser headers

mod bulldogjob;
mod error;
mod generic;
mod http;
mod metadata;

pub use bulldogjob::{BULLDOGJOB_URL, BulldogJob};
pub use error::WebsiteError;
pub use generic::GenericSite;
pub use http::{DEFAULT_TIMEOUT_SECS, browser_client, browser_headers};
pub use metadata::SiteMetadata;

use crate::offer::{Criteria, ProgrammingLanguage};
use crate::parser::Offers;

/// A validated posting website
#[derive(Debug, Clone)]
pub enum Website {
    BulldogJob(BulldogJob),
    Generic(GenericSite),
}

impl Website {
    /// Metadata captured when the site was probed
    pub fn metadata(&self) -> &SiteMetadata {
        match self {
            Website::BulldogJob(site) => site.metadata(),
            Website::Generic(site) => site.metadata(),
        }
    }

    /// List the offers the site publishes for `language`
    pub async fn list_offers_for(
        &self,
        language: ProgrammingLanguage,
        criteria: Criteria,
    ) -> Result<Offers, WebsiteError> {
        match self {
            Website::BulldogJob(site) => site.list_offers_for(language, criteria).await,
            Website::Generic(site) => site.list_offers_for(language, criteria),
        }
    }
}

impl From<BulldogJob> for Website {
    fn from(site: BulldogJob) -> Self {
        Website::BulldogJob(site)
    }
}

impl From<GenericSite> for Website {
    fn from(site: GenericSite) -> Self {
        Website::Generic(site)
    }
}
