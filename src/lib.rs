//! # jobscout - Job Offer Scraping with an MCP Tool Server
//!
//! This crate scrapes programming job offers from job boards, classifies them by
//! seniority, and keeps a small SQLite-backed list of saved postings. The same
//! operations are exposed to MCP clients over stdio and to a command-line interface.
//!
//! ## Features
//!
//! - CSS selector queries with `::text` and `::attr(name)` extraction
//! - Lazy, single-pass offer streams so a `limit` never parses the whole page
//! - Websites validated by a HEAD probe before they can be used
//! - Seniority inference and Markdown rendering of offers
//! - Transactional sessions over libsql for saved postings
//! - MCP server built on rmcp
//!
//! ## Example
//!
//! ```rust,no_run
//! use jobscout::config::Config;
//! use jobscout::offer::{Criteria, ProgrammingLanguage};
//! use jobscout::service::JobService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = JobService::new(Config::default()).await?;
//!
//!     let criteria = Criteria::new(vec!["remote".to_string()], Vec::new());
//!     let offers = service
//!         .get_offers(ProgrammingLanguage::Rust, criteria, Some(5))
//!         .await;
//!
//!     println!("{}", offers);
//!     Ok(())
//! }
//! ```

mod error;

pub mod config;
pub mod mcp;
pub mod offer;
pub mod parser;
pub mod service;
pub mod store;
pub mod website;

pub use error::{Error, Result};

/// Re-export of types module for public use
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::Error;
    pub use crate::error::Result;
    pub use crate::offer::{Criteria, Offer, ProgrammingLanguage, Seniority};
    pub use crate::service::JobService;
}
