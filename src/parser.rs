//! # HTML Extraction Module
//!
//! Turns raw listing-page HTML into [`Offer`](crate::offer::Offer) records.
//!
//! ## Key Components
//!
//! - `Query`: a compiled selector query with a `build()` contract returning its literal text
//! - `Parser`: isolates repeated offer fragments from a page using a container query
//! - `Offers`: lazy, single-pass iterator building one offer per fragment
//!
//! ## Query dialect
//!
//! Queries are CSS selectors optionally followed by a pseudo-element naming what to
//! extract from each match:
//!
//! - `div.offer` yields the outer HTML of each match
//! - `h3::text` yields the text content of each match
//! - `a::attr(href)` yields the `href` attribute of each match
//!
//! Field queries run against a single fragment, never the whole page, so malformed
//! markup in one listing cannot leak into another.

mod error;
mod offers;
mod query;

pub use error::QueryError;
pub use offers::{Offers, Parser};
pub use query::{Query, Target};
