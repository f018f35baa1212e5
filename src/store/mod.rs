//! Persistence for saved postings
//!
//! This module provides a libsql-backed store. All access goes through
//! [`Database::scoped`], which hands out a [`Session`] bound to a single
//! transaction and guarantees commit or rollback when the unit of work ends.

mod database;
pub mod error;
mod posting;
mod repository;
mod schema;

pub use database::{Database, Session};
pub use error::DbError;
pub use posting::{Posting, PostingSummary};
pub use repository::{Entity, Repository};
