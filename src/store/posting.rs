//! The persisted projection of an offer

use chrono::{DateTime, Utc};
use libsql::{Row, Value};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::offer::{Offer, Seniority, monotonic_now};
use crate::store::error::DbError;
use crate::store::repository::Entity;

/// A posting the user chose to save
#[derive(Debug, Clone, PartialEq)]
pub struct Posting {
    /// ID of the posting (0 until it has been stored)
    pub id: i64,

    /// Display title
    pub name: String,

    /// Link to the original posting, unique across the table
    pub url: String,

    /// Seniority derived from the title
    pub seniority: Seniority,

    /// Skill tags
    pub tags: Vec<String>,

    /// When the posting was scraped or saved
    pub scraped_on: DateTime<Utc>,
}

impl Posting {
    /// A posting saved by name and URL alone; seniority is derived from the name.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        let name = name.into().trim().to_string();
        Self {
            id: 0,
            seniority: Seniority::infer(&name),
            name,
            url: url.into().trim().to_string(),
            tags: Vec::new(),
            scraped_on: monotonic_now(),
        }
    }
}

impl From<&Offer> for Posting {
    fn from(offer: &Offer) -> Self {
        Self {
            id: 0,
            name: offer.name().to_string(),
            url: offer.url().to_string(),
            seniority: offer.seniority(),
            tags: offer.tags().to_vec(),
            scraped_on: offer.scraped_on(),
        }
    }
}

impl Entity for Posting {
    const TABLE: &'static str = "postings";
    const COLUMNS: &'static [&'static str] = &["name", "url", "seniority", "tags", "scraped_on"];

    fn values(&self) -> Result<Vec<Value>, DbError> {
        let tags = serde_json::to_string(&self.tags)
            .map_err(|e| DbError::Data(format!("Failed to encode tags: {}", e)))?;

        Ok(vec![
            Value::Text(self.name.clone()),
            Value::Text(self.url.clone()),
            Value::Text(self.seniority.to_string()),
            Value::Text(tags),
            Value::Integer(self.scraped_on.timestamp()),
        ])
    }

    fn from_row(row: &Row) -> Result<Self, DbError> {
        let seniority: String = row
            .get(3)
            .map_err(|e| DbError::Data(format!("Failed to get seniority: {}", e)))?;
        let tags: String = row
            .get(4)
            .map_err(|e| DbError::Data(format!("Failed to get tags: {}", e)))?;
        let scraped_on: i64 = row
            .get(5)
            .map_err(|e| DbError::Data(format!("Failed to get scraped_on: {}", e)))?;

        Ok(Posting {
            id: row
                .get(0)
                .map_err(|e| DbError::Data(format!("Failed to get id: {}", e)))?,
            name: row
                .get(1)
                .map_err(|e| DbError::Data(format!("Failed to get name: {}", e)))?,
            url: row
                .get(2)
                .map_err(|e| DbError::Data(format!("Failed to get url: {}", e)))?,
            seniority: seniority.parse().map_err(DbError::Data)?,
            tags: serde_json::from_str(&tags)
                .map_err(|e| DbError::Data(format!("Invalid tags {:?}: {}", tags, e)))?,
            scraped_on: DateTime::from_timestamp(scraped_on, 0).ok_or_else(|| {
                DbError::Data(format!("Invalid scraped_on timestamp: {}", scraped_on))
            })?,
        })
    }
}

/// The validated record returned when listing saved postings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PostingSummary {
    pub id: i64,
    pub name: String,
    pub url: String,
}

impl From<&Posting> for PostingSummary {
    fn from(posting: &Posting) -> Self {
        Self {
            id: posting.id,
            name: posting.name.clone(),
            url: posting.url.clone(),
        }
    }
}
