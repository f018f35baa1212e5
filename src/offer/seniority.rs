//! Seniority levels and their inference from posting titles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seniority level of a posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seniority {
    Senior,
    Junior,
    Regular,
    Lead,
}

impl Seniority {
    /// All levels in declaration order, which is also the matching order.
    pub const ALL: [Seniority; 4] = [
        Seniority::Senior,
        Seniority::Junior,
        Seniority::Regular,
        Seniority::Lead,
    ];

    /// The display name of the level
    pub fn as_str(&self) -> &'static str {
        match self {
            Seniority::Senior => "Senior",
            Seniority::Junior => "Junior",
            Seniority::Regular => "Regular",
            Seniority::Lead => "Lead",
        }
    }

    /// Infer the seniority of a posting from its title.
    ///
    /// The first level (in declaration order) whose name occurs in the title,
    /// case-insensitively, wins. Titles naming no level are `Regular`.
    pub fn infer(title: &str) -> Self {
        let title = title.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| title.contains(&level.as_str().to_lowercase()))
            .unwrap_or(Seniority::Regular)
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Seniority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown seniority: {}", s))
    }
}
