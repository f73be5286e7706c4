// GitHub API response types.
// Defines wire payloads for repository listings and the user-repos sort options.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CardsError;

/// GitHub user or organization, as embedded in repository payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    pub avatar_url: Option<String>,
}

/// GitHub repository, as returned by `/repos/{owner}/{repo}` and `/users/{user}/repos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub owner: Owner,
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub updated_at: DateTime<Utc>,
}

/// Response body of the topics endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Topics {
    #[serde(default)]
    pub names: Vec<String>,
}

/// Language name to byte count, as returned by the languages endpoint.
pub type Languages = BTreeMap<String, u64>;

/// Field the user-repos listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Created,
    Updated,
    Pushed,
    FullName,
}

impl SortField {
    pub const ALLOWED: [&'static str; 4] = ["created", "updated", "pushed", "full_name"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Created => "created",
            SortField::Updated => "updated",
            SortField::Pushed => "pushed",
            SortField::FullName => "full_name",
        }
    }
}

impl FromStr for SortField {
    type Err = CardsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created" => Ok(SortField::Created),
            "updated" => Ok(SortField::Updated),
            "pushed" => Ok(SortField::Pushed),
            "full_name" => Ok(SortField::FullName),
            _ => Err(CardsError::InvalidAttribute {
                attribute: "sort",
                value: s.to_string(),
                allowed: Self::ALLOWED.join(", "),
            }),
        }
    }
}

/// Direction of the user-repos listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const ALLOWED: [&'static str; 2] = ["asc", "desc"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = CardsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(CardsError::InvalidAttribute {
                attribute: "direction",
                value: s.to_string(),
                allowed: Self::ALLOWED.join(", "),
            }),
        }
    }
}

/// Sort options passed through unmodified to the user-repos listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: Option<SortDirection>,
}

impl SortSpec {
    /// Query parameters appended to the listing request.
    pub fn query_params(&self) -> Vec<(&'static str, &'static str)> {
        let mut params = vec![("sort", self.field.as_str())];
        if let Some(direction) = self.direction {
            params.push(("direction", direction.as_str()));
        }
        params
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Some(direction) => write!(f, "{} {}", self.field.as_str(), direction.as_str()),
            None => write!(f, "{}", self.field.as_str()),
        }
    }
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    /// `None` until a response carried the header.
    pub remaining: Option<u64>,
    pub reset: u64,
}

impl RateLimit {
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }

    /// Reset time formatted for error messages.
    pub fn reset_display(&self) -> String {
        DateTime::from_timestamp(self.reset as i64, 0)
            .map(|dt| dt.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}
