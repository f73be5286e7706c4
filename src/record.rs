// Normalized repository record.
// The unit the cache stores and the cards display; replaced wholesale, never patched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::github::{Languages, Owner, Repository};

/// Displayable metadata of one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRecord {
    pub name: String,
    pub owner: Owner,
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: String,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub languages: Languages,
}

impl RepoRecord {
    /// Merge a base repository payload with its fetched sub-resources.
    pub fn assemble(
        repo: Repository,
        topics: Vec<String>,
        languages: Languages,
        watchers: u64,
    ) -> Self {
        Self {
            name: repo.name,
            owner: repo.owner,
            description: repo.description,
            html_url: repo.html_url,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            watchers,
            updated_at: repo.updated_at,
            topics,
            languages,
        }
    }

    /// Lowercased name, used as the cache key.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Whether the record belongs to `user`, ignoring case.
    pub fn is_owned_by(&self, user: &str) -> bool {
        self.owner.login.eq_ignore_ascii_case(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::mock::sample_repo;

    #[test]
    fn test_assemble_maps_counts() {
        let record = RepoRecord::assemble(
            sample_repo("Octocat", "Hello-World"),
            vec!["rust".to_string()],
            Languages::from([("Rust".to_string(), 1200)]),
            3,
        );

        assert_eq!(record.name, "Hello-World");
        assert_eq!(record.stars, 7);
        assert_eq!(record.forks, 2);
        assert_eq!(record.watchers, 3);
        assert_eq!(record.topics, vec!["rust"]);
        assert_eq!(record.key(), "hello-world");
    }

    #[test]
    fn test_owner_match_ignores_case() {
        let record = RepoRecord::assemble(sample_repo("Octocat", "x"), vec![], Languages::new(), 0);
        assert!(record.is_owned_by("octocat"));
        assert!(record.is_owned_by("OCTOCAT"));
        assert!(!record.is_owned_by("hubot"));
    }
}
