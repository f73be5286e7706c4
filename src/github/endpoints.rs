// GitHub API endpoint functions.
// The `RepoApi` seam and its implementation over the real HTTP client.

use serde::de::IgnoredAny;

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{Languages, Repository, SortSpec, Topics};

/// Fixed page size for the user-repos listing.
pub const PAGE_SIZE: u32 = 100;

/// Repository metadata source used by the assembler.
///
/// Every method is a single GET; implementations must not retry.
#[allow(async_fn_in_trait)]
pub trait RepoApi {
    /// Base metadata for one repository.
    async fn repo(&self, user: &str, repo: &str) -> Result<Repository>;

    /// Topic names of a repository.
    async fn topics(&self, user: &str, repo: &str) -> Result<Vec<String>>;

    /// Language byte counts of a repository.
    async fn languages(&self, user: &str, repo: &str) -> Result<Languages>;

    /// Number of entries in the repository's subscriber list.
    async fn subscriber_count(&self, user: &str, repo: &str) -> Result<u64>;

    /// One page of the user's repositories, 1-based.
    async fn user_repos(
        &self,
        user: &str,
        page: u32,
        per_page: u32,
        sort: Option<&SortSpec>,
    ) -> Result<Vec<Repository>>;
}

impl RepoApi for GitHubClient {
    async fn repo(&self, user: &str, repo: &str) -> Result<Repository> {
        self.get_json(&format!("/repos/{}/{}", user, repo)).await
    }

    async fn topics(&self, user: &str, repo: &str) -> Result<Vec<String>> {
        let topics: Option<Topics> = self
            .get_json(&format!("/repos/{}/{}/topics", user, repo))
            .await?;
        Ok(topics.map(|t| t.names).unwrap_or_default())
    }

    async fn languages(&self, user: &str, repo: &str) -> Result<Languages> {
        let languages: Option<Languages> = self
            .get_json(&format!("/repos/{}/{}/languages", user, repo))
            .await?;
        Ok(languages.unwrap_or_default())
    }

    // Watchers are counted from the subscribers list, not `watchers_count`.
    async fn subscriber_count(&self, user: &str, repo: &str) -> Result<u64> {
        let subscribers: Vec<IgnoredAny> = self
            .get_json(&format!("/repos/{}/{}/subscribers", user, repo))
            .await?;
        Ok(subscribers.len() as u64)
    }

    async fn user_repos(
        &self,
        user: &str,
        page: u32,
        per_page: u32,
        sort: Option<&SortSpec>,
    ) -> Result<Vec<Repository>> {
        let page = page.to_string();
        let per_page = per_page.to_string();
        let mut params = vec![("per_page", per_page.as_str()), ("page", page.as_str())];
        if let Some(sort) = sort {
            params.extend(sort.query_params());
        }
        self.get_json_with_params(&format!("/users/{}/repos", user), &params)
            .await
    }
}
