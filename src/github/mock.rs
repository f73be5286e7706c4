// Scripted `RepoApi` for tests.
// Serves canned repositories and counts every request it answers.

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{TimeZone, Utc};

use crate::error::{CardsError, Result};

use super::endpoints::RepoApi;
use super::types::{Languages, Owner, Repository, SortSpec};

/// Build a listing item owned by `user`.
pub fn sample_repo(user: &str, name: &str) -> Repository {
    Repository {
        name: name.to_string(),
        full_name: format!("{}/{}", user, name),
        owner: Owner {
            login: user.to_string(),
            avatar_url: Some(format!("https://avatars.example.com/{}", user)),
        },
        description: Some(format!("{} description", name)),
        html_url: format!("https://github.com/{}/{}", user, name),
        stargazers_count: 7,
        forks_count: 2,
        updated_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    }
}

#[derive(Default)]
pub struct MockApi {
    repos: BTreeMap<String, Vec<Repository>>,
    topics: HashMap<String, Vec<String>>,
    languages: HashMap<String, Languages>,
    subscribers: HashMap<String, u64>,
    failing: HashSet<String>,
    page_requests: Cell<usize>,
    requests: Cell<usize>,
    last_sort: Cell<Option<SortSpec>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repo(mut self, user: &str, name: &str) -> Self {
        self.repos
            .entry(user.to_lowercase())
            .or_default()
            .push(sample_repo(user, name));
        self
    }

    pub fn with_topics(mut self, name: &str, topics: &[&str]) -> Self {
        self.topics.insert(
            name.to_string(),
            topics.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    pub fn with_languages(mut self, name: &str, languages: &[(&str, u64)]) -> Self {
        self.languages.insert(
            name.to_string(),
            languages.iter().map(|(l, b)| (l.to_string(), *b)).collect(),
        );
        self
    }

    pub fn with_subscribers(mut self, name: &str, count: u64) -> Self {
        self.subscribers.insert(name.to_string(), count);
        self
    }

    /// Sub-requests for `name` answer with a server error.
    pub fn failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    /// Total requests answered, page listings included.
    pub fn requests(&self) -> usize {
        self.requests.get()
    }

    pub fn page_requests(&self) -> usize {
        self.page_requests.get()
    }

    pub fn last_sort(&self) -> Option<SortSpec> {
        self.last_sort.get()
    }

    fn record(&self, repo: &str) -> Result<()> {
        self.requests.set(self.requests.get() + 1);
        if self.failing.contains(repo) {
            return Err(CardsError::Status {
                status: 500,
                url: format!("mock://{}", repo),
            });
        }
        Ok(())
    }
}

impl RepoApi for MockApi {
    async fn repo(&self, user: &str, repo: &str) -> Result<Repository> {
        self.record(repo)?;
        self.repos
            .get(&user.to_lowercase())
            .and_then(|repos| repos.iter().find(|r| r.name.eq_ignore_ascii_case(repo)))
            .cloned()
            .ok_or_else(|| CardsError::NotFound(format!("mock://{}/{}", user, repo)))
    }

    async fn topics(&self, _user: &str, repo: &str) -> Result<Vec<String>> {
        self.record(repo)?;
        Ok(self.topics.get(repo).cloned().unwrap_or_default())
    }

    async fn languages(&self, _user: &str, repo: &str) -> Result<Languages> {
        self.record(repo)?;
        Ok(self.languages.get(repo).cloned().unwrap_or_default())
    }

    async fn subscriber_count(&self, _user: &str, repo: &str) -> Result<u64> {
        self.record(repo)?;
        Ok(self.subscribers.get(repo).copied().unwrap_or_default())
    }

    async fn user_repos(
        &self,
        user: &str,
        page: u32,
        per_page: u32,
        sort: Option<&SortSpec>,
    ) -> Result<Vec<Repository>> {
        self.requests.set(self.requests.get() + 1);
        self.page_requests.set(self.page_requests.get() + 1);
        self.last_sort.set(sort.copied());

        let repos = self
            .repos
            .get(&user.to_lowercase())
            .cloned()
            .unwrap_or_default();
        let start = (page.saturating_sub(1) * per_page) as usize;
        Ok(repos
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .collect())
    }
}
