// Repo data assembler.
// Fans out the per-repo sub-requests and merges them into normalized records.

use futures::future::try_join_all;
use tracing::debug;

use crate::error::Result;
use crate::github::{PAGE_SIZE, RepoApi, Repository, SortSpec};
use crate::record::RepoRecord;

/// Builds `RepoRecord`s from a `RepoApi`.
pub struct Assembler<A> {
    api: A,
    per_page: u32,
}

impl<A: RepoApi> Assembler<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            per_page: PAGE_SIZE,
        }
    }

    /// Override the listing page size.
    pub fn with_page_size(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch base metadata, topics, languages and subscribers of one repo
    /// concurrently. Any failing sub-request fails the whole assembly.
    pub async fn assemble_one(&self, user: &str, repo: &str) -> Result<RepoRecord> {
        let (base, topics, languages, watchers) = tokio::try_join!(
            self.api.repo(user, repo),
            self.api.topics(user, repo),
            self.api.languages(user, repo),
            self.api.subscriber_count(user, repo),
        )?;

        Ok(RepoRecord::assemble(base, topics, languages, watchers))
    }

    /// Complete a listing item with its topics, languages and subscribers.
    async fn assemble_listed(&self, user: &str, repo: Repository) -> Result<RepoRecord> {
        let (topics, languages, watchers) = tokio::try_join!(
            self.api.topics(user, &repo.name),
            self.api.languages(user, &repo.name),
            self.api.subscriber_count(user, &repo.name),
        )?;

        Ok(RepoRecord::assemble(repo, topics, languages, watchers))
    }

    /// Assemble every repo of `user`, page by page, until an empty page.
    ///
    /// Repos within a page are assembled concurrently; the next page is only
    /// requested once the current one is complete. Order follows the listing.
    pub async fn assemble_all(&self, user: &str, sort: Option<&SortSpec>) -> Result<Vec<RepoRecord>> {
        let mut records = Vec::new();
        let mut page = 1;

        loop {
            let repos = self.api.user_repos(user, page, self.per_page, sort).await?;
            if repos.is_empty() {
                break;
            }

            debug!(user, page, count = repos.len(), "assembling page");
            let assembled =
                try_join_all(repos.into_iter().map(|repo| self.assemble_listed(user, repo))).await?;
            records.extend(assembled);
            page += 1;
        }

        Ok(records)
    }
}
