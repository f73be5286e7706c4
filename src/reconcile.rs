// Bulk reconciliation between the repo cache and the GitHub API.
// Decides per user whether to serve the cache wholesale or refetch everything.

use tracing::info;

use crate::assemble::Assembler;
use crate::cache::{Clock, KeyValueStore, RepoCache, SystemClock};
use crate::error::Result;
use crate::github::{RepoApi, SortSpec};
use crate::record::RepoRecord;

/// Where a reconciled result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Cache,
    /// Fetched from the API and written back to the cache.
    Fetched,
}

/// Records for one request and where they came from.
#[derive(Debug, Clone)]
pub struct Reconciled {
    pub records: Vec<RepoRecord>,
    pub source: Source,
}

pub struct Reconciler<A, S, C = SystemClock> {
    assembler: Assembler<A>,
    cache: RepoCache<S, C>,
}

impl<A: RepoApi, S: KeyValueStore, C: Clock> Reconciler<A, S, C> {
    pub fn new(assembler: Assembler<A>, cache: RepoCache<S, C>) -> Self {
        Self { assembler, cache }
    }

    pub fn assembler(&self) -> &Assembler<A> {
        &self.assembler
    }

    pub fn cache(&self) -> &RepoCache<S, C> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut RepoCache<S, C> {
        &mut self.cache
    }

    /// All repos of `user`.
    ///
    /// If any unexpired cached record is owned by `user`, every cached record
    /// of that user is returned and nothing is fetched. Freshness is judged per
    /// user, not per record: one live entry hides repos created after the cache
    /// was filled until all of that user's entries have expired.
    pub async fn repos_for_user(&mut self, user: &str, sort: Option<&SortSpec>) -> Result<Reconciled> {
        let cached: Vec<RepoRecord> = self
            .cache
            .read()?
            .into_values()
            .map(|entry| entry.record)
            .filter(|record| record.is_owned_by(user))
            .collect();

        if !cached.is_empty() {
            info!(user, count = cached.len(), "serving repos from cache");
            return Ok(Reconciled {
                records: cached,
                source: Source::Cache,
            });
        }

        info!(user, "cache miss, fetching all repos");
        let records = self.assembler.assemble_all(user, sort).await?;
        for record in &records {
            self.cache.write(record)?;
        }

        Ok(Reconciled {
            records,
            source: Source::Fetched,
        })
    }

    /// A single repo of `user`, served from the cache when its entry is live
    /// and owned by `user`, otherwise assembled and written back.
    pub async fn single_repo(&mut self, user: &str, repo: &str) -> Result<Reconciled> {
        let cached = self
            .cache
            .read()?
            .remove(&repo.to_lowercase())
            .map(|entry| entry.record)
            .filter(|record| record.is_owned_by(user));

        if let Some(record) = cached {
            info!(user, repo, "serving repo from cache");
            return Ok(Reconciled {
                records: vec![record],
                source: Source::Cache,
            });
        }

        info!(user, repo, "cache miss, fetching repo");
        let record = self.assembler.assemble_one(user, repo).await?;
        self.cache.write(&record)?;

        Ok(Reconciled {
            records: vec![record],
            source: Source::Fetched,
        })
    }
}
