// Repo cards session.
// Owns the start-once lifecycle and runs card requests through the reconciler.

use tracing::{info, warn};

use crate::cache::{Clock, KeyValueStore, SystemClock};
use crate::cards::{CardAttributes, CardRequest, CardTarget, CardView, processing_order};
use crate::error::{CardsError, Result};
use crate::github::RepoApi;
use crate::reconcile::{Reconciler, Source};

/// Lifecycle of a `RepoCards` instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    NotStarted,
    Started {
        caching: bool,
    },
}

/// Cards produced for one request.
#[derive(Debug, Clone)]
pub struct CardGroup {
    pub request: CardRequest,
    pub cards: Vec<CardView>,
    pub source: Source,
}

/// Entry point: start once, then process card requests.
pub struct RepoCards<A, S, C = SystemClock> {
    lifecycle: Lifecycle,
    reconciler: Reconciler<A, S, C>,
}

impl<A: RepoApi, S: KeyValueStore, C: Clock> RepoCards<A, S, C> {
    pub fn new(reconciler: Reconciler<A, S, C>) -> Self {
        Self {
            lifecycle: Lifecycle::NotStarted,
            reconciler,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn reconciler(&self) -> &Reconciler<A, S, C> {
        &self.reconciler
    }

    /// Start with the cache on or off. Fails on any call after the first,
    /// leaving the first call's settings in place.
    pub fn start(&mut self, caching: bool) -> Result<()> {
        if let Lifecycle::Started { .. } = self.lifecycle {
            return Err(CardsError::AlreadyStarted);
        }

        self.reconciler.cache_mut().set_enabled(caching);
        self.lifecycle = Lifecycle::Started { caching };
        info!(caching, "repo cards started");
        Ok(())
    }

    fn ensure_started(&self) -> Result<()> {
        match self.lifecycle {
            Lifecycle::Started { .. } => Ok(()),
            Lifecycle::NotStarted => Err(CardsError::NotStarted),
        }
    }

    /// Process `cards` in processing order, appending one group per card to
    /// `out`. The first failure ends the pass; groups produced before it stay
    /// in `out`.
    pub async fn process(
        &mut self,
        mut cards: Vec<CardAttributes>,
        out: &mut Vec<CardGroup>,
    ) -> Result<()> {
        self.ensure_started()?;

        if cards.is_empty() {
            warn!("no card requests found");
            return Ok(());
        }

        processing_order(&mut cards);
        for attrs in &cards {
            let request = CardRequest::try_from(attrs)?;
            out.push(self.resolve(request).await?);
        }
        Ok(())
    }

    /// Resolve one validated request into its cards.
    pub async fn resolve(&mut self, request: CardRequest) -> Result<CardGroup> {
        self.ensure_started()?;

        let reconciled = match &request.target {
            CardTarget::AllRepos { sort } => {
                self.reconciler
                    .repos_for_user(&request.user, sort.as_ref())
                    .await?
            }
            CardTarget::Single(repo) => self.reconciler.single_repo(&request.user, repo).await?,
        };

        Ok(CardGroup {
            cards: reconciled.records.iter().map(CardView::from).collect(),
            source: reconciled.source,
            request,
        })
    }

    /// Remove cached entries: all when `name` is `None`, else exact name matches.
    pub fn clear_cache(&mut self, name: Option<&str>) -> Result<usize> {
        self.reconciler.cache_mut().clear(name)
    }
}
