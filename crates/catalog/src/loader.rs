//! Incremental ("load more") product loader.
//!
//! The loader owns a [`PageState`] seeded from the first server-rendered page
//! and appends follow-up pages fetched by cursor. Phases:
//!
//! - **Idle**: ready; `load_next_page` starts a fetch.
//! - **Fetching**: one fetch in flight; further `load_next_page` calls return
//!   [`LoadOutcome::AlreadyFetching`] without queueing.
//! - **Exhausted**: `has_next_page == false`; `load_next_page` is a no-op.
//!
//! State changes are published on a `tokio::sync::watch` channel so views can
//! re-render from [`ProductLoader::subscribe`] instead of polling.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

use shopfront_core::{CollectionHandle, Cursor};

use crate::page::{Page, PageState};

/// Fetches the page that starts after `cursor`.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn fetch_page(&self, cursor: &Cursor) -> Result<Page, Self::Error>;
}

#[async_trait]
impl<F: PageFetcher + ?Sized> PageFetcher for std::sync::Arc<F> {
    type Error = F::Error;

    async fn fetch_page(&self, cursor: &Cursor) -> Result<Page, Self::Error> {
        (**self).fetch_page(cursor).await
    }
}

#[derive(Debug, Error)]
pub enum LoadError<E: std::error::Error + 'static> {
    /// The fetch failed; the loader is back to Idle with its state untouched.
    #[error("page fetch failed: {0}")]
    Fetch(#[source] E),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was merged.
    Merged { appended: usize },
    /// Another fetch was already in flight.
    AlreadyFetching,
    /// No further pages.
    Exhausted,
    /// The loader was reset while the fetch was in flight; the page was dropped.
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    Idle,
    Fetching,
    Exhausted,
}

#[derive(Debug)]
struct LoaderInner {
    collection: CollectionHandle,
    // Bumped on reset so late pages for a replaced collection are dropped.
    generation: u64,
    fetching: bool,
    state: PageState,
}

pub struct ProductLoader<F> {
    fetcher: F,
    inner: Mutex<LoaderInner>,
    state_tx: watch::Sender<PageState>,
}

impl<F: PageFetcher> ProductLoader<F> {
    pub fn new(collection: CollectionHandle, initial: PageState, fetcher: F) -> Self {
        let (state_tx, _rx) = watch::channel(initial.clone());
        Self {
            fetcher,
            inner: Mutex::new(LoaderInner {
                collection,
                generation: 0,
                fetching: false,
                state: initial,
            }),
            state_tx,
        }
    }

    fn lock(&self) -> MutexGuard<'_, LoaderInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current_state(&self) -> PageState {
        self.lock().state.clone()
    }

    pub fn collection(&self) -> CollectionHandle {
        self.lock().collection.clone()
    }

    /// Receiver that observes every merge and reset.
    pub fn subscribe(&self) -> watch::Receiver<PageState> {
        self.state_tx.subscribe()
    }

    pub fn phase(&self) -> LoaderPhase {
        let inner = self.lock();
        if inner.fetching {
            LoaderPhase::Fetching
        } else if !inner.state.has_next_page {
            LoaderPhase::Exhausted
        } else {
            LoaderPhase::Idle
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.lock().fetching
    }

    pub fn has_next_page(&self) -> bool {
        self.lock().state.has_next_page
    }

    pub fn is_empty(&self) -> bool {
        self.lock().state.is_empty()
    }

    /// Fetch the next page and append it.
    ///
    /// Suspends until the round-trip completes. No timeout is applied here;
    /// that belongs to the fetcher's transport.
    pub async fn load_next_page(&self) -> Result<LoadOutcome, LoadError<F::Error>> {
        let (cursor, generation) = {
            let mut inner = self.lock();
            if inner.fetching {
                return Ok(LoadOutcome::AlreadyFetching);
            }
            if !inner.state.has_next_page {
                return Ok(LoadOutcome::Exhausted);
            }
            let Some(cursor) = inner.state.end_cursor.clone() else {
                tracing::warn!(
                    collection = %inner.collection,
                    "next page advertised without an end cursor; treating as exhausted"
                );
                return Ok(LoadOutcome::Exhausted);
            };
            inner.fetching = true;
            (cursor, inner.generation)
        };

        let guard = FetchGuard {
            inner: &self.inner,
            generation,
            armed: true,
        };
        tracing::debug!(cursor = %cursor, "fetching next product page");
        let result = self.fetcher.fetch_page(&cursor).await;
        guard.disarm();

        let mut inner = self.lock();
        if inner.generation != generation {
            tracing::debug!(collection = %inner.collection, "discarding page fetched before reset");
            return Ok(LoadOutcome::Discarded);
        }
        inner.fetching = false;

        match result {
            Ok(page) => {
                let appended = inner.state.merge(page);
                tracing::debug!(
                    collection = %inner.collection,
                    appended,
                    total = inner.state.products.len(),
                    has_next_page = inner.state.has_next_page,
                    "merged product page"
                );
                self.state_tx.send_replace(inner.state.clone());
                Ok(LoadOutcome::Merged { appended })
            }
            Err(e) => {
                tracing::warn!(collection = %inner.collection, error = %e, "product page fetch failed");
                Err(LoadError::Fetch(e))
            }
        }
    }

    /// Reseed from a new server payload when the collection identity changed.
    ///
    /// Returns `true` when a reset happened.
    pub fn reset_if_changed(&self, collection: &CollectionHandle, initial: PageState) -> bool {
        {
            let inner = self.lock();
            if inner.collection == *collection {
                return false;
            }
        }
        self.reset(collection.clone(), initial);
        true
    }

    /// Unconditionally reseed (e.g. after navigating with new filters).
    pub fn reset(&self, collection: CollectionHandle, initial: PageState) {
        let mut inner = self.lock();
        inner.collection = collection;
        inner.generation += 1;
        inner.fetching = false;
        inner.state = initial;
        self.state_tx.send_replace(inner.state.clone());
    }
}

/// Returns the loader to Idle if a fetch future is dropped mid-flight.
struct FetchGuard<'a> {
    inner: &'a Mutex<LoaderInner>,
    generation: u64,
    armed: bool,
}

impl FetchGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.generation == self.generation {
            inner.fetching = false;
        }
    }
}
