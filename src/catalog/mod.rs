//! Card catalog: the full card list, cached and indexed by both id schemes.
//!
//! The list is fetched from a [`CardSource`] on first use and again once the
//! configured time-to-live has elapsed since the last successful fetch.

pub mod error;
pub mod image;
pub mod source;

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use log::{debug, info, warn};
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::deck::enrich::CardLookup;
use crate::deck::types::models::CardRecord;
pub use error::{CatalogError, Result};
pub use image::ImageTemplate;
pub use source::{CardSource, ConfiguredSource, FileSource, HttpSource, StaticSource};

/// Default refresh interval, matching the card API's daily publishing.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// One fetched card list, indexed twice.
#[derive(Debug)]
struct CardIndex {
    by_id: HashMap<String, Arc<CardRecord>>,
    by_dbf_id: HashMap<u32, Arc<CardRecord>>,
    fetched_at: Instant,
}

impl CardIndex {
    fn build(cards: Vec<CardRecord>) -> Self {
        let mut by_id = HashMap::with_capacity(cards.len());
        let mut by_dbf_id = HashMap::with_capacity(cards.len());
        for card in cards {
            let card = Arc::new(card);
            if let Some(dbf_id) = card.dbf_id {
                by_dbf_id.insert(dbf_id, Arc::clone(&card));
            }
            if !card.id.is_empty() {
                by_id.insert(card.id.clone(), card);
            }
        }
        Self {
            by_id,
            by_dbf_id,
            fetched_at: Instant::now(),
        }
    }
}

/// Cached, dual-indexed view over a [`CardSource`].
#[derive(Debug)]
pub struct CardCatalog<S> {
    source: S,
    ttl: Duration,
    cache: Mutex<Option<Arc<CardIndex>>>,
}

impl<S: CardSource + Sync> CardCatalog<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            cache: Mutex::new(None),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current index, refetching first if it is missing or stale.
    ///
    /// The lock is held across the fetch so concurrent callers share one
    /// request.
    async fn index(&self) -> Result<Arc<CardIndex>> {
        let mut cache = self.cache.lock().await;
        if let Some(index) = cache.as_ref() {
            if index.fetched_at.elapsed() < self.ttl {
                return Ok(Arc::clone(index));
            }
            debug!("Card cache expired after {:?}, refreshing", self.ttl);
        }

        let cards = self.source.fetch_all().await.map_err(|e| {
            warn!("Error fetching card data from {}: {}", self.source.describe(), e);
            e
        })?;
        if cards.is_empty() {
            return Err(CatalogError::Unavailable(format!(
                "{} returned no cards",
                self.source.describe()
            )));
        }

        let index = Arc::new(CardIndex::build(cards));
        info!(
            "Loaded {} cards ({} with database ids) from {}",
            index.by_id.len(),
            index.by_dbf_id.len(),
            self.source.describe()
        );
        *cache = Some(Arc::clone(&index));
        Ok(index)
    }

    /// Make sure a fresh card list is loaded, surfacing fetch failures.
    pub async fn ensure_loaded(&self) -> Result<()> {
        self.index().await.map(|_| ())
    }

    /// Number of cards indexed by stable id.
    pub async fn len(&self) -> Result<usize> {
        Ok(self.index().await?.by_id.len())
    }

    pub async fn get_card_by_id(&self, card_id: &str) -> Result<Option<CardRecord>> {
        let index = self.index().await?;
        Ok(index.by_id.get(card_id).map(|card| card.as_ref().clone()))
    }

    pub async fn get_card_by_dbf_id(&self, dbf_id: u32) -> Result<Option<CardRecord>> {
        let index = self.index().await?;
        Ok(index.by_dbf_id.get(&dbf_id).map(|card| card.as_ref().clone()))
    }

    /// Look up several stable ids; unknown ids are skipped, order is kept.
    pub async fn get_cards_by_ids<T: AsRef<str>>(&self, card_ids: &[T]) -> Result<Vec<CardRecord>> {
        let index = self.index().await?;
        Ok(card_ids
            .iter()
            .filter_map(|id| index.by_id.get(id.as_ref()))
            .map(|card| card.as_ref().clone())
            .collect())
    }

    /// Look up several database ids; unknown ids are skipped, order is kept.
    pub async fn get_cards_by_dbf_ids(&self, dbf_ids: &[u32]) -> Result<Vec<CardRecord>> {
        let index = self.index().await?;
        Ok(dbf_ids
            .iter()
            .filter_map(|id| index.by_dbf_id.get(id))
            .map(|card| card.as_ref().clone())
            .collect())
    }

    /// Case-insensitive substring search over card names, sorted by id.
    pub async fn search_cards_by_name(&self, name: &str) -> Result<Vec<CardRecord>> {
        let index = self.index().await?;
        let needle = name.to_lowercase();
        let mut found: Vec<CardRecord> = index
            .by_id
            .values()
            .filter(|card| !card.name.is_empty() && card.name.to_lowercase().contains(&needle))
            .map(|card| card.as_ref().clone())
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(found)
    }
}

impl<S: CardSource + Send + Sync> CardLookup for CardCatalog<S> {
    fn lookup_by_database_id(&self, dbf_id: u32) -> impl Future<Output = Option<CardRecord>> + Send {
        async move {
            match self.get_card_by_dbf_id(dbf_id).await {
                Ok(card) => card,
                Err(e) => {
                    warn!("Card catalog lookup for DBF ID {} failed: {}", dbf_id, e);
                    None
                }
            }
        }
    }
}
