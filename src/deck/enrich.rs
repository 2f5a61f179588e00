//! Joins decoded ids with catalog records.
//!
//! Lookups run one at a time in deck order. A miss never fails the deck: the
//! id is replaced by a [`CardRecord::placeholder`].

use std::future::Future;
use log::{debug, warn};
use super::types::models::{CardRecord, DecodedDeck, EnrichedCard, EnrichedHero};

/// Resolves a numeric database id to a catalog record.
pub trait CardLookup {
    fn lookup_by_database_id(&self, dbf_id: u32) -> impl Future<Output = Option<CardRecord>> + Send;
}

/// Produces the image reference for a card's stable id.
pub trait ImageReference {
    fn image_reference_for(&self, stable_id: &str) -> String;
}

impl<F> ImageReference for F
where
    F: Fn(&str) -> String,
{
    fn image_reference_for(&self, stable_id: &str) -> String {
        self(stable_id)
    }
}

async fn resolve<L: CardLookup>(lookup: &L, dbf_id: u32) -> CardRecord {
    match lookup.lookup_by_database_id(dbf_id).await {
        Some(record) => record,
        None => {
            warn!("Card with DBF ID {} not found in catalog, using placeholder", dbf_id);
            CardRecord::placeholder(dbf_id)
        }
    }
}

/// Enrich every hero id, in order.
pub async fn enrich_heroes<L, I>(hero_ids: &[u32], lookup: &L, images: &I) -> Vec<EnrichedHero>
where
    L: CardLookup,
    I: ImageReference,
{
    let mut heroes = Vec::with_capacity(hero_ids.len());
    for &dbf_id in hero_ids {
        let record = resolve(lookup, dbf_id).await;
        let image_url = images.image_reference_for(&record.id);
        heroes.push(EnrichedHero { record, image_url });
    }
    heroes
}

/// Enrich every card entry, in order, carrying its decoded count through.
pub async fn enrich_cards<L, I>(deck: &DecodedDeck, lookup: &L, images: &I) -> Vec<EnrichedCard>
where
    L: CardLookup,
    I: ImageReference,
{
    let mut cards = Vec::with_capacity(deck.cards.len());
    for entry in &deck.cards {
        let record = resolve(lookup, entry.dbf_id).await;
        let image_url = images.image_reference_for(&record.id);
        cards.push(EnrichedCard {
            record,
            count: entry.count,
            image_url,
        });
    }

    let misses = cards.iter().filter(|c| c.record.is_placeholder()).count();
    debug!("Enriched {} card entries ({} placeholder)", cards.len(), misses);
    cards
}
