//! Deck code decoding, enrichment and statistics.
//!
//! Data flows strictly forward:
//!
//! ```text
//! base64 string → bytes → DecodedDeck → enriched heroes/cards → DeckStatistics
//! ```

pub mod types;
pub mod format;
pub mod decoder;
pub mod enrich;
pub mod stats;
pub mod utils;

use log::info;
use types::models::DeckReport;
pub use decoder::{decode_deck_bytes, decode_deck_code};
pub use enrich::{CardLookup, ImageReference};
pub use types::error::{DeckError, DeckPhase, Result};

/// Decode a deck code and join it with catalog data.
///
/// Decoding errors abort before any lookup runs. Once the code decodes,
/// enrichment and statistics cannot fail.
///
/// # Errors
/// Returns the [`DeckError`] from [`decode_deck_code`].
pub async fn decode_and_enrich<L, I>(code: &str, lookup: &L, images: &I) -> Result<DeckReport>
where
    L: CardLookup,
    I: ImageReference,
{
    let deck = decode_deck_code(code)?;

    let heroes = enrich::enrich_heroes(&deck.heroes, lookup, images).await;
    let cards = enrich::enrich_cards(&deck, lookup, images).await;
    let statistics = stats::compute_statistics(&cards);

    info!(
        "Deck enriched: {} hero(es), {} unique entries, {} cards",
        heroes.len(),
        statistics.total_unique,
        statistics.total_cards
    );

    Ok(DeckReport {
        deck,
        heroes,
        cards,
        statistics,
    })
}
