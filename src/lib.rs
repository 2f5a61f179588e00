//! # hearthstone-decks
//!
//! Decodes Hearthstone deck codes, joins them with card data from the
//! HearthstoneJSON catalog, and summarises the result as deck statistics.
//!
//! The decoder itself is synchronous and needs no catalog:
//!
//! ```
//! use hearthstone_decks::decode_deck_code;
//!
//! let deck = decode_deck_code("AAECAAEqAAEHBA==").unwrap();
//! assert_eq!(deck.format().label(), "Standard");
//! assert_eq!(deck.total_cards(), 5);
//! ```
pub mod catalog;
pub mod config;
pub mod deck;
pub mod server;
pub mod tools;

// Re-export the main types for convenience
pub use catalog::{CardCatalog, CardSource, CatalogError, ImageTemplate};
pub use deck::{
    decode_and_enrich,
    decode_deck_bytes,
    decode_deck_code,
    CardLookup,
    DeckError,
    DeckPhase,
    ImageReference,
    types::models::{
        CardCount,
        CardRecord,
        DeckFormat,
        DeckHeader,
        DeckReport,
        DeckStatistics,
        DecodedDeck,
        EnrichedCard,
        EnrichedHero,
    },
};
