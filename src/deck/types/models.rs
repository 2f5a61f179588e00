//! Data structures for decoded decks, catalog records and deck statistics.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Number of mana curve buckets (costs 0 through 10).
pub const MANA_CURVE_BUCKETS: usize = 11;

/// Game format carried in the deck code header.
///
/// Format codes outside the known set are kept verbatim rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeckFormat {
    Wild,
    Standard,
    Unknown(u8),
}

impl DeckFormat {
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => DeckFormat::Wild,
            2 => DeckFormat::Standard,
            other => DeckFormat::Unknown(other),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            DeckFormat::Wild => 1,
            DeckFormat::Standard => 2,
            DeckFormat::Unknown(code) => *code,
        }
    }

    /// Human-readable label: `"Wild"`, `"Standard"` or `"Unknown"`.
    pub fn label(&self) -> &'static str {
        match self {
            DeckFormat::Wild => "Wild",
            DeckFormat::Standard => "Standard",
            DeckFormat::Unknown(_) => "Unknown",
        }
    }
}

impl Serialize for DeckFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// The three fixed bytes at the start of every deck code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeckHeader {
    pub reserved: u8,
    pub version: u8,
    pub format: DeckFormat,
}

/// One decoded `(database id, quantity)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardCount {
    #[serde(rename = "id")]
    pub dbf_id: u32,
    pub count: u32,
}

/// Structural result of decoding a deck code, before any catalog lookups.
///
/// Cards are ordered singles, then doubles, then multiples, each bucket in
/// the order it appears in the code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedDeck {
    pub header: DeckHeader,
    pub heroes: Vec<u32>,
    pub cards: Vec<CardCount>,
}

impl DecodedDeck {
    /// Sum of every card's count.
    pub fn total_cards(&self) -> u64 {
        self.cards.iter().map(|c| u64::from(c.count)).sum()
    }

    pub fn format(&self) -> DeckFormat {
        self.header.format
    }
}

/// A card as published by the card catalog.
///
/// Only the fields the decoder and statistics need are modelled; everything
/// else in the catalog entry is carried through `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    /// Stable textual id, e.g. `"EX1_116"`. Empty when the catalog entry has none.
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbf_id: Option<u32>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_class: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CardRecord {
    /// Stand-in for a database id the catalog does not know.
    pub fn placeholder(dbf_id: u32) -> Self {
        Self {
            id: format!("UNKNOWN_{}", dbf_id),
            dbf_id: Some(dbf_id),
            name: format!("Unknown Card (DBF ID: {})", dbf_id),
            cost: None,
            rarity: None,
            card_type: None,
            card_class: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id.starts_with("UNKNOWN_") && self.extra.is_empty()
    }
}

/// A hero reference joined with its catalog record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedHero {
    #[serde(flatten)]
    pub record: CardRecord,
    pub image_url: String,
}

/// A decoded card joined with its catalog record, keeping the decoded count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedCard {
    #[serde(flatten)]
    pub record: CardRecord,
    pub count: u32,
    pub image_url: String,
}

/// Aggregate view over the enriched cards of a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckStatistics {
    pub total_cards: u64,
    /// One per enriched card entry; repeated ids are not merged.
    pub total_unique: usize,
    /// Card counts by mana cost, index 0..=10. Costs above 10 are left out.
    pub mana_curve: [u64; MANA_CURVE_BUCKETS],
    pub rarities: BTreeMap<String, u64>,
    pub card_types: BTreeMap<String, u64>,
    pub classes: BTreeMap<String, u64>,
}

/// Everything `decode_and_enrich` produces for one deck code.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckReport {
    pub deck: DecodedDeck,
    pub heroes: Vec<EnrichedHero>,
    pub cards: Vec<EnrichedCard>,
    pub statistics: DeckStatistics,
}
