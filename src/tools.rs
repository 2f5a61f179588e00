//! Tool adapter: named operations with JSON arguments, JSON text results.
//!
//! Every call returns a [`ToolResponse`]. Failures become a
//! `{"success": false, "error", "code"}` envelope with `isError` set; they
//! never escape as errors or panics.

use log::{error, info};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::catalog::{CardCatalog, CardSource, CatalogError, ImageTemplate};
use crate::deck::types::models::{
    CardRecord, DeckFormat, DeckStatistics, EnrichedCard, EnrichedHero,
};
use crate::deck::{self, DeckError};

pub const PARSE_DECK_CODE: &str = "parse_deck_code";
pub const SEARCH_CARDS: &str = "search_cards";
pub const GET_CARD_INFO: &str = "get_card_info";

pub const DEFAULT_SEARCH_LIMIT: u64 = 10;
pub const MAX_SEARCH_LIMIT: u64 = 50;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{0}")]
    InvalidArguments(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Failed to parse deck: {0}")]
    Deck(#[from] DeckError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Failed to serialize result: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Name, description and JSON Schema of one tool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    pub content: Vec<ToolContent>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResponse {
    fn text(envelope: Value, is_error: bool) -> Self {
        Self {
            content: vec![ToolContent {
                kind: "text",
                text: format!("{:#}", envelope),
            }],
            is_error,
        }
    }

    pub fn success(data: Value) -> Self {
        Self::text(json!({ "success": true, "data": data }), false)
    }

    pub fn failure(message: &str, code: &str) -> Self {
        Self::text(
            json!({ "success": false, "error": message, "code": code }),
            true,
        )
    }

    /// The envelope text of the first content item.
    pub fn envelope_text(&self) -> &str {
        self.content.first().map(|c| c.text.as_str()).unwrap_or_default()
    }
}

/// Descriptors for every tool, in a stable order.
pub fn list_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: PARSE_DECK_CODE,
            description: "Decode a Hearthstone deck code into heroes, cards with images, and deck statistics",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "deckCode": {
                        "type": "string",
                        "description": "Hearthstone deck code, e.g. AAECAZ8FBugE7QXUBfcF4gXtBQwBAfcC5wP5A/4D5wWJBpkH4wfXCOsE7QX3BQAA"
                    },
                    "includeStats": {
                        "type": "boolean",
                        "description": "Include mana curve, rarity, type and class statistics (default true)",
                        "default": true
                    }
                },
                "required": ["deckCode"]
            }),
        },
        ToolDescriptor {
            name: SEARCH_CARDS,
            description: "Search Hearthstone cards by name",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "cardName": {
                        "type": "string",
                        "description": "Card name or part of it (case-insensitive)"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of results (default 10)",
                        "default": DEFAULT_SEARCH_LIMIT,
                        "minimum": 1,
                        "maximum": MAX_SEARCH_LIMIT
                    }
                },
                "required": ["cardName"]
            }),
        },
        ToolDescriptor {
            name: GET_CARD_INFO,
            description: "Get a Hearthstone card by its card id",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "cardId": {
                        "type": "string",
                        "description": "Hearthstone card id, e.g. EX1_116"
                    }
                },
                "required": ["cardId"]
            }),
        },
    ]
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeckMeta<'a> {
    version: u8,
    format: DeckFormat,
    total_cards: u64,
    deck_code: &'a str,
}

#[derive(Serialize)]
struct DeckInfo<'a> {
    meta: DeckMeta<'a>,
    heroes: &'a [EnrichedHero],
    cards: &'a [EnrichedCard],
    #[serde(skip_serializing_if = "Option::is_none")]
    statistics: Option<&'a DeckStatistics>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CardWithImage<'a> {
    #[serde(flatten)]
    card: &'a CardRecord,
    image_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult<'a> {
    cards: Vec<CardWithImage<'a>>,
    total: usize,
    returned: usize,
    search_term: &'a str,
}

fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    args.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ToolError::InvalidArguments(format!("{} is required and must be a string", key)))
}

fn search_limit(args: &Value) -> Result<usize, ToolError> {
    match args.get("limit") {
        None | Some(Value::Null) => Ok(DEFAULT_SEARCH_LIMIT as usize),
        Some(value) => value
            .as_u64()
            .map(|n| n.clamp(1, MAX_SEARCH_LIMIT) as usize)
            .ok_or_else(|| ToolError::InvalidArguments("limit must be a positive integer".to_string())),
    }
}

/// Dispatches tool calls to the deck decoder and the card catalog.
#[derive(Debug)]
pub struct DeckTools<S> {
    catalog: CardCatalog<S>,
    images: ImageTemplate,
}

impl<S: CardSource + Send + Sync> DeckTools<S> {
    pub fn new(catalog: CardCatalog<S>, images: ImageTemplate) -> Self {
        Self { catalog, images }
    }

    /// Run a tool by name. Always returns a response envelope.
    pub async fn call_tool(&self, name: &str, args: &Value) -> ToolResponse {
        let (result, code) = match name {
            PARSE_DECK_CODE => (self.parse_deck_code(args).await, "DECK_PARSE_ERROR"),
            SEARCH_CARDS => (self.search_cards(args).await, "CARD_SEARCH_ERROR"),
            GET_CARD_INFO => (self.get_card_info(args).await, "CARD_INFO_ERROR"),
            other => (Err(ToolError::UnknownTool(other.to_string())), "UNKNOWN_TOOL"),
        };

        match result {
            Ok(data) => ToolResponse::success(data),
            Err(e) => {
                error!("Tool {} failed: {}", name, e);
                ToolResponse::failure(&e.to_string(), code)
            }
        }
    }

    /// `parse_deck_code {deckCode, includeStats = true}`
    pub async fn parse_deck_code(&self, args: &Value) -> Result<Value, ToolError> {
        let deck_code = required_str(args, "deckCode")?;
        let include_stats = args.get("includeStats").and_then(Value::as_bool).unwrap_or(true);

        let preview: String = deck_code.chars().take(20).collect();
        info!("Parsing deck code: {}...", preview);

        // An unreachable catalog should fail the call, not yield a deck of placeholders.
        self.catalog.ensure_loaded().await?;
        let report = deck::decode_and_enrich(deck_code, &self.catalog, &self.images).await?;

        let info = DeckInfo {
            meta: DeckMeta {
                version: report.deck.header.version,
                format: report.deck.header.format,
                total_cards: report.deck.total_cards(),
                deck_code,
            },
            heroes: &report.heroes,
            cards: &report.cards,
            statistics: include_stats.then_some(&report.statistics),
        };
        Ok(serde_json::to_value(&info)?)
    }

    /// `search_cards {cardName, limit = 10}`
    pub async fn search_cards(&self, args: &Value) -> Result<Value, ToolError> {
        let card_name = required_str(args, "cardName")?;
        let limit = search_limit(args)?;
        info!("Searching cards with name: {}", card_name);

        let found = self.catalog.search_cards_by_name(card_name).await?;
        let cards: Vec<CardWithImage<'_>> = found
            .iter()
            .take(limit)
            .map(|card| self.with_image(card))
            .collect();

        let result = SearchResult {
            total: found.len(),
            returned: cards.len(),
            cards,
            search_term: card_name,
        };
        Ok(serde_json::to_value(&result)?)
    }

    /// `get_card_info {cardId}`
    pub async fn get_card_info(&self, args: &Value) -> Result<Value, ToolError> {
        let card_id = required_str(args, "cardId")?;
        info!("Getting card info for ID: {}", card_id);

        let card = self
            .catalog
            .get_card_by_id(card_id)
            .await?
            .ok_or_else(|| ToolError::NotFound(format!("Card with ID {} not found", card_id)))?;
        Ok(serde_json::to_value(self.with_image(&card))?)
    }

    fn with_image<'a>(&self, card: &'a CardRecord) -> CardWithImage<'a> {
        CardWithImage {
            card,
            image_url: self.images.url_for(&card.id),
        }
    }
}
