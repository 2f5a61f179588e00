//! Deck code decoding orchestration (base64 + binary layout).

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use log::{debug, info, trace};
use super::format::{buckets, cursor::DeckCursor, header};
use super::types::{
    error::{DeckError, Result},
    models::DecodedDeck,
};
use super::utils;

/// Standard alphabet, padding optional. Deck codes are shared both with and
/// without trailing `=`.
pub const DECK_CODE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode a deck code string into its structural form.
///
/// Process:
/// 1. Base64-decode the code, ignoring surrounding ASCII whitespace
/// 2. Parse the header
/// 3. Parse heroes, then the single, double and multiple buckets
///
/// # Errors
/// - [`DeckError::MalformedEncoding`] if the code is not base64
/// - [`DeckError::TruncatedInput`] if the bytes end inside any field
/// - [`DeckError::VarintOverflow`] if an id or count exceeds 32 bits
pub fn decode_deck_code(code: &str) -> Result<DecodedDeck> {
    // The cleaned form is for logs only; see `utils::strip_code_prefix`.
    trace!("Deck code body without prefix: {:?}", utils::strip_code_prefix(code));

    let body = code.trim_matches(|c: char| c.is_ascii_whitespace());
    let bytes = DECK_CODE_ENGINE
        .decode(body)
        .map_err(|e| DeckError::MalformedEncoding(e.to_string()))?;
    debug!("Deck code decoded to {} bytes", bytes.len());

    decode_deck_bytes(&bytes)
}

/// Parse an already base64-decoded deck code.
pub fn decode_deck_bytes(bytes: &[u8]) -> Result<DecodedDeck> {
    let (header, body_offset) = header::parse(bytes)?;

    let mut cursor = DeckCursor::at(bytes, body_offset);
    let heroes = buckets::read_heroes(&mut cursor)?;
    let cards = buckets::read_cards(&mut cursor)?;

    if cursor.remaining() > 0 {
        debug!(
            "Ignoring {} trailing byte(s) after the multiples bucket",
            cursor.remaining()
        );
    }

    let deck = DecodedDeck { header, heroes, cards };
    info!(
        "Decoded {} deck: {} hero(es), {} card entries, {} cards total",
        deck.format().label(),
        deck.heroes.len(),
        deck.cards.len(),
        deck.total_cards()
    );
    Ok(deck)
}
