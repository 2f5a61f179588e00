//! Hero and card bucket parsing.
//!
//! After the header, a deck code holds four varint-prefixed lists:
//!
//! ```text
//! heroes:    N, id × N
//! singles:   N, id × N            (count 1 each)
//! doubles:   N, id × N            (count 2 each)
//! multiples: N, (id, count) × N
//! ```

use log::debug;
use crate::deck::types::{
    error::{DeckPhase, Result},
    models::CardCount,
};
use super::cursor::DeckCursor;

/// The three card buckets, which differ only in where the count comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketKind {
    Single,
    Double,
    Multiple,
}

impl BucketKind {
    /// Card buckets in the order they appear in a deck code.
    pub const ALL: [BucketKind; 3] = [BucketKind::Single, BucketKind::Double, BucketKind::Multiple];

    pub fn phase(&self) -> DeckPhase {
        match self {
            BucketKind::Single => DeckPhase::Singles,
            BucketKind::Double => DeckPhase::Doubles,
            BucketKind::Multiple => DeckPhase::Multiples,
        }
    }

    /// The implied count, or `None` when each entry carries its own.
    pub fn fixed_count(&self) -> Option<u32> {
        match self {
            BucketKind::Single => Some(1),
            BucketKind::Double => Some(2),
            BucketKind::Multiple => None,
        }
    }

    /// Read one entry of this bucket: the id, then the count if explicit.
    pub fn read_entry(&self, cursor: &mut DeckCursor<'_>) -> Result<CardCount> {
        let phase = self.phase();
        let dbf_id = cursor.read_varint(phase)?;
        let count = match self.fixed_count() {
            Some(count) => count,
            None => cursor.read_varint(phase)?,
        };
        Ok(CardCount { dbf_id, count })
    }
}

/// Reads the hero list.
pub fn read_heroes(cursor: &mut DeckCursor<'_>) -> Result<Vec<u32>> {
    let (num_heroes, capacity) = cursor.read_count(DeckPhase::Heroes)?;
    let mut heroes = Vec::with_capacity(capacity);
    for _ in 0..num_heroes {
        heroes.push(cursor.read_varint(DeckPhase::Heroes)?);
    }
    debug!("Read {} hero(es)", heroes.len());
    Ok(heroes)
}

/// Reads one card bucket.
pub fn read_bucket(cursor: &mut DeckCursor<'_>, kind: BucketKind) -> Result<Vec<CardCount>> {
    let (num_cards, capacity) = cursor.read_count(kind.phase())?;
    let mut cards = Vec::with_capacity(capacity);
    for _ in 0..num_cards {
        cards.push(kind.read_entry(cursor)?);
    }
    debug!("Read {} {} entr(ies)", cards.len(), kind.phase());
    Ok(cards)
}

/// Reads all three card buckets and concatenates them in layout order.
pub fn read_cards(cursor: &mut DeckCursor<'_>) -> Result<Vec<CardCount>> {
    let mut cards = Vec::new();
    for kind in BucketKind::ALL {
        cards.extend(read_bucket(cursor, kind)?);
    }
    Ok(cards)
}
