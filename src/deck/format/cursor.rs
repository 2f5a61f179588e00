//! Offset-tracking reader shared by every decode phase.

use log::trace;
use crate::deck::types::error::{DeckError, DeckPhase, Result};
use crate::deck::utils::{self, VarintError};

/// A single forward-only offset into the decoded deck bytes.
#[derive(Debug)]
pub struct DeckCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> DeckCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Start reading at `offset`, e.g. just past the header.
    pub fn at(data: &'a [u8], offset: usize) -> Self {
        Self { data, offset }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Read one varint, attributing failures to `phase`.
    pub fn read_varint(&mut self, phase: DeckPhase) -> Result<u32> {
        let start = self.offset;
        match utils::read_varint(self.data, start) {
            Ok((value, next)) => {
                trace!("{}: varint {} at bytes {}..{}", phase, value, start, next);
                self.offset = next;
                Ok(value)
            }
            Err(VarintError::Truncated) => Err(DeckError::TruncatedInput { phase, offset: start }),
            Err(VarintError::Overflow) => Err(DeckError::VarintOverflow { phase, offset: start }),
        }
    }

    /// Read a varint element count.
    ///
    /// Every element takes at least one byte, so the returned capacity hint is
    /// capped by the bytes left. A hostile count cannot force a huge allocation.
    pub fn read_count(&mut self, phase: DeckPhase) -> Result<(u32, usize)> {
        let count = self.read_varint(phase)?;
        let capacity = (count as usize).min(self.remaining());
        Ok((count, capacity))
    }
}
