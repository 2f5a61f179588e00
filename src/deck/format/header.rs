//! Deck code header parsing.
//!
//! ```text
//! [1 byte] Reserved (always 0 in codes produced by the game client)
//! [1 byte] Encoding version
//! [1 byte] Format code (1 = Wild, 2 = Standard)
//! ```

use byteorder::ReadBytesExt;
use log::{debug, warn};
use crate::deck::types::{
    error::{DeckError, DeckPhase, Result},
    models::{DeckFormat, DeckHeader},
};

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 3;

/// Parses the fixed header from the start of the decoded bytes.
///
/// # Returns
/// The header and the offset of the first byte after it.
pub fn parse(data: &[u8]) -> Result<(DeckHeader, usize)> {
    let mut reader = data;
    let mut next_byte = |offset: usize| {
        reader
            .read_u8()
            .map_err(|_| DeckError::TruncatedInput { phase: DeckPhase::Header, offset })
    };

    let reserved = next_byte(0)?;
    let version = next_byte(1)?;
    let format_code = next_byte(2)?;

    let format = DeckFormat::from_code(format_code);
    if let DeckFormat::Unknown(code) = format {
        warn!("Unrecognised deck format code {}, reporting as Unknown", code);
    }
    debug!(
        "Deck header: reserved={}, version={}, format={} ({})",
        reserved,
        version,
        format.label(),
        format_code
    );

    Ok((DeckHeader { reserved, version, format }, HEADER_LEN))
}
