//! Error types for deck code decoding.

use std::fmt;
use thiserror::Error;

/// The stage of the binary layout being read when decoding stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeckPhase {
    /// Reserved, version and format bytes.
    Header,
    Heroes,
    Singles,
    Doubles,
    Multiples,
}

impl DeckPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeckPhase::Header => "header",
            DeckPhase::Heroes => "heroes",
            DeckPhase::Singles => "singles",
            DeckPhase::Doubles => "doubles",
            DeckPhase::Multiples => "multiples",
        }
    }
}

impl fmt::Display for DeckPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The primary error type for deck code decoding.
///
/// Decoding either yields a complete deck or one of these; there is no
/// partially decoded result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    /// The deck code is not valid base64.
    #[error("Malformed deck code encoding: {0}")]
    MalformedEncoding(String),

    /// A field read ran past the end of the decoded bytes.
    #[error("Truncated deck code: input ended while reading {phase} at byte {offset}")]
    TruncatedInput { phase: DeckPhase, offset: usize },

    /// A variable-length integer did not fit in 32 bits.
    #[error("Invalid deck code: variable-length integer in {phase} at byte {offset} overflows 32 bits")]
    VarintOverflow { phase: DeckPhase, offset: usize },
}

impl DeckError {
    /// The decode phase the error was raised in, if any.
    pub fn phase(&self) -> Option<DeckPhase> {
        match self {
            DeckError::MalformedEncoding(_) => None,
            DeckError::TruncatedInput { phase, .. } | DeckError::VarintOverflow { phase, .. } => {
                Some(*phase)
            }
        }
    }
}

/// A convenience `Result` type alias using the crate's `DeckError` type.
pub type Result<T> = std::result::Result<T, DeckError>;
