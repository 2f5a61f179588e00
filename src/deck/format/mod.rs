//! Binary layout parsing for decoded deck codes.
//!
//! # Module Organization
//!
//! - [`header`]: The three fixed header bytes
//! - [`buckets`]: Hero list and the single/double/multiple card buckets
//! - [`cursor`]: The shared offset every phase advances
//!
//! ```text
//! ┌─────────────────┐
//! │  Header (3 B)   │ ← header::parse()
//! ├─────────────────┤
//! │  Heroes         │ ← buckets::read_heroes()
//! ├─────────────────┤
//! │  Singles        │
//! │  Doubles        │ ← buckets::read_cards()
//! │  Multiples      │
//! └─────────────────┘
//! ```

pub mod buckets;
pub mod cursor;
pub mod header;
