//! Romanized-to-Tamil phonetic table.
//!
//! Loads a TOML `[mappings]` table of romanized key sequences to Tamil
//! grapheme clusters, validates it, and builds the reverse lookup used
//! to derive the keystroke sequence for a Tamil target string.

mod config;
mod invert;
mod table;

pub use config::{parse_phonetic_toml, TableError};
pub use invert::invert_phonetic_map;
pub use table::{PhoneticTable, DEFAULT_TABLE_TOML};
