//! # Storage Layer
//!
//! The collection lives in memory inside a [`CoinStore`], which is the only
//! owner of the records. Persistence is delegated to a [`CollectionBackend`]
//! that reads and writes the whole collection at once.
//!
//! ## Implementations
//!
//! - [`fs::FileBackend`]: production backend, a single JSON file
//! - [`memory::MemBackend`]: in-memory backend for testing, with write-error
//!   simulation and a save counter
//!
//! ## Storage Format
//!
//! ```text
//! <vault>/
//! ├── the_coin_vault_collection.json   # JSON array of coin records
//! ├── config.json                      # Vault configuration (optional)
//! └── assets/coin_images/              # Imported coin images
//! ```
//!
//! The file is rewritten in full after every add, update and delete. It is
//! indented with four spaces and keeps non-ASCII text as-is, so it stays
//! readable and diffable by hand.

use crate::error::{Result, VaultError};
use crate::model::Coin;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub mod coin_store;
pub mod fs;
pub mod memory;

pub use coin_store::CoinStore;

/// Raw persistence for a whole collection.
pub trait CollectionBackend {
    /// Read the stored collection. `Ok(None)` means nothing has been stored
    /// yet, which is not an error.
    fn load(&self) -> Result<Option<Vec<Coin>>>;

    /// Replace the stored collection with `coins`.
    fn save(&self, coins: &[Coin]) -> Result<()>;

    /// Where the collection lives, for messages.
    fn location(&self) -> PathBuf;
}

/// Serialize a collection the way it is kept on disk.
pub fn encode(coins: &[Coin]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    coins.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

pub fn decode(path: &Path, content: &str) -> Result<Vec<Coin>> {
    serde_json::from_str(content).map_err(|source| VaultError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}
