use super::{decode, encode, CollectionBackend};
use crate::error::{Result, VaultError};
use crate::model::Coin;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

const MEMORY_LOCATION: &str = "memory://collection.json";

/// In-memory backend for testing.
///
/// Holds the encoded JSON exactly as the file backend would write it, so
/// round trips go through the same serialization. Uses `RefCell` since the
/// store is single-threaded.
#[derive(Default)]
pub struct MemBackend {
    content: RefCell<Option<String>>,
    saves: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from raw stored text, e.g. to simulate a corrupt file.
    pub fn with_content(content: &str) -> Self {
        let backend = Self::default();
        *backend.content.borrow_mut() = Some(content.to_string());
        backend
    }

    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// How many times the collection has been written.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn content(&self) -> Option<String> {
        self.content.borrow().clone()
    }
}

impl CollectionBackend for MemBackend {
    fn load(&self) -> Result<Option<Vec<Coin>>> {
        match self.content.borrow().as_deref() {
            None => Ok(None),
            Some(text) => decode(&self.location(), text).map(Some),
        }
    }

    fn save(&self, coins: &[Coin]) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(VaultError::Storage {
                path: self.location(),
                source: std::io::Error::other("Simulated write error"),
            });
        }
        let bytes = encode(coins)?;
        let text = String::from_utf8(bytes).map_err(|e| VaultError::Storage {
            path: self.location(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;
        *self.content.borrow_mut() = Some(text);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from(MEMORY_LOCATION)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Field, FieldValues};
    use crate::store::CoinStore;

    pub struct StoreFixture {
        pub store: CoinStore<MemBackend>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: CoinStore::new(MemBackend::new()),
            }
        }

        pub fn with_coin(mut self, country: &str, year: i64, coin_type: &str) -> Self {
            let values = FieldValues::new()
                .with(Field::IssuingCountry, country)
                .with(Field::MintYear, year)
                .with(Field::CoinType, coin_type);
            self.store.add(&values).unwrap();
            self
        }

        pub fn with_values(mut self, values: FieldValues) -> Self {
            self.store.add(&values).unwrap();
            self
        }
    }
}
