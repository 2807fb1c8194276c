//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every client of the vault.
//!
//! It:
//! - **Dispatches** to the matching command function
//! - **Normalizes inputs**, turning `key=value` text into typed
//!   [`FieldValues`] and [`Criteria`]
//! - **Returns structured types** (`Result<CmdResult>`), never strings
//!
//! `VaultApi<B: CollectionBackend>` is generic over the storage backend:
//! production uses [`FileBackend`], tests use
//! [`MemBackend`](crate::store::memory::MemBackend).

use crate::commands::{self, ImageSources, VaultPaths};
use crate::config::VaultConfig;
use crate::error::{Result, VaultError};
use crate::model::{Field, FieldValues};
use crate::query::Criteria;
use crate::store::fs::FileBackend;
use crate::store::{CoinStore, CollectionBackend};

pub struct VaultApi<B: CollectionBackend> {
    store: CoinStore<B>,
    paths: VaultPaths,
    config: VaultConfig,
}

impl VaultApi<FileBackend> {
    /// Open the vault at `paths`: read its config, then its collection.
    pub fn open(paths: VaultPaths) -> Result<Self> {
        let config = VaultConfig::load(&paths.root)?;
        let backend = FileBackend::new(paths.data_file(&config));
        let store = CoinStore::open(backend)?;
        Ok(Self::new(store, paths, config))
    }
}

impl<B: CollectionBackend> VaultApi<B> {
    pub fn new(store: CoinStore<B>, paths: VaultPaths, config: VaultConfig) -> Self {
        Self {
            store,
            paths,
            config,
        }
    }

    pub fn add_coin<I: AsRef<str>>(
        &mut self,
        assignments: &[I],
        images: &ImageSources,
    ) -> Result<commands::CmdResult> {
        let values = parse_assignments(assignments)?;
        commands::add::run(&mut self.store, &self.paths, &self.config, values, images)
    }

    pub fn view_coin(&self, id: &str) -> Result<commands::CmdResult> {
        commands::view::run(&self.store, id)
    }

    pub fn list_coins(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    /// Free-text search over the configured search fields.
    pub fn search_coins(&self, text: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.store, &self.config.search_fields, text)
    }

    /// Strict search where every `key=text` criterion must match.
    pub fn search_where<I: AsRef<str>>(&self, criteria: &[I]) -> Result<commands::CmdResult> {
        let criteria = parse_criteria(criteria)?;
        commands::search::run_criteria(&self.store, &criteria)
    }

    pub fn update_coin<I: AsRef<str>>(
        &mut self,
        id: &str,
        assignments: &[I],
        images: &ImageSources,
    ) -> Result<commands::CmdResult> {
        let changes = parse_assignments(assignments)?;
        commands::update::run(
            &mut self.store,
            &self.paths,
            &self.config,
            id,
            changes,
            images,
        )
    }

    pub fn delete_coin(&mut self, id: &str) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, id)
    }

    pub fn statistics(&self) -> Result<commands::CmdResult> {
        commands::stats::run(&self.store)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        configure(&self.paths, action)
    }

    pub fn paths(&self) -> &VaultPaths {
        &self.paths
    }

    pub fn store(&self) -> &CoinStore<B> {
        &self.store
    }
}

/// Show or change the vault configuration. Needs only the vault location,
/// so it works even when the collection file cannot be loaded.
pub fn configure(paths: &VaultPaths, action: ConfigAction) -> Result<commands::CmdResult> {
    commands::config::run(paths, action)
}

fn split_assignment(input: &str) -> Result<(Field, &str)> {
    let (key, value) = input.split_once('=').ok_or_else(|| {
        VaultError::Api(format!("Expected key=value, got '{}'", input))
    })?;
    Ok((key.parse()?, value))
}

/// Parse `key=value` pairs into typed values, validating each one against
/// its field.
pub fn parse_assignments<I: AsRef<str>>(inputs: &[I]) -> Result<FieldValues> {
    let mut values = FieldValues::new();
    for input in inputs {
        let (field, text) = split_assignment(input.as_ref())?;
        if field == Field::UniqueId {
            return Err(VaultError::Validation(
                "unique_id is assigned by the store and cannot be set".to_string(),
            ));
        }
        values.set(field, field.parse_value(text)?);
    }
    Ok(values)
}

/// Parse `key=text` pairs into search criteria. The text is kept verbatim.
pub fn parse_criteria<I: AsRef<str>>(inputs: &[I]) -> Result<Criteria> {
    let mut criteria = Criteria::new();
    for input in inputs {
        let (field, text) = split_assignment(input.as_ref())?;
        criteria.add(field, text);
    }
    Ok(criteria)
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
