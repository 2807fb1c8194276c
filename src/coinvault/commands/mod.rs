use crate::config::VaultConfig;
use crate::error::Result;
use crate::images::{discard_images, import_image};
use crate::model::{Coin, Field, FieldValues};
use crate::stats::Statistics;
use std::path::{Path, PathBuf};

pub mod add;
pub mod config;
pub mod delete;
pub mod list;
pub mod search;
pub mod stats;
pub mod update;
pub mod view;

/// Where a vault lives on disk.
#[derive(Debug, Clone)]
pub struct VaultPaths {
    pub root: PathBuf,
}

impl VaultPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn data_file(&self, config: &VaultConfig) -> PathBuf {
        self.root.join(&config.data_file)
    }

    pub fn images_dir(&self, config: &VaultConfig) -> PathBuf {
        self.root.join(&config.images_dir)
    }
}

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_coins: Vec<Coin>,
    pub listed_coins: Vec<Coin>,
    pub statistics: Option<Statistics>,
    pub config: Option<VaultConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_coins(mut self, coins: Vec<Coin>) -> Self {
        self.affected_coins = coins;
        self
    }

    pub fn with_listed_coins(mut self, coins: Vec<Coin>) -> Self {
        self.listed_coins = coins;
        self
    }

    pub fn with_statistics(mut self, statistics: Statistics) -> Self {
        self.statistics = Some(statistics);
        self
    }

    pub fn with_config(mut self, config: VaultConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Image files chosen for a coin, before they are copied into the vault.
#[derive(Debug, Clone, Default)]
pub struct ImageSources {
    pub obverse: Option<PathBuf>,
    pub reverse: Option<PathBuf>,
    pub flag: Option<PathBuf>,
    pub shield: Option<PathBuf>,
}

impl ImageSources {
    pub fn is_empty(&self) -> bool {
        self.slots().iter().all(|(_, p)| p.is_none())
    }

    fn slots(&self) -> [(Field, Option<&Path>); 4] {
        [
            (Field::ObverseImagePath, self.obverse.as_deref()),
            (Field::ReverseImagePath, self.reverse.as_deref()),
            (Field::FlagImagePath, self.flag.as_deref()),
            (Field::ShieldImagePath, self.shield.as_deref()),
        ]
    }

    /// Copy every chosen image into the vault and record its stored path in
    /// `values`. Returns the stored paths. If any copy fails, the ones
    /// already made are removed.
    pub fn import_into(
        &self,
        paths: &VaultPaths,
        config: &VaultConfig,
        values: &mut FieldValues,
    ) -> Result<Vec<String>> {
        let mut imported = Vec::new();
        for (field, source) in self.slots() {
            if let Some(source) = source {
                match import_image(&paths.root, &config.images_dir, source) {
                    Ok(stored) => {
                        values.set(field, stored.clone());
                        imported.push(stored);
                    }
                    Err(e) => {
                        discard_images(&paths.root, &imported);
                        return Err(e);
                    }
                }
            }
        }
        Ok(imported)
    }
}

/// Pass `outcome` through, removing the freshly imported images if it is an
/// error so no copy is left without a record.
pub(crate) fn keep_images_if<T>(
    paths: &VaultPaths,
    imported: &[String],
    outcome: Result<T>,
) -> Result<T> {
    if outcome.is_err() {
        discard_images(&paths.root, imported);
    }
    outcome
}
