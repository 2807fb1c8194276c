use crate::error::{Result, VaultError};
use crate::model::Field;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_DATA_FILE: &str = "the_coin_vault_collection.json";
pub const DEFAULT_IMAGES_DIR: &str = "assets/coin_images";

/// Configuration for a vault, stored in `<vault>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VaultConfig {
    /// Collection file name, relative to the vault directory
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Where imported coin images are copied, relative to the vault directory
    #[serde(default = "default_images_dir")]
    pub images_dir: String,

    /// Fields the free-text search looks at
    #[serde(default = "default_search_fields")]
    pub search_fields: Vec<Field>,
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_images_dir() -> String {
    DEFAULT_IMAGES_DIR.to_string()
}

fn default_search_fields() -> Vec<Field> {
    vec![
        Field::IssuingCountry,
        Field::MintYear,
        Field::CoinType,
        Field::FaceValue,
        Field::CurrencyUnit,
        Field::Composition,
        Field::Condition,
        Field::MintMark,
        Field::Edge,
    ]
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            images_dir: default_images_dir(),
            search_fields: default_search_fields(),
        }
    }
}

/// Keys accepted by `coinvault config`.
pub const CONFIG_KEYS: [&str; 3] = ["data-file", "images-dir", "search-fields"];

impl VaultConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: VaultConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    /// Current value of a config key, rendered for display.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "data-file" => Ok(self.data_file.clone()),
            "images-dir" => Ok(self.images_dir.clone()),
            "search-fields" => Ok(self
                .search_fields
                .iter()
                .map(|f| f.key())
                .collect::<Vec<_>>()
                .join(",")),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "data-file" => self.data_file = non_empty(key, value)?,
            "images-dir" => self.images_dir = non_empty(key, value)?,
            "search-fields" => {
                let fields = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| s.parse::<Field>())
                    .collect::<Result<Vec<Field>>>()?;
                if fields.is_empty() {
                    return Err(VaultError::Validation(
                        "search-fields needs at least one field".to_string(),
                    ));
                }
                self.search_fields = fields;
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn non_empty(key: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(VaultError::Validation(format!("{} cannot be empty", key)));
    }
    Ok(value.to_string())
}

fn unknown_key(key: &str) -> VaultError {
    VaultError::Api(format!(
        "Unknown config key: {} (expected one of {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VaultConfig::default();
        assert_eq!(config.data_file, "the_coin_vault_collection.json");
        assert_eq!(config.search_fields.len(), 9);
    }

    #[test]
    fn test_set_search_fields() {
        let mut config = VaultConfig::default();
        config.set("search-fields", "country, type,ceca").unwrap();
        assert_eq!(
            config.search_fields,
            vec![Field::IssuingCountry, Field::CoinType, Field::MintMark]
        );
        assert_eq!(config.get("search-fields").unwrap(), "issuing_country,type,mint_mark");
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = VaultConfig::default();
        assert!(config.set("search-fields", "nope").is_err());
        assert!(config.set("search-fields", " , ").is_err());
        assert!(config.set("data-file", "  ").is_err());
        assert!(config.set("colour", "red").is_err());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = VaultConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, VaultConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();

        let mut config = VaultConfig::default();
        config.set("images-dir", "pictures").unwrap();
        config.save(temp_dir.path()).unwrap();

        let loaded = VaultConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.images_dir, "pictures");
        assert_eq!(loaded.search_fields, config.search_fields);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{"data_file": "mine.json"}"#,
        )
        .unwrap();

        let loaded = VaultConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.data_file, "mine.json");
        assert_eq!(loaded.images_dir, DEFAULT_IMAGES_DIR);
    }
}
