use crate::commands::{CmdMessage, CmdResult, VaultPaths};
use crate::config::VaultConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &VaultPaths, action: ConfigAction) -> Result<CmdResult> {
    let mut config = VaultConfig::load(&paths.root)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {}
        ConfigAction::ShowKey(key) => {
            let value = config.get(&key)?;
            result.add_message(CmdMessage::info(format!("{} = {}", key, value)));
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(&paths.root)?;
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key,
                config.get(&key)?
            )));
        }
    }

    Ok(result.with_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_persists_to_the_vault() {
        let dir = tempfile::tempdir().unwrap();
        let paths = VaultPaths::new(dir.path());

        run(
            &paths,
            ConfigAction::Set("data-file".into(), "coins.json".into()),
        )
        .unwrap();

        let result = run(&paths, ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config.unwrap().data_file, "coins.json");
    }

    #[test]
    fn show_unknown_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        let paths = VaultPaths::new(dir.path());
        assert!(run(&paths, ConfigAction::ShowKey("colour".into())).is_err());
    }
}
