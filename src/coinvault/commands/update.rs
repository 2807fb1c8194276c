use crate::commands::{keep_images_if, CmdMessage, CmdResult, ImageSources, VaultPaths};
use crate::config::VaultConfig;
use crate::error::Result;
use crate::model::FieldValues;
use crate::store::{CoinStore, CollectionBackend};

pub fn run<B: CollectionBackend>(
    store: &mut CoinStore<B>,
    paths: &VaultPaths,
    config: &VaultConfig,
    id: &str,
    mut changes: FieldValues,
    images: &ImageSources,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if store.find_by_id(id).is_none() {
        result.add_message(CmdMessage::warning(format!("No coin with code {}", id)));
        return Ok(result);
    }

    let imported = images.import_into(paths, config, &mut changes)?;
    if changes.is_empty() {
        result.add_message(CmdMessage::info("Nothing to update."));
        return Ok(result);
    }

    if keep_images_if(paths, &imported, store.update(id, &changes))? {
        if let Some(coin) = store.find_by_id(id) {
            result.affected_coins.push(coin);
        }
        result.add_message(CmdMessage::success(format!(
            "Coin updated ({} field(s)): {}",
            changes.len(),
            id
        )));
    }

    Ok(result)
}
