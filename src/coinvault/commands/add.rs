use crate::commands::{keep_images_if, CmdMessage, CmdResult, ImageSources, VaultPaths};
use crate::config::VaultConfig;
use crate::error::{Result, VaultError};
use crate::model::FieldValues;
use crate::store::{CoinStore, CollectionBackend};

pub fn run<B: CollectionBackend>(
    store: &mut CoinStore<B>,
    paths: &VaultPaths,
    config: &VaultConfig,
    mut values: FieldValues,
    images: &ImageSources,
) -> Result<CmdResult> {
    let imported = images.import_into(paths, config, &mut values)?;

    let id = keep_images_if(paths, &imported, store.add(&values))?;
    let coin = store
        .find_by_id(&id)
        .ok_or_else(|| VaultError::CoinNotFound(id.clone()))?;

    let mut result = CmdResult::default().with_affected_coins(vec![coin]);
    result.add_message(CmdMessage::success(format!("Coin added: {}", id)));
    Ok(result)
}
