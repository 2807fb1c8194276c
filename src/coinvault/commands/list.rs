use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{CoinStore, CollectionBackend};

pub fn run<B: CollectionBackend>(store: &CoinStore<B>) -> Result<CmdResult> {
    let coins = store.list();
    let mut result = CmdResult::default();
    if coins.is_empty() {
        result.add_message(CmdMessage::info("The collection is empty."));
    }
    Ok(result.with_listed_coins(coins))
}
