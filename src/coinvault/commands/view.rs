use crate::commands::CmdResult;
use crate::error::{Result, VaultError};
use crate::store::{CoinStore, CollectionBackend};

pub fn run<B: CollectionBackend>(store: &CoinStore<B>, id: &str) -> Result<CmdResult> {
    let coin = store
        .find_by_id(id)
        .ok_or_else(|| VaultError::CoinNotFound(id.to_string()))?;
    Ok(CmdResult::default().with_listed_coins(vec![coin]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn finds_coin_by_code() {
        let store = StoreFixture::new().with_coin("Italia", 1960, "Lira").store;
        let result = run(&store, "ITA-1960-000001").unwrap();
        assert_eq!(result.listed_coins[0].coin_type.as_deref(), Some("Lira"));
    }

    #[test]
    fn unknown_code_is_an_error() {
        let store = StoreFixture::new().store;
        assert!(matches!(
            run(&store, "ITA-1960-000001"),
            Err(VaultError::CoinNotFound(_))
        ));
    }
}
