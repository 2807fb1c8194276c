use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{CoinStore, CollectionBackend};

pub fn run<B: CollectionBackend>(store: &mut CoinStore<B>, id: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let Some(coin) = store.find_by_id(id) else {
        result.add_message(CmdMessage::warning(format!("No coin with code {}", id)));
        return Ok(result);
    };

    if store.delete(id)? {
        result.add_message(CmdMessage::success(format!("Coin deleted: {}", id)));
        result.affected_coins.push(coin);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn deletes_existing_coin() {
        let mut store = StoreFixture::new()
            .with_coin("Italia", 1960, "Lira")
            .with_coin("Italia", 1960, "Lira")
            .store;
        let result = run(&mut store, "ITA-1960-000001").unwrap();
        assert_eq!(result.affected_coins.len(), 1);
        assert_eq!(store.count_unique(), 1);
        assert!(store.find_by_id("ITA-1960-000002").is_some());
    }

    #[test]
    fn missing_coin_is_a_warning() {
        let mut store = StoreFixture::new().with_coin("Italia", 1960, "Lira").store;
        let saves = store.backend().save_count();
        let result = run(&mut store, "ITA-1960-000009").unwrap();
        assert!(result.affected_coins.is_empty());
        assert_eq!(store.count_unique(), 1);
        assert_eq!(store.backend().save_count(), saves);
    }
}
