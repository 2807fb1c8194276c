use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{CoinStore, CollectionBackend};

pub fn run<B: CollectionBackend>(store: &CoinStore<B>) -> Result<CmdResult> {
    let statistics = store.statistics();
    let mut result = CmdResult::default();
    if statistics.unique_coins == 0 {
        result.add_message(CmdMessage::info("The collection is empty."));
    }
    Ok(result.with_statistics(statistics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Field, FieldValues};
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn reports_headline_counts() {
        let store = StoreFixture::new()
            .with_values(
                FieldValues::new()
                    .with(Field::IssuingCountry, "España")
                    .with(Field::MintYear, 1975i64)
                    .with(Field::Quantity, 3i64),
            )
            .with_coin("España", 1975, "Peseta")
            .with_coin("Chile", 1975, "Peso")
            .store;

        let stats = run(&store).unwrap().statistics.unwrap();
        assert_eq!(stats.unique_coins, 3);
        assert_eq!(stats.total_coins, 5);
        assert_eq!(stats.distinct_countries, 2);
        assert_eq!(stats.by_type.len(), 2);
        assert_eq!(stats.demonetized.in_circulation, 3);
    }
}
