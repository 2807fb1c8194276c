//! Aggregate figures over a collection: the three headline counts and the
//! per-field distributions shown by `coinvault stats`.

use crate::model::{Coin, Field};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Count of records per distinct value of one field.
pub type Distribution = BTreeMap<String, usize>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DemonetizedBreakdown {
    pub demonetized: usize,
    pub in_circulation: usize,
}

/// Group records by the raw value of `field`. Records without a value are
/// left out; grouping is case-sensitive.
pub fn aggregate_by_field(coins: &[Coin], field: Field) -> Distribution {
    let mut counts = Distribution::new();
    for coin in coins {
        let value = coin.get(field);
        if value.is_present() {
            *counts.entry(value.search_text()).or_insert(0) += 1;
        }
    }
    counts
}

pub fn count_unique(coins: &[Coin]) -> usize {
    coins.len()
}

/// Total pieces, counting each record's quantity (1 when missing).
pub fn count_total(coins: &[Coin]) -> u64 {
    coins.iter().map(Coin::pieces).sum()
}

pub fn count_distinct_countries(coins: &[Coin]) -> usize {
    coins
        .iter()
        .filter_map(|c| c.issuing_country.as_deref())
        .filter(|country| !country.is_empty())
        .map(str::to_lowercase)
        .collect::<HashSet<_>>()
        .len()
}

pub fn demonetized_breakdown(coins: &[Coin]) -> DemonetizedBreakdown {
    let demonetized = coins.iter().filter(|c| c.demonetized).count();
    DemonetizedBreakdown {
        demonetized,
        in_circulation: coins.len() - demonetized,
    }
}

/// Everything the statistics view needs, computed in one pass per figure.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub unique_coins: usize,
    pub total_coins: u64,
    pub distinct_countries: usize,
    pub by_country: Distribution,
    pub by_mint_mark: Distribution,
    pub by_condition: Distribution,
    pub by_type: Distribution,
    pub by_orientation: Distribution,
    pub demonetized: DemonetizedBreakdown,
}

impl Statistics {
    pub fn collect(coins: &[Coin]) -> Self {
        Self {
            unique_coins: count_unique(coins),
            total_coins: count_total(coins),
            distinct_countries: count_distinct_countries(coins),
            by_country: aggregate_by_field(coins, Field::IssuingCountry),
            by_mint_mark: aggregate_by_field(coins, Field::MintMark),
            by_condition: aggregate_by_field(coins, Field::Condition),
            by_type: aggregate_by_field(coins, Field::CoinType),
            by_orientation: aggregate_by_field(coins, Field::Orientation),
            demonetized: demonetized_breakdown(coins),
        }
    }

    /// Named distributions in display order.
    pub fn distributions(&self) -> [(&'static str, &Distribution); 5] {
        [
            ("Issuing country", &self.by_country),
            ("Mint mark", &self.by_mint_mark),
            ("Condition", &self.by_condition),
            ("Type", &self.by_type),
            ("Orientation", &self.by_orientation),
        ]
    }
}
