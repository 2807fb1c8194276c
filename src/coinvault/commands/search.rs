use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Coin, Field};
use crate::query::Criteria;
use crate::store::{CoinStore, CollectionBackend};

/// Free-text search: `text` against each of `fields`, keeping coins that
/// match in any of them.
pub fn run<B: CollectionBackend>(
    store: &CoinStore<B>,
    fields: &[Field],
    text: &str,
) -> Result<CmdResult> {
    let criteria = Criteria::same_text(fields, text);
    Ok(with_summary(store.search_any(&criteria)))
}

/// Strict search: every criterion must match.
pub fn run_criteria<B: CollectionBackend>(
    store: &CoinStore<B>,
    criteria: &Criteria,
) -> Result<CmdResult> {
    Ok(with_summary(store.search(criteria)))
}

fn with_summary(coins: Vec<Coin>) -> CmdResult {
    let mut result = CmdResult::default();
    if coins.is_empty() {
        result.add_message(CmdMessage::warning(
            "No coins match the search criteria.",
        ));
    } else {
        result.add_message(CmdMessage::info(format!("{} coin(s) found.", coins.len())));
    }
    result.with_listed_coins(coins)
}
