use super::CollectionBackend;
use crate::code::next_code;
use crate::error::{Result, VaultError};
use crate::model::{Coin, Field, FieldValues};
use crate::query::Criteria;
use crate::stats::{self, DemonetizedBreakdown, Distribution, Statistics};

/// The authoritative in-memory collection and its persistence.
///
/// Every mutating operation rewrites the whole collection through the
/// backend before returning. If that write fails the in-memory collection
/// keeps the change and the error is returned; memory and disk are not
/// reconciled.
pub struct CoinStore<B: CollectionBackend> {
    backend: B,
    coins: Vec<Coin>,
}

impl<B: CollectionBackend> CoinStore<B> {
    /// An empty store. Call [`CoinStore::load`] to read existing records.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            coins: Vec::new(),
        }
    }

    /// A store with the backend's records already loaded.
    pub fn open(backend: B) -> Result<Self> {
        let mut store = Self::new(backend);
        store.load()?;
        Ok(store)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Replace the in-memory collection with the stored one. Nothing stored
    /// yet means an empty collection; on error the collection is unchanged.
    pub fn load(&mut self) -> Result<()> {
        self.coins = self.backend.load()?.unwrap_or_default();
        log::debug!(
            "Loaded {} coins from {}",
            self.coins.len(),
            self.backend.location().display()
        );
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        self.backend.save(&self.coins)
    }

    /// Catalogue a new coin and return its assigned code.
    ///
    /// The code comes from the supplied country and mint year; any
    /// `unique_id` in `values` is ignored. Fields not supplied are stored as
    /// empty.
    pub fn add(&mut self, values: &FieldValues) -> Result<String> {
        let mut coin = Coin::from_values(String::new(), values)?;
        coin.unique_id = next_code(
            coin.issuing_country.as_deref(),
            coin.mint_year,
            self.coins.iter().map(|c| c.unique_id.as_str()),
        );
        let id = coin.unique_id.clone();
        self.coins.push(coin);
        self.save()?;
        log::info!("Added coin {}", id);
        Ok(id)
    }

    pub fn find_by_id(&self, id: &str) -> Option<Coin> {
        self.coins.iter().find(|c| c.unique_id == id).cloned()
    }

    /// Coins matching every non-empty criterion, in collection order.
    pub fn search(&self, criteria: &Criteria) -> Vec<Coin> {
        self.coins
            .iter()
            .filter(|c| criteria.matches(c))
            .cloned()
            .collect()
    }

    /// Coins matching at least one non-empty criterion, in collection order.
    pub fn search_any(&self, criteria: &Criteria) -> Vec<Coin> {
        if criteria.is_empty() {
            return self.list();
        }
        self.coins
            .iter()
            .filter(|c| criteria.matches_any(c))
            .cloned()
            .collect()
    }

    /// Overwrite the supplied fields of one coin. Returns `false` without
    /// writing anything when no coin has `id`.
    pub fn update(&mut self, id: &str, changes: &FieldValues) -> Result<bool> {
        if changes.contains(Field::UniqueId) {
            return Err(VaultError::Validation(
                "unique_id is assigned by the store and cannot be changed".to_string(),
            ));
        }

        let Some(pos) = self.coins.iter().position(|c| c.unique_id == id) else {
            return Ok(false);
        };

        // Validate every change before touching the stored coin
        let mut updated = self.coins[pos].clone();
        for (field, value) in changes.iter() {
            updated.set(*field, value.clone())?;
        }
        self.coins[pos] = updated;

        self.save()?;
        log::info!("Updated coin {} ({} fields)", id, changes.len());
        Ok(true)
    }

    /// Remove the coin with `id`. Only writes when something was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(pos) = self.coins.iter().position(|c| c.unique_id == id) else {
            return Ok(false);
        };
        self.coins.remove(pos);
        self.save()?;
        log::info!("Deleted coin {}", id);
        Ok(true)
    }

    pub fn list(&self) -> Vec<Coin> {
        self.coins.clone()
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    // --- Aggregates ---

    pub fn aggregate_by_field(&self, field: Field) -> Distribution {
        stats::aggregate_by_field(&self.coins, field)
    }

    pub fn count_unique(&self) -> usize {
        stats::count_unique(&self.coins)
    }

    pub fn count_total(&self) -> u64 {
        stats::count_total(&self.coins)
    }

    pub fn count_distinct_countries(&self) -> usize {
        stats::count_distinct_countries(&self.coins)
    }

    pub fn demonetized_breakdown(&self) -> DemonetizedBreakdown {
        stats::demonetized_breakdown(&self.coins)
    }

    pub fn distribution_by_country(&self) -> Distribution {
        self.aggregate_by_field(Field::IssuingCountry)
    }

    pub fn distribution_by_mint_mark(&self) -> Distribution {
        self.aggregate_by_field(Field::MintMark)
    }

    pub fn distribution_by_condition(&self) -> Distribution {
        self.aggregate_by_field(Field::Condition)
    }

    pub fn distribution_by_type(&self) -> Distribution {
        self.aggregate_by_field(Field::CoinType)
    }

    pub fn distribution_by_orientation(&self) -> Distribution {
        self.aggregate_by_field(Field::Orientation)
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::collect(&self.coins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldValue;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::MemBackend;
    use std::collections::HashSet;

    fn spanish(year: i64) -> FieldValues {
        FieldValues::new()
            .with(Field::IssuingCountry, "España")
            .with(Field::MintYear, year)
    }

    #[test]
    fn add_assigns_sequential_codes() {
        let mut store = CoinStore::new(MemBackend::new());
        let first = store
            .add(&spanish(1975).with(Field::Quantity, 3i64))
            .unwrap();
        let second = store.add(&spanish(1975)).unwrap();

        assert_eq!(first, "ESP-1975-000001");
        assert_eq!(second, "ESP-1975-000002");
        assert_eq!(store.count_unique(), 2);
        assert_eq!(store.count_total(), 4);
        assert_eq!(store.count_distinct_countries(), 1);
    }

    #[test]
    fn add_persists_every_time() {
        let mut store = CoinStore::new(MemBackend::new());
        store.add(&spanish(1975)).unwrap();
        store.add(&spanish(1980)).unwrap();
        assert_eq!(store.backend().save_count(), 2);
    }

    #[test]
    fn add_fills_missing_fields_and_ignores_supplied_id() {
        let mut store = CoinStore::new(MemBackend::new());
        let id = store
            .add(&FieldValues::new().with(Field::UniqueId, "HACK-0000-000001"))
            .unwrap();
        assert_eq!(id, "XXX-XXXX-000001");

        let coin = store.find_by_id(&id).unwrap();
        assert_eq!(coin.issuing_country, None);
        assert!(!coin.demonetized);
        assert_eq!(coin.quantity, None);
    }

    #[test]
    fn add_rejects_bad_values_without_appending() {
        let mut store = CoinStore::new(MemBackend::new());
        let bad = spanish(1975).with(Field::Weight, "heavy");
        assert!(matches!(store.add(&bad), Err(VaultError::Validation(_))));
        assert_eq!(store.count_unique(), 0);
        assert_eq!(store.backend().save_count(), 0);
    }

    #[test]
    fn non_finite_decimals_are_rejected() {
        let mut store = CoinStore::new(MemBackend::new());
        for bad in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let values = spanish(1975).with(Field::Weight, bad);
            assert!(matches!(store.add(&values), Err(VaultError::Validation(_))));
        }
        assert_eq!(store.count_unique(), 0);
        assert_eq!(store.backend().save_count(), 0);

        let id = store.add(&spanish(1975).with(Field::Weight, 5.5f64)).unwrap();
        let before = store.list();
        let changes = FieldValues::new().with(Field::Diameter, f64::NAN);
        assert!(matches!(
            store.update(&id, &changes),
            Err(VaultError::Validation(_))
        ));
        assert_eq!(store.backend().save_count(), 1);

        store.load().unwrap();
        assert_eq!(store.list(), before);
    }

    #[test]
    fn codes_stay_unique_across_mixed_adds() {
        let mut store = CoinStore::new(MemBackend::new());
        let inputs = [
            ("España", 1975),
            ("Spain", 1975),
            ("España", 1975),
            ("", 1975),
            ("France", 75),
            ("España", 1975),
            ("France", 75),
        ];
        for (country, year) in inputs {
            let values = FieldValues::new()
                .with(Field::IssuingCountry, country)
                .with(Field::MintYear, year as i64);
            store.add(&values).unwrap();
        }
        let ids: HashSet<_> = store.coins().iter().map(|c| c.unique_id.clone()).collect();
        assert_eq!(ids.len(), inputs.len());
        assert!(ids.contains("ESP-1975-000003"));
        assert!(ids.contains("SPA-1975-000001"));
        assert!(ids.contains("XXX-1975-000001"));
        assert!(ids.contains("FRA-XXXX-000002"));
    }

    #[test]
    fn delete_does_not_reuse_lower_sequences() {
        let mut store = CoinStore::new(MemBackend::new());
        let first = store.add(&spanish(1975)).unwrap();
        let second = store.add(&spanish(1975)).unwrap();
        assert!(store.delete(&first).unwrap());
        let third = store.add(&spanish(1975)).unwrap();
        assert_eq!(second, "ESP-1975-000002");
        assert_eq!(third, "ESP-1975-000003");
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = CoinStore::new(MemBackend::new());
        store
            .add(
                &spanish(1975)
                    .with(Field::Weight, 5.75f64)
                    .with(Field::Demonetized, true)
                    .with(Field::Condition, "Très bien"),
            )
            .unwrap();
        store.add(&spanish(1980)).unwrap();
        let before = store.list();

        store.load().unwrap();
        assert_eq!(store.list(), before);
    }

    #[test]
    fn load_of_nothing_is_empty() {
        let store = CoinStore::open(MemBackend::new()).unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn load_of_corrupt_data_fails_and_keeps_memory() {
        let mut store = CoinStore::new(MemBackend::with_content("{not json"));
        let err = store.load().unwrap_err();
        assert!(err.is_storage());
        assert!(store.list().is_empty());
    }

    #[test]
    fn search_is_and_over_non_empty_criteria() {
        let fixture = StoreFixture::new()
            .with_coin("España", 1975, "Peseta")
            .with_coin("France", 1975, "Franc")
            .with_coin("España", 2002, "Euro");
        let store = fixture.store;

        let hits = store.search(&Criteria::new().with(Field::IssuingCountry, "spa"));
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].mint_year, Some(1975));
        assert_eq!(hits[1].mint_year, Some(2002));

        let hits = store.search(
            &Criteria::new()
                .with(Field::IssuingCountry, "spa")
                .with(Field::MintYear, "1975")
                .with(Field::MintMark, ""),
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].coin_type.as_deref(), Some("Peseta"));

        assert_eq!(store.search(&Criteria::new()).len(), 3);
    }

    #[test]
    fn search_any_broadens_across_fields() {
        let store = StoreFixture::new()
            .with_coin("España", 1975, "Peseta")
            .with_coin("France", 1975, "Franc")
            .with_coin("Peru", 1975, "Sol")
            .store;
        let fields = [Field::IssuingCountry, Field::CoinType];

        let criteria = Criteria::same_text(&fields, "franc");
        assert_eq!(store.search_any(&criteria).len(), 1);
        assert_eq!(store.search(&criteria).len(), 1);

        // Peseta matches by type, Peru by country; neither matches both
        let criteria = Criteria::same_text(&fields, "pe");
        let hits = store.search_any(&criteria);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].coin_type.as_deref(), Some("Peseta"));
        assert_eq!(hits[1].issuing_country.as_deref(), Some("Peru"));
        assert!(store.search(&criteria).is_empty());
    }

    #[test]
    fn update_overwrites_only_supplied_fields() {
        let mut store = StoreFixture::new()
            .with_coin("España", 1975, "Peseta")
            .store;
        let changes = FieldValues::new()
            .with(Field::Condition, "XF")
            .with(Field::IssuingCountry, "Spain");
        assert!(store.update("ESP-1975-000001", &changes).unwrap());

        let coin = store.find_by_id("ESP-1975-000001").unwrap();
        assert_eq!(coin.condition.as_deref(), Some("XF"));
        assert_eq!(coin.issuing_country.as_deref(), Some("Spain"));
        assert_eq!(coin.coin_type.as_deref(), Some("Peseta"));
        assert_eq!(coin.mint_year, Some(1975));
    }

    #[test]
    fn update_of_unknown_id_is_false_without_writing() {
        let mut store = StoreFixture::new()
            .with_coin("España", 1975, "Peseta")
            .store;
        let saves = store.backend().save_count();
        let changes = FieldValues::new().with(Field::Condition, "XF");
        assert!(!store.update("NOPE-0000-000000", &changes).unwrap());
        assert_eq!(store.backend().save_count(), saves);
    }

    #[test]
    fn update_never_changes_the_code() {
        let mut store = StoreFixture::new()
            .with_coin("España", 1975, "Peseta")
            .store;
        let changes = FieldValues::new().with(Field::UniqueId, "ESP-1975-000099");
        assert!(store.update("ESP-1975-000001", &changes).is_err());
        assert!(store.find_by_id("ESP-1975-000001").is_some());
    }

    #[test]
    fn update_is_all_or_nothing() {
        let mut store = StoreFixture::new()
            .with_coin("España", 1975, "Peseta")
            .store;
        let changes = FieldValues::new()
            .with(Field::Condition, "XF")
            .with(Field::Quantity, 0i64);
        assert!(store.update("ESP-1975-000001", &changes).is_err());
        let coin = store.find_by_id("ESP-1975-000001").unwrap();
        assert_eq!(coin.condition, None);
    }

    #[test]
    fn delete_of_unknown_id_is_false_without_writing() {
        let mut store = StoreFixture::new()
            .with_coin("España", 1975, "Peseta")
            .store;
        let saves = store.backend().save_count();
        let before = store.list();
        assert!(!store.delete("NOPE-0000-000000").unwrap());
        assert_eq!(store.backend().save_count(), saves);
        assert_eq!(store.list(), before);
    }

    #[test]
    fn delete_removes_and_persists() {
        let mut store = StoreFixture::new()
            .with_coin("España", 1975, "Peseta")
            .with_coin("France", 1975, "Franc")
            .store;
        assert!(store.delete("ESP-1975-000001").unwrap());
        assert_eq!(store.count_unique(), 1);

        store.load().unwrap();
        assert!(store.find_by_id("ESP-1975-000001").is_none());
        assert!(store.find_by_id("FRA-1975-000001").is_some());
    }

    #[test]
    fn failed_save_leaves_memory_ahead_of_storage() {
        let mut store = CoinStore::new(MemBackend::new());
        store.backend().set_simulate_write_error(true);
        let err = store.add(&spanish(1975)).unwrap_err();
        assert!(err.is_storage());
        assert_eq!(store.count_unique(), 1);
        assert_eq!(store.backend().content(), None);
    }

    #[test]
    fn named_distributions() {
        let store = StoreFixture::new()
            .with_coin("España", 1975, "Euro")
            .with_coin("España", 1976, "Euro")
            .with_coin("France", 1975, "Peseta")
            .with_values(
                FieldValues::new()
                    .with(Field::MintMark, "M")
                    .with(Field::Demonetized, FieldValue::Flag(true)),
            )
            .store;

        let by_type = store.distribution_by_type();
        assert_eq!(by_type["Euro"], 2);
        assert_eq!(by_type["Peseta"], 1);
        assert_eq!(store.distribution_by_country()["España"], 2);
        assert_eq!(store.distribution_by_mint_mark()["M"], 1);
        assert!(store.distribution_by_condition().is_empty());
        assert!(store.distribution_by_orientation().is_empty());
        assert_eq!(store.demonetized_breakdown().demonetized, 1);
        assert_eq!(store.demonetized_breakdown().in_circulation, 3);
    }
}
