use crate::model::{Coin, Field};

/// Substring criteria over coin fields.
///
/// A coin matches when, for every criterion with non-empty text, the field's
/// search text contains the criterion text, ignoring case. Criteria with empty
/// text are skipped, so an empty `Criteria` matches every coin. Matching is
/// literal: no accent folding, no tokenizing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    terms: Vec<(Field, String)>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, text: impl Into<String>) -> Self {
        self.add(field, text);
        self
    }

    pub fn add(&mut self, field: Field, text: impl Into<String>) {
        self.terms.push((field, text.into()));
    }

    /// The same text against each of `fields`.
    pub fn same_text(fields: &[Field], text: &str) -> Self {
        fields.iter().fold(Self::new(), |c, f| c.with(*f, text))
    }

    pub fn terms(&self) -> &[(Field, String)] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.iter().all(|(_, text)| text.is_empty())
    }

    pub fn matches(&self, coin: &Coin) -> bool {
        self.terms
            .iter()
            .filter(|(_, text)| !text.is_empty())
            .all(|(field, text)| contains_ignore_case(&coin.get(*field).search_text(), text))
    }

    /// True when at least one non-empty criterion matches on its own.
    pub fn matches_any(&self, coin: &Coin) -> bool {
        self.terms
            .iter()
            .filter(|(_, text)| !text.is_empty())
            .any(|(field, text)| contains_ignore_case(&coin.get(*field).search_text(), text))
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
