//! # Coin Codes
//!
//! Every coin gets a human-readable code of the form `PPP-YYYY-NNNNNN`:
//!
//! - `PPP`: the first three letters of the issuing country, uppercased
//!   (`España` → `ESP`), or `XXX` when the country has no letters.
//! - `YYYY`: the four-digit mint year, or `XXXX` when it is missing or not
//!   four digits long.
//! - `NNNNNN`: a per-(prefix, year) sequence, zero padded to six digits.
//!
//! The sequence is one more than the highest sequence already used by a code
//! with the same prefix and year. It is recomputed from the existing codes
//! every time, so two writers adding coins concurrently can collide; the store
//! is single-writer.

use std::fmt;

pub const UNKNOWN_COUNTRY: &str = "XXX";
pub const UNKNOWN_YEAR: &str = "XXXX";
const PREFIX_LEN: usize = 3;
const SEQUENCE_WIDTH: usize = 6;

/// A code split into its three dash-separated parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeParts<'a> {
    pub prefix: &'a str,
    pub year: &'a str,
    pub sequence: &'a str,
}

impl<'a> CodeParts<'a> {
    /// Split a code. Anything without exactly three parts is not a code.
    pub fn parse(code: &'a str) -> Option<Self> {
        let mut parts = code.split('-');
        let prefix = parts.next()?;
        let year = parts.next()?;
        let sequence = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self {
            prefix,
            year,
            sequence,
        })
    }

    pub fn sequence_number(&self) -> Option<u64> {
        self.sequence.trim().parse().ok()
    }
}

impl fmt::Display for CodeParts<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.prefix, self.year, self.sequence)
    }
}

pub fn country_prefix(country: Option<&str>) -> String {
    let letters: String = country
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_uppercase)
        .take(PREFIX_LEN)
        .collect();

    if letters.is_empty() {
        UNKNOWN_COUNTRY.to_string()
    } else {
        letters
    }
}

pub fn year_token(year: Option<i64>) -> String {
    match year {
        Some(y) if (1000..=9999).contains(&y) => y.to_string(),
        _ => UNKNOWN_YEAR.to_string(),
    }
}

/// Highest sequence number among `codes` sharing `prefix` and `year`.
pub fn max_sequence<'a, I>(codes: I, prefix: &str, year: &str) -> u64
where
    I: IntoIterator<Item = &'a str>,
{
    codes
        .into_iter()
        .filter_map(CodeParts::parse)
        .filter(|parts| parts.prefix == prefix && parts.year == year)
        .filter_map(|parts| {
            let n = parts.sequence_number();
            if n.is_none() {
                log::warn!("Ignoring code with non-numeric sequence: {}", parts);
            }
            n
        })
        .max()
        .unwrap_or(0)
}

/// Produce the next free code for a coin from `country` and `year`, given
/// every code already in the collection.
pub fn next_code<'a, I>(country: Option<&str>, year: Option<i64>, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let prefix = country_prefix(country);
    let year = year_token(year);
    let sequence = max_sequence(existing, &prefix, &year) + 1;
    format!(
        "{}-{}-{:0width$}",
        prefix,
        year,
        sequence,
        width = SEQUENCE_WIDTH
    )
}
