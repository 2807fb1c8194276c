use coinvault::api::{CmdMessage, MessageLevel};
use coinvault::config::{VaultConfig, CONFIG_KEYS};
use coinvault::model::{Coin, Field, FieldValue};
use coinvault::stats::{Distribution, Statistics};
use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LABEL_WIDTH: usize = 22;
const BAR_WIDTH: usize = 30;
const BAR_CHAR: &str = "█";

/// Columns of the collection table and their widths.
const COLUMNS: [(Field, usize); 9] = [
    (Field::UniqueId, 16),
    (Field::IssuingCountry, 14),
    (Field::MintYear, 5),
    (Field::CoinType, 14),
    (Field::FaceValue, 7),
    (Field::CurrencyUnit, 10),
    (Field::Composition, 14),
    (Field::Condition, 9),
    (Field::Quantity, 4),
];

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(crate) fn print_coins(coins: &[Coin]) {
    if coins.is_empty() {
        return;
    }

    let header: Vec<String> = COLUMNS
        .iter()
        .map(|(field, width)| pad_to_width(field.label(), *width))
        .collect();
    println!("{}", header.join(" ").bold());

    for coin in coins {
        let cells: Vec<String> = COLUMNS
            .iter()
            .map(|(field, width)| {
                let cell = pad_to_width(&coin.get(*field).to_string(), *width);
                if *field == Field::UniqueId {
                    cell.yellow().to_string()
                } else {
                    cell
                }
            })
            .collect();
        println!("{}", cells.join(" "));
    }
}

pub(crate) fn print_full_coins(coins: &[Coin]) {
    for (i, coin) in coins.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!("{}", coin.unique_id.yellow().bold());
        println!("--------------------------------");
        for field in Field::ALL.iter().filter(|f| **f != Field::UniqueId) {
            let label = pad_to_width(field.label(), LABEL_WIDTH);
            match coin.get(*field) {
                FieldValue::Null => println!("{} {}", label, "-".dimmed()),
                FieldValue::Flag(b) => println!("{} {}", label, if b { "yes" } else { "no" }),
                value => println!("{} {}", label, value),
            }
        }
    }
}

pub(crate) fn print_statistics(stats: &Statistics) {
    println!("{}", "Collection".bold());
    println!("{} {}", pad_to_width("Distinct coins", LABEL_WIDTH), stats.unique_coins);
    println!("{} {}", pad_to_width("Total pieces", LABEL_WIDTH), stats.total_coins);
    println!("{} {}", pad_to_width("Countries", LABEL_WIDTH), stats.distinct_countries);
    println!(
        "{} {}",
        pad_to_width("Demonetized", LABEL_WIDTH),
        stats.demonetized.demonetized
    );
    println!(
        "{} {}",
        pad_to_width("In circulation", LABEL_WIDTH),
        stats.demonetized.in_circulation
    );

    for (title, distribution) in stats.distributions() {
        println!();
        println!("{}", title.bold());
        print_distribution(distribution);
    }
}

fn print_distribution(distribution: &Distribution) {
    if distribution.is_empty() {
        println!("{}", "(no data)".dimmed());
        return;
    }

    let max = distribution.values().copied().max().unwrap_or(1).max(1);
    for (key, count) in distribution {
        let len = (count * BAR_WIDTH).div_ceil(max);
        println!(
            "{} {} {}",
            pad_to_width(key, LABEL_WIDTH),
            BAR_CHAR.repeat(len).cyan(),
            count
        );
    }
}

pub(crate) fn print_config(config: &VaultConfig) {
    for key in CONFIG_KEYS {
        if let Ok(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

pub(crate) fn print_fields() {
    for field in Field::ALL {
        let legacy = field
            .legacy_key()
            .map(|k| format!(" (also {})", k))
            .unwrap_or_default();
        println!(
            "{} {} {}{}",
            pad_to_width(field.key(), LABEL_WIDTH).yellow(),
            pad_to_width(&field.kind().to_string(), 8),
            field.label(),
            legacy.dimmed()
        );
    }
}

/// Truncate `s` to `width` columns (marking the cut with `…`) and pad it out
/// with spaces to exactly `width`.
fn pad_to_width(s: &str, width: usize) -> String {
    let mut out = truncate_to_width(s, width);
    let padding = width.saturating_sub(out.width());
    out.push_str(&" ".repeat(padding));
    out
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_short_text() {
        assert_eq!(pad_to_width("ESP", 5), "ESP  ");
    }

    #[test]
    fn truncates_long_text_with_ellipsis() {
        let cell = pad_to_width("Reino de España", 8);
        assert_eq!(cell, "Reino d…");
        assert_eq!(cell.width(), 8);
    }

    #[test]
    fn wide_characters_count_double() {
        let cell = pad_to_width("日本国", 5);
        assert_eq!(cell, "日本…");
        assert_eq!(cell.width(), 5);
    }
}
