use std::cmp::Ordering;
use std::fmt;

use clap::ValueEnum;

use crate::types::DegenListItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortBy {
    #[default]
    Price,
    Symbol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortOrder {
    #[value(alias = "asc")]
    Ascending,
    #[default]
    #[value(alias = "desc")]
    Descending,
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortBy::Price => write!(f, "price"),
            SortBy::Symbol => write!(f, "symbol"),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "ascending"),
            SortOrder::Descending => write!(f, "descending"),
        }
    }
}

fn compare_symbols(a: &DegenListItem, b: &DegenListItem) -> Ordering {
    let a = a.token_symbol.as_deref().unwrap_or("");
    let b = b.token_symbol.as_deref().unwrap_or("");
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn compare(a: &DegenListItem, b: &DegenListItem, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Price => a.price_usd.total_cmp(&b.price_usd),
        SortBy::Symbol => compare_symbols(a, b),
    }
}

/// Returns a sorted copy; ties keep their fetched order.
pub fn sort_items(items: &[DegenListItem], sort_by: SortBy, order: SortOrder) -> Vec<DegenListItem> {
    let mut sorted = items.to_vec();
    match order {
        SortOrder::Ascending => sorted.sort_by(|a, b| compare(a, b, sort_by)),
        SortOrder::Descending => sorted.sort_by(|a, b| compare(b, a, sort_by)),
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(address: &str, symbol: Option<&str>, price: f64) -> DegenListItem {
        let mut item = DegenListItem::new(address, price);
        item.token_symbol = symbol.map(str::to_string);
        item
    }

    fn addresses(items: &[DegenListItem]) -> Vec<&str> {
        items.iter().map(|i| i.token_address.as_str()).collect()
    }

    #[test]
    fn default_is_price_descending() {
        let items = vec![item("a", None, 0.5), item("b", None, 2.0), item("c", None, 1.0)];
        let sorted = sort_items(&items, SortBy::default(), SortOrder::default());
        assert_eq!(addresses(&sorted), vec!["b", "c", "a"]);
    }

    #[test]
    fn price_ascending() {
        let items = vec![item("a", None, 0.5), item("b", None, 2.0), item("c", None, 0.00001)];
        let sorted = sort_items(&items, SortBy::Price, SortOrder::Ascending);
        assert_eq!(addresses(&sorted), vec!["c", "a", "b"]);
    }

    #[test]
    fn symbol_sort_ignores_case_and_puts_missing_first() {
        let items = vec![
            item("wif", Some("WIF"), 1.0),
            item("bonk", Some("bonk"), 1.0),
            item("none", None, 1.0),
            item("Popcat", Some("Popcat"), 1.0),
        ];
        let sorted = sort_items(&items, SortBy::Symbol, SortOrder::Ascending);
        assert_eq!(addresses(&sorted), vec!["none", "bonk", "Popcat", "wif"]);

        let sorted = sort_items(&items, SortBy::Symbol, SortOrder::Descending);
        assert_eq!(addresses(&sorted), vec!["wif", "Popcat", "bonk", "none"]);
    }

    #[test]
    fn ties_keep_fetched_order() {
        let items = vec![item("first", Some("X"), 1.0), item("second", Some("X"), 1.0)];
        let sorted = sort_items(&items, SortBy::Price, SortOrder::Descending);
        assert_eq!(addresses(&sorted), vec!["first", "second"]);
        let sorted = sort_items(&items, SortBy::Symbol, SortOrder::Ascending);
        assert_eq!(addresses(&sorted), vec!["first", "second"]);
    }

    #[test]
    fn sorting_leaves_input_alone() {
        let items = vec![item("a", None, 1.0), item("b", None, 2.0)];
        let _ = sort_items(&items, SortBy::Price, SortOrder::Descending);
        assert_eq!(addresses(&items), vec!["a", "b"]);
    }
}
