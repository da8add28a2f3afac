use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::types::DegenListItem;

/// Non-negative number-like text, including partial input such as "" or "1.".
static NUMBER_INPUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d+\.?\d*|\.\d*)?$").expect("valid number input regex"));

/// Category segments shown above the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Segment {
    #[default]
    All,
    New,
    Pro,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::All, Segment::New, Segment::Pro];

    pub fn index(self) -> usize {
        match self {
            Segment::All => 0,
            Segment::New => 1,
            Segment::Pro => 2,
        }
    }

    /// Unknown indexes fall back to `All`.
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    /// Parses a stored index; anything unreadable means `All`.
    ///
    /// Any whole number is read, so "2", " 2 " and "2.0" all mean `Pro`.
    pub fn from_stored(value: &str) -> Self {
        match value.trim().parse::<f64>() {
            Ok(index) if index.is_finite() && index >= 0.0 && index.fract() == 0.0 => {
                Self::ALL.get(index as usize).copied().unwrap_or_default()
            }
            _ => Segment::All,
        }
    }

    /// User input: a segment name or an in-range index.
    pub fn parse_input(value: &str) -> Option<Self> {
        Self::from_name(value).or_else(|| match value.trim().parse::<usize>() {
            Ok(index) => Self::ALL.get(index).copied(),
            Err(_) => None,
        })
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "all" => Some(Segment::All),
            "new" => Some(Segment::New),
            "pro" => Some(Segment::Pro),
            _ => None,
        }
    }

    pub fn matches(self, item: &DegenListItem) -> bool {
        match self {
            Segment::All => true,
            Segment::New => item.is_new,
            Segment::Pro => item.is_pro,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Segment::All => "All",
            Segment::New => "New",
            Segment::Pro => "Pro",
        };
        write!(f, "{}", name)
    }
}

/// Whether `input` may be stored as the min-price filter text.
pub fn is_valid_price_input(input: &str) -> bool {
    NUMBER_INPUT.is_match(input)
}

/// Threshold for the min-price filter. Empty or partial text such as "." is 0.
pub fn parse_price_threshold(input: &str) -> f64 {
    let trimmed = input.trim();
    let end = trimmed
        .char_indices()
        .scan(false, |seen_dot, (i, c)| {
            if c.is_ascii_digit() {
                Some(i + 1)
            } else if c == '.' && !*seen_dot {
                *seen_dot = true;
                Some(i + 1)
            } else {
                None
            }
        })
        .last()
        .unwrap_or(0);

    match trimmed[..end].parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Keeps items priced strictly above `min_price` that belong to `segment`.
pub fn filter_items(items: &[DegenListItem], min_price: f64, segment: Segment) -> Vec<DegenListItem> {
    items
        .iter()
        .filter(|item| item.price_usd > min_price && segment.matches(item))
        .cloned()
        .collect()
}
