use std::fmt::Write;

use crate::api::degen_list::token_link;
use crate::api::poller::FetchState;
use crate::types::{DegenListItem, Window};
use crate::view::{self, Segment, SortBy, SortOrder};

pub const LOADING_TEXT: &str = "Loading...";
pub const ERROR_TEXT: &str = "Something went wrong, try again later";
pub const EMPTY_TEXT: &str = "No assets found";
const UNKNOWN_SYMBOL: &str = "???";

/// What the list screen is currently showing.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    pub min_price_input: String,
    pub segment: Segment,
    pub sort_by: SortBy,
    pub order: SortOrder,
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// USD amount with between 2 and 8 fraction digits, e.g. `$0.00004213` or `$1,250.50`.
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }

    let fixed = format!("{:.8}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let mut frac = frac_part.trim_end_matches('0').to_string();
    while frac.len() < 2 {
        frac.push('0');
    }

    let is_zero = int_part.chars().chain(frac.chars()).all(|c| c == '0');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(int_part), frac)
}

/// Signed percent with two decimals, e.g. `+12.50%`.
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    format!("{:+.2}%", value)
}

pub fn render_row(item: &DegenListItem, explorer_token_url: &str, refreshing: bool) -> String {
    let symbol = item
        .token_symbol
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_SYMBOL);
    let change = &item.price_change_percent;

    let mut tags = Vec::new();
    if item.is_new {
        tags.push("New");
    }
    if item.is_pro {
        tags.push("Pro");
    }

    format!(
        "{}{:<12} {:>18} {:>10} {:>10} {:<8} {}",
        if refreshing { "~ " } else { "  " },
        symbol,
        format_usd(item.price_usd),
        format_percent(change.get_or_zero(Window::H1)),
        format_percent(change.get_or_zero(Window::H24)),
        tags.join(" "),
        token_link(explorer_token_url, &item.token_address),
    )
}

/// Renders the whole list screen for the given state.
pub fn render_screen(state: &FetchState, options: &ViewOptions, explorer_token_url: &str) -> String {
    let (items, fetched_at, refreshing) = match state {
        FetchState::Pending => return LOADING_TEXT.to_string(),
        FetchState::Failed { .. } => return format!("{}\n[r] Try again", ERROR_TEXT),
        FetchState::Ready {
            items,
            fetched_at,
            refreshing,
        } => (items, fetched_at, *refreshing),
    };

    let visible = view::visible_items(
        items,
        view::parse_price_threshold(&options.min_price_input),
        options.segment,
        options.sort_by,
        options.order,
    );

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Price greater than: {}",
        if options.min_price_input.is_empty() { "-" } else { options.min_price_input.as_str() }
    );
    let _ = writeln!(
        out,
        "Sort by: {} ({})  |  Segment: {}  |  Updated {}{}",
        options.sort_by,
        options.order,
        options.segment,
        fetched_at.format("%H:%M:%S"),
        if refreshing { " (refreshing)" } else { "" }
    );

    if visible.is_empty() {
        out.push_str(EMPTY_TEXT);
        return out;
    }

    let rows: Vec<String> = visible
        .iter()
        .map(|item| render_row(item, explorer_token_url, refreshing))
        .collect();
    out.push_str(&rows.join("\n"));
    out
}
