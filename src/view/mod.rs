pub mod command;
pub mod filter;
pub mod sort;

pub use command::{apply_view_command, parse_price_update, parse_view_command, ViewCommand, WATCH_HELP};
pub use filter::{filter_items, is_valid_price_input, parse_price_threshold, Segment};
pub use sort::{sort_items, SortBy, SortOrder};

use crate::types::DegenListItem;

/// Filter then sort, as shown on screen.
pub fn visible_items(
    items: &[DegenListItem],
    min_price: f64,
    segment: Segment,
    sort_by: SortBy,
    order: SortOrder,
) -> Vec<DegenListItem> {
    let filtered = filter_items(items, min_price, segment);
    sort_items(&filtered, sort_by, order)
}
