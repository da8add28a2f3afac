use clap::ValueEnum;

use crate::error::{Error, Result};
use crate::preferences::{KeyValueStore, Preferences};
use crate::render::ViewOptions;
use crate::view::filter::Segment;
use crate::view::sort::{SortBy, SortOrder};

pub const WATCH_HELP: &str =
    "commands: r | q | min [price] | segment <all|new|pro|0-2> | sort <price|symbol> [asc|desc]";

/// A line typed into the live list view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    Refresh,
    Quit,
    /// Empty text clears the filter.
    MinPrice(String),
    Segment(Segment),
    /// Order is kept as is when not given.
    Sort(SortBy, Option<SortOrder>),
}

fn invalid(line: &str) -> Error {
    Error::InvalidInput(format!("{:?} ({})", line.trim(), WATCH_HELP))
}

/// Parses one input line. Blank lines are `Ok(None)`.
pub fn parse_view_command(line: &str) -> Result<Option<ViewCommand>> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();

    let command = match (head.to_lowercase().as_str(), args.as_slice()) {
        ("r" | "refresh", []) => ViewCommand::Refresh,
        ("q" | "quit", []) => ViewCommand::Quit,
        ("min", []) => ViewCommand::MinPrice(String::new()),
        ("min", [value]) => ViewCommand::MinPrice(value.to_string()),
        ("segment", [value]) => {
            ViewCommand::Segment(Segment::parse_input(value).ok_or_else(|| invalid(line))?)
        }
        ("sort", [by]) => ViewCommand::Sort(SortBy::from_str(by, true).map_err(|_| invalid(line))?, None),
        ("sort", [by, order]) => ViewCommand::Sort(
            SortBy::from_str(by, true).map_err(|_| invalid(line))?,
            Some(SortOrder::from_str(order, true).map_err(|_| invalid(line))?),
        ),
        _ => return Err(invalid(line)),
    };
    Ok(Some(command))
}

/// Applies a view change and returns the options to redraw with.
///
/// Filter and segment changes are written to `prefs` before the options change.
pub fn apply_view_command<S: KeyValueStore>(
    command: &ViewCommand,
    prefs: &mut Preferences<S>,
    options: &ViewOptions,
) -> Result<ViewOptions> {
    let mut next = options.clone();
    match command {
        ViewCommand::Refresh | ViewCommand::Quit => {}
        ViewCommand::MinPrice(input) => {
            prefs.set_min_price_input(input)?;
            next.min_price_input = prefs.min_price_input().to_string();
        }
        ViewCommand::Segment(segment) => {
            prefs.set_segment(*segment)?;
            next.segment = prefs.segment();
        }
        ViewCommand::Sort(sort_by, order) => {
            next.sort_by = *sort_by;
            if let Some(order) = order {
                next.order = *order;
            }
        }
    }
    Ok(next)
}

/// Parses `ADDRESS=PRICE` as given to the reprice command.
pub fn parse_price_update(value: &str) -> std::result::Result<(String, f64), String> {
    let (address, price) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ADDRESS=PRICE, got {:?}", value))?;
    let address = address.trim();
    if address.is_empty() {
        return Err(format!("missing address in {:?}", value));
    }
    let price = price
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad price in {:?}: {}", value, e))?;
    Ok((address.to_string(), price))
}
