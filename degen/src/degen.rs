use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use degen_list::api::{fetch_state, DegenList, FetchState, LeaderboardPoller};
use degen_list::config;
use degen_list::logging::init_tracing;
use degen_list::market::reprice_list;
use degen_list::preferences::{FileStore, Preferences};
use degen_list::render::{format_percent, format_usd, render_screen, ViewOptions};
use degen_list::types::{DegenListItem, Window};
use degen_list::view::{
    apply_view_command, parse_price_update, parse_view_command, Segment, SortBy, SortOrder, ViewCommand,
    WATCH_HELP,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Duration;
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(version, about = "Degen leaderboard watcher")]
struct Args {
    /// Log to stdout instead of the rolling log file
    #[arg(long)]
    stdout_log: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll the leaderboard and redraw on every update.
    ///
    /// Reads commands from stdin: r, q, min [price], segment <name|index>, sort <by> [order].
    Watch {
        #[arg(long, value_enum, default_value_t = SortBy::Price)]
        sort: SortBy,
        #[arg(long, value_enum, default_value_t = SortOrder::Descending)]
        order: SortOrder,
    },
    /// Fetch once and print the filtered, sorted list
    List {
        #[arg(long, value_enum, default_value_t = SortBy::Price)]
        sort: SortBy,
        #[arg(long, value_enum, default_value_t = SortOrder::Descending)]
        order: SortOrder,
    },
    /// Show how entries would look at new prices
    Reprice {
        /// Repeat for every entry to reprice
        #[arg(long = "set", value_name = "ADDRESS=PRICE", value_parser = parse_price_update, required = true)]
        updates: Vec<(String, f64)>,
    },
    /// Store the "price greater than" filter
    SetMinPrice { value: String },
    /// Store the segment: all, new, pro or its index
    SetSegment { segment: String },
    /// Print the stored preferences
    Prefs,
}

fn load_preferences() -> Result<Preferences<FileStore>> {
    let path = config::get_preferences_file();
    Preferences::load(FileStore::new(&path))
        .with_context(|| format!("Failed to load preferences from {}", path))
}

fn view_options(prefs: &Preferences<FileStore>, sort_by: SortBy, order: SortOrder) -> ViewOptions {
    ViewOptions {
        min_price_input: prefs.min_price_input().to_string(),
        segment: prefs.segment(),
        sort_by,
        order,
    }
}

fn describe(item: &DegenListItem) -> String {
    let changes: Vec<String> = Window::ALL
        .iter()
        .map(|w| format!("{} {}", w.label(), format_percent(item.price_change_percent.get_or_zero(*w))))
        .collect();
    format!(
        "price {} | mcap {} | liquidity {} | {}",
        format_usd(item.price_usd),
        format_usd(item.market_cap_usd),
        format_usd(item.liquidity_usd),
        changes.join("  ")
    )
}

async fn watch(sort_by: SortBy, order: SortOrder) -> Result<()> {
    let mut prefs = load_preferences()?;
    let mut options = view_options(&prefs, sort_by, order);
    let explorer = config::get_explorer_token_url();
    let interval = Duration::from_secs(config::get_poll_interval_seconds());

    let poller = LeaderboardPoller::spawn(DegenList::new()?, interval);
    let mut updates = poller.subscribe();
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut state = poller.current();

    println!("{}", WATCH_HELP);
    println!("{}", render_screen(&state, &options, &explorer));
    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    warn!("Poller stopped publishing updates");
                    break;
                }
                state = updates.borrow_and_update().clone();
            }
            line = stdin.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    info!("stdin closed, still watching");
                    stdin_open = false;
                    continue;
                };
                match parse_view_command(&line) {
                    Ok(None) => continue,
                    Ok(Some(ViewCommand::Quit)) => break,
                    Ok(Some(ViewCommand::Refresh)) => {
                        if !poller.refresh() {
                            info!("Refresh already queued");
                        }
                        continue;
                    }
                    Ok(Some(command)) => match apply_view_command(&command, &mut prefs, &options) {
                        Ok(next) => options = next,
                        Err(e) => {
                            eprintln!("{}", e);
                            continue;
                        }
                    },
                    Err(e) => {
                        eprintln!("{}", e);
                        continue;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
        println!("-------------------------------------------------------------------------");
        println!("{}", render_screen(&state, &options, &explorer));
    }

    poller.shutdown().await;
    Ok(())
}

async fn list(sort_by: SortBy, order: SortOrder) -> Result<()> {
    let prefs = load_preferences()?;
    let options = view_options(&prefs, sort_by, order);
    let state = fetch_state(&DegenList::new()?).await;
    println!("{}", render_screen(&state, &options, &config::get_explorer_token_url()));
    if let FetchState::Failed { message } = state {
        return Err(anyhow!("Leaderboard fetch failed: {}", message));
    }
    Ok(())
}

async fn reprice_items(updates: &[(String, f64)]) -> Result<()> {
    let items = DegenList::new()?.fetch().await?;
    let prices: HashMap<String, f64> = updates.iter().cloned().collect();
    let repriced = reprice_list(&items, &prices);

    let mut failed = Vec::new();
    for (address, _) in updates {
        let Some(index) = items.iter().position(|item| &item.token_address == address) else {
            println!("{}: not on the leaderboard", address);
            failed.push(address.as_str());
            continue;
        };
        let (before, after) = (&items[index], &repriced[index]);
        println!("{}", address);
        println!("  before: {}", describe(before));
        let price = prices[address];
        if after.price_usd != price {
            println!("  not repriced at {}", price);
            failed.push(address.as_str());
            continue;
        }
        println!("  after:  {}", describe(after));
    }

    if !failed.is_empty() {
        return Err(anyhow!("Could not reprice {}", failed.join(", ")));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = init_tracing(args.stdout_log, Level::INFO);
    info!("degen started with {:?}", args.command);

    match args.command {
        Command::Watch { sort, order } => watch(sort, order).await,
        Command::List { sort, order } => list(sort, order).await,
        Command::Reprice { updates } => reprice_items(&updates).await,
        Command::SetMinPrice { value } => {
            let mut prefs = load_preferences()?;
            prefs.set_min_price_input(&value)?;
            println!("Price greater than: {}", prefs.min_price());
            Ok(())
        }
        Command::SetSegment { segment } => {
            let segment = Segment::parse_input(&segment)
                .ok_or_else(|| anyhow!("Unknown segment {:?}, expected all, new, pro or 0-2", segment))?;
            let mut prefs = load_preferences()?;
            prefs.set_segment(segment)?;
            println!("Segment: {}", segment);
            Ok(())
        }
        Command::Prefs => {
            let prefs = load_preferences()?;
            println!("Price greater than: {:?}", prefs.min_price_input());
            println!("Segment: {}", prefs.segment());
            Ok(())
        }
    }
}
