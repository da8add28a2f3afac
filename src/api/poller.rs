use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::api::degen_list::DegenList;
use crate::types::DegenListItem;

/// Latest result of the leaderboard query.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    /// No fetch has completed yet.
    Pending,
    Ready {
        items: Vec<DegenListItem>,
        fetched_at: DateTime<Utc>,
        /// A newer fetch is in flight; `items` are from the previous one.
        refreshing: bool,
    },
    Failed {
        message: String,
    },
}

impl FetchState {
    pub fn items(&self) -> Option<&[DegenListItem]> {
        match self {
            FetchState::Ready { items, .. } => Some(items),
            _ => None,
        }
    }

    pub fn is_refreshing(&self) -> bool {
        matches!(self, FetchState::Ready { refreshing: true, .. })
    }
}

/// Runs one fetch and maps it to a state.
pub async fn fetch_state(client: &DegenList) -> FetchState {
    match client.fetch().await {
        Ok(items) => FetchState::Ready {
            items,
            fetched_at: Utc::now(),
            refreshing: false,
        },
        Err(e) => {
            warn!("Leaderboard fetch failed: {}", e);
            FetchState::Failed {
                message: e.to_string(),
            }
        }
    }
}

/// Periodically fetches the leaderboard and publishes the latest state.
///
/// The timer and manual refreshes share one sequential fetch path, so a
/// single request is ever in flight. Receivers only observe the newest state.
pub struct LeaderboardPoller {
    state_rx: watch::Receiver<FetchState>,
    refresh_tx: mpsc::Sender<()>,
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl LeaderboardPoller {
    pub fn spawn(client: DegenList, poll_interval: Duration) -> Self {
        let (state_tx, state_rx) = watch::channel(FetchState::Pending);
        // One slot: extra refresh requests while one is queued are dropped.
        let (refresh_tx, refresh_rx) = mpsc::channel(1);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        info!("Polling {} every {:?}", client.endpoint(), poll_interval);
        let task = tokio::spawn(run(client, poll_interval, state_tx, refresh_rx, shutdown_rx));

        Self {
            state_rx,
            refresh_tx,
            shutdown_tx,
            task,
        }
    }

    /// A receiver for state updates.
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state_rx.clone()
    }

    pub fn current(&self) -> FetchState {
        self.state_rx.borrow().clone()
    }

    /// Requests an immediate fetch. Returns false if one is already queued.
    pub fn refresh(&self) -> bool {
        self.refresh_tx.try_send(()).is_ok()
    }

    /// Stops polling and waits for the loop to exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            warn!("Poller task ended abnormally: {}", e);
        }
    }
}

async fn run(
    client: DegenList,
    poll_interval: Duration,
    state_tx: watch::Sender<FetchState>,
    mut refresh_rx: mpsc::Receiver<()>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut ticker = interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                debug!("Poll interval elapsed");
            }
            Some(()) = refresh_rx.recv() => {
                debug!("Manual refresh requested");
                ticker.reset();
            }
            _ = shutdown_rx.changed() => break,
        }

        state_tx.send_modify(|state| {
            if let FetchState::Ready { refreshing, .. } = state {
                *refreshing = true;
            }
        });

        let next = tokio::select! {
            next = fetch_state(&client) => next,
            _ = shutdown_rx.changed() => break,
        };

        if state_tx.send(next).is_err() {
            // every receiver is gone
            break;
        }
    }
    debug!("Poller stopped");
}
