pub mod degen_list;
pub mod poller;

pub use degen_list::{token_link, DegenList};
pub use poller::{fetch_state, FetchState, LeaderboardPoller};
