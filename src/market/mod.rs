pub mod percentages;
pub mod snapshot;

pub use percentages::recalculate_percent_change;
pub use snapshot::{reprice, reprice_list};
