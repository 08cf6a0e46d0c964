mod batch;
mod filter_task;

pub use batch::{filter_channels, filter_series};
pub use filter_task::FilterTask;
