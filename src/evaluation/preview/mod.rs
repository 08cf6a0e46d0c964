mod snapshot;
mod trace;

pub use snapshot::Snapshot;
pub use trace::{FilterTrace, TraceFormat, TracePoint};
