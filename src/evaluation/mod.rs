mod accumulators;
mod evaluators;
mod measurement;
mod preview;

pub use accumulators::{Accumulator, MeanAccumulator};
pub use evaluators::{FilterEvaluator, FilterEvaluatorExt, ResidualEvaluator};
pub use measurement::Measurement;
pub use preview::{FilterTrace, Snapshot, TraceFormat, TracePoint};
