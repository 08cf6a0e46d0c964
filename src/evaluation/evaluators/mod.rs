mod filter_evaluator;
mod residual_evaluator;

pub use filter_evaluator::{FilterEvaluator, FilterEvaluatorExt};
pub use residual_evaluator::ResidualEvaluator;
