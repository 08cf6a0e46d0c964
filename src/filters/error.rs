use crate::filters::CyclePhase;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CycleError {
    /// A measurement update was attempted without a gain computed since the
    /// last update.
    #[error("measurement update needs a freshly computed gain (filter phase: {0:?})")]
    GainNotComputed(CyclePhase),
}
