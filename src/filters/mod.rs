mod angle;
mod error;
mod kalman;

pub use angle::{is_missing, normalize_degrees, shortest_arc};
pub use error::CycleError;
pub use kalman::{CyclePhase, MEASUREMENT_VARIANCE_FLOOR, ScalarKalmanFilter, UpdateMode};
