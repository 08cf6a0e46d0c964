//! Sequential one-dimensional Kalman filtering for scalar and angular streams.
//!
//! [`filters::ScalarKalmanFilter`] is the core: a small `Copy` state updated
//! one sample at a time, with a shortest-arc update for degrees that wrap at
//! ±180. Around it sit sample sources ([`streams`]), motion models
//! ([`models`]), residual evaluation ([`evaluation`]), the run loop
//! ([`tasks`]) and a config/wizard front end ([`ui`]).

pub mod evaluation;
pub mod filters;
pub mod models;
pub mod streams;
pub mod tasks;
pub mod ui;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
