mod error;
mod filter;
mod models;
mod streams;
mod task;

pub use error::BuildError;

pub use filter::build_filter;
pub use models::build_model;
pub use streams::build_stream;
pub use task::build_task;

fn to_usize(value: u64, name: &str) -> Result<usize, BuildError> {
    usize::try_from(value)
        .map_err(|_| BuildError::InvalidParameter(format!("{name} too large for usize")))
}

fn require_finite(value: f64, name: &str) -> Result<f64, BuildError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BuildError::InvalidParameter(format!(
            "{name} must be finite, got {value}"
        )))
    }
}
