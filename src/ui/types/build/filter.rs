use crate::filters::ScalarKalmanFilter;
use crate::ui::types::build::{BuildError, require_finite};
use crate::ui::types::choices::FilterParameters;

/// The filter core accepts any numbers; configuration only lets finite ones through.
pub fn build_filter(p: &FilterParameters) -> Result<ScalarKalmanFilter, BuildError> {
    Ok(ScalarKalmanFilter::new(
        require_finite(p.initial_estimate, "initial_estimate")?,
        require_finite(p.std_initial, "std_initial")?,
        require_finite(p.std_meas, "std_meas")?,
        require_finite(p.std_noise, "std_noise")?,
    ))
}
