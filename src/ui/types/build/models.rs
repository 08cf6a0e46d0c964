use crate::models::{ConstantRate, IdentityModel, MeanReverting, MotionModel};
use crate::ui::types::build::{BuildError, require_finite};
use crate::ui::types::choices::{ConstantRateParameters, MeanRevertingParameters, ModelChoice};

impl TryFrom<ConstantRateParameters> for ConstantRate {
    type Error = BuildError;

    fn try_from(p: ConstantRateParameters) -> Result<Self, Self::Error> {
        Ok(ConstantRate::new(require_finite(p.rate, "rate")?))
    }
}

impl TryFrom<MeanRevertingParameters> for MeanReverting {
    type Error = BuildError;

    fn try_from(p: MeanRevertingParameters) -> Result<Self, Self::Error> {
        let mean = require_finite(p.mean, "mean")?;
        if !(0.0..=1.0).contains(&p.retention) {
            return Err(BuildError::InvalidParameter(format!(
                "retention must be in [0, 1], got {}",
                p.retention
            )));
        }
        Ok(MeanReverting::new(mean, p.retention))
    }
}

pub fn build_model(choice: ModelChoice) -> Result<Box<dyn MotionModel>, BuildError> {
    match choice {
        ModelChoice::Identity(_) => Ok(Box::new(IdentityModel)),
        ModelChoice::ConstantRate(p) => Ok(Box::new(ConstantRate::try_from(p)?)),
        ModelChoice::MeanReverting(p) => Ok(Box::new(MeanReverting::try_from(p)?)),
    }
}
