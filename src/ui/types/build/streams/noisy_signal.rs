use crate::streams::generators::NoisySignalGenerator;
use crate::ui::types::build::{BuildError, to_usize};
use crate::ui::types::choices::NoisySignalParameters;

impl TryFrom<NoisySignalParameters> for NoisySignalGenerator {
    type Error = BuildError;

    fn try_from(p: NoisySignalParameters) -> Result<Self, Self::Error> {
        let max_samples = p
            .max_samples
            .map(|v| to_usize(v, "max_samples"))
            .transpose()?;

        NoisySignalGenerator::new(
            p.start,
            p.drift_std,
            p.noise_std,
            p.missing_pct,
            p.angular,
            max_samples,
            p.seed,
        )
        .map_err(BuildError::from)
    }
}
