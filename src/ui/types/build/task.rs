use crate::evaluation::{MeanAccumulator, ResidualEvaluator};
use crate::tasks::FilterTask;
use crate::ui::types::build::{BuildError, build_filter, build_model, build_stream};
use crate::ui::types::choices::TaskChoice;

pub fn build_task(choice: TaskChoice) -> Result<FilterTask, BuildError> {
    match choice {
        TaskChoice::FilterStream(p) => {
            if p.report_frequency == 0 {
                return Err(BuildError::InvalidParameter(
                    "report_frequency must be >= 1".into(),
                ));
            }
            let filter = build_filter(&p.filter)?;
            let model = build_model(p.model)?;
            let stream = build_stream(p.stream)?;
            let evaluator = Box::new(ResidualEvaluator::<MeanAccumulator>::new(p.mode));

            Ok(FilterTask::new(
                filter,
                stream,
                model,
                p.mode,
                evaluator,
                p.max_samples,
                p.report_frequency,
            )?)
        }
    }
}
