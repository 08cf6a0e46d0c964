use crate::evaluation::{Accumulator, FilterEvaluator, Measurement, TracePoint};
use crate::filters::{UpdateMode, shortest_arc};
use crate::streams::Sample;
use crate::utils::math::normal_probability;

/// Residual statistics of a filter run.
///
/// Tracks:
/// - the share of missing samples (`missing_rate`);
/// - the mean absolute innovation (`mean_abs_innovation`);
/// - how often the innovation fell inside `±2·sqrt(p + r)`
///   (`innovation_coverage_2sigma`), next to the share a consistent filter
///   with Gaussian noise would reach (`expected_coverage_2sigma`);
/// - `rmse` and `mae` of the estimate against the sample reference, only
///   once at least one sample carried a reference.
///
/// In angular mode all differences are taken along the shortest arc.
pub struct ResidualEvaluator<A: Accumulator + Default> {
    mode: UpdateMode,
    samples: u64,
    missing: A,
    abs_innovation: A,
    within_two_sigma: A,
    squared_error: A,
    abs_error: A,
}

impl<A: Accumulator + Default> ResidualEvaluator<A> {
    pub fn new(mode: UpdateMode) -> Self {
        Self {
            mode,
            samples: 0,
            missing: A::default(),
            abs_innovation: A::default(),
            within_two_sigma: A::default(),
            squared_error: A::default(),
            abs_error: A::default(),
        }
    }

    #[inline]
    fn error(&self, estimate: f64, reference: f64) -> f64 {
        match self.mode {
            UpdateMode::Linear => estimate - reference,
            UpdateMode::Angular => shortest_arc(reference, estimate),
        }
    }
}

impl<A: Accumulator + Default> FilterEvaluator for ResidualEvaluator<A> {
    fn reset(&mut self) {
        *self = Self::new(self.mode);
    }

    fn add_result(&mut self, sample: &Sample, point: &TracePoint) {
        self.samples += 1;
        self.missing.add(if point.skipped { 1.0 } else { 0.0 });

        if !point.skipped && point.innovation.is_finite() {
            self.abs_innovation.add(point.innovation.abs());
            let bound = 2.0 * point.innovation_variance.sqrt();
            self.within_two_sigma
                .add(if point.innovation.abs() <= bound { 1.0 } else { 0.0 });
        }

        if let Some(reference) = sample.reference.filter(|r| r.is_finite()) {
            let e = self.error(point.estimate, reference);
            self.squared_error.add(e * e);
            self.abs_error.add(e.abs());
        }
    }

    fn performance(&self) -> Vec<Measurement> {
        let mut out = vec![
            Measurement::new("samples", self.samples as f64),
            Measurement::new("missing_rate", self.missing.value()),
            Measurement::new("mean_abs_innovation", self.abs_innovation.value()),
            Measurement::new("innovation_coverage_2sigma", self.within_two_sigma.value()),
            Measurement::new("expected_coverage_2sigma", 2.0 * normal_probability(2.0) - 1.0),
        ];
        if self.squared_error.count() > 0 {
            out.push(Measurement::new("rmse", self.squared_error.value().sqrt()));
            out.push(Measurement::new("mae", self.abs_error.value()));
        }
        out
    }
}
