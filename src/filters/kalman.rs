use crate::filters::CycleError;
use crate::filters::angle::{is_missing, normalize_degrees};
use crate::models::MotionModel;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Added to the measurement variance so the gain denominator is never zero.
pub const MEASUREMENT_VARIANCE_FLOOR: f64 = 1e-9;

/// Where the filter is inside the per-sample cycle
/// `predict -> compute_gain -> update`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    /// Freshly constructed, nothing run yet.
    #[default]
    Idle,
    Predicted,
    GainComputed,
    Updated,
}

/// Which measurement update a cycle uses.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateMode {
    #[default]
    Linear,
    /// Degrees wrapping at ±180; innovations use the shortest arc.
    Angular,
}

/// Sequential one-dimensional Kalman filter.
///
/// The state is a plain value owned by one caller. Each sample goes through
/// [`predict`](Self::predict), [`compute_gain`](Self::compute_gain) and
/// [`update`](Self::update) (or [`update_angular`](Self::update_angular)), in
/// that order. An update refuses to run unless a gain has been computed since
/// the previous update, so a gain is never consumed twice. [`step`](Self::step)
/// runs the whole cycle at once.
///
/// Missing measurements (NaN or infinite) are skipped: the filter keeps its
/// estimate and variance and simply reports the current estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarKalmanFilter {
    estimate: f64,
    error_variance: f64,
    measurement_variance: f64,
    process_variance: f64,
    gain: Option<f64>,
    last_measurement: Option<f64>,
    phase: CyclePhase,
}

impl ScalarKalmanFilter {
    /// Creates a filter from standard deviations.
    ///
    /// # Arguments
    /// * `initial_estimate` - first guess; does not need to be precise
    /// * `std_initial` - uncertainty of the first guess
    /// * `std_meas` - measurement noise, fixed for the filter's lifetime
    /// * `std_noise` - process noise per prediction; zero for a constant quantity
    ///
    /// Only the squares are used, so negative deviations are accepted and
    /// behave like their absolute value.
    pub fn new(initial_estimate: f64, std_initial: f64, std_meas: f64, std_noise: f64) -> Self {
        Self {
            estimate: initial_estimate,
            error_variance: std_initial * std_initial,
            measurement_variance: std_meas * std_meas + MEASUREMENT_VARIANCE_FLOOR,
            process_variance: std_noise * std_noise,
            gain: None,
            last_measurement: None,
            phase: CyclePhase::Idle,
        }
    }

    #[inline]
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    #[inline]
    pub fn error_variance(&self) -> f64 {
        self.error_variance
    }

    #[inline]
    pub fn measurement_variance(&self) -> f64 {
        self.measurement_variance
    }

    #[inline]
    pub fn process_variance(&self) -> f64 {
        self.process_variance
    }

    /// Last computed gain, `None` before the first [`compute_gain`](Self::compute_gain).
    #[inline]
    pub fn gain(&self) -> Option<f64> {
        self.gain
    }

    #[inline]
    pub fn last_measurement(&self) -> Option<f64> {
        self.last_measurement
    }

    #[inline]
    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// Recomputes and stores `k = p / (p + r)`.
    ///
    /// Allowed from any phase; the stored gain is what the next update uses.
    pub fn compute_gain(&mut self) -> f64 {
        let k = self.error_variance / (self.error_variance + self.measurement_variance);
        self.gain = Some(k);
        self.phase = CyclePhase::GainComputed;
        k
    }

    /// Linear measurement update. Returns the new estimate.
    pub fn update(&mut self, measurement: f64) -> Result<f64, CycleError> {
        self.apply_measurement(measurement, UpdateMode::Linear)
    }

    /// Measurement update for angles in degrees.
    ///
    /// The innovation is taken along the shortest arc and the blended result
    /// is folded back into `(-180, 180]`.
    pub fn update_angular(&mut self, measurement: f64) -> Result<f64, CycleError> {
        self.apply_measurement(measurement, UpdateMode::Angular)
    }

    /// Dispatches to [`update`](Self::update) or [`update_angular`](Self::update_angular) by `mode`.
    pub fn update_with(&mut self, mode: UpdateMode, measurement: f64) -> Result<f64, CycleError> {
        self.apply_measurement(measurement, mode)
    }

    /// Time update through `model`; variance grows by the process variance.
    pub fn predict<M>(&mut self, model: &M)
    where
        M: MotionModel + ?Sized,
    {
        self.estimate = model.propagate(self.estimate);
        self.finish_predict();
    }

    /// Time update through a model that takes extra arguments.
    ///
    /// `args` is handed to `model` untouched.
    pub fn predict_with<A, F>(&mut self, model: F, args: A)
    where
        F: FnOnce(f64, A) -> f64,
    {
        self.estimate = model(self.estimate, args);
        self.finish_predict();
    }

    /// Forces the estimate. The error variance is left alone on purpose, so
    /// an injected value does not make the filter overconfident.
    pub fn override_estimate(&mut self, value: f64) {
        self.estimate = value;
    }

    /// Difference between `measurement` and the current estimate, NaN when
    /// the measurement is missing.
    pub fn innovation(&self, measurement: f64, mode: UpdateMode) -> f64 {
        if is_missing(measurement) {
            return f64::NAN;
        }
        match mode {
            UpdateMode::Linear => measurement - self.estimate,
            UpdateMode::Angular => normalize_degrees(measurement - self.estimate),
        }
    }

    /// Expected innovation variance `p + r` for the next update.
    #[inline]
    pub fn innovation_variance(&self) -> f64 {
        self.error_variance + self.measurement_variance
    }

    /// Runs one full cycle and returns the estimate after it.
    pub fn step<M>(&mut self, model: &M, measurement: f64, mode: UpdateMode) -> f64
    where
        M: MotionModel + ?Sized,
    {
        self.predict(model);
        let k = self.compute_gain();
        self.blend(measurement, k, mode)
    }

    fn finish_predict(&mut self) {
        self.error_variance += self.process_variance;
        self.phase = CyclePhase::Predicted;
    }

    fn apply_measurement(&mut self, measurement: f64, mode: UpdateMode) -> Result<f64, CycleError> {
        if is_missing(measurement) {
            return Ok(self.estimate);
        }
        let k = match (self.phase, self.gain) {
            (CyclePhase::GainComputed, Some(k)) => k,
            (phase, _) => return Err(CycleError::GainNotComputed(phase)),
        };
        Ok(self.blend(measurement, k, mode))
    }

    fn blend(&mut self, measurement: f64, k: f64, mode: UpdateMode) -> f64 {
        if is_missing(measurement) {
            return self.estimate;
        }

        self.last_measurement = Some(measurement);
        self.estimate = match mode {
            UpdateMode::Linear => self.estimate + k * (measurement - self.estimate),
            UpdateMode::Angular => {
                normalize_degrees(self.estimate + k * normalize_degrees(measurement - self.estimate))
            }
        };
        self.error_variance *= 1.0 - k;
        self.phase = CyclePhase::Updated;
        self.estimate
    }
}
