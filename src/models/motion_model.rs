/// Stateless transition used by the predict step: `next = f(current)`.
///
/// Implemented for every `Fn(f64) -> f64`, so closures can be passed
/// directly. Models that need extra inputs either capture them or go
/// through [`ScalarKalmanFilter::predict_with`].
///
/// [`ScalarKalmanFilter::predict_with`]: crate::filters::ScalarKalmanFilter::predict_with
pub trait MotionModel {
    fn propagate(&self, current: f64) -> f64;
}

impl<F> MotionModel for F
where
    F: Fn(f64) -> f64,
{
    #[inline]
    fn propagate(&self, current: f64) -> f64 {
        self(current)
    }
}

/// No dynamics: the best guess for the next sample is the current estimate.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct IdentityModel;

impl MotionModel for IdentityModel {
    #[inline]
    fn propagate(&self, current: f64) -> f64 {
        current
    }
}

/// Constant velocity per sample: `next = current + rate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantRate {
    pub rate: f64,
}

impl ConstantRate {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

impl MotionModel for ConstantRate {
    #[inline]
    fn propagate(&self, current: f64) -> f64 {
        current + self.rate
    }
}

/// Exponential decay toward `mean`: `next = mean + retention * (current - mean)`.
///
/// `retention = 1` behaves like [`IdentityModel`], `retention = 0` jumps
/// straight to the mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanReverting {
    pub mean: f64,
    pub retention: f64,
}

impl MeanReverting {
    pub fn new(mean: f64, retention: f64) -> Self {
        Self { mean, retention }
    }
}

impl MotionModel for MeanReverting {
    #[inline]
    fn propagate(&self, current: f64) -> f64 {
        self.mean + self.retention * (current - self.mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_returns_input() {
        for x in [0.0, -3.5, 1e9, f64::NAN] {
            let y = IdentityModel.propagate(x);
            assert!(y == x || (x.is_nan() && y.is_nan()));
        }
    }

    #[test]
    fn closures_are_models() {
        let double = |x: f64| 2.0 * x;
        assert_eq!(double.propagate(4.0), 8.0);

        let boxed: Box<dyn MotionModel> = Box::new(|x: f64| x - 1.0);
        assert_eq!(boxed.propagate(4.0), 3.0);
    }

    #[test]
    fn constant_rate_adds_rate() {
        let m = ConstantRate::new(0.25);
        assert_eq!(m.propagate(1.0), 1.25);
        assert_eq!(m.propagate(m.propagate(1.0)), 1.5);
    }

    #[test]
    fn mean_reverting_decays_toward_mean() {
        let m = MeanReverting::new(10.0, 0.5);
        assert_eq!(m.propagate(20.0), 15.0);
        assert_eq!(m.propagate(10.0), 10.0);
        assert_eq!(MeanReverting::new(10.0, 1.0).propagate(3.0), 3.0);
        assert_eq!(MeanReverting::new(10.0, 0.0).propagate(3.0), 10.0);
    }
}
