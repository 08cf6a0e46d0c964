use std::f64::consts::TAU;
use std::io::{Error, ErrorKind};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::filters::normalize_degrees;
use crate::streams::{Sample, SampleStream};

/// Synthetic source: a random-walk truth observed through Gaussian noise.
///
/// Every sample carries its truth as `reference`. With `angular` set, both
/// truth and measurement are wrapped into `(-180, 180]`.
#[derive(Debug)]
pub struct NoisySignalGenerator {
    seed: u64,
    rng: StdRng,
    start: f64,
    truth: f64,
    drift_std: f64,
    noise_std: f64,
    missing_percentage: u32,
    angular: bool,
    max_samples: Option<usize>,
    produced: usize,
}

impl NoisySignalGenerator {
    pub fn new(
        start: f64,
        drift_std: f64,
        noise_std: f64,
        missing_percentage: u32,
        angular: bool,
        max_samples: Option<usize>,
        seed: u64,
    ) -> Result<Self, Error> {
        if !start.is_finite() {
            return Err(Error::new(ErrorKind::InvalidInput, "start must be finite"));
        }
        if !(drift_std.is_finite() && drift_std >= 0.0) {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "drift standard deviation must be finite and >= 0",
            ));
        }
        if !(noise_std.is_finite() && noise_std >= 0.0) {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "noise standard deviation must be finite and >= 0",
            ));
        }
        if missing_percentage > 100 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "Missing percentage must be in [0, 100]",
            ));
        }

        let start = if angular { normalize_degrees(start) } else { start };
        Ok(Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            start,
            truth: start,
            drift_std,
            noise_std,
            missing_percentage,
            angular,
            max_samples,
            produced: 0,
        })
    }

    /// Standard normal draw (Box-Muller).
    #[inline]
    fn gaussian(&mut self) -> f64 {
        let u1: f64 = 1.0 - self.rng.random::<f64>();
        let u2: f64 = self.rng.random::<f64>();
        (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
    }

    #[inline]
    fn wrap(&self, v: f64) -> f64 {
        if self.angular { normalize_degrees(v) } else { v }
    }

    #[inline]
    fn roll_missing(&mut self) -> bool {
        let roll: u32 = self.rng.random_range(1..=100);
        roll <= self.missing_percentage
    }
}

impl SampleStream for NoisySignalGenerator {
    fn name(&self) -> &str {
        if self.angular {
            "noisy-signal (angular)"
        } else {
            "noisy-signal"
        }
    }

    fn has_more_samples(&self) -> bool {
        self.max_samples.map_or(true, |max| self.produced < max)
    }

    fn next_sample(&mut self) -> Option<Sample> {
        if !self.has_more_samples() {
            return None;
        }

        let drift = self.drift_std * self.gaussian();
        self.truth = self.wrap(self.truth + drift);

        let noise = self.noise_std * self.gaussian();
        let measured = self.wrap(self.truth + noise);
        let value = if self.roll_missing() { f64::NAN } else { measured };

        let sample = Sample::new(self.produced as u64, value).with_reference(self.truth);
        self.produced += 1;
        Some(sample)
    }

    fn restart(&mut self) -> Result<(), Error> {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.truth = self.start;
        self.produced = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn take(g: &mut NoisySignalGenerator, n: usize) -> Vec<Sample> {
        (0..n).map(|_| g.next_sample().expect("sample")).collect()
    }

    #[test]
    fn noiseless_constant_signal() {
        let mut g = NoisySignalGenerator::new(10.0, 0.0, 0.0, 0, false, Some(5), 1).unwrap();
        let got = take(&mut g, 5);
        assert!(got.iter().all(|s| s.value == 10.0 && s.reference == Some(10.0)));
        assert!(!g.has_more_samples());
        assert!(g.next_sample().is_none());
    }

    #[test]
    fn noise_has_roughly_the_requested_spread() {
        let mut g = NoisySignalGenerator::new(0.0, 0.0, 2.0, 0, false, None, 7).unwrap();
        let n = 20_000;
        let got = take(&mut g, n);
        let mean = got.iter().map(|s| s.value).sum::<f64>() / n as f64;
        let var = got.iter().map(|s| (s.value - mean).powi(2)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.1, "mean={mean}");
        assert!((var.sqrt() - 2.0).abs() < 0.1, "std={}", var.sqrt());
    }

    #[test]
    fn angular_values_stay_wrapped() {
        let mut g = NoisySignalGenerator::new(540.0, 30.0, 20.0, 0, true, Some(500), 3).unwrap();
        for s in take(&mut g, 500) {
            assert!(s.value > -180.0 && s.value <= 180.0, "value={}", s.value);
            let r = s.reference.unwrap();
            assert!(r > -180.0 && r <= 180.0, "reference={r}");
        }
    }

    #[test]
    fn missing_percentage_blanks_samples() {
        let mut all = NoisySignalGenerator::new(1.0, 0.1, 0.1, 100, false, Some(50), 9).unwrap();
        assert!(take(&mut all, 50).iter().all(|s| s.value.is_nan() && s.reference.is_some()));

        let mut none = NoisySignalGenerator::new(1.0, 0.1, 0.1, 0, false, Some(50), 9).unwrap();
        assert!(take(&mut none, 50).iter().all(|s| s.value.is_finite()));
    }

    #[test]
    fn restart_reproduces_sequence() {
        let mut g = NoisySignalGenerator::new(5.0, 0.5, 1.0, 10, false, Some(100), 12345).unwrap();
        let bits = |v: Vec<Sample>| -> Vec<(u64, u64, Option<u64>)> {
            v.iter()
                .map(|s| (s.index, s.value.to_bits(), s.reference.map(f64::to_bits)))
                .collect()
        };
        let first = bits(take(&mut g, 40));
        g.restart().unwrap();
        let second = bits(take(&mut g, 40));
        assert_eq!(first, second);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let cases = [
            NoisySignalGenerator::new(f64::NAN, 0.0, 0.0, 0, false, None, 1),
            NoisySignalGenerator::new(0.0, -1.0, 0.0, 0, false, None, 1),
            NoisySignalGenerator::new(0.0, 0.0, f64::INFINITY, 0, false, None, 1),
            NoisySignalGenerator::new(0.0, 0.0, 0.0, 101, false, None, 1),
        ];
        for c in cases {
            assert_eq!(c.unwrap_err().kind(), ErrorKind::InvalidInput);
        }
    }
}
