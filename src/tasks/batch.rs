use std::thread;

use crate::filters::{ScalarKalmanFilter, UpdateMode};
use crate::models::IdentityModel;

/// Filters `samples` in order with the identity model and returns one
/// estimate per input. Missing inputs repeat the previous estimate.
pub fn filter_series(filter: &mut ScalarKalmanFilter, samples: &[f64], mode: UpdateMode) -> Vec<f64> {
    samples
        .iter()
        .map(|&z| filter.step(&IdentityModel, z, mode))
        .collect()
}

/// Runs independent channels on scoped threads, one filter per channel.
///
/// Channels share nothing, so no locking is involved. Results come back in
/// input order together with each channel's final filter state.
pub fn filter_channels(
    channels: Vec<(ScalarKalmanFilter, Vec<f64>)>,
    mode: UpdateMode,
) -> Vec<(ScalarKalmanFilter, Vec<f64>)> {
    thread::scope(|scope| {
        let handles: Vec<_> = channels
            .into_iter()
            .map(|(mut filter, samples)| {
                scope.spawn(move || {
                    let out = filter_series(&mut filter, &samples, mode);
                    (filter, out)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(result) => result,
                Err(payload) => std::panic::resume_unwind(payload),
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_has_one_output_per_input() {
        let mut kf = ScalarKalmanFilter::new(0.0, 10.0, 1.0, 0.1);
        let out = filter_series(&mut kf, &[1.0, 2.0, f64::NAN, 3.0], UpdateMode::Linear);
        assert_eq!(out.len(), 4);
        assert_eq!(out[2], out[1]);
        assert_eq!(*out.last().unwrap(), kf.estimate());
    }

    #[test]
    fn series_matches_manual_cycles() {
        let samples = [4.0, 4.5, 3.9, 4.2];
        let mut a = ScalarKalmanFilter::new(0.0, 5.0, 0.5, 0.05);
        let mut b = a;
        let out = filter_series(&mut a, &samples, UpdateMode::Linear);
        for (z, got) in samples.iter().zip(out) {
            b.predict(&IdentityModel);
            b.compute_gain();
            assert_eq!(b.update(*z).unwrap(), got);
        }
    }

    #[test]
    fn empty_series() {
        let mut kf = ScalarKalmanFilter::new(1.0, 1.0, 1.0, 1.0);
        assert!(filter_series(&mut kf, &[], UpdateMode::Angular).is_empty());
        assert_eq!(kf.error_variance(), 1.0);
    }

    #[test]
    fn channels_match_sequential_runs() {
        let channels: Vec<(ScalarKalmanFilter, Vec<f64>)> = (0..6)
            .map(|c| {
                let samples = (0..50).map(|i| c as f64 * 10.0 + (i % 3) as f64).collect();
                (ScalarKalmanFilter::new(0.0, 20.0, 1.0, 0.2), samples)
            })
            .collect();

        let expected: Vec<Vec<f64>> = channels
            .iter()
            .map(|(f, s)| {
                let mut f = *f;
                filter_series(&mut f, s, UpdateMode::Linear)
            })
            .collect();

        let got = filter_channels(channels, UpdateMode::Linear);
        assert_eq!(got.len(), 6);
        for ((filter, out), exp) in got.iter().zip(&expected) {
            assert_eq!(out, exp);
            assert_eq!(filter.estimate(), *exp.last().unwrap());
        }
    }
}
