use crate::evaluation::accumulators::Accumulator;

/// Streaming mean: `mean = sum / count`. NaN inputs are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct MeanAccumulator {
    count: u64,
    sum: f64,
}

impl Accumulator for MeanAccumulator {
    #[inline]
    fn add(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        self.count += 1;
        self.sum += v;
    }

    #[inline]
    fn value(&self) -> f64 {
        if self.count > 0 {
            self.sum / self.count as f64
        } else {
            f64::NAN
        }
    }

    #[inline]
    fn count(&self) -> u64 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_nan() {
        let m = MeanAccumulator::default();
        assert!(m.value().is_nan());
        assert_eq!(m.count(), 0);
    }

    #[test]
    fn averages_and_skips_nan() {
        let mut m = MeanAccumulator::default();
        for v in [1.0, f64::NAN, 2.0, 6.0] {
            m.add(v);
        }
        assert_eq!(m.count(), 3);
        assert_eq!(m.value(), 3.0);
    }
}
