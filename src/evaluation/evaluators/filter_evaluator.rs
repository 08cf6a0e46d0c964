use std::collections::HashMap;

use crate::evaluation::{Measurement, TracePoint};
use crate::streams::Sample;

/// Online judge of how well a filter tracks its input.
///
/// A `FilterEvaluator` sees every sample next to the trace point the filter
/// produced for it and exposes aggregated metrics via [`performance`].
pub trait FilterEvaluator {
    /// Clears accumulated metrics.
    fn reset(&mut self);

    /// Feeds one sample and the filter's response to it.
    fn add_result(&mut self, sample: &Sample, point: &TracePoint);

    /// Returns the current metrics.
    fn performance(&self) -> Vec<Measurement>;
}

pub trait FilterEvaluatorExt {
    /// Returns (name, Some(value)|None) for each requested metric, preserving order.
    fn metrics<'a, I>(&self, names: I) -> Vec<(String, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>;

    fn metric(&self, name: &str) -> Option<f64> {
        self.metrics([name]).into_iter().next().and_then(|(_, v)| v)
    }
}

impl<T: FilterEvaluator + ?Sized> FilterEvaluatorExt for T {
    fn metrics<'a, I>(&self, names: I) -> Vec<(String, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let map: HashMap<_, _> = self
            .performance()
            .into_iter()
            .map(|m| (m.name, m.value))
            .collect();
        names
            .into_iter()
            .map(|n| (n.to_string(), map.get(n).copied()))
            .collect()
    }
}
