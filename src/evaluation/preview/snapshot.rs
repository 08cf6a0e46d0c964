use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result};

use serde::Serialize;

/// Progress report emitted while a filter task runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub samples_seen: u64,
    pub estimate: f64,
    pub error_variance: f64,
    pub seconds: f64,
    pub metrics: BTreeMap<String, f64>,
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "seen={}, x={:.6}, p={:.6}, t={:.3}s",
            self.samples_seen, self.estimate, self.error_variance, self.seconds
        )?;
        for (name, value) in &self.metrics {
            write!(f, ", {name}={value:.6}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_metrics_in_name_order() {
        let mut metrics = BTreeMap::new();
        metrics.insert("rmse".to_string(), 0.5);
        metrics.insert("mae".to_string(), 0.25);
        let s = Snapshot {
            samples_seen: 3,
            estimate: 1.5,
            error_variance: 0.125,
            seconds: 0.0,
            metrics,
        };
        assert_eq!(
            s.to_string(),
            "seen=3, x=1.500000, p=0.125000, t=0.000s, mae=0.250000, rmse=0.500000"
        );
    }
}
