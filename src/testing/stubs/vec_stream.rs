use crate::streams::{Sample, SampleStream};
use std::io::Error;

/// Finite in-memory stream; optional references are paired by position.
pub struct VecStream {
    pub values: Vec<f64>,
    pub references: Option<Vec<f64>>,
    idx: usize,
}

impl VecStream {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            references: None,
            idx: 0,
        }
    }

    pub fn with_references(values: Vec<f64>, references: Vec<f64>) -> Self {
        Self {
            values,
            references: Some(references),
            idx: 0,
        }
    }
}

impl SampleStream for VecStream {
    fn name(&self) -> &str {
        "vec"
    }

    fn has_more_samples(&self) -> bool {
        self.idx < self.values.len()
    }

    fn next_sample(&mut self) -> Option<Sample> {
        if !self.has_more_samples() {
            return None;
        }

        let mut sample = Sample::new(self.idx as u64, self.values[self.idx]);
        if let Some(r) = self.references.as_ref().and_then(|r| r.get(self.idx)) {
            sample = sample.with_reference(*r);
        }
        self.idx += 1;
        Some(sample)
    }

    fn restart(&mut self) -> Result<(), Error> {
        self.idx = 0;
        Ok(())
    }
}
