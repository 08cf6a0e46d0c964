use std::io::Error;

/// One scalar sample pulled from a stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Zero-based position in the stream, counted from the last restart.
    pub index: u64,
    /// Measured value; NaN or infinite when the source had nothing usable.
    pub value: f64,
    /// Ground truth for this sample, when the source knows it.
    pub reference: Option<f64>,
}

impl Sample {
    pub fn new(index: u64, value: f64) -> Self {
        Self {
            index,
            value,
            reference: None,
        }
    }

    pub fn with_reference(mut self, reference: f64) -> Self {
        self.reference = Some(reference);
        self
    }
}

/// Pull-based source of scalar samples.
///
/// Implementations may be finite (files) or unbounded (generators).
pub trait SampleStream {
    /// Short human readable name of the source, used in logs and reports.
    fn name(&self) -> &str;

    /// Indicates whether the stream *may* produce more samples.
    ///
    /// Must be cheap and side effect free. Once it returns `false`, a call to
    /// [`next_sample`](Self::next_sample) must return `None`.
    fn has_more_samples(&self) -> bool;

    /// Produces the next sample, or `None` when exhausted.
    ///
    /// Unparseable input is not an end-of-stream condition: it is handed out
    /// as a sample with a NaN value so the consumer can apply its own
    /// missing-value policy.
    fn next_sample(&mut self) -> Option<Sample>;

    /// Rewinds the stream so it produces the same sequence again.
    ///
    /// Returns an error if the underlying source cannot be reopened.
    fn restart(&mut self) -> Result<(), Error>;
}
