/// Online scalar statistic fed one value at a time.
///
/// Implementations accept values incrementally via [`add`] and expose the
/// current value via [`value`].
pub trait Accumulator {
    /// Incorporates a new observation.
    fn add(&mut self, v: f64);

    /// Returns the current statistic.
    fn value(&self) -> f64;

    /// Number of observations incorporated so far.
    fn count(&self) -> u64;
}
