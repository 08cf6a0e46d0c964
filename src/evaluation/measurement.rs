use serde::Serialize;

/// Named scalar metric produced by an evaluator.
///
/// Typical examples: `"rmse"`, `"missing_rate"`, `"mean_abs_innovation"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub name: String,
    pub value: f64,
}

impl Measurement {
    #[inline]
    pub fn new<N: Into<String>>(name: N, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}
