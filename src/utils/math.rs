/// Standard normal cumulative distribution function `P(Z <= a)`.
pub fn normal_probability(a: f64) -> f64 {
    0.5 * (1.0 + libm::erf(a / std::f64::consts::SQRT_2))
}
