//! Built-in sample functions for the benchmark harness.
//!
//! The core accepts any sampled function; these are merely the ones the
//! CLI can generate samples for by name. Where a closed-form
//! antiderivative exists the runner reports the analytic integral
//! alongside the numerical result.

/// A named function the harness can sample on a grid.
pub struct SampleFunction {
    pub name: &'static str,
    pub description: &'static str,
    eval: fn(f64) -> f64,
    /// Antiderivative, when one is available in closed form.
    antiderivative: Option<fn(f64) -> f64>,
}

impl SampleFunction {
    /// Evaluate the function at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        (self.eval)(x)
    }

    /// Exact integral over `[a, b]`, if the antiderivative is known.
    pub fn analytic_integral(&self, a: f64, b: f64) -> Option<f64> {
        self.antiderivative.map(|big_f| big_f(b) - big_f(a))
    }
}

/// The functions the CLI knows how to sample.
pub const BUILTINS: &[SampleFunction] = &[
    SampleFunction {
        name: "sin",
        description: "sin(x) — the reference benchmark integrand",
        eval: f64::sin,
        antiderivative: Some(|x| -x.cos()),
    },
    SampleFunction {
        name: "cos",
        description: "cos(x)",
        eval: f64::cos,
        antiderivative: Some(f64::sin),
    },
    SampleFunction {
        name: "exp",
        description: "e^x",
        eval: f64::exp,
        antiderivative: Some(f64::exp),
    },
    SampleFunction {
        name: "runge",
        description: "1 / (1 + 25 x²) — oscillation-prone near interval ends",
        eval: |x| 1.0 / (1.0 + 25.0 * x * x),
        antiderivative: Some(|x| (5.0 * x).atan() / 5.0),
    },
];

/// Look up a built-in function by name.
pub fn lookup(name: &str) -> Option<&'static SampleFunction> {
    BUILTINS.iter().find(|f| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_every_builtin() {
        for f in BUILTINS {
            assert!(lookup(f.name).is_some());
        }
        assert!(lookup("no-such-function").is_none());
    }

    #[test]
    fn sin_analytic_integral_over_half_period_is_two() {
        let sin = lookup("sin").unwrap();
        let integral = sin.analytic_integral(0.0, std::f64::consts::PI).unwrap();
        assert!((integral - 2.0).abs() < 1e-12);
    }

    #[test]
    fn runge_analytic_integral_is_symmetric() {
        let runge = lookup("runge").unwrap();
        let left = runge.analytic_integral(-1.0, 0.0).unwrap();
        let right = runge.analytic_integral(0.0, 1.0).unwrap();
        assert!((left - right).abs() < 1e-12);
    }
}
