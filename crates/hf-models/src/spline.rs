//! Natural cubic spline fitting and evaluation.
//!
//! Every fitted curve in the engine (emitter derating, COP datasheets, the
//! ambient day profile) goes through [`CurveFit`]. The boundary condition is
//! natural (second derivative zero at both end knots), so a two-point fit
//! degenerates to straight-line interpolation and linear data is reproduced
//! exactly.

use hf_core::ensure_finite;
use nalgebra::{DMatrix, DVector};

use crate::error::{ModelError, ModelResult};

/// A natural cubic spline over strictly increasing knots.
#[derive(Debug, Clone)]
pub struct CurveFit {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivative at each knot; zero at both ends (natural boundary).
    d2: Vec<f64>,
    extrapolate: bool,
}

impl CurveFit {
    /// Fit a spline through `(xs[i], ys[i])`.
    ///
    /// `extrapolate` sets the out-of-span policy: `true` evaluates the
    /// boundary segment polynomials beyond the outermost knots (no safety
    /// clamp), `false` makes out-of-span queries return NaN.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>, extrapolate: bool) -> ModelResult<Self> {
        if xs.len() < 2 {
            return Err(ModelError::TooFewPoints { count: xs.len() });
        }
        if xs.len() != ys.len() {
            return Err(ModelError::InvalidCurve {
                what: "x and y arrays differ in length",
            });
        }
        for &x in &xs {
            ensure_finite(x, "curve knot")?;
        }
        for &y in &ys {
            ensure_finite(y, "curve value")?;
        }
        if !xs.windows(2).all(|w| w[0] < w[1]) {
            return Err(ModelError::InvalidCurve {
                what: "knots must be strictly increasing",
            });
        }
        let d2 = solve_second_derivatives(&xs, &ys)?;
        Ok(Self {
            xs,
            ys,
            d2,
            extrapolate,
        })
    }

    /// Knot span of the independent variable.
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    pub fn in_domain(&self, x: f64) -> bool {
        let (lo, hi) = self.domain();
        x >= lo && x <= hi
    }

    /// Value at `x`.
    ///
    /// Outside the knot span this continues the boundary segment polynomial,
    /// or returns NaN when extrapolation is disabled. Never clamps.
    pub fn eval(&self, x: f64) -> f64 {
        if !self.extrapolate && !self.in_domain(x) {
            return f64::NAN;
        }
        let seg = match self.xs.partition_point(|&k| k <= x) {
            0 => 0,
            p => (p - 1).min(self.xs.len() - 2),
        };
        let h = self.xs[seg + 1] - self.xs[seg];
        let a = (self.xs[seg + 1] - x) / h;
        let b = (x - self.xs[seg]) / h;
        a * self.ys[seg]
            + b * self.ys[seg + 1]
            + ((a * a * a - a) * self.d2[seg] + (b * b * b - b) * self.d2[seg + 1]) * h * h / 6.0
    }
}

/// Second derivatives at the knots from the standard tridiagonal system.
///
/// Natural boundary pins the end derivatives at zero, leaving n-2 unknowns.
/// Curve definitions have at most a dozen knots, so a dense LU is fine.
fn solve_second_derivatives(xs: &[f64], ys: &[f64]) -> ModelResult<Vec<f64>> {
    let n = xs.len();
    let m = n - 2;
    let mut d2 = vec![0.0; n];
    if m == 0 {
        return Ok(d2);
    }

    let mut mat = DMatrix::<f64>::zeros(m, m);
    let mut rhs = DVector::<f64>::zeros(m);
    for i in 1..=m {
        let h_lo = xs[i] - xs[i - 1];
        let h_hi = xs[i + 1] - xs[i];
        let r = i - 1;
        if r > 0 {
            mat[(r, r - 1)] = h_lo / 6.0;
        }
        mat[(r, r)] = (h_lo + h_hi) / 3.0;
        if r + 1 < m {
            mat[(r, r + 1)] = h_hi / 6.0;
        }
        rhs[r] = (ys[i + 1] - ys[i]) / h_hi - (ys[i] - ys[i - 1]) / h_lo;
    }

    let sol = mat.lu().solve(&rhs).ok_or_else(|| ModelError::Numeric {
        what: "spline system is singular (LU solve failed)".to_string(),
    })?;
    for (i, v) in sol.iter().enumerate() {
        d2[i + 1] = *v;
    }
    Ok(d2)
}
