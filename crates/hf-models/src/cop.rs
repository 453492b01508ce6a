//! Heat-pump COP performance curve.

use crate::error::ModelResult;
use crate::spline::CurveFit;

/// COP against one temperature variable: ambient (at a fixed leaving-water
/// temperature) or leaving-water (at a fixed ambient), depending on which
/// datasheet mode the definition came from.
///
/// Extrapolation beyond the datasheet points is enabled and unguarded, and no
/// monotonicity is enforced; sparse 2-3 point curves are a known accuracy
/// risk the model does not mitigate.
#[derive(Debug, Clone)]
pub struct CopCurve {
    curve: CurveFit,
}

impl CopCurve {
    pub fn new(temps_c: &[f64], cops: &[f64]) -> ModelResult<Self> {
        let curve = CurveFit::new(temps_c.to_vec(), cops.to_vec(), true)?;
        Ok(Self { curve })
    }

    /// COP at the curve's independent temperature.
    pub fn cop(&self, temp_c: f64) -> f64 {
        self.curve.eval(temp_c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mitsubishi WM85 at +7 ambient, by leaving-water temperature.
    const LWT_C: [f64; 6] = [25.0, 35.0, 40.0, 45.0, 50.0, 55.0];
    const COP: [f64; 6] = [5.95, 5.20, 4.45, 3.75, 3.20, 2.65];

    #[test]
    fn reproduces_datasheet_points() {
        let curve = CopCurve::new(&LWT_C, &COP).unwrap();
        for (t, c) in LWT_C.iter().zip(COP.iter()) {
            assert!((curve.cop(*t) - c).abs() < 1e-12);
        }
    }

    #[test]
    fn interpolates_between_points() {
        let curve = CopCurve::new(&LWT_C, &COP).unwrap();
        let mid = curve.cop(42.5);
        assert!(mid < 4.45 && mid > 3.75, "cop(42.5) = {mid}");
    }

    #[test]
    fn extrapolates_past_datasheet() {
        let curve = CopCurve::new(&LWT_C, &COP).unwrap();
        assert!(curve.cop(60.0).is_finite());
        assert!(curve.cop(60.0) < curve.cop(55.0));
    }

    #[test]
    fn two_point_curve_is_allowed() {
        let curve = CopCurve::new(&[2.0, 7.0], &[3.1, 3.9]).unwrap();
        assert!((curve.cop(4.5) - 3.5).abs() < 1e-12);
    }
}
