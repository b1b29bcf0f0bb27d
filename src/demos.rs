use clap::ValueEnum;
use nalgebra::RealField;
use ndarray::Array1;
use tracing::info;

use crate::disc::mesh::mesh1d::Mesh1d;
use crate::error::HhoResult;

pub mod diffusion;
pub mod gradrec;
pub mod projection;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoMode {
    /// L2 projection of sin(pi x)
    Projection,
    /// Gradient and potential reconstruction of sin(pi x)
    Gradrec,
    /// HHO solve of -u'' = pi^2 sin(pi x) on [0, 1]
    Diffusion,
}

/// A titled curve sampled at the element test points, in mesh order.
#[derive(Clone, Debug, PartialEq)]
pub struct SampledSeries<T> {
    pub title: String,
    pub x: Array1<T>,
    pub y: Array1<T>,
}
impl<T> SampledSeries<T> {
    pub fn new(title: impl Into<String>, x: Vec<T>, y: Vec<T>) -> Self {
        assert_eq!(x.len(), y.len(), "series abscissae and values differ in length");
        Self {
            title: title.into(),
            x: Array1::from_vec(x),
            y: Array1::from_vec(y),
        }
    }
    pub fn len(&self) -> usize {
        self.x.len()
    }
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// The manufactured solution shared by every demonstration.
pub fn exact_solution<T: RealField + Copy>(x: T) -> T {
    (T::pi() * x).sin()
}

/// Runs one demonstration and returns the series it produced.
pub fn run<T: RealField + Copy>(
    mode: DemoMode,
    mesh: &Mesh1d<T>,
    degree: usize,
    eval_per_elem: usize,
) -> HhoResult<Vec<SampledSeries<T>>> {
    match mode {
        DemoMode::Projection => Ok(vec![projection::run(mesh, degree, eval_per_elem)?]),
        DemoMode::Gradrec => gradrec::run(mesh, degree, eval_per_elem),
        DemoMode::Diffusion => {
            let report = diffusion::run(mesh, degree, eval_per_elem)?;
            info!(
                "CG iterations: {}, ||r||/||r0|| = {}, converged: {}",
                report.cg.iterations, report.cg.relative_residual, report.cg.converged
            );
            info!("Err (with dofs): {}", report.l2_error_dofs);
            info!("Err (with func): {}", report.l2_error_func);
            info!("Difference: {}", report.error_difference());
            Ok(vec![report.potential])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mode_produces_samples() {
        let mesh = Mesh1d::<f64>::uniform(2);
        let expected = [
            (DemoMode::Projection, vec!["projection"]),
            (
                DemoMode::Gradrec,
                vec!["gradient", "potential (zeroavg)", "potential"],
            ),
            (DemoMode::Diffusion, vec!["potential"]),
        ];
        for (mode, titles) in expected {
            let series = run(mode, &mesh, 1, 3).unwrap();
            let got: Vec<&str> = series.iter().map(|s| s.title.as_str()).collect();
            assert_eq!(got, titles, "{mode:?}");
            assert!(series.iter().all(|s| s.len() == 6));
        }
    }

    #[test]
    #[should_panic(expected = "differ in length")]
    fn test_series_rejects_mismatched_lengths() {
        SampledSeries::new("bad", vec![0.0, 1.0], vec![0.0]);
    }
}
