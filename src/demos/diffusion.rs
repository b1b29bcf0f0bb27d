use nalgebra::RealField;

use crate::demos::{SampledSeries, exact_solution};
use crate::disc::linear_elliptic::LinearElliptic;
use crate::disc::mesh::mesh1d::Mesh1d;
use crate::error::HhoResult;
use crate::solver::CgReport;

pub struct DiffusionReport<T> {
    pub potential: SampledSeries<T>,
    pub cg: CgReport<T>,
    pub l2_error_dofs: T,
    pub l2_error_func: T,
}
impl<T: RealField + Copy> DiffusionReport<T> {
    /// Signed `l2_error_dofs - l2_error_func`.
    pub fn error_difference(&self) -> T {
        self.l2_error_dofs - self.l2_error_func
    }
}

/// `f = pi^2 sin(pi x)`, so that `u = sin(pi x)` solves `-u'' = f` with
/// homogeneous boundary values.
pub fn source_term<T: RealField + Copy>(x: T) -> T {
    T::pi() * T::pi() * exact_solution(x)
}

pub fn run<T: RealField + Copy>(
    mesh: &Mesh1d<T>,
    degree: usize,
    eval_per_elem: usize,
) -> HhoResult<DiffusionReport<T>> {
    let problem = LinearElliptic::new(degree);
    let cg = problem.solve(mesh, source_term)?;
    let pp = problem.postprocess(mesh, &cg.solution, source_term, exact_solution, eval_per_elem)?;

    Ok(DiffusionReport {
        potential: SampledSeries::new("potential", pp.x.to_vec(), pp.potential.to_vec()),
        cg,
        l2_error_dofs: pp.l2_error_dofs,
        l2_error_func: pp.l2_error_func,
    })
}
