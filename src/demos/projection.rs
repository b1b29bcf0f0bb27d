use nalgebra::RealField;

use crate::demos::{SampledSeries, exact_solution};
use crate::disc::mesh::mesh1d::{Mesh1d, make_test_points};
use crate::disc::projector::Projector;
use crate::error::HhoResult;

/// Projects `sin(pi x)` onto the degree `degree` polynomials of each element
/// and samples the projection at the test points.
pub fn run<T: RealField + Copy>(
    mesh: &Mesh1d<T>,
    degree: usize,
    eval_per_elem: usize,
) -> HhoResult<SampledSeries<T>> {
    let projector = Projector::new(degree);
    let mut x_val = Vec::with_capacity(mesh.elem_num() * eval_per_elem);
    let mut y_val = Vec::with_capacity(mesh.elem_num() * eval_per_elem);
    for elem in mesh.elements.iter() {
        let projection = projector.project(elem, exact_solution)?;
        for tp in make_test_points(elem, eval_per_elem) {
            x_val.push(tp);
            y_val.push(projector.eval_projection(elem, &projection, tp));
        }
    }
    Ok(SampledSeries::new("projection", x_val, y_val))
}
