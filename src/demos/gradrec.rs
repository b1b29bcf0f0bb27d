use nalgebra::{DVector, RealField};
use ndarray::Zip;
use ndarray_stats::QuantileExt;
use tracing::info;

use crate::demos::{SampledSeries, exact_solution};
use crate::disc::hho::GradientReconstructionOperator;
use crate::disc::mesh::mesh1d::{Mesh1d, make_test_points};
use crate::disc::projector::Projector;
use crate::error::HhoResult;

/// Reconstructs gradient and potential of `sin(pi x)` from its HHO dofs:
/// the cell projection and the exact face values.
pub fn run<T: RealField + Copy>(
    mesh: &Mesh1d<T>,
    degree: usize,
    eval_per_elem: usize,
) -> HhoResult<Vec<SampledSeries<T>>> {
    let projector = Projector::new(degree);
    let gradrec = GradientReconstructionOperator::new(degree);

    let samples_num = mesh.elem_num() * eval_per_elem;
    let mut x_val = Vec::with_capacity(samples_num);
    let mut grad_val = Vec::with_capacity(samples_num);
    let mut pot_zeroavg_val = Vec::with_capacity(samples_num);
    let mut pot_val = Vec::with_capacity(samples_num);

    for elem in mesh.elements.iter() {
        let gr = gradrec.build(elem)?;
        let cell = projector.project(elem, exact_solution)?;
        let [left, right] = elem.faces();
        let mut dofs = DVector::<T>::zeros(degree + 3);
        dofs.rows_mut(0, degree + 1).copy_from(&cell);
        dofs[degree + 1] = exact_solution(left);
        dofs[degree + 2] = exact_solution(right);

        for tp in make_test_points(elem, eval_per_elem) {
            x_val.push(tp);
            grad_val.push(gr.reconstruct_gradient(&dofs, tp));
            pot_zeroavg_val.push(gr.reconstruct_potential_zeroavg(&dofs, tp));
            pot_val.push(gr.reconstruct_potential(&dofs, tp));
        }
    }

    let gradient = SampledSeries::new("gradient", x_val.clone(), grad_val);
    if let Some(deviation) = max_gradient_deviation(&gradient) {
        info!("Max |grad R(u) - pi cos(pi x)|: {}", deviation);
    }
    Ok(vec![
        gradient,
        SampledSeries::new("potential (zeroavg)", x_val.clone(), pot_zeroavg_val),
        SampledSeries::new("potential", x_val, pot_val),
    ])
}

/// Largest pointwise distance between a sampled gradient and `pi cos(pi x)`.
/// `None` when nothing was sampled.
pub fn max_gradient_deviation<T: RealField + Copy>(gradient: &SampledSeries<T>) -> Option<T> {
    let deviation = Zip::from(&gradient.x)
        .and(&gradient.y)
        .map_collect(|&x, &g| (g - T::pi() * (T::pi() * x).cos()).abs());
    deviation.max().ok().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_produces_three_series_on_shared_points() {
        let mesh = Mesh1d::<f64>::uniform(3);
        let series = run(&mesh, 1, 4).unwrap();
        assert_eq!(series.len(), 3);
        assert!(series.iter().all(|s| s.len() == 12 && s.x == series[0].x));
        // the potential only adds the cell mean to the zero-average part
        let shift = &series[2].y - &series[1].y;
        for i in 0..4 {
            assert!((shift[i] - shift[0]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_gradient_deviation_shrinks_with_degree() {
        let mesh = Mesh1d::<f64>::uniform(4);
        let linear = max_gradient_deviation(&run(&mesh, 1, 5).unwrap()[0]).unwrap();
        let quadratic = max_gradient_deviation(&run(&mesh, 2, 5).unwrap()[0]).unwrap();
        assert!(linear < 0.2, "{linear}");
        assert!(quadratic < 0.02, "{quadratic}");
        assert!(quadratic < linear / 5.0);
    }

    #[test]
    fn test_potential_approximates_the_function() {
        let mesh = Mesh1d::<f64>::uniform(4);
        let series = run(&mesh, 2, 5).unwrap();
        let potential = &series[2];
        for (&x, &p) in potential.x.iter().zip(potential.y.iter()) {
            assert!((p - exact_solution(x)).abs() < 1e-3, "at {x}: {p}");
        }
    }

    #[test]
    fn test_no_samples_gives_no_deviation() {
        let mesh = Mesh1d::<f64>::uniform(2);
        let series = run(&mesh, 1, 0).unwrap();
        assert!(series[0].is_empty());
        assert_eq!(max_gradient_deviation(&series[0]), None);
    }
}
