use nalgebra::{DMatrix, DVector, RealField};

use crate::disc::basis::{Basis1d, monomial1d::ScaledMonomialBasis};
use crate::disc::gauss_points::GaussPoints1d;
use crate::disc::mesh::mesh1d::Element1d;
use crate::error::{HhoError, HhoResult};

/// Builds, element by element, the HHO gradient reconstruction for cell
/// unknowns of degree `degree`.
///
/// The reconstruction lives in the degree `degree + 1` scaled monomials minus
/// the constant mode, and is the solution of
/// `(grad R(v), grad w)_T = (grad v_T, grad w)_T + sum_F (v_F - v_T) grad w . n_F`
/// for every non-constant `w`.
pub struct GradientReconstructionOperator<T> {
    degree: usize,
    basis: ScaledMonomialBasis,
    quad: GaussPoints1d<T>,
}

/// The gradient reconstruction of one element. Rebuilt from scratch for each
/// element, nothing is carried over.
#[derive(Clone, Debug)]
pub struct GradientReconstruction<T> {
    elem: Element1d<T>,
    basis: ScaledMonomialBasis,
    gradrec_matrix: DMatrix<T>,
    local_contrib_matrix: DMatrix<T>,
}

impl<T: RealField + Copy> GradientReconstructionOperator<T> {
    pub fn new(degree: usize) -> Self {
        Self {
            degree,
            basis: ScaledMonomialBasis::new(degree + 1),
            quad: GaussPoints1d::new(2 * (degree + 1)),
        }
    }
    pub fn stiffness_matrix(&self, elem: &Element1d<T>) -> DMatrix<T> {
        let size = Basis1d::<T>::size(&self.basis);
        let mut stiffness_matrix = DMatrix::<T>::zeros(size, size);
        for (qpoint, qweight) in self.quad.integrate(elem) {
            let dphi = self.basis.eval_gradients(elem, qpoint);
            stiffness_matrix.ger(qweight, &dphi, &dphi, T::one());
        }
        stiffness_matrix
    }
    pub fn build(&self, elem: &Element1d<T>) -> HhoResult<GradientReconstruction<T>> {
        let stiffness_matrix = self.stiffness_matrix(elem);

        let basis_k_size = self.degree + 1;
        let bg_rows = Basis1d::<T>::size(&self.basis) - 1;
        let mg = stiffness_matrix.view((1, 1), (bg_rows, bg_rows)).into_owned();

        let mut bg = DMatrix::<T>::zeros(bg_rows, basis_k_size + 2);
        bg.view_mut((0, 0), (bg_rows, basis_k_size))
            .copy_from(&stiffness_matrix.view((1, 0), (bg_rows, basis_k_size)));

        // Face terms: the cell trace enters with -n_F, the face unknown with
        // +n_F. phi_F(0) is always 1 so the face columns are just the gradients.
        for (iface, (&face, &normal)) in elem.faces().iter().zip(elem.normals().iter()).enumerate() {
            let phi_f = self.basis.eval_functions(elem, face);
            let dphi_f = self.basis.eval_gradients(elem, face);
            let dphi_tail = dphi_f.rows(1, bg_rows);
            bg.view_mut((0, 0), (bg_rows, basis_k_size)).ger(
                -normal,
                &dphi_tail,
                &phi_f.rows(0, basis_k_size),
                T::one(),
            );
            bg.column_mut(basis_k_size + iface)
                .copy_from(&dphi_tail.map(|v| v * normal));
        }

        let gradrec_matrix = mg
            .lu()
            .solve(&bg)
            .ok_or_else(|| HhoError::singular("gradient reconstruction system", elem))?;
        let local_contrib_matrix = bg.tr_mul(&gradrec_matrix);

        Ok(GradientReconstruction {
            elem: *elem,
            basis: self.basis,
            gradrec_matrix,
            local_contrib_matrix,
        })
    }
}

impl<T: RealField + Copy> GradientReconstruction<T> {
    pub fn element(&self) -> &Element1d<T> {
        &self.elem
    }
    /// Degree of the cell unknowns.
    pub fn degree(&self) -> usize {
        self.basis.degree - 1
    }
    /// The matrix `G` mapping local dofs to the non-constant coefficients of
    /// the reconstruction.
    pub fn as_matrix(&self) -> &DMatrix<T> {
        &self.gradrec_matrix
    }
    pub fn local_contrib(&self) -> &DMatrix<T> {
        &self.local_contrib_matrix
    }
    fn reconstruction_coeffs(&self, dofs: &DVector<T>) -> DVector<T> {
        assert_eq!(
            dofs.len(),
            self.gradrec_matrix.ncols(),
            "local dof vector must hold the cell coefficients and two face values"
        );
        &self.gradrec_matrix * dofs
    }
    pub fn reconstruct_potential_zeroavg(&self, dofs: &DVector<T>, point: T) -> T {
        let coeffs = self.reconstruction_coeffs(dofs);
        let phi = self.basis.eval_functions(&self.elem, point);
        phi.rows(1, coeffs.len()).dot(&coeffs)
    }
    /// The constant mode is not reconstructed, the cell average unknown is
    /// added back instead.
    pub fn reconstruct_potential(&self, dofs: &DVector<T>, point: T) -> T {
        self.reconstruct_potential_zeroavg(dofs, point) + dofs[0]
    }
    pub fn reconstruct_gradient(&self, dofs: &DVector<T>, point: T) -> T {
        let coeffs = self.reconstruction_coeffs(dofs);
        let dphi = self.basis.eval_gradients(&self.elem, point);
        dphi.rows(1, coeffs.len()).dot(&coeffs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disc::projector::Projector;
    use approx::assert_relative_eq;

    fn consistent_dofs<F: Fn(f64) -> f64>(elem: &Element1d<f64>, degree: usize, p: F) -> DVector<f64> {
        let cell = Projector::new(degree).project(elem, &p).unwrap();
        let [f1, f2] = elem.faces();
        let mut dofs = DVector::zeros(degree + 3);
        dofs.rows_mut(0, degree + 1).copy_from(&cell);
        dofs[degree + 1] = p(f1);
        dofs[degree + 2] = p(f2);
        dofs
    }

    #[test]
    fn test_gradient_is_exact_for_degree_k_plus_one() {
        let elem = Element1d::new(0.2, 0.5);
        for degree in 0..4 {
            // degree + 1 polynomial
            let p = |x: f64| 2.0 - x + 3.0 * x.powi(degree as i32 + 1);
            let dp = |x: f64| -1.0 + 3.0 * (degree as f64 + 1.0) * x.powi(degree as i32);
            let gr = GradientReconstructionOperator::new(degree).build(&elem).unwrap();
            let dofs = consistent_dofs(&elem, degree, p);
            for x in [0.2, 0.27, 0.35, 0.41, 0.5] {
                assert_relative_eq!(gr.reconstruct_gradient(&dofs, x), dp(x), epsilon = 1e-8);
            }
        }
    }

    #[test]
    fn test_potential_is_exact_for_degree_k() {
        let elem = Element1d::new(1.0, 1.25);
        let p = |x: f64| 0.5 + 2.0 * x - x * x;
        let gr = GradientReconstructionOperator::new(2).build(&elem).unwrap();
        let dofs = consistent_dofs(&elem, 2, p);
        for x in [1.0, 1.1, 1.25] {
            assert_relative_eq!(gr.reconstruct_potential(&dofs, x), p(x), epsilon = 1e-9);
        }
        // the zero average potential differs by the cell constant only
        let shift = gr.reconstruct_potential(&dofs, 1.1) - gr.reconstruct_potential_zeroavg(&dofs, 1.1);
        assert_relative_eq!(shift, dofs[0], epsilon = 1e-12);
    }

    #[test]
    fn test_constants_are_in_the_kernel() {
        let elem = Element1d::new(0.0, 0.125);
        let gr = GradientReconstructionOperator::<f64>::new(2).build(&elem).unwrap();
        let dofs = DVector::from_vec(vec![4.0, 0.0, 0.0, 4.0, 4.0]);
        let coeffs = gr.as_matrix() * &dofs;
        assert!(coeffs.amax() < 1e-10, "constant dofs reconstruct {coeffs}");
    }

    #[test]
    fn test_local_contrib_is_symmetric() {
        let elem = Element1d::new(0.3, 0.55);
        let gr = GradientReconstructionOperator::<f64>::new(3).build(&elem).unwrap();
        let lc = gr.local_contrib();
        assert_eq!(lc.shape(), (6, 6));
        assert_relative_eq!(*lc, lc.transpose(), epsilon = 1e-8, max_relative = 1e-10);
    }

    #[test]
    #[should_panic(expected = "local dof vector")]
    fn test_wrong_dof_count_panics() {
        let elem = Element1d::new(0.0, 1.0);
        let gr = GradientReconstructionOperator::<f64>::new(1).build(&elem).unwrap();
        gr.reconstruct_gradient(&DVector::zeros(3), 0.5);
    }
}
