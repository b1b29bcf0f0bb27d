use nalgebra::{DMatrix, RealField};

use crate::disc::basis::{Basis1d, monomial1d::ScaledMonomialBasis};
use crate::disc::gauss_points::GaussPoints1d;
use crate::disc::hho::gradient_reconstruction::GradientReconstruction;
use crate::error::{HhoError, HhoResult};

/// HHO stabilization: penalizes, face by face, the difference between the
/// trace of the reconstructed potential and the face unknown, corrected by
/// the cell projection of the reconstruction.
pub struct StabilizationOperator<T> {
    degree: usize,
    basis: ScaledMonomialBasis,
    quad: GaussPoints1d<T>,
}

impl<T: RealField + Copy> StabilizationOperator<T> {
    pub fn new(degree: usize) -> Self {
        Self {
            degree,
            basis: ScaledMonomialBasis::new(degree + 1),
            quad: GaussPoints1d::new(2 * (degree + 1)),
        }
    }
    /// Builds the symmetric `(k+3) x (k+3)` stabilization matrix of the
    /// element `gr` was built on.
    pub fn build(&self, gr: &GradientReconstruction<T>) -> HhoResult<DMatrix<T>> {
        assert_eq!(
            gr.degree(),
            self.degree,
            "gradient reconstruction and stabilization degrees differ"
        );
        let elem = gr.element();
        let gradrec_matrix = gr.as_matrix();

        let size = Basis1d::<T>::size(&self.basis);
        let mut mass_matrix = DMatrix::<T>::zeros(size, size);
        for (qpoint, qweight) in self.quad.integrate(elem) {
            let phi = self.basis.eval_functions(elem, qpoint);
            mass_matrix.ger(qweight, &phi, &phi, T::one());
        }

        let basis_k_size = self.degree + 1;
        let grads_size = size - 1;
        let m1 = mass_matrix.view((0, 0), (basis_k_size, basis_k_size)).into_owned();
        let m2 = mass_matrix.view((0, 1), (basis_k_size, grads_size));

        // proj1 maps dofs to v_T - Pi_T^k R(v)
        let mut proj1 = m1
            .lu()
            .solve(&(m2 * gradrec_matrix))
            .ok_or_else(|| HhoError::singular("cell mass matrix", elem))?;
        proj1.neg_mut();
        for i in 0..basis_k_size {
            proj1[(i, i)] += T::one();
        }

        let h = elem.measure();
        let mut stab_matrix = DMatrix::<T>::zeros(basis_k_size + 2, basis_k_size + 2);
        // In 1D the face mass matrix is the scalar phi_F(0)^2 = 1.
        for (iface, &face) in elem.faces().iter().enumerate() {
            let phi_f = self.basis.eval_functions(elem, face);
            let mut proj2 = phi_f.rows(1, grads_size).tr_mul(gradrec_matrix);
            proj2[(0, basis_k_size + iface)] -= T::one();
            let proj3 = phi_f.rows(0, basis_k_size).tr_mul(&proj1);
            let b = proj2 + proj3;
            stab_matrix += b.tr_mul(&b) / h;
        }
        Ok(stab_matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disc::hho::gradient_reconstruction::GradientReconstructionOperator;
    use crate::disc::mesh::mesh1d::Element1d;
    use crate::disc::projector::Projector;
    use approx::assert_relative_eq;
    use nalgebra::{DVector, SymmetricEigen};

    #[test]
    fn test_vanishes_on_polynomials_of_degree_k_plus_one() {
        let elem = Element1d::new(0.4, 0.65);
        let degree = 2;
        let p = |x: f64| 1.0 + x - 2.0 * x.powi(3);
        let gr = GradientReconstructionOperator::new(degree).build(&elem).unwrap();
        let stab = StabilizationOperator::new(degree).build(&gr).unwrap();

        let cell = Projector::new(degree).project(&elem, p).unwrap();
        let mut dofs = DVector::zeros(degree + 3);
        dofs.rows_mut(0, degree + 1).copy_from(&cell);
        dofs[degree + 1] = p(0.4);
        dofs[degree + 2] = p(0.65);

        let energy = dofs.dot(&(&stab * &dofs));
        assert!(energy.abs() < 1e-10, "stabilization energy {energy}");
    }

    #[test]
    fn test_penalizes_face_mismatch() {
        let elem = Element1d::new(0.0, 0.5);
        let gr = GradientReconstructionOperator::<f64>::new(1).build(&elem).unwrap();
        let stab = StabilizationOperator::new(1).build(&gr).unwrap();
        // a constant cell with a kicked face value
        let dofs = DVector::from_vec(vec![1.0, 0.0, 1.0, 2.0]);
        assert!(dofs.dot(&(&stab * &dofs)) > 1e-6);
    }

    #[test]
    fn test_local_contrib_is_symmetric_positive_semidefinite() {
        for degree in 0..5 {
            for (a, b) in [(0.0, 1.0), (0.125, 0.25), (2.0, 2.01)] {
                let elem = Element1d::new(a, b);
                let gr = GradientReconstructionOperator::<f64>::new(degree).build(&elem).unwrap();
                let stab = StabilizationOperator::new(degree).build(&gr).unwrap();
                let lc = gr.local_contrib() + &stab;
                let scale = lc.amax();
                assert_relative_eq!(lc, lc.transpose(), epsilon = 1e-9 * scale);
                let sym = (&lc + lc.transpose()) * 0.5;
                let eig = SymmetricEigen::new(sym);
                assert!(
                    eig.eigenvalues.min() > -1e-9 * scale,
                    "degree {degree} on [{a}, {b}]: {}",
                    eig.eigenvalues
                );
            }
        }
    }
}
