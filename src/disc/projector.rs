use nalgebra::{DMatrix, DVector, RealField};

use crate::disc::basis::{Basis1d, monomial1d::ScaledMonomialBasis};
use crate::disc::gauss_points::GaussPoints1d;
use crate::disc::mesh::mesh1d::Element1d;
use crate::error::{HhoError, HhoResult};

/// L2 projector onto the polynomials of degree `degree` of an element.
pub struct Projector<T> {
    basis: ScaledMonomialBasis,
    quad: GaussPoints1d<T>,
}
impl<T: RealField + Copy> Projector<T> {
    pub fn new(degree: usize) -> Self {
        Self {
            basis: ScaledMonomialBasis::new(degree),
            quad: GaussPoints1d::new(2 * degree),
        }
    }
    pub fn project<F>(&self, elem: &Element1d<T>, f: F) -> HhoResult<DVector<T>>
    where
        F: Fn(T) -> T,
    {
        let mass_matrix = self.as_matrix(elem);
        let rhs = self.rhs(elem, f);
        mass_matrix
            .lu()
            .solve(&rhs)
            .ok_or_else(|| HhoError::singular("mass matrix", elem))
    }
    /// The load vector `(f, phi_i)` of the element.
    pub fn rhs<F>(&self, elem: &Element1d<T>, f: F) -> DVector<T>
    where
        F: Fn(T) -> T,
    {
        let mut rhs = DVector::<T>::zeros(Basis1d::<T>::size(&self.basis));
        for (qpoint, qweight) in self.quad.integrate(elem) {
            let phi = self.basis.eval_functions(elem, qpoint);
            rhs.axpy(qweight * f(qpoint), &phi, T::one());
        }
        rhs
    }
    pub fn as_matrix(&self, elem: &Element1d<T>) -> DMatrix<T> {
        let size = Basis1d::<T>::size(&self.basis);
        let mut mass_matrix = DMatrix::<T>::zeros(size, size);
        for (qpoint, qweight) in self.quad.integrate(elem) {
            let phi = self.basis.eval_functions(elem, qpoint);
            mass_matrix.ger(qweight, &phi, &phi, T::one());
        }
        mass_matrix
    }
    pub fn eval_projection(&self, elem: &Element1d<T>, projection: &DVector<T>, point: T) -> T {
        let phi = self.basis.eval_functions(elem, point);
        phi.dot(projection)
    }
}
