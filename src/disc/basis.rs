use nalgebra::{DVector, RealField};

use crate::disc::mesh::mesh1d::Element1d;

pub mod monomial1d;

/// A polynomial basis defined element by element.
pub trait Basis1d<T: RealField + Copy> {
    fn degree(&self) -> usize;
    fn size(&self) -> usize {
        self.degree() + 1
    }
    fn eval_functions(&self, elem: &Element1d<T>, point: T) -> DVector<T>;
    fn eval_gradients(&self, elem: &Element1d<T>, point: T) -> DVector<T>;
}
