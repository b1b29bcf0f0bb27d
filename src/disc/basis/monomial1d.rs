use nalgebra::{DVector, RealField};

use crate::disc::basis::Basis1d;
use crate::disc::mesh::mesh1d::Element1d;
use crate::disc::real;

/// Monomials in the scaled coordinate `(x - center) / h`.
#[derive(Clone, Copy, Debug)]
pub struct ScaledMonomialBasis {
    pub degree: usize,
}
impl Default for ScaledMonomialBasis {
    fn default() -> Self {
        Self { degree: 1 }
    }
}
impl ScaledMonomialBasis {
    pub fn new(degree: usize) -> Self {
        Self { degree }
    }
}
impl<T: RealField + Copy> Basis1d<T> for ScaledMonomialBasis {
    fn degree(&self) -> usize {
        self.degree
    }
    fn eval_functions(&self, elem: &Element1d<T>, point: T) -> DVector<T> {
        let ep = (point - elem.center()) / elem.measure();
        DVector::from_fn(self.degree + 1, |i, _| ep.powi(i as i32))
    }
    fn eval_gradients(&self, elem: &Element1d<T>, point: T) -> DVector<T> {
        let h = elem.measure();
        let ep = (point - elem.center()) / h;
        DVector::from_fn(self.degree + 1, |i, _| {
            if i == 0 {
                T::zero()
            } else {
                real::<T>(i as f64) / h * ep.powi(i as i32 - 1)
            }
        })
    }
}
