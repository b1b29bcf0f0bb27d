use nalgebra::RealField;
use ndarray::{Array, Ix1};

use crate::disc::mesh::mesh1d::Element1d;
use crate::disc::real;

pub mod legendre_points;

/// Gauss-Legendre rule on the reference interval [-1, 1], exact for
/// polynomials up to `order`.
#[derive(Clone, Debug)]
pub struct GaussPoints1d<T> {
    pub points: Array<T, Ix1>,
    pub weights: Array<T, Ix1>,
}
impl<T: RealField + Copy> GaussPoints1d<T> {
    pub fn new(order: usize) -> Self {
        let points_num = legendre_points::points_num_for_order(order);
        let (points, weights) = legendre_points::get_legendre_points_interval(points_num);
        Self { points, weights }
    }
    /// Maps the reference rule onto `elem`, returning `(x, w)` pairs in
    /// physical coordinates.
    pub fn integrate(&self, elem: &Element1d<T>) -> Vec<(T, T)> {
        let h = elem.measure();
        let [left, _] = elem.points();
        let half: T = real(0.5);
        self.points
            .iter()
            .zip(self.weights.iter())
            .map(|(&p, &w)| ((p + T::one()) * half * h + left, w * h))
            .collect()
    }
}
