use std::cmp::Ordering;

use nalgebra::{DMatrix, RealField, SymmetricEigen};
use ndarray::Array1;

use crate::disc::real;

/// Number of Gauss-Legendre points needed to integrate polynomials up to
/// `order` exactly. Even orders are rounded up to the next odd one.
pub fn points_num_for_order(order: usize) -> usize {
    let order = if order % 2 == 0 { order + 1 } else { order };
    ((order + 2) / 2).max(1)
}

/// Gauss-Legendre nodes and weights on [-1, 1] by the Golub-Welsch algorithm.
///
/// The nodes are the eigenvalues of the symmetric tridiagonal Jacobi matrix of
/// the Legendre recurrence, the weights are the squared first components of
/// the normalized eigenvectors. The weights sum to 1, so the physical weight of
/// a point is `w * h` on an element of size `h`.
pub fn get_legendre_points_interval<T: RealField + Copy>(
    points_num: usize,
) -> (Array1<T>, Array1<T>) {
    if points_num <= 1 {
        return (Array1::from_elem(1, T::zero()), Array1::from_elem(1, T::one()));
    }
    let mut jacobi = DMatrix::<T>::zeros(points_num, points_num);
    for i in 0..points_num - 1 {
        let n = real::<T>((i + 1) as f64);
        let off_diag = (T::one() / (real::<T>(4.0) - T::one() / (n * n))).sqrt();
        jacobi[(i, i + 1)] = off_diag;
        jacobi[(i + 1, i)] = off_diag;
    }
    let eigen = SymmetricEigen::new(jacobi);
    let mut pairs: Vec<(T, T)> = (0..points_num)
        .map(|i| {
            let v0 = eigen.eigenvectors[(0, i)];
            (eigen.eigenvalues[i], v0 * v0)
        })
        .collect();
    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    let points = pairs.iter().map(|&(p, _)| p).collect();
    let weights = pairs.iter().map(|&(_, w)| w).collect();
    (points, weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_points_num_for_order() {
        assert_eq!(points_num_for_order(0), 1);
        assert_eq!(points_num_for_order(1), 1);
        assert_eq!(points_num_for_order(2), 2);
        assert_eq!(points_num_for_order(3), 2);
        assert_eq!(points_num_for_order(4), 3);
        assert_eq!(points_num_for_order(5), 3);
        assert_eq!(points_num_for_order(8), 5);
    }

    #[test]
    fn test_three_point_rule_matches_table() {
        let (points, weights) = get_legendre_points_interval::<f64>(3);
        let expected_points = [-0.7745966692414834, 0.0, 0.7745966692414834];
        let expected_weights = [0.5555555555555556, 0.8888888888888888, 0.5555555555555556];
        for i in 0..3 {
            assert_abs_diff_eq!(points[i], expected_points[i], epsilon = 1e-13);
            // tabulated weights sum to 2, ours to 1
            assert_abs_diff_eq!(2.0 * weights[i], expected_weights[i], epsilon = 1e-13);
        }
    }

    #[test]
    fn test_weights_are_normalized() {
        for n in 1..8 {
            let (_, weights) = get_legendre_points_interval::<f64>(n);
            assert_abs_diff_eq!(weights.sum(), 1.0, epsilon = 1e-13);
        }
    }
}
