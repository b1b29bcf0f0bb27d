use nalgebra::RealField;

pub mod basis;
pub mod gauss_points;
pub mod hho;
pub mod linear_elliptic;
pub mod mesh;
pub mod projector;

/// Lifts an `f64` constant into the working scalar type.
#[inline]
pub fn real<T: RealField>(x: f64) -> T {
    nalgebra::convert(x)
}
