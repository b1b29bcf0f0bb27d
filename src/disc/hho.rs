//! Hybrid High-Order operators: each element carries polynomial cell unknowns
//! of degree k and one unknown per face, coupled through a gradient
//! reconstruction and a stabilization.
//!
//! Local dof layout: `k + 1` cell coefficients in the scaled monomial basis,
//! then the left and right face values.
pub mod gradient_reconstruction;
pub mod stabilization;
pub mod static_condensation;

pub use gradient_reconstruction::{GradientReconstruction, GradientReconstructionOperator};
pub use stabilization::StabilizationOperator;
