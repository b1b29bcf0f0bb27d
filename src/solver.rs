use nalgebra::{DVector, RealField};
use nalgebra_sparse::CsrMatrix;
use tracing::{debug, info, warn};

/// Outcome of a conjugate gradient run. The iterate is returned whether or
/// not the tolerance was met.
#[derive(Clone, Debug)]
pub struct CgReport<T> {
    pub solution: DVector<T>,
    pub iterations: usize,
    pub relative_residual: T,
    pub converged: bool,
}

/// Unpreconditioned conjugate gradient, following Shewchuk's "An Introduction
/// to the Conjugate Gradient Method Without the Agonizing Pain".
///
/// Starts from zero and stops once `||r|| / ||r0|| <= eps` or after
/// `max(maxit, n)` iterations.
pub fn conjugate_gradient<T: RealField + Copy>(
    a: &CsrMatrix<T>,
    b: &DVector<T>,
    eps: T,
    maxit: usize,
) -> CgReport<T> {
    assert_eq!(a.nrows(), a.ncols(), "CG needs a square matrix");
    assert_eq!(a.nrows(), b.len(), "right hand side does not match the matrix");

    let maxit = maxit.max(a.ncols());
    info!("Starting CG. Target rr = {}, maxit = {}", eps, maxit);

    let mut x = DVector::<T>::zeros(b.len());
    let mut r = b.clone();
    let mut d = r.clone();

    let res0 = r.norm();
    if res0 == T::zero() {
        info!("Right hand side is zero, nothing to solve");
        return CgReport {
            solution: x,
            iterations: 0,
            relative_residual: T::zero(),
            converged: true,
        };
    }
    let mut rr = T::one();

    let mut iter = 0;
    while rr > eps && iter < maxit {
        iter += 1;
        let ad: DVector<T> = a * &d;
        let dot_rr = r.dot(&r);
        let d_ad = d.dot(&ad);
        if d_ad == T::zero() {
            warn!("CG breakdown at iteration {}: d.Ad vanished", iter);
            break;
        }
        let alpha = dot_rr / d_ad;
        x.axpy(alpha, &d, T::one());
        r.axpy(-alpha, &ad, T::one());
        let beta = r.dot(&r) / dot_rr;
        d.axpy(T::one(), &r, beta);
        rr = r.norm() / res0;
        debug!("CG iteration {}: ||r||/||r0|| = {}", iter, rr);
    }

    let converged = rr <= eps;
    if converged {
        info!(
            "Solver converged after {} iterations, ||r||/||r0|| = {}",
            iter, rr
        );
    } else {
        warn!("Solver NOT converged! ||r||/||r0|| = {}", rr);
    }
    CgReport {
        solution: x,
        iterations: iter,
        relative_residual: rr,
        converged,
    }
}
