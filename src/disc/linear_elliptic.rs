use nalgebra::{DVector, RealField};
use nalgebra_sparse::{CooMatrix, CsrMatrix};
use ndarray::Array1;
use tracing::debug;

use crate::disc::basis::{Basis1d, monomial1d::ScaledMonomialBasis};
use crate::disc::gauss_points::GaussPoints1d;
use crate::disc::hho::static_condensation::{self, CondensedSystem, LocalBlocks};
use crate::disc::hho::{GradientReconstruction, GradientReconstructionOperator, StabilizationOperator};
use crate::disc::mesh::mesh1d::{Element1d, Mesh1d, make_test_points};
use crate::disc::projector::Projector;
use crate::disc::real;
use crate::error::HhoResult;
use crate::solver::{CgReport, conjugate_gradient};

/// Relative residual the diffusion solve asks of CG. Below what `f32` can
/// resolve: single precision runs go through [`LinearElliptic::solve_with_tolerance`].
pub const CG_TOLERANCE: f64 = 1e-9;

/// Global system of the face unknowns.
pub struct GlobalSystem<T> {
    pub matrix: CsrMatrix<T>,
    pub rhs: DVector<T>,
}

/// Sampled potential and error norms of a computed solution.
pub struct Postprocessed<T> {
    pub x: Array1<T>,
    pub potential: Array1<T>,
    /// `sqrt(sum_T (Pi_T^k u - u_T)^t M (Pi_T^k u - u_T))`
    pub l2_error_dofs: T,
    /// L2 distance between the cell polynomials and the exact solution.
    pub l2_error_func: T,
}

/// HHO discretization of `-u'' = f` on a 1D mesh.
///
/// Face `i` of the mesh owns global dof `i`. The two extra dofs `N + 1` and
/// `N + 2` only appear in the closure entries of [`closure_entries`].
pub struct LinearElliptic<T> {
    degree: usize,
    projector: Projector<T>,
    gradrec: GradientReconstructionOperator<T>,
    stabilization: StabilizationOperator<T>,
}

/// Unit entries coupling the first and last face dofs with the two closure
/// dofs, for a mesh of `elem_num` elements. They pin both boundary face values
/// to zero.
pub fn closure_entries(elem_num: usize) -> [(usize, usize); 4] {
    let dofs_num = elem_num + 3;
    [
        (0, dofs_num - 2),
        (dofs_num - 3, dofs_num - 1),
        (dofs_num - 2, 0),
        (dofs_num - 1, dofs_num - 3),
    ]
}

impl<T: RealField + Copy> LinearElliptic<T> {
    pub fn new(degree: usize) -> Self {
        Self {
            degree,
            projector: Projector::new(degree),
            gradrec: GradientReconstructionOperator::new(degree),
            stabilization: StabilizationOperator::new(degree),
        }
    }
    /// One dof per face plus the two closure dofs.
    pub fn dofs_num(mesh: &Mesh1d<T>) -> usize {
        mesh.face_num() + 2
    }
    fn local_blocks(
        &self,
        elem: &Element1d<T>,
    ) -> HhoResult<(GradientReconstruction<T>, LocalBlocks<T>)> {
        let gr = self.gradrec.build(elem)?;
        let stab = self.stabilization.build(&gr)?;
        let local_contrib = gr.local_contrib() + stab;
        let blocks = LocalBlocks::split(&local_contrib, self.degree + 1);
        Ok((gr, blocks))
    }
    /// Condensed operator and right hand side of one element.
    pub fn condensed_element<F>(&self, elem: &Element1d<T>, source: F) -> HhoResult<CondensedSystem<T>>
    where
        F: Fn(T) -> T,
    {
        let cell_rhs = self.projector.rhs(elem, source);
        let (_, blocks) = self.local_blocks(elem)?;
        static_condensation::condense(&blocks, &cell_rhs, elem)
    }
    pub fn assemble<F>(&self, mesh: &Mesh1d<T>, source: F) -> HhoResult<GlobalSystem<T>>
    where
        F: Fn(T) -> T,
    {
        let dofs_num = Self::dofs_num(mesh);
        let mut triplets = CooMatrix::new(dofs_num, dofs_num);
        let mut rhs = DVector::<T>::zeros(dofs_num);

        for (ielem, elem) in mesh.elements.iter().enumerate() {
            let condensed = self.condensed_element(elem, &source)?;
            for i in 0..condensed.matrix.nrows() {
                for j in 0..condensed.matrix.ncols() {
                    triplets.push(ielem + i, ielem + j, condensed.matrix[(i, j)]);
                }
                rhs[ielem + i] += condensed.rhs[i];
            }
        }
        for (i, j) in closure_entries(mesh.elem_num()) {
            triplets.push(i, j, T::one());
        }
        debug!("assembled {} triplets on {} dofs", triplets.nnz(), dofs_num);

        Ok(GlobalSystem {
            matrix: CsrMatrix::from(&triplets),
            rhs,
        })
    }
    /// Assembles and solves the global system. The closure makes the matrix
    /// indefinite, so CG is not guaranteed to converge; in practice it does.
    pub fn solve<F>(&self, mesh: &Mesh1d<T>, source: F) -> HhoResult<CgReport<T>>
    where
        F: Fn(T) -> T,
    {
        self.solve_with_tolerance(mesh, source, real(CG_TOLERANCE))
    }
    pub fn solve_with_tolerance<F>(&self, mesh: &Mesh1d<T>, source: F, eps: T) -> HhoResult<CgReport<T>>
    where
        F: Fn(T) -> T,
    {
        let system = self.assemble(mesh, source)?;
        let maxit = 2 * system.matrix.ncols();
        Ok(conjugate_gradient(&system.matrix, &system.rhs, eps, maxit))
    }
    /// Recovers the cell unknowns from the face values `x`, samples the
    /// reconstructed potential at `eval_per_elem` points per element and
    /// measures the error against `exact`.
    pub fn postprocess<F, S>(
        &self,
        mesh: &Mesh1d<T>,
        x: &DVector<T>,
        source: F,
        exact: S,
        eval_per_elem: usize,
    ) -> HhoResult<Postprocessed<T>>
    where
        F: Fn(T) -> T,
        S: Fn(T) -> T,
    {
        let basis_k_size = self.degree + 1;
        let quad = GaussPoints1d::<T>::new(2 * self.degree);
        let basis = ScaledMonomialBasis::new(self.degree);

        let samples_num = mesh.elem_num() * eval_per_elem;
        let mut x_val = Vec::with_capacity(samples_num);
        let mut pot_val = Vec::with_capacity(samples_num);
        let mut l2_err = T::zero();
        let mut l2_err_func = T::zero();

        for (ielem, elem) in mesh.elements.iter().enumerate() {
            let sol_f = DVector::from_vec(vec![x[ielem], x[ielem + 1]]);
            let (gr, blocks) = self.local_blocks(elem)?;
            let rhs_c = self.projector.rhs(elem, &source);
            let sol_t = static_condensation::recover_cell_unknowns(&blocks, &rhs_c, &sol_f, elem)?;

            let mut sol = DVector::<T>::zeros(basis_k_size + 2);
            sol.rows_mut(0, basis_k_size).copy_from(&sol_t);
            sol.rows_mut(basis_k_size, 2).copy_from(&sol_f);

            for tp in make_test_points(elem, eval_per_elem) {
                x_val.push(tp);
                pot_val.push(gr.reconstruct_potential(&sol, tp));
            }

            let asol_t = self.projector.project(elem, &exact)?;
            let mass = self.projector.as_matrix(elem);
            let ve = asol_t - &sol_t;
            l2_err += ve.dot(&(&mass * &ve));

            for (qpoint, qweight) in quad.integrate(elem) {
                let phi = basis.eval_functions(elem, qpoint);
                let diff = phi.dot(&sol_t) - exact(qpoint);
                l2_err_func += diff * diff * qweight;
            }
        }

        Ok(Postprocessed {
            x: Array1::from_vec(x_val),
            potential: Array1::from_vec(pot_val),
            l2_error_dofs: l2_err.sqrt(),
            l2_error_func: l2_err_func.sqrt(),
        })
    }
}
