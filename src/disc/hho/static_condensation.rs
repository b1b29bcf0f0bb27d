use nalgebra::{DMatrix, DVector, RealField};

use crate::disc::mesh::mesh1d::Element1d;
use crate::error::{HhoError, HhoResult};

/// The local operator `K = [[K_TT, K_TF], [K_FT, K_FF]]` of one element, split
/// between `cell_size` cell unknowns and the two face unknowns.
pub struct LocalBlocks<T> {
    pub k_tt: DMatrix<T>,
    pub k_tf: DMatrix<T>,
    pub k_ft: DMatrix<T>,
    pub k_ff: DMatrix<T>,
}
impl<T: RealField + Copy> LocalBlocks<T> {
    pub fn split(local_contrib: &DMatrix<T>, cell_size: usize) -> Self {
        let size = local_contrib.nrows();
        assert_eq!(size, local_contrib.ncols(), "local operator must be square");
        assert!(cell_size < size, "local operator has no face unknowns");
        let face_size = size - cell_size;
        Self {
            k_tt: local_contrib.view((0, 0), (cell_size, cell_size)).into_owned(),
            k_tf: local_contrib.view((0, cell_size), (cell_size, face_size)).into_owned(),
            k_ft: local_contrib.view((cell_size, 0), (face_size, cell_size)).into_owned(),
            k_ff: local_contrib
                .view((cell_size, cell_size), (face_size, face_size))
                .into_owned(),
        }
    }
}

/// Face-only system left after eliminating the cell unknowns.
pub struct CondensedSystem<T> {
    pub matrix: DMatrix<T>,
    pub rhs: DVector<T>,
}

/// Schur complement of `K_TT`: `AC = K_FF - K_FT K_TT^-1 K_TF` and
/// `bC = -K_FT K_TT^-1 f_T`, where `cell_rhs` is the cell load vector.
pub fn condense<T: RealField + Copy>(
    blocks: &LocalBlocks<T>,
    cell_rhs: &DVector<T>,
    elem: &Element1d<T>,
) -> HhoResult<CondensedSystem<T>> {
    let lu = blocks.k_tt.clone().lu();
    let singular = || HhoError::singular("cell-cell block", elem);
    let al = lu.solve(&blocks.k_tf).ok_or_else(singular)?;
    let bl = lu.solve(cell_rhs).ok_or_else(singular)?;
    let matrix = &blocks.k_ff - &blocks.k_ft * al;
    let rhs = -(&blocks.k_ft * bl);
    Ok(CondensedSystem { matrix, rhs })
}

/// Recovers the cell unknowns from the face values:
/// `u_T = K_TT^-1 (f_T - K_TF u_F)`.
pub fn recover_cell_unknowns<T: RealField + Copy>(
    blocks: &LocalBlocks<T>,
    cell_rhs: &DVector<T>,
    face_values: &DVector<T>,
    elem: &Element1d<T>,
) -> HhoResult<DVector<T>> {
    blocks
        .k_tt
        .clone()
        .lu()
        .solve(&(cell_rhs - &blocks.k_tf * face_values))
        .ok_or_else(|| HhoError::singular("cell-cell block", elem))
}
