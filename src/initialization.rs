use nalgebra::RealField;
use tracing::{info, warn};

use crate::disc::mesh::mesh1d::Mesh1d;
use crate::error::{HhoError, HhoResult};
use crate::io::param_parser::RunParameters;

pub const DEFAULT_DEGREE: usize = 1;

/// Values given explicitly on the command line. They take precedence over
/// the parameter file.
#[derive(Debug, Default)]
pub struct ParamOverrides {
    pub degree: Option<i64>,
    pub num_elements: Option<usize>,
    pub eval_per_elem: Option<usize>,
    pub filename: Option<String>,
    pub draw: bool,
}

pub fn initialize_params_by_file(file_path: Option<&str>) -> HhoResult<RunParameters> {
    match file_path {
        Some(path) => RunParameters::parse(path),
        None => Ok(RunParameters::default()),
    }
}
/// Negative degrees fall back to the default one.
pub fn sanitize_degree(degree: i64) -> usize {
    match usize::try_from(degree) {
        Ok(degree) => degree,
        Err(_) => {
            warn!(
                "Polynomial degree must be non-negative (got {}), using {}",
                degree, DEFAULT_DEGREE
            );
            DEFAULT_DEGREE
        }
    }
}
pub fn apply_overrides(mut params: RunParameters, overrides: ParamOverrides) -> RunParameters {
    if let Some(degree) = overrides.degree {
        params.degree = sanitize_degree(degree);
    }
    if let Some(num_elements) = overrides.num_elements {
        params.num_elements = num_elements;
    }
    if let Some(eval_per_elem) = overrides.eval_per_elem {
        params.eval_per_elem = eval_per_elem;
    }
    if overrides.filename.is_some() {
        params.filename = overrides.filename;
    }
    params.draw |= overrides.draw;
    params
}
pub fn report_params(params: &RunParameters) {
    info!("K = {}", params.degree);
    info!("N = {}", params.num_elements);
    info!("Eval points per element = {}", params.eval_per_elem);
    info!(
        "Output file = {}",
        params.filename.as_deref().unwrap_or("(none)")
    );
}
pub fn initialize_mesh1d<T: RealField + Copy>(num_elements: usize) -> HhoResult<Mesh1d<T>> {
    if num_elements == 0 {
        return Err(HhoError::InvalidParameter {
            key: "num_elements",
            reason: "the mesh needs at least one element".to_string(),
        });
    }
    Ok(Mesh1d::uniform(num_elements))
}
