use std::fs;

use serde::Deserialize;

use crate::error::{HhoError, HhoResult};

/// Parameters of one demonstration run. Every field may be omitted from a
/// parameter file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunParameters {
    pub degree: usize,
    pub num_elements: usize,
    pub eval_per_elem: usize,
    pub filename: Option<String>,
    pub draw: bool,
}
impl Default for RunParameters {
    fn default() -> Self {
        Self {
            degree: 1,
            num_elements: 2,
            eval_per_elem: 5,
            filename: None,
            draw: false,
        }
    }
}
impl RunParameters {
    pub fn parse(file_path: &str) -> HhoResult<Self> {
        let file_content = fs::read_to_string(file_path).map_err(|source| HhoError::ParamFile {
            path: file_path.to_string(),
            source,
        })?;
        Self::from_json(&file_content)
    }
    pub fn from_json(content: &str) -> HhoResult<Self> {
        Ok(serde_json::from_str(content)?)
    }
}
