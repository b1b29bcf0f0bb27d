use thiserror::Error;

pub type HhoResult<T> = Result<T, HhoError>;

#[derive(Error, Debug)]
pub enum HhoError {
    /// A dense local solve hit a singular matrix.
    #[error("singular {system} on {element}")]
    SingularSystem {
        system: &'static str,
        element: String,
    },
    #[error("failed to read parameter file {path}: {source}")]
    ParamFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse parameter file: {0}")]
    ParamParse(#[from] serde_json::Error),
    #[error("invalid parameter `{key}`: {reason}")]
    InvalidParameter { key: &'static str, reason: String },
    #[error("failed to write csv output: {0}")]
    Csv(#[from] csv::Error),
    #[error("plot collaborator failed: {0}")]
    Plot(#[from] std::io::Error),
}

impl HhoError {
    pub fn singular(system: &'static str, element: impl std::fmt::Display) -> Self {
        HhoError::SingularSystem {
            system,
            element: element.to_string(),
        }
    }
}
