use thiserror::Error;

/// Two-tier convention: rich, named errors at module boundaries, plain
/// strings for the small internal parsing helpers.
#[derive(Error, Debug)]
pub enum CpError {
    #[error("ERROR [CATALOG >> {0}]: {1}")]
    CatalogInconsistent(&'static str, String),
    #[error("ERROR [CONFIG >> {0}]: {1}")]
    ConfigError(&'static str, String),
    #[error("ERROR [CSV PARSE]: {0}")]
    ParseError(String),
    #[error("ERROR [EXTRACTION >> NoMaster]: {0}")]
    NoMaster(String),
    #[error("ERROR [EXTRACTION >> EmptyResult]: {0}")]
    EmptyResult(String),
    #[error("ERROR [EXTRACTION >> BadInput]: {0}")]
    BadInput(String),
    #[error("ERROR [EXTRACTION >> Cancelled]: {0}")]
    Cancelled(String),
    #[error("ERROR [POISON]: {0}")]
    PoisonError(String),
    #[error("ERROR [_raw_]: {0}")]
    RawError(std::io::Error),
}

impl CpError {
    /// The Unix-ish exit code this crate's CLI driver uses for each kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            CpError::NoMaster(_) | CpError::EmptyResult(_) | CpError::ParseError(_) | CpError::BadInput(_) => 2,
            CpError::CatalogInconsistent(..) | CpError::ConfigError(..) | CpError::RawError(_) | CpError::PoisonError(_) => 1,
            CpError::Cancelled(_) => 130,
        }
    }
}

impl From<std::io::Error> for CpError {
    fn from(value: std::io::Error) -> Self {
        Self::RawError(value)
    }
}

impl<T> From<std::sync::PoisonError<T>> for CpError {
    fn from(value: std::sync::PoisonError<T>) -> Self {
        Self::PoisonError(value.to_string())
    }
}

impl From<csv::Error> for CpError {
    fn from(value: csv::Error) -> Self {
        Self::ParseError(value.to_string())
    }
}

impl From<serde_yaml_ng::Error> for CpError {
    fn from(value: serde_yaml_ng::Error) -> Self {
        Self::ConfigError("yaml", value.to_string())
    }
}

pub type CpResult<T, E = CpError> = std::result::Result<T, E>;
pub type SubResult<T, E = String> = std::result::Result<T, E>;
