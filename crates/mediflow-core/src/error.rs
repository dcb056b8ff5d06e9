use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediflowError {
    #[error("not initialized: run 'mediflow init'")]
    NotInitialized,

    #[error("workflow not found: {0}")]
    WorkflowNotFound(String),

    #[error("patient not found: {0}")]
    PatientNotFound(String),

    #[error("invalid {kind}: {value}")]
    InvalidValue { kind: &'static str, value: String },

    #[error("backend error: {0}")]
    Backend(String),

    #[error("missing environment variable: {0}")]
    MissingEnv(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, MediflowError>;
