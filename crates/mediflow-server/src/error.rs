use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mediflow_core::MediflowError;

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn join(e: tokio::task::JoinError) -> Self {
        Self(anyhow::anyhow!("task join error: {e}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.0.downcast_ref::<MediflowError>() {
            Some(e) => match e {
                MediflowError::NotInitialized => StatusCode::BAD_REQUEST,
                MediflowError::WorkflowNotFound(_) | MediflowError::PatientNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                MediflowError::InvalidValue { .. } => StatusCode::BAD_REQUEST,
                MediflowError::Backend(_) | MediflowError::Http(_) => StatusCode::BAD_GATEWAY,
                MediflowError::MissingEnv(_)
                | MediflowError::Io(_)
                | MediflowError::Yaml(_)
                | MediflowError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            None => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
