use thiserror::Error;
use tracing::error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// A stored record points at something that no longer exists.
    #[error("integrity error: {0}")]
    Integrity(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// True when the caller sent something unusable (bad input or unknown id).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServiceError::Validation(_) | ServiceError::NotFound(_) | ServiceError::Model(ModelError::Validation(_))
        )
    }

    /// Message safe to hand back to API clients.
    pub fn message(&self) -> String {
        match self {
            ServiceError::Validation(m)
            | ServiceError::NotFound(m)
            | ServiceError::Integrity(m)
            | ServiceError::Db(m)
            | ServiceError::Model(ModelError::Validation(m)) => m.clone(),
            ServiceError::Model(ModelError::Db(_)) => "database error".to_string(),
        }
    }
}

/// Replace a store failure with a context message, logging the original detail.
/// Client errors pass through untouched.
pub(crate) fn storage_failure(context: &'static str) -> impl Fn(ServiceError) -> ServiceError {
    move |err| {
        if err.is_client_error() {
            return err;
        }
        error!(error = %err, "{}", context);
        ServiceError::Db(context.to_string())
    }
}
