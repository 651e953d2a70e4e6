use service_core::error::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("User not found")]
    UserNotFound,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("QR rendering failed: {0}")]
    QrRender(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::UserNotFound => AppError::NotFound(anyhow::anyhow!("User not found")),
            ServiceError::TokenExpired => AppError::Unauthorized(anyhow::anyhow!("Token expired")),
            ServiceError::InvalidToken => AppError::Unauthorized(anyhow::anyhow!("Invalid token")),
            ServiceError::QrRender(e) => {
                AppError::InternalError(anyhow::anyhow!("QR rendering failed: {}", e))
            }
            ServiceError::Internal(e) => AppError::InternalError(e),
        }
    }
}
