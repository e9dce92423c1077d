use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not authorized, no token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Token subject no longer exists")]
    IdentityNotFound,

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("No tools available for assignment")]
    InsufficientAvailability,

    #[error("Tool is not assigned")]
    NotAssigned,

    #[error("Timed out waiting for the tool record")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for credential-verification failures, which are rejected
    /// before the ledger is consulted at all.
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            AppError::MissingToken
                | AppError::InvalidToken(_)
                | AppError::ExpiredToken
                | AppError::IdentityNotFound
        )
    }

    /// Caller-visible message. Internal faults are reported opaquely.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
