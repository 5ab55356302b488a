use thiserror::Error;

use super::customer::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// No response was received from the directory endpoint.
    #[error("Transport error: {0}")]
    Transport(String),
    /// The endpoint answered with a non-success status.
    #[error("{}", .error.message)]
    Service { status: u16, error: ApiError },
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    #[error("The creation dialog is not open")]
    DialogClosed,
    #[error("A submission is already in flight")]
    SubmissionPending,
}

impl DirectoryError {
    /// The form shown to the user.
    pub fn to_api_error(&self) -> ApiError {
        match self {
            DirectoryError::Service { error, .. } => error.clone(),
            DirectoryError::Transport(_) => ApiError::new("transport_error", self.to_string()),
            DirectoryError::InvalidResponse(_) => {
                ApiError::new("invalid_response", self.to_string())
            }
            DirectoryError::DialogClosed => ApiError::new("dialog_closed", self.to_string()),
            DirectoryError::SubmissionPending => {
                ApiError::new("submission_pending", self.to_string())
            }
        }
    }
}
