use thiserror::Error;

/// Failure taxonomy shared by every cell. Each variant is caught at the call
/// site that issued the request and converted into a user-visible message;
/// none propagate past the owning controller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed with status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Message shown to the user. Non-2xx responses carry their body text;
    /// an empty body falls back to the status line.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(message) => message.clone(),
            ApiError::Network(message) => message.clone(),
            ApiError::Http { status, body } => {
                if body.trim().is_empty() {
                    format!("Request failed with status {}", status)
                } else {
                    body.clone()
                }
            }
            ApiError::Cancelled => "Request cancelled".to_string(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}
