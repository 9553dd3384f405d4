use serde::Serialize;
use thiserror::Error;

/// Failures of the approval workflow core.
///
/// Display strings are the user-visible messages handed to the presentation
/// client, so transport failures render the terse `http {status}` /
/// `request failed` forms while business-rule failures name what went wrong.
#[derive(Debug, Error)]
pub enum ApprovalError {
    #[error("No content ID provided")]
    MissingContentId,
    #[error("spaceKey is required")]
    MissingSpaceKey,
    #[error("http {status}")]
    RemoteReadFailed { status: u16 },
    #[error("http {status}")]
    RemoteWriteFailed { status: u16 },
    #[error("space states unavailable: {message}")]
    SpaceStatesUnavailable { message: String },
    #[error("no configured state matches '{name}'")]
    StateNotFound { name: String },
    #[error("cannot {action} from state '{current}'")]
    InvalidTransition { current: String, action: String },
    #[error("webhook request failed with status {status}")]
    NotificationFailed { status: u16 },
    #[error("request failed")]
    Transport(#[from] reqwest::Error),
    #[error("invalid response from content store: {message}")]
    InvalidResponse { message: String },
    #[error("configuration error: {message}")]
    Config { message: String },
}

/// Machine-readable error class carried in [`TransitionResult`] so a caller
/// can render different guidance for business-rule failures (invalid
/// transition, unmatched state) than for transport failures.
///
/// [`TransitionResult`]: crate::workflow::TransitionResult
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    MissingContentId,
    MissingSpaceKey,
    RemoteReadFailed,
    RemoteWriteFailed,
    SpaceStatesUnavailable,
    StateNotFound,
    InvalidTransition,
    NotificationFailed,
    Transport,
    InvalidResponse,
    Config,
}

impl ApprovalError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ApprovalError::MissingContentId => ErrorCode::MissingContentId,
            ApprovalError::MissingSpaceKey => ErrorCode::MissingSpaceKey,
            ApprovalError::RemoteReadFailed { .. } => ErrorCode::RemoteReadFailed,
            ApprovalError::RemoteWriteFailed { .. } => ErrorCode::RemoteWriteFailed,
            ApprovalError::SpaceStatesUnavailable { .. } => ErrorCode::SpaceStatesUnavailable,
            ApprovalError::StateNotFound { .. } => ErrorCode::StateNotFound,
            ApprovalError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            ApprovalError::NotificationFailed { .. } => ErrorCode::NotificationFailed,
            ApprovalError::Transport(_) => ErrorCode::Transport,
            ApprovalError::InvalidResponse { .. } => ErrorCode::InvalidResponse,
            ApprovalError::Config { .. } => ErrorCode::Config,
        }
    }

    /// Business-rule failures are caller mistakes or workflow dead ends, as
    /// opposed to transient remote trouble.
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            ApprovalError::MissingContentId
                | ApprovalError::MissingSpaceKey
                | ApprovalError::StateNotFound { .. }
                | ApprovalError::InvalidTransition { .. }
        )
    }
}
