use crate::chain_client::ChainError;
use crate::models::EventDecodeError;
use thiserror::Error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing or malformed request input
    #[error("{0}")]
    Input(String),

    /// Event lookup failures
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// Social proof provider failures
    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// The handle has no post carrying the event tags. A rejection, not a fault.
    #[error("No post found with the event's required tags")]
    NoQualifyingPost,

    /// Transaction construction failures
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// Anything unanticipated
    #[error("Internal failure: {0}")]
    Internal(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Stable identifier used in log records
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Input(_) => "input_error",
            AppError::Resolution(ResolutionError::EmptyCode) => "input_error",
            AppError::Resolution(ResolutionError::NotFound(_)) => "not_found",
            AppError::Resolution(ResolutionError::TransportFailure(_)) => "transport_failure",
            AppError::Resolution(ResolutionError::Decode(_)) => "decode_failure",
            AppError::Verification(VerificationError::ProviderFailure(_)) => "provider_failure",
            AppError::NoQualifyingPost => "no_qualifying_post",
            AppError::Encoding(EncodingError::AbiMismatch(_)) => "abi_mismatch",
            AppError::Encoding(EncodingError::Malformed(_)) => "malformed_transaction",
            AppError::Internal(_) => "internal_failure",
        }
    }

    /// Whether the caller can fix the request and try again
    pub fn is_caller_correctable(&self) -> bool {
        matches!(
            self,
            AppError::Input(_)
                | AppError::NoQualifyingPost
                | AppError::Resolution(ResolutionError::EmptyCode)
                | AppError::Resolution(ResolutionError::NotFound(_))
        )
    }

    /// Get HTTP status code for the error
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Input(_) | AppError::NoQualifyingPost => 400,
            AppError::Resolution(ResolutionError::EmptyCode) => 400,
            AppError::Resolution(ResolutionError::NotFound(_)) => 404,
            AppError::Resolution(ResolutionError::TransportFailure(_)) => 502,
            AppError::Verification(_) => 502,
            _ => 500,
        }
    }

    /// Message returned to the caller. Operator-facing details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Resolution(ResolutionError::TransportFailure(_)) => {
                "Chain RPC unavailable".to_string()
            }
            AppError::Verification(_) => "Social proof provider unavailable".to_string(),
            AppError::Config(_) | AppError::Internal(_) => "Internal Server Error".to_string(),
            AppError::Resolution(ResolutionError::Decode(_)) | AppError::Encoding(_) => {
                "Internal Server Error".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Event resolver errors
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("Event code must not be empty")]
    EmptyCode,

    #[error("Event '{0}' not found")]
    NotFound(String),

    #[error("Chain read failed: {0}")]
    TransportFailure(String),

    #[error("Event record could not be decoded: {0}")]
    Decode(#[from] EventDecodeError),
}

impl ResolutionError {
    /// Classify a chain client failure for the given lookup key
    pub fn from_chain(err: ChainError, key: &str) -> Self {
        match err {
            ChainError::Transport(msg) => ResolutionError::TransportFailure(msg),
            ChainError::Reverted(_) | ChainError::EmptyResult => {
                ResolutionError::NotFound(key.to_string())
            }
            ChainError::Abi(msg) => ResolutionError::Decode(EventDecodeError::Abi(msg)),
            ChainError::Config(msg) => ResolutionError::TransportFailure(msg),
        }
    }
}

/// Social proof verifier errors
#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("Social proof provider failed: {0}")]
    ProviderFailure(String),
}

/// Transaction encoder errors
#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("Call does not match contract ABI: {0}")]
    AbiMismatch(String),

    #[error("Malformed serialized transaction: {0}")]
    Malformed(String),
}

impl From<alloy::rlp::Error> for EncodingError {
    fn from(err: alloy::rlp::Error) -> Self {
        EncodingError::Malformed(err.to_string())
    }
}
