use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Longest username X allows
pub const MAX_HANDLE_LEN: usize = 15;

/// Raw mint request body as posted by the calling UI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRequestBody {
    #[serde(default)]
    pub event_code: Option<String>,
    #[serde(default, alias = "userHandler")]
    pub user_handle: Option<String>,
}

/// Validated mint request. Both fields are kept exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRequest {
    event_code: String,
    user_handle: String,
}

impl ValidationRequest {
    pub fn new(event_code: impl Into<String>, user_handle: impl Into<String>) -> Result<Self, AppError> {
        let event_code = event_code.into();
        let user_handle = user_handle.into();

        if event_code.trim().is_empty() || user_handle.trim().is_empty() {
            return Err(AppError::Input(
                "'eventCode' and 'userHandle' are required".to_string(),
            ));
        }

        if !is_valid_handle(&user_handle) {
            return Err(AppError::Input(format!(
                "'userHandle' must be an X username (letters, digits, '_', at most {} characters), got '{}'",
                MAX_HANDLE_LEN, user_handle
            )));
        }

        Ok(Self {
            event_code,
            user_handle,
        })
    }

    pub fn event_code(&self) -> &str {
        &self.event_code
    }

    pub fn user_handle(&self) -> &str {
        &self.user_handle
    }
}

/// `@?[A-Za-z0-9_]{1,15}`
pub fn is_valid_handle(handle: &str) -> bool {
    let name = handle.strip_prefix('@').unwrap_or(handle);
    (1..=MAX_HANDLE_LEN).contains(&name.len())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl TryFrom<MintRequestBody> for ValidationRequest {
    type Error = AppError;

    fn try_from(body: MintRequestBody) -> Result<Self, Self::Error> {
        Self::new(
            body.event_code.unwrap_or_default(),
            body.user_handle.unwrap_or_default(),
        )
    }
}
