use crate::error::VerificationError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time;
use tracing::{debug, info};

/// Social proof provider errors
#[derive(Error, Debug)]
pub enum ProofError {
    #[error("Proof provider not configured: {0}")]
    NotConfigured(String),

    #[error("Proof provider request failed: {0}")]
    Request(String),

    #[error("Proof provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Proof provider response malformed: {0}")]
    Malformed(String),
}

/// External predicate: has `handle` posted something carrying every required tag?
#[async_trait]
pub trait ProofChecker: Send + Sync {
    async fn check_proof(&self, handle: &str, required_tags: &[String]) -> Result<bool, ProofError>;
}

/// Shapes calls to the proof checker and interprets its verdict
pub struct ProofVerifier {
    checker: Arc<dyn ProofChecker>,
    timeout: Duration,
}

impl ProofVerifier {
    pub fn new(checker: Arc<dyn ProofChecker>, timeout: Duration) -> Self {
        Self { checker, timeout }
    }

    /// Returns the provider's verdict. An event without tags passes without a provider call.
    pub async fn verify(&self, handle: &str, tags: &[String]) -> Result<bool, VerificationError> {
        if tags.is_empty() {
            info!("Event has no required tags; proof for {} passes trivially", handle);
            return Ok(true);
        }

        debug!("Checking proof for {} with tags {:?}", handle, tags);

        let verdict = time::timeout(self.timeout, self.checker.check_proof(handle, tags))
            .await
            .map_err(|_| {
                VerificationError::ProviderFailure(format!(
                    "proof check timed out after {:?}",
                    self.timeout
                ))
            })?
            .map_err(|e| VerificationError::ProviderFailure(e.to_string()))?;

        info!("Proof verdict for {}: {}", handle, verdict);
        Ok(verdict)
    }
}
