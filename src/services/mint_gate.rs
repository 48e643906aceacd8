use crate::error::{AppError, AppResult};
use crate::models::{TransactionEnvelope, ValidationRequest};
use crate::services::{EventResolver, ProofVerifier, TransactionEncoder};
use tracing::{debug, info};

/// Resolve → verify → encode pipeline behind the mint endpoint.
///
/// Every stage fails fast; a negative proof verdict stops the pipeline
/// before anything is encoded.
pub struct MintGate {
    resolver: EventResolver,
    verifier: ProofVerifier,
    encoder: TransactionEncoder,
}

impl MintGate {
    pub fn new(resolver: EventResolver, verifier: ProofVerifier, encoder: TransactionEncoder) -> Self {
        Self {
            resolver,
            verifier,
            encoder,
        }
    }

    pub fn encoder(&self) -> &TransactionEncoder {
        &self.encoder
    }

    /// Produce the unsigned participation transaction for a verified request
    pub async fn process(&self, request: &ValidationRequest) -> AppResult<TransactionEnvelope> {
        let event = self.resolver.resolve(request.event_code()).await?;

        if !event.is_active {
            // No activity gate: inactive events continue to verification.
            debug!("Event '{}' is inactive", event.code);
        }

        let verified = self
            .verifier
            .verify(request.user_handle(), &event.tags)
            .await?;

        if !verified {
            info!(
                "No qualifying post from {} for event '{}'",
                request.user_handle(),
                event.code
            );
            return Err(AppError::NoQualifyingPost);
        }

        // The transaction carries the code as submitted, not the lookup key
        let envelope = self.encoder.encode(request.event_code())?;
        Ok(envelope)
    }
}
