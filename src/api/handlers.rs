use super::metadata::ActionMetadata;
use super::response::observe;
use crate::error::{AppError, AppResult};
use crate::models::{MintRequestBody, MintResponse, ValidationRequest};
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{field, info, info_span, Instrument};
use uuid::Uuid;

/// Response body for the `/healthz` endpoint.
#[derive(Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

/// Health check endpoint.
pub async fn healthz() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}

/// Serve the action metadata document.
pub async fn get_metadata(State(state): State<AppState>) -> AppResult<Json<ActionMetadata>> {
    let validated = state
        .metadata
        .validate()
        .map(|_| Json(state.metadata.as_ref().clone()))
        .map_err(|e| AppError::Internal(format!("Invalid action metadata: {}", e)));
    observe(validated)
}

/// Validate the caller's social proof and return the unsigned mint transaction.
pub async fn post_mint(
    State(state): State<AppState>,
    payload: Result<Json<MintRequestBody>, JsonRejection>,
) -> AppResult<Json<MintResponse>> {
    let span = info_span!(
        "mint_request",
        request_id = %Uuid::new_v4(),
        event_code = field::Empty,
        handle = field::Empty,
    );

    let handle_request = async move {
        let Json(body) = payload
            .map_err(|e| AppError::Input(format!("Invalid request body: {}", e.body_text())))?;
        let request = ValidationRequest::try_from(body)?;

        let span = tracing::Span::current();
        span.record("event_code", request.event_code());
        span.record("handle", request.user_handle());

        let envelope = state.gate.process(&request).await?;
        let chain_name = state.gate.encoder().target().chain_name.clone();

        info!("Mint transaction ready for {} on {}", request.user_handle(), chain_name);

        Ok::<_, AppError>(Json(MintResponse {
            serialized_transaction: envelope.serialized,
            chain_id: chain_name,
        }))
    };

    async move { observe(handle_request.await) }
        .instrument(span)
        .await
}
