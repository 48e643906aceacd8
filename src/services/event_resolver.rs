use crate::chain_client::{ChainReader, GET_EVENT};
use crate::error::ResolutionError;
use crate::models::EventDescriptor;
use alloy::dyn_abi::DynSolValue;
use alloy::primitives::Address;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{debug, info};

/// Resolves event codes into on-chain event records
pub struct EventResolver {
    reader: Arc<dyn ChainReader>,
    contract: Address,
    timeout: Duration,
}

/// Lookup key for an event code. Lookups are case-insensitive.
pub fn normalize_code(code: &str) -> String {
    code.to_lowercase()
}

impl EventResolver {
    pub fn new(reader: Arc<dyn ChainReader>, contract: Address, timeout: Duration) -> Self {
        Self {
            reader,
            contract,
            timeout,
        }
    }

    /// Read and decode the event record for `code`.
    ///
    /// Exactly one chain read is made; nothing is retried. Inactive events
    /// resolve like any other.
    pub async fn resolve(&self, code: &str) -> Result<EventDescriptor, ResolutionError> {
        if code.trim().is_empty() {
            return Err(ResolutionError::EmptyCode);
        }

        let key = normalize_code(code);
        debug!("Reading event '{}' from {}", key, self.contract);

        let read = self.reader.read_field(
            self.contract,
            GET_EVENT,
            vec![DynSolValue::String(key.clone())],
        );

        let values = time::timeout(self.timeout, read)
            .await
            .map_err(|_| {
                ResolutionError::TransportFailure(format!(
                    "chain read timed out after {:?}",
                    self.timeout
                ))
            })?
            .map_err(|e| ResolutionError::from_chain(e, &key))?;

        let event = EventDescriptor::decode(key.clone(), flatten_record(values))?;

        if event.is_empty_record() {
            return Err(ResolutionError::NotFound(key));
        }

        let created = event
            .created_at_utc()
            .map(|at| at.to_rfc3339())
            .unwrap_or_else(|| event.created_at.to_string());
        info!(
            "Resolved event '{}' ({}): {} tag(s), active={}, created {}",
            event.code,
            event.name,
            event.tags.len(),
            event.is_active,
            created
        );

        Ok(event)
    }
}

// A struct-returning getEvent decodes as a single tuple holding the record
fn flatten_record(values: Vec<DynSolValue>) -> Vec<DynSolValue> {
    match <[DynSolValue; 1]>::try_from(values) {
        Ok([DynSolValue::Tuple(fields)]) => fields,
        Ok([single]) => vec![single],
        Err(values) => values,
    }
}
