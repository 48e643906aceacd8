//! Domain models for the social mint service.
//!
//! Nothing here is persisted: event descriptors are read fresh from the
//! chain per request and envelopes only live for the response.

pub mod event;
pub mod request;
pub mod transaction;

// Re-export all models for convenient access
pub use event::{EventDecodeError, EventDescriptor, EVENT_RECORD_FIELDS};
pub use request::{MintRequestBody, ValidationRequest};
pub use transaction::{MintResponse, TransactionEnvelope, TxType};
