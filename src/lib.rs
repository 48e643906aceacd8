//! Social Mint Library
//!
//! Gates event participation behind a social-media proof: resolve the event
//! on chain, check the caller's post for the event tags, then hand back an
//! unsigned `addParticipant` transaction.

pub mod api;
pub mod chain_client;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};

use api::ActionMetadata;
use chain_client::{ChainReader, ContractAbi};
use services::{ChainTarget, EventResolver, MintGate, ProofChecker, ProofVerifier, TransactionEncoder};
use std::sync::Arc;

/// Shared, immutable state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<MintGate>,
    pub metadata: Arc<ActionMetadata>,
    pub action_path: String,
}

impl AppState {
    /// Wire the pipeline from configuration and the two external capabilities
    pub fn new(
        config: &AppConfig,
        abi: Arc<ContractAbi>,
        reader: Arc<dyn ChainReader>,
        checker: Arc<dyn ProofChecker>,
    ) -> Self {
        let resolver = EventResolver::new(
            reader,
            config.chain.contract_address,
            config.chain.read_timeout(),
        );
        let verifier = ProofVerifier::new(checker, config.proof.timeout());
        let encoder = TransactionEncoder::new(
            abi,
            ChainTarget {
                contract_address: config.chain.contract_address,
                chain_id: config.chain.chain_id,
                chain_name: config.chain.chain_name.clone(),
            },
        );

        Self {
            gate: Arc::new(MintGate::new(resolver, verifier, encoder)),
            metadata: Arc::new(ActionMetadata::from_config(&config.metadata)),
            action_path: config.metadata.action_path.clone(),
        }
    }
}
