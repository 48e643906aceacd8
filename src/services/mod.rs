pub mod event_resolver;
pub mod mint_gate;
pub mod proof_verifier;
pub mod transaction_encoder;
pub mod twitter_proof;

pub use event_resolver::{normalize_code, EventResolver};
pub use mint_gate::MintGate;
pub use proof_verifier::{ProofChecker, ProofError, ProofVerifier};
pub use transaction_encoder::{decode_serialized, ChainTarget, TransactionEncoder};
pub use twitter_proof::TwitterProofChecker;
