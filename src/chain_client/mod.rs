//! EVM chain access for the mint contract.
//!
//! The resolver only sees [`ChainReader`]; [`RpcChainReader`] is the alloy-backed
//! implementation used in production.

pub mod abi;
pub mod rpc_reader;

pub use abi::{ContractAbi, ADD_PARTICIPANT, GET_EVENT};
pub use rpc_reader::RpcChainReader;

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::Address;
use async_trait::async_trait;
use thiserror::Error;

/// Chain client errors
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("RPC transport error: {0}")]
    Transport(String),

    #[error("Contract call reverted: {0}")]
    Reverted(String),

    #[error("Contract returned no data")]
    EmptyResult,

    #[error("ABI error: {0}")]
    Abi(String),

    #[error("Chain client configuration error: {0}")]
    Config(String),
}

/// Read-only view of a contract
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Call a view function and return its outputs positionally
    async fn read_field(
        &self,
        contract: Address,
        function: &str,
        args: Vec<DynSolValue>,
    ) -> Result<Vec<DynSolValue>, ChainError>;
}
