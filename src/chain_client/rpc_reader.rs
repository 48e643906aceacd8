use super::{ChainError, ChainReader, ContractAbi};
use alloy::dyn_abi::DynSolValue;
use alloy::network::TransactionBuilder;
use alloy::primitives::Address;
use alloy::providers::{Provider, RootProvider};
use alloy::rpc::types::TransactionRequest;
use alloy::transports::http::{Client, Http};
use alloy::transports::TransportError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// JSON-RPC error code for `execution reverted`
const EXECUTION_REVERTED: i64 = 3;

/// `eth_call`-backed contract reader
pub struct RpcChainReader {
    provider: RootProvider<Http<Client>>,
    abi: Arc<ContractAbi>,
    rpc_url: String,
}

impl RpcChainReader {
    /// Create a reader over an HTTP JSON-RPC endpoint
    pub fn connect(rpc_url: &str, abi: Arc<ContractAbi>) -> Result<Self, ChainError> {
        let url = rpc_url
            .parse()
            .map_err(|e| ChainError::Config(format!("Invalid RPC URL {}: {}", rpc_url, e)))?;

        Ok(Self {
            provider: RootProvider::new_http(url),
            abi,
            rpc_url: rpc_url.to_string(),
        })
    }

    /// Get RPC URL
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    fn classify(err: TransportError) -> ChainError {
        if let Some(payload) = err.as_error_resp() {
            if payload.code == EXECUTION_REVERTED || payload.message.contains("revert") {
                return ChainError::Reverted(payload.message.to_string());
            }
        }
        ChainError::Transport(err.to_string())
    }
}

#[async_trait]
impl ChainReader for RpcChainReader {
    async fn read_field(
        &self,
        contract: Address,
        function: &str,
        args: Vec<DynSolValue>,
    ) -> Result<Vec<DynSolValue>, ChainError> {
        let calldata = self.abi.encode_input(function, &args)?;

        debug!(
            "eth_call {}({} args) on {} via {}",
            function,
            args.len(),
            contract,
            self.rpc_url
        );

        let tx = TransactionRequest::default()
            .with_to(contract)
            .with_input(calldata);

        let output = self.provider.call(&tx).await.map_err(Self::classify)?;

        self.abi.decode_output(function, args.len(), &output)
    }
}
