use alloy::primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};

/// Transaction shape. Only the pre-EIP-2718 legacy form is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Legacy,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Legacy => "legacy",
        }
    }
}

/// Unsigned transaction handed back to the caller's wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEnvelope {
    pub to: Address,
    pub data: Bytes,
    pub chain_id: u64,
    pub tx_type: TxType,
    /// 0x-prefixed unsigned EIP-155 RLP encoding
    pub serialized: String,
}

/// Successful mint response body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintResponse {
    pub serialized_transaction: String,
    pub chain_id: String,
}
