use crate::chain_client::{ContractAbi, ADD_PARTICIPANT};
use crate::error::EncodingError;
use crate::models::{TransactionEnvelope, TxType};
use alloy::consensus::{SignableTransaction, TxLegacy};
use alloy::dyn_abi::{DynSolValue, JsonAbiExt};
use alloy::primitives::{Address, Bytes, TxKind, U256};
use alloy::rlp::{Decodable, Header};
use std::sync::Arc;
use tracing::info;

/// Contract and chain the participant registration targets
#[derive(Debug, Clone)]
pub struct ChainTarget {
    pub contract_address: Address,
    pub chain_id: u64,
    pub chain_name: String,
}

/// Builds unsigned `addParticipant` transactions
pub struct TransactionEncoder {
    abi: Arc<ContractAbi>,
    target: ChainTarget,
}

impl TransactionEncoder {
    pub fn new(abi: Arc<ContractAbi>, target: ChainTarget) -> Self {
        Self { abi, target }
    }

    pub fn target(&self) -> &ChainTarget {
        &self.target
    }

    /// Encode `addParticipant(event_code)` into a legacy envelope.
    ///
    /// `event_code` is used exactly as submitted; it is not normalized.
    /// Nonce, gas and value stay zero for the signing wallet to fill in.
    pub fn encode(&self, event_code: &str) -> Result<TransactionEnvelope, EncodingError> {
        let function = self
            .abi
            .string_function(ADD_PARTICIPANT)
            .map_err(|e| EncodingError::AbiMismatch(e.to_string()))?;

        let data: Bytes = function
            .abi_encode_input(&[DynSolValue::String(event_code.to_string())])
            .map_err(|e| EncodingError::AbiMismatch(e.to_string()))?
            .into();

        let tx = TxLegacy {
            chain_id: Some(self.target.chain_id),
            to: TxKind::Call(self.target.contract_address),
            value: U256::ZERO,
            input: data.clone(),
            ..Default::default()
        };

        let mut encoded = Vec::new();
        tx.encode_for_signing(&mut encoded);

        info!(
            "Encoded {}({}) for {} on chain {}",
            ADD_PARTICIPANT, event_code, self.target.contract_address, self.target.chain_id
        );

        Ok(TransactionEnvelope {
            to: self.target.contract_address,
            data,
            chain_id: self.target.chain_id,
            tx_type: TxType::Legacy,
            serialized: format!("0x{}", hex::encode(&encoded)),
        })
    }
}

/// Decode an unsigned EIP-155 legacy transaction produced by [`TransactionEncoder::encode`]
pub fn decode_serialized(serialized: &str) -> Result<TransactionEnvelope, EncodingError> {
    let raw = hex::decode(serialized.strip_prefix("0x").unwrap_or(serialized))
        .map_err(|e| EncodingError::Malformed(format!("invalid hex: {}", e)))?;

    let mut buf = raw.as_slice();
    let header = Header::decode(&mut buf)?;
    if !header.list {
        return Err(EncodingError::Malformed("expected an RLP list".to_string()));
    }
    if header.payload_length != buf.len() {
        return Err(EncodingError::Malformed(format!(
            "list payload is {} bytes, {} available",
            header.payload_length,
            buf.len()
        )));
    }

    let _nonce = u64::decode(&mut buf)?;
    let _gas_price = u128::decode(&mut buf)?;
    let _gas_limit = u64::decode(&mut buf)?;
    let to = match TxKind::decode(&mut buf)? {
        TxKind::Call(address) => address,
        TxKind::Create => {
            return Err(EncodingError::Malformed(
                "contract creation is not a participant call".to_string(),
            ))
        }
    };
    let _value = U256::decode(&mut buf)?;
    let data = Bytes::decode(&mut buf)?;
    let chain_id = u64::decode(&mut buf)?;

    // EIP-155 signing payload ends with empty r and s
    let r = u64::decode(&mut buf)?;
    let s = u64::decode(&mut buf)?;
    if r != 0 || s != 0 || !buf.is_empty() {
        return Err(EncodingError::Malformed(
            "not an unsigned EIP-155 payload".to_string(),
        ));
    }

    Ok(TransactionEnvelope {
        to,
        data,
        chain_id,
        tx_type: TxType::Legacy,
        serialized: serialized.to_string(),
    })
}
