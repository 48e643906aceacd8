use super::ChainError;
use alloy::dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy::json_abi::{Function, JsonAbi};
use std::path::Path;

/// View function returning the event record
pub const GET_EVENT: &str = "getEvent";
/// Registration entry point the caller's wallet signs
pub const ADD_PARTICIPANT: &str = "addParticipant";

const BUILTIN_ABI: &str = r#"[
  {
    "type": "function",
    "name": "getEvent",
    "stateMutability": "view",
    "inputs": [{ "name": "code", "type": "string", "internalType": "string" }],
    "outputs": [
      { "name": "name", "type": "string", "internalType": "string" },
      { "name": "tags", "type": "string[]", "internalType": "string[]" },
      { "name": "organizer", "type": "address", "internalType": "address" },
      { "name": "additionalData", "type": "string", "internalType": "string" },
      { "name": "createdAt", "type": "uint256", "internalType": "uint256" },
      { "name": "amount", "type": "uint256", "internalType": "uint256" },
      { "name": "isActive", "type": "bool", "internalType": "bool" }
    ]
  },
  {
    "type": "function",
    "name": "addParticipant",
    "stateMutability": "nonpayable",
    "inputs": [{ "name": "code", "type": "string", "internalType": "string" }],
    "outputs": []
  }
]"#;

/// Mint contract ABI
#[derive(Debug, Clone)]
pub struct ContractAbi {
    abi: JsonAbi,
}

impl ContractAbi {
    /// ABI of the deployed social mint contract
    pub fn builtin() -> Result<Self, ChainError> {
        Self::from_json(BUILTIN_ABI)
    }

    pub fn from_json(json: &str) -> Result<Self, ChainError> {
        let abi: JsonAbi = serde_json::from_str(json)
            .map_err(|e| ChainError::Config(format!("Failed to parse contract ABI: {}", e)))?;
        Ok(Self { abi })
    }

    pub fn from_file(path: &Path) -> Result<Self, ChainError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            ChainError::Config(format!("Failed to read ABI file {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Load from `path` when given, otherwise fall back to the built-in ABI
    pub fn load(path: Option<&Path>) -> Result<Self, ChainError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::builtin(),
        }
    }

    /// Overload of `name` taking exactly `arity` inputs
    pub fn function(&self, name: &str, arity: usize) -> Result<&Function, ChainError> {
        let overloads = self
            .abi
            .function(name)
            .ok_or_else(|| ChainError::Abi(format!("function '{}' not in contract ABI", name)))?;

        overloads
            .iter()
            .find(|f| f.inputs.len() == arity)
            .ok_or_else(|| {
                ChainError::Abi(format!(
                    "function '{}' has no overload taking {} argument(s)",
                    name, arity
                ))
            })
    }

    /// Overload of `name` taking a single `string`
    pub fn string_function(&self, name: &str) -> Result<&Function, ChainError> {
        let function = self.function(name, 1)?;
        match function.inputs[0].ty.as_str() {
            "string" => Ok(function),
            other => Err(ChainError::Abi(format!(
                "function '{}' takes {}, not string",
                name, other
            ))),
        }
    }

    /// Selector-prefixed calldata for `name(args...)`
    pub fn encode_input(&self, name: &str, args: &[DynSolValue]) -> Result<Vec<u8>, ChainError> {
        let function = self.function(name, args.len())?;
        function
            .abi_encode_input(args)
            .map_err(|e| ChainError::Abi(format!("cannot encode {} arguments: {}", name, e)))
    }

    /// Decode the return data of `name` into positional values
    pub fn decode_output(
        &self,
        name: &str,
        arity: usize,
        data: &[u8],
    ) -> Result<Vec<DynSolValue>, ChainError> {
        if data.is_empty() {
            return Err(ChainError::EmptyResult);
        }

        let function = self.function(name, arity)?;
        function
            .abi_decode_output(data, true)
            .map_err(|e| ChainError::Abi(format!("cannot decode {} output: {}", name, e)))
    }
}
