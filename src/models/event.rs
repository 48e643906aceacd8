use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field order of the on-chain event record
pub const EVENT_RECORD_FIELDS: [&str; 7] = [
    "name",
    "tags",
    "organizerAddress",
    "additionalData",
    "createdAt",
    "rewardAmount",
    "isActive",
];

/// Errors decoding an event record tuple
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EventDecodeError {
    #[error("expected {expected} record fields, got {found}")]
    Arity { expected: usize, found: usize },

    #[error("field '{field}' is not a {expected}")]
    FieldType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("field '{field}' does not fit in 64 bits")]
    Overflow { field: &'static str },

    #[error("ABI decoding failed: {0}")]
    Abi(String),
}

/// Event record read from the mint contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDescriptor {
    /// Normalized (lowercase) lookup key
    pub code: String,
    pub name: String,
    /// Hashtags and mentions a qualifying post must carry
    pub tags: Vec<String>,
    pub organizer_address: Address,
    pub additional_data: String,
    pub created_at: u64,
    pub reward_amount: U256,
    pub is_active: bool,
}

impl EventDescriptor {
    /// Decode the positional record returned by `getEvent`.
    ///
    /// The tuple must hold exactly the fields of [`EVENT_RECORD_FIELDS`], in that order.
    pub fn decode(code: impl Into<String>, values: Vec<DynSolValue>) -> Result<Self, EventDecodeError> {
        let [name, tags, organizer, additional_data, created_at, reward_amount, is_active]: [DynSolValue; 7] =
            values.try_into().map_err(|rest: Vec<DynSolValue>| EventDecodeError::Arity {
                expected: EVENT_RECORD_FIELDS.len(),
                found: rest.len(),
            })?;

        let created_at = expect_uint("createdAt", created_at)?;

        Ok(Self {
            code: code.into(),
            name: expect_string("name", name)?,
            tags: expect_string_array("tags", tags)?,
            organizer_address: expect_address("organizerAddress", organizer)?,
            additional_data: expect_opaque("additionalData", additional_data)?,
            created_at: u64::try_from(created_at)
                .map_err(|_| EventDecodeError::Overflow { field: "createdAt" })?,
            reward_amount: expect_uint("rewardAmount", reward_amount)?,
            is_active: expect_bool("isActive", is_active)?,
        })
    }

    /// A mapping lookup for an unknown key returns the zero-valued record
    pub fn is_empty_record(&self) -> bool {
        self.name.is_empty() && self.organizer_address == Address::ZERO && self.created_at == 0
    }

    /// Creation time, when it fits a calendar date
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.created_at)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

fn expect_string(field: &'static str, value: DynSolValue) -> Result<String, EventDecodeError> {
    match value {
        DynSolValue::String(s) => Ok(s),
        _ => Err(EventDecodeError::FieldType {
            field,
            expected: "string",
        }),
    }
}

fn expect_string_array(
    field: &'static str,
    value: DynSolValue,
) -> Result<Vec<String>, EventDecodeError> {
    match value {
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => items
            .into_iter()
            .map(|item| {
                expect_string(field, item).map_err(|_| EventDecodeError::FieldType {
                    field,
                    expected: "string[]",
                })
            })
            .collect(),
        _ => Err(EventDecodeError::FieldType {
            field,
            expected: "string[]",
        }),
    }
}

fn expect_address(field: &'static str, value: DynSolValue) -> Result<Address, EventDecodeError> {
    match value {
        DynSolValue::Address(address) => Ok(address),
        _ => Err(EventDecodeError::FieldType {
            field,
            expected: "address",
        }),
    }
}

// Opaque payload: strings pass through, byte payloads become 0x-hex
fn expect_opaque(field: &'static str, value: DynSolValue) -> Result<String, EventDecodeError> {
    match value {
        DynSolValue::String(s) => Ok(s),
        DynSolValue::Bytes(bytes) => Ok(format!("0x{}", hex::encode(bytes))),
        DynSolValue::FixedBytes(word, size) => Ok(format!("0x{}", hex::encode(&word[..size]))),
        _ => Err(EventDecodeError::FieldType {
            field,
            expected: "string or bytes",
        }),
    }
}

fn expect_uint(field: &'static str, value: DynSolValue) -> Result<U256, EventDecodeError> {
    match value {
        DynSolValue::Uint(v, _) => Ok(v),
        _ => Err(EventDecodeError::FieldType {
            field,
            expected: "uint",
        }),
    }
}

fn expect_bool(field: &'static str, value: DynSolValue) -> Result<bool, EventDecodeError> {
    match value {
        DynSolValue::Bool(b) => Ok(b),
        _ => Err(EventDecodeError::FieldType {
            field,
            expected: "bool",
        }),
    }
}
