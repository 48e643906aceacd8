#![allow(dead_code)]

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{address, Address, U256};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use social_mint::chain_client::{ChainError, ChainReader, ContractAbi};
use social_mint::services::{ProofChecker, ProofError};
use social_mint::{AppConfig, AppState};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

pub const ORGANIZER: Address = address!("00000000000000000000000000000000000000aa");

/// What the fake chain answers with
#[derive(Clone)]
pub enum ChainReply {
    Record(Vec<DynSolValue>),
    Transport(String),
    Reverted(String),
    Hang,
}

/// Chain reader double that records every read
pub struct StaticChainReader {
    reply: ChainReply,
    pub calls: Mutex<Vec<(Address, String, Vec<DynSolValue>)>>,
}

impl StaticChainReader {
    pub fn new(reply: ChainReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// String argument of the most recent read
    pub fn last_key(&self) -> Option<String> {
        self.calls
            .lock()
            .unwrap()
            .last()
            .and_then(|(_, _, args)| args.first().and_then(|a| a.as_str().map(str::to_string)))
    }
}

#[async_trait]
impl ChainReader for StaticChainReader {
    async fn read_field(
        &self,
        contract: Address,
        function: &str,
        args: Vec<DynSolValue>,
    ) -> Result<Vec<DynSolValue>, ChainError> {
        self.calls
            .lock()
            .unwrap()
            .push((contract, function.to_string(), args));

        match &self.reply {
            ChainReply::Record(values) => Ok(values.clone()),
            ChainReply::Transport(msg) => Err(ChainError::Transport(msg.clone())),
            ChainReply::Reverted(msg) => Err(ChainError::Reverted(msg.clone())),
            ChainReply::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Err(ChainError::Transport("unreachable".to_string()))
            }
        }
    }
}

/// What the fake proof provider answers with
#[derive(Clone)]
pub enum ProofReply {
    Verdict(bool),
    Failure(String),
    Hang,
}

/// Proof checker double that records every check
pub struct StaticProofChecker {
    reply: ProofReply,
    pub calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl StaticProofChecker {
    pub fn new(reply: ProofReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ProofChecker for StaticProofChecker {
    async fn check_proof(&self, handle: &str, required_tags: &[String]) -> Result<bool, ProofError> {
        self.calls
            .lock()
            .unwrap()
            .push((handle.to_string(), required_tags.to_vec()));

        match &self.reply {
            ProofReply::Verdict(verdict) => Ok(*verdict),
            ProofReply::Failure(msg) => Err(ProofError::Request(msg.clone())),
            ProofReply::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(true)
            }
        }
    }
}

/// Positional `getEvent` record
pub fn event_record(name: &str, tags: &[&str], is_active: bool) -> Vec<DynSolValue> {
    vec![
        DynSolValue::String(name.to_string()),
        DynSolValue::Array(
            tags.iter()
                .map(|t| DynSolValue::String(t.to_string()))
                .collect(),
        ),
        DynSolValue::Address(ORGANIZER),
        DynSolValue::String("{\"venue\":\"online\"}".to_string()),
        DynSolValue::Uint(U256::from(1_717_000_000u64), 256),
        DynSolValue::Uint(U256::from(100u64), 256),
        DynSolValue::Bool(is_active),
    ]
}

/// Zero-valued record a mapping returns for an unknown key
pub fn empty_record() -> Vec<DynSolValue> {
    vec![
        DynSolValue::String(String::new()),
        DynSolValue::Array(vec![]),
        DynSolValue::Address(Address::ZERO),
        DynSolValue::String(String::new()),
        DynSolValue::Uint(U256::ZERO, 256),
        DynSolValue::Uint(U256::ZERO, 256),
        DynSolValue::Bool(false),
    ]
}

/// Config with short external-call timeouts
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.chain.read_timeout_ms = 200;
    config.proof.timeout_ms = 200;
    config
}

pub fn test_state(reader: Arc<StaticChainReader>, checker: Arc<StaticProofChecker>) -> AppState {
    let abi = Arc::new(ContractAbi::builtin().expect("built-in ABI parses"));
    AppState::new(&test_config(), abi, reader, checker)
}

pub fn test_app(reader: Arc<StaticChainReader>, checker: Arc<StaticProofChecker>) -> Router {
    social_mint::api::router(test_state(reader, checker))
}

/// Drive the router in-process and return status plus JSON body
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }

    let body = body
        .map(|v| Body::from(serde_json::to_vec(&v).unwrap()))
        .unwrap_or_else(|| Body::from(Vec::new()));

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec();

    let json = if bytes.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| json!({ "raw": String::from_utf8_lossy(&bytes) }))
    };

    (status, json)
}

pub async fn post_mint(app: &Router, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/api/mint", Some(body)).await
}
