use alloy::primitives::{address, Address};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const FUJI_RPC_URL: &str = "https://api.avax-test.network/ext/bc/C/rpc";
const FUJI_CHAIN_ID: u64 = 43113;
const FUJI_CHAIN_NAME: &str = "Avalanche Fuji";
const MINT_CONTRACT: Address = address!("d293e159a133a75098a3d814e681d73b88a7167b");

/// Target chain and contract configuration
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub rpc_url: String,
    pub contract_address: Address,
    pub chain_id: u64,
    pub chain_name: String,
    /// JSON ABI file overriding the built-in contract ABI
    pub abi_path: Option<PathBuf>,
    pub read_timeout_ms: u64,
}

/// Social proof provider configuration
#[derive(Debug, Clone)]
pub struct ProofConfig {
    pub api_url: String,
    pub bearer_token: Option<String>,
    pub timeout_ms: u64,
    pub max_results: u32,
}

/// Action metadata advertised to the calling UI
#[derive(Debug, Clone)]
pub struct MetadataConfig {
    pub url: String,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub base_url: String,
    pub chain_source: String,
    pub action_path: String,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub chain: ChainConfig,
    pub proof: ProofConfig,
    pub metadata: MetadataConfig,
    pub log_level: String,
    pub log_format: String,
    pub http_host: String,
    pub http_port: u16,
    pub environment: String,
}

/// Parse `key` when set; `default` only when unset
fn env_parse<T>(key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| format!("Invalid {} '{}': {}", key, raw, e)),
        Err(_) => Ok(default),
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl ChainConfig {
    /// Create chain config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let rpc_url = env_or("CHAIN_RPC_URL", FUJI_RPC_URL);

        let contract_address = match env::var("MINT_CONTRACT_ADDRESS") {
            Ok(raw) => Address::from_str(raw.trim())
                .map_err(|e| format!("Invalid MINT_CONTRACT_ADDRESS {}: {}", raw, e))?,
            Err(_) => MINT_CONTRACT,
        };

        let chain_id = env_parse("CHAIN_ID", FUJI_CHAIN_ID)?;
        let chain_name = env_or("CHAIN_NAME", FUJI_CHAIN_NAME);
        let abi_path = env::var("CONTRACT_ABI_PATH").ok().map(PathBuf::from);
        let read_timeout_ms = env_parse("CHAIN_READ_TIMEOUT_MS", 5000u64)?;

        if chain_id == 0 {
            return Err("CHAIN_ID must be greater than 0".to_string());
        }

        if read_timeout_ms == 0 {
            return Err("CHAIN_READ_TIMEOUT_MS must be greater than 0".to_string());
        }

        if !rpc_url.starts_with("http://") && !rpc_url.starts_with("https://") {
            return Err(format!("CHAIN_RPC_URL must be an http(s) URL, got {}", rpc_url));
        }

        Ok(Self {
            rpc_url,
            contract_address,
            chain_id,
            chain_name,
            abi_path,
            read_timeout_ms,
        })
    }

    /// Get chain read timeout as Duration
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: FUJI_RPC_URL.to_string(),
            contract_address: MINT_CONTRACT,
            chain_id: FUJI_CHAIN_ID,
            chain_name: FUJI_CHAIN_NAME.to_string(),
            abi_path: None,
            read_timeout_ms: 5000,
        }
    }
}

impl ProofConfig {
    /// Create proof provider config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let api_url = env_or("TWITTER_API_URL", "https://api.twitter.com/2");
        let bearer_token = env::var("TWITTER_BEARER_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        let timeout_ms = env_parse("PROOF_CHECK_TIMEOUT_MS", 5000u64)?;
        let max_results: u32 = env_parse("PROOF_MAX_RESULTS", 10)?;

        if timeout_ms == 0 {
            return Err("PROOF_CHECK_TIMEOUT_MS must be greater than 0".to_string());
        }

        // Recent search accepts 10..=100
        if !(10..=100).contains(&max_results) {
            return Err(format!(
                "PROOF_MAX_RESULTS must be between 10 and 100, got {}",
                max_results
            ));
        }

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            bearer_token,
            timeout_ms,
            max_results,
        })
    }

    /// Get proof check timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ProofConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.twitter.com/2".to_string(),
            bearer_token: None,
            timeout_ms: 5000,
            max_results: 10,
        }
    }
}

impl MetadataConfig {
    /// Create metadata config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: env_or("METADATA_URL", &defaults.url),
            icon: env_or("METADATA_ICON", &defaults.icon),
            title: env_or("METADATA_TITLE", &defaults.title),
            description: env_or("METADATA_DESCRIPTION", &defaults.description),
            base_url: env_or("METADATA_BASE_URL", &defaults.base_url),
            chain_source: env_or("METADATA_CHAIN_SOURCE", &defaults.chain_source),
            action_path: env_or("ACTION_PATH", &defaults.action_path),
        }
    }
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            url: "https://sherry.social".to_string(),
            icon: "https://avatars.githubusercontent.com/u/117962315".to_string(),
            title: "Social Mint".to_string(),
            description: "Checks that your X post meets every condition required to mint your POAP"
                .to_string(),
            base_url: "http://localhost:3000".to_string(),
            chain_source: "fuji".to_string(),
            action_path: "/api/mint".to_string(),
        }
    }
}

impl AppConfig {
    /// Create application config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let chain = ChainConfig::from_env()?;
        let proof = ProofConfig::from_env()?;
        let metadata = MetadataConfig::from_env();

        let log_level = env_or("LOG_LEVEL", "info");
        let log_format = env_or("LOG_FORMAT", "pretty");
        let http_host = env_or("HTTP_HOST", "0.0.0.0");

        let http_port: u16 = env_parse("HTTP_PORT", 3000)?;

        let environment = env_or("ENVIRONMENT", "development");

        // Validate log level
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid LOG_LEVEL: {}. Must be one of: {:?}",
                log_level, valid_log_levels
            ));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&log_format.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid LOG_FORMAT: {}. Must be one of: {:?}",
                log_format, valid_log_formats
            ));
        }

        // Validate environment
        let valid_environments = ["development", "staging", "production"];
        if !valid_environments.contains(&environment.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid ENVIRONMENT: {}. Must be one of: {:?}",
                environment, valid_environments
            ));
        }

        if !metadata.action_path.starts_with('/') {
            return Err(format!(
                "ACTION_PATH must start with '/', got {}",
                metadata.action_path
            ));
        }

        Ok(Self {
            chain,
            proof,
            metadata,
            log_level: log_level.to_lowercase(),
            log_format: log_format.to_lowercase(),
            http_host,
            http_port,
            environment: environment.to_lowercase(),
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Check if running in development
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == "json"
    }

    /// Socket address string the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chain: ChainConfig::default(),
            proof: ProofConfig::default(),
            metadata: MetadataConfig::default(),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            http_host: "0.0.0.0".to_string(),
            http_port: 3000,
            environment: "development".to_string(),
        }
    }
}
