//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the wallet gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Wallet provider settings (RPC endpoint, chain, timeouts).
    pub provider: ProviderConfig,

    /// Transfer ledger contract settings.
    pub ledger: LedgerConfig,

    /// Session state settings (persisted count slot).
    pub session: SessionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Wallet provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// JSON-RPC endpoint the wallet capability is reached through.
    pub rpc_url: String,

    /// Expected chain ID. Verified at connect time when set; a mismatch
    /// logs a warning but does not fail the connection.
    pub chain_id: Option<u64>,

    /// Timeout for read-path RPC requests in seconds. Submission
    /// confirmation waits are not bounded locally.
    pub rpc_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: None,
            rpc_timeout_secs: 10,
        }
    }
}

/// Transfer ledger contract configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Address of the deployed transfer ledger contract.
    pub contract_address: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            contract_address: String::new(),
        }
    }
}

/// Session state configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Path of the persisted transaction-count slot. `None` disables
    /// persistence; the count is then only held in memory.
    pub count_cache_path: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            count_cache_path: Some("transaction_count".to_string()),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Bind address for the metrics endpoint.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9100".to_string(),
        }
    }
}
