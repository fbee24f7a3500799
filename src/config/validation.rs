//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use alloy::primitives::Address;

use crate::config::schema::GatewayConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every failure.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.provider.rpc_url.parse::<url::Url>().is_err() {
        errors.push(ValidationError {
            field: "provider.rpc_url".to_string(),
            message: format!("not a valid URL: {:?}", config.provider.rpc_url),
        });
    }

    if config.provider.rpc_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "provider.rpc_timeout_secs".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    if config.ledger.contract_address.is_empty() {
        errors.push(ValidationError {
            field: "ledger.contract_address".to_string(),
            message: "must be set".to_string(),
        });
    } else if config.ledger.contract_address.parse::<Address>().is_err() {
        errors.push(ValidationError {
            field: "ledger.contract_address".to_string(),
            message: format!(
                "not a valid address: {:?}",
                config.ledger.contract_address
            ),
        });
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address".to_string(),
            message: format!(
                "not a valid socket address: {:?}",
                config.observability.metrics_address
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
