//! Gateway types and error definitions.

use alloy::primitives::{Address, U256};
use thiserror::Error;

/// A raw transfer record exactly as the ledger contract returns it.
///
/// `amount` is the 18-decimal fixed-point integer and `timestamp` is epoch
/// seconds; display conversion happens in the service layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLedgerEntry {
    pub sender: Address,
    pub receiver: Address,
    pub amount: U256,
    pub message: String,
    pub keyword: String,
    pub timestamp: U256,
}

/// Errors that can occur during gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No wallet capability is configured.
    #[error("wallet provider is not available")]
    MissingProvider,

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The wallet or the node declined a submission request.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// Transaction was included but reverted on-chain.
    #[error("transaction reverted: {0}")]
    Reverted(String),

    /// Chain configuration mismatch.
    #[error("chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// A value could not be parsed into an address.
    #[error("invalid address {0:?}")]
    InvalidAddress(String),

    /// A decimal amount string could not be converted to fixed point.
    #[error("invalid amount {0:?}")]
    InvalidAmount(String),
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GatewayError::Timeout(10);
        assert_eq!(err.to_string(), "RPC timeout after 10 seconds");

        let err = GatewayError::ChainMismatch {
            expected: 1,
            actual: 31337,
        };
        assert!(err.to_string().contains("31337"));

        let err = GatewayError::MissingProvider;
        assert_eq!(err.to_string(), "wallet provider is not available");
    }
}
