//! Display-level transaction records.
//!
//! The ledger returns fixed-point integers and epoch-seconds timestamps;
//! this module holds the pure mapping into display values so both
//! conversions are testable in isolation.

use alloy::primitives::utils::{format_ether, parse_ether};
use alloy::primitives::{Address, U256};
use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::gateway::types::{GatewayError, GatewayResult, RawLedgerEntry};

/// Convert a human decimal string to the ledger's 18-decimal fixed point.
pub fn parse_amount(amount: &str) -> GatewayResult<U256> {
    parse_ether(amount).map_err(|_| GatewayError::InvalidAmount(amount.to_string()))
}

/// Convert a fixed-point amount to its display value (raw / 10^18).
pub fn display_amount(raw: U256) -> f64 {
    format_ether(raw).parse().unwrap_or_default()
}

/// A ledger record mapped for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub address_from: Address,
    pub address_to: Address,
    /// Local date-time derived from the ledger's epoch-seconds value.
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub keyword: String,
    /// Display units (raw amount / 10^18).
    pub amount: f64,
}

impl TransactionRecord {
    /// Map a raw ledger entry into a display record.
    pub fn from_entry(entry: RawLedgerEntry) -> Self {
        let millis = (entry.timestamp.saturating_to::<u64>() as i64).saturating_mul(1000);
        let timestamp = DateTime::from_timestamp_millis(millis)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
            .with_timezone(&Local);

        Self {
            address_from: entry.sender,
            address_to: entry.receiver,
            timestamp,
            message: entry.message,
            keyword: entry.keyword,
            amount: display_amount(entry.amount),
        }
    }
}

impl std::fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} -> {} | {} | {} | {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.address_from,
            self.address_to,
            self.amount,
            self.keyword,
            self.message
        )
    }
}
