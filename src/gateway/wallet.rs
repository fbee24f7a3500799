//! Wallet provider capability.
//!
//! # Responsibilities
//! - Model the externally supplied wallet request interface
//!   (`eth_accounts`, `eth_requestAccounts`, `eth_sendTransaction`)
//! - Provide the JSON-RPC-backed implementation used in production
//!
//! # Design Decisions
//! - The capability is a trait taken by constructor injection, never an
//!   ambient global; tests substitute a scripted implementation
//! - Signing stays inside the wallet; this crate never touches key material

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, Provider};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;

use crate::gateway::types::{GatewayError, GatewayResult};

/// Gas limit attached to every native transfer, as the hex literal 0x5208
/// (21000, the base cost of a value transfer).
pub const TRANSFER_GAS_LIMIT: u64 = 0x5208;

/// A native-value transfer to be signed and sent by the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub from: Address,
    pub to: Address,
    /// Amount in the 18-decimal fixed-point representation.
    pub value: U256,
}

/// The authorization-gated request interface of an external wallet.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Already-authorized accounts (`eth_accounts`). Never prompts; returns
    /// an empty list when the user has not connected.
    async fn accounts(&self) -> GatewayResult<Vec<Address>>;

    /// Ask the wallet to authorize account access (`eth_requestAccounts`).
    /// May suspend until the user approves or rejects in the wallet UI.
    async fn request_accounts(&self) -> GatewayResult<Vec<Address>>;

    /// Sign and broadcast a native transfer (`eth_sendTransaction`).
    /// Resolves with the transaction hash once the wallet has submitted it;
    /// inclusion is not awaited here.
    async fn send_transfer(&self, transfer: TransferRequest) -> GatewayResult<TxHash>;
}

/// Build the wire-level request for a native transfer.
///
/// Kept separate from the trait impl so the fixed gas limit and field
/// mapping are testable without a provider.
pub fn build_transfer_request(transfer: &TransferRequest) -> TransactionRequest {
    TransactionRequest::default()
        .with_from(transfer.from)
        .with_to(transfer.to)
        .with_value(transfer.value)
        .with_gas_limit(TRANSFER_GAS_LIMIT)
}

/// Wallet capability backed by a JSON-RPC endpoint that holds the signing
/// authority (a node with unlocked accounts, or a wallet daemon speaking
/// the same interface).
pub struct RpcWallet {
    provider: DynProvider,
    read_timeout: Duration,
}

impl RpcWallet {
    pub fn new(provider: DynProvider, read_timeout: Duration) -> Self {
        Self {
            provider,
            read_timeout,
        }
    }
}

#[async_trait]
impl WalletProvider for RpcWallet {
    async fn accounts(&self) -> GatewayResult<Vec<Address>> {
        let fut = self.provider.get_accounts();
        match timeout(self.read_timeout, fut).await {
            Ok(Ok(accounts)) => Ok(accounts),
            Ok(Err(e)) => Err(GatewayError::Rpc(e.to_string())),
            Err(_) => Err(GatewayError::Timeout(self.read_timeout.as_secs())),
        }
    }

    async fn request_accounts(&self) -> GatewayResult<Vec<Address>> {
        // No timeout: this suspends until the user answers the wallet prompt.
        self.provider
            .raw_request::<_, Vec<Address>>("eth_requestAccounts".into(), ())
            .await
            .map_err(|e| GatewayError::Rejected(e.to_string()))
    }

    async fn send_transfer(&self, transfer: TransferRequest) -> GatewayResult<TxHash> {
        let request = build_transfer_request(&transfer);
        // No timeout: the wallet may hold the request while the user decides.
        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(|e| GatewayError::Rejected(e.to_string()))?;
        Ok(*pending.tx_hash())
    }
}

impl std::fmt::Debug for RpcWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcWallet")
            .field("read_timeout", &self.read_timeout)
            .finish()
    }
}
