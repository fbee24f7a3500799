//! Provider gateway subsystem.
//!
//! # Data Flow
//! ```text
//! GatewayConfig (RPC URL, contract address)
//!     → wallet.rs (wallet capability: accounts, connect, native transfer)
//!     → contract.rs (ledger client: list, count, append + confirmation)
//!     → service layer (submission sequencing)
//! ```
//!
//! # Design Decisions
//! - Both capabilities are injected trait objects; no ambient globals
//! - Handle accessors are cheap factory calls, safe to invoke per operation
//! - An absent wallet surfaces `MissingProvider` to the caller; nothing is
//!   handled here

pub mod contract;
pub mod types;
pub mod wallet;

use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::config::GatewayConfig;

pub use contract::{ContractLedger, LedgerClient, PendingAppend};
pub use types::{GatewayError, GatewayResult, RawLedgerEntry};
pub use wallet::{RpcWallet, TransferRequest, WalletProvider, TRANSFER_GAS_LIMIT};

/// Holds the wallet capability and derives contract-bound ledger handles
/// from it.
#[derive(Clone)]
pub struct ProviderGateway {
    wallet: Option<Arc<dyn WalletProvider>>,
    ledger: Option<Arc<dyn LedgerClient>>,
}

impl ProviderGateway {
    /// Build a gateway from explicit capabilities. Tests pass scripted
    /// implementations here.
    pub fn new(
        wallet: Option<Arc<dyn WalletProvider>>,
        ledger: Option<Arc<dyn LedgerClient>>,
    ) -> Self {
        Self { wallet, ledger }
    }

    /// A gateway with no wallet capability; every accessor surfaces
    /// [`GatewayError::MissingProvider`].
    pub fn disconnected() -> Self {
        Self {
            wallet: None,
            ledger: None,
        }
    }

    /// Connect the production capabilities described by the configuration.
    ///
    /// When a chain ID is configured it is verified against the endpoint;
    /// a mismatch logs a warning but the gateway still connects.
    pub async fn connect(config: &GatewayConfig) -> GatewayResult<Self> {
        let url: url::Url = config.provider.rpc_url.parse().map_err(|e| {
            GatewayError::Rpc(format!(
                "Invalid RPC URL '{}': {}",
                config.provider.rpc_url, e
            ))
        })?;
        let contract_address: Address = config
            .ledger
            .contract_address
            .parse()
            .map_err(|_| GatewayError::InvalidAddress(config.ledger.contract_address.clone()))?;

        let provider = ProviderBuilder::new().connect_http(url).erased();
        let read_timeout = Duration::from_secs(config.provider.rpc_timeout_secs);

        if let Some(expected) = config.provider.chain_id {
            if let Err(e) = verify_chain_id(&provider, read_timeout, expected).await {
                tracing::warn!(error = %e, "Chain verification failed");
            }
        }

        tracing::info!(
            rpc_url = %config.provider.rpc_url,
            contract = %contract_address,
            "Provider gateway connected"
        );

        Ok(Self {
            wallet: Some(Arc::new(RpcWallet::new(provider.clone(), read_timeout))),
            ledger: Some(Arc::new(ContractLedger::new(
                contract_address,
                provider,
                read_timeout,
            ))),
        })
    }

    /// The wallet capability, or `MissingProvider` when none is configured.
    pub fn wallet(&self) -> GatewayResult<Arc<dyn WalletProvider>> {
        self.wallet.clone().ok_or(GatewayError::MissingProvider)
    }

    /// A contract-bound ledger handle, or `MissingProvider` when the wallet
    /// capability is absent.
    pub fn client(&self) -> GatewayResult<Arc<dyn LedgerClient>> {
        self.ledger.clone().ok_or(GatewayError::MissingProvider)
    }
}

/// Check the endpoint's chain ID against the configured expectation.
async fn verify_chain_id(
    provider: &DynProvider,
    read_timeout: Duration,
    expected: u64,
) -> GatewayResult<()> {
    match timeout(read_timeout, provider.get_chain_id()).await {
        Ok(Ok(actual)) if actual == expected => Ok(()),
        Ok(Ok(actual)) => Err(GatewayError::ChainMismatch { expected, actual }),
        Ok(Err(e)) => Err(GatewayError::Rpc(e.to_string())),
        Err(_) => Err(GatewayError::Timeout(read_timeout.as_secs())),
    }
}

impl std::fmt::Debug for ProviderGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderGateway")
            .field("wallet", &self.wallet.is_some())
            .field("ledger", &self.ledger.is_some())
            .finish()
    }
}
