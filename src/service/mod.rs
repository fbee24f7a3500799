//! Transaction service subsystem.
//!
//! # Data Flow
//! ```text
//! session store (form data, account)
//!     → submit: amount conversion → native transfer → ledger append
//!       → in-flight signal → confirmation wait → count refresh
//!     → reads: list_transactions / get_accounts / transaction_count
//! ```
//!
//! # Design Decisions
//! - Exactly one transfer and one append per `submit`, in that order; the
//!   two requests are independent, so a failed append after a successful
//!   transfer is NOT rolled back (see DESIGN.md)
//! - The in-flight flag is a watch channel set strictly between append
//!   issuance and confirmation; a drop guard clears it on every exit path
//! - Overlapping `submit` calls are not coordinated: the flag is
//!   last-writer-wins

pub mod record;

use alloy::primitives::Address;
use thiserror::Error;
use tokio::sync::watch;

use crate::gateway::types::GatewayError;
use crate::gateway::{ProviderGateway, TransferRequest};
use crate::observability::metrics;

pub use record::{display_amount, parse_amount, TransactionRecord};

/// Errors surfaced by the transaction service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The wallet authorized the connection but returned no accounts.
    #[error("wallet returned no accounts")]
    NoAccounts,

    /// A send was attempted with no connected account.
    #[error("no account connected")]
    NotConnected,
}

impl ServiceError {
    /// True when the underlying cause is an absent wallet capability.
    pub fn is_missing_provider(&self) -> bool {
        matches!(self, ServiceError::Gateway(GatewayError::MissingProvider))
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// One transaction submission: the form fields plus the sending account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub address_to: String,
    /// Human decimal string, converted to 18-decimal fixed point on submit.
    pub amount: String,
    pub keyword: String,
    pub message: String,
    pub from: Address,
}

/// Reads and writes the remote transfer ledger through the gateway.
pub struct TransactionService {
    gateway: ProviderGateway,
    in_flight: watch::Sender<bool>,
}

impl TransactionService {
    pub fn new(gateway: ProviderGateway) -> Self {
        let (in_flight, _) = watch::channel(false);
        Self { gateway, in_flight }
    }

    /// Observe the in-flight (loading) flag.
    pub fn in_flight(&self) -> watch::Receiver<bool> {
        self.in_flight.subscribe()
    }

    /// All ledger records mapped for display, in ledger order.
    pub async fn list_transactions(&self) -> ServiceResult<Vec<TransactionRecord>> {
        let ledger = self.gateway.client()?;
        match ledger.all_transactions().await {
            Ok(raw) => {
                metrics::record_ledger_read("getAllTransactions", true);
                Ok(raw
                    .into_iter()
                    .map(TransactionRecord::from_entry)
                    .collect())
            }
            Err(e) => {
                metrics::record_ledger_read("getAllTransactions", false);
                Err(e.into())
            }
        }
    }

    /// Already-authorized accounts; never prompts.
    pub async fn get_accounts(&self) -> ServiceResult<Vec<Address>> {
        Ok(self.gateway.wallet()?.accounts().await?)
    }

    /// Prompt the wallet for account access and return the authorized
    /// account. Suspends until the user answers.
    pub async fn request_connection(&self) -> ServiceResult<Address> {
        let accounts = self.gateway.wallet()?.request_accounts().await?;
        let account = accounts.first().copied().ok_or(ServiceError::NoAccounts)?;
        tracing::info!(account = %account, "Wallet connected");
        Ok(account)
    }

    /// Current ledger record count.
    pub async fn transaction_count(&self) -> ServiceResult<u64> {
        let ledger = self.gateway.client()?;
        match ledger.transaction_count().await {
            Ok(count) => {
                metrics::record_ledger_read("getTransactionCount", true);
                Ok(count)
            }
            Err(e) => {
                metrics::record_ledger_read("getTransactionCount", false);
                Err(e.into())
            }
        }
    }

    /// Submit one transaction: a native transfer moving the asset, then a
    /// ledger append recording it.
    ///
    /// Returns the refreshed ledger count after confirmation. The two
    /// requests are independent; if the append fails after the transfer
    /// succeeded, the asset has still moved.
    pub async fn submit(&self, request: SubmitRequest) -> ServiceResult<u64> {
        let wallet = self.gateway.wallet()?;
        let ledger = self.gateway.client()?;

        let SubmitRequest {
            address_to,
            amount,
            keyword,
            message,
            from,
        } = request;

        let to: Address = address_to
            .parse()
            .map_err(|_| GatewayError::InvalidAddress(address_to.clone()))?;
        let value = record::parse_amount(&amount)?;

        let transfer_hash = match wallet
            .send_transfer(TransferRequest { from, to, value })
            .await
        {
            Ok(hash) => hash,
            Err(e) => {
                metrics::record_submission("rejected");
                tracing::error!(error = %e, "Native transfer request failed");
                return Err(e.into());
            }
        };
        tracing::debug!(tx_hash = %transfer_hash, "Native transfer submitted");

        let pending = match ledger.append(to, value, message, keyword).await {
            Ok(pending) => pending,
            Err(e) => {
                metrics::record_submission("rejected");
                tracing::error!(error = %e, "Ledger append request failed");
                return Err(e.into());
            }
        };

        let append_hash = pending.tx_hash();
        // In flight only from here: the wallet prompt is over, the append
        // is broadcast, and we are waiting on the network.
        let guard = InFlightGuard::engage(&self.in_flight);
        tracing::info!(tx_hash = %append_hash, "Awaiting confirmation");

        if let Err(e) = pending.wait().await {
            metrics::record_submission("failed");
            tracing::error!(tx_hash = %append_hash, error = %e, "Confirmation failed");
            return Err(e.into());
        }
        drop(guard);
        metrics::record_submission("confirmed");
        tracing::info!(tx_hash = %append_hash, "Transaction confirmed");

        self.transaction_count().await
    }
}

impl std::fmt::Debug for TransactionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionService")
            .field("gateway", &self.gateway)
            .field("in_flight", &*self.in_flight.borrow())
            .finish()
    }
}

/// Clears the in-flight flag when dropped, so error returns cannot leave
/// the flag stuck.
struct InFlightGuard<'a> {
    slot: &'a watch::Sender<bool>,
}

impl<'a> InFlightGuard<'a> {
    fn engage(slot: &'a watch::Sender<bool>) -> Self {
        slot.send_replace(true);
        metrics::record_in_flight(true);
        Self { slot }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.slot.send_replace(false);
        metrics::record_in_flight(false);
    }
}
