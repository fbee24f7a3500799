//! Transfer ledger contract bindings.
//!
//! # Responsibilities
//! - `sol!` bindings for the deployed transfer ledger
//! - Contract-bound client implementing [`LedgerClient`]
//! - Pending-append handle whose `wait` resolves on confirmation
//!
//! # Design Decisions
//! - Trait objects at the seam so the service layer is testable against an
//!   in-memory ledger
//! - Read calls are timeout-bounded; the confirmation wait is not

use alloy::network::Ethereum;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder};
use alloy::sol;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;

use crate::gateway::types::{GatewayError, GatewayResult, RawLedgerEntry};

sol! {
    #[sol(rpc)]
    contract TransferLedger {
        struct TransferStruct {
            address sender;
            address receiver;
            uint256 amount;
            string message;
            uint256 timestamp;
            string keyword;
        }

        function getAllTransactions() external view returns (TransferStruct[] memory);
        function getTransactionCount() external view returns (uint256);
        function addToBlockchain(address payable receiver, uint256 amount, string memory message, string memory keyword) external;
    }
}

impl From<TransferLedger::TransferStruct> for RawLedgerEntry {
    fn from(raw: TransferLedger::TransferStruct) -> Self {
        Self {
            sender: raw.sender,
            receiver: raw.receiver,
            amount: raw.amount,
            message: raw.message,
            keyword: raw.keyword,
            timestamp: raw.timestamp,
        }
    }
}

/// A ledger append that has been broadcast but not yet confirmed.
#[async_trait]
pub trait PendingAppend: Send {
    /// Hash of the broadcast transaction.
    fn tx_hash(&self) -> TxHash;

    /// Suspend until the network confirms inclusion.
    async fn wait(self: Box<Self>) -> GatewayResult<()>;
}

/// The remote ledger capability: read the record list and count, append a
/// new record.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// `getAllTransactions`: every record, in ledger order.
    async fn all_transactions(&self) -> GatewayResult<Vec<RawLedgerEntry>>;

    /// `getTransactionCount`: total number of records.
    async fn transaction_count(&self) -> GatewayResult<u64>;

    /// `addToBlockchain`: append a record, returning the pending handle.
    async fn append(
        &self,
        receiver: Address,
        amount: U256,
        message: String,
        keyword: String,
    ) -> GatewayResult<Box<dyn PendingAppend>>;
}

/// [`LedgerClient`] bound to the deployed contract over JSON-RPC.
pub struct ContractLedger {
    instance: TransferLedger::TransferLedgerInstance<DynProvider>,
    read_timeout: Duration,
}

impl ContractLedger {
    pub fn new(address: Address, provider: DynProvider, read_timeout: Duration) -> Self {
        Self {
            instance: TransferLedger::new(address, provider),
            read_timeout,
        }
    }

    /// Address of the bound deployment.
    pub fn address(&self) -> Address {
        *self.instance.address()
    }
}

#[async_trait]
impl LedgerClient for ContractLedger {
    async fn all_transactions(&self) -> GatewayResult<Vec<RawLedgerEntry>> {
        let call = self.instance.getAllTransactions();
        let entries = match timeout(self.read_timeout, call.call()).await {
            Ok(Ok(entries)) => entries,
            Ok(Err(e)) => return Err(GatewayError::Rpc(e.to_string())),
            Err(_) => return Err(GatewayError::Timeout(self.read_timeout.as_secs())),
        };
        Ok(entries.into_iter().map(RawLedgerEntry::from).collect())
    }

    async fn transaction_count(&self) -> GatewayResult<u64> {
        let call = self.instance.getTransactionCount();
        let count = match timeout(self.read_timeout, call.call()).await {
            Ok(Ok(count)) => count,
            Ok(Err(e)) => return Err(GatewayError::Rpc(e.to_string())),
            Err(_) => return Err(GatewayError::Timeout(self.read_timeout.as_secs())),
        };
        Ok(count.saturating_to::<u64>())
    }

    async fn append(
        &self,
        receiver: Address,
        amount: U256,
        message: String,
        keyword: String,
    ) -> GatewayResult<Box<dyn PendingAppend>> {
        let pending = self
            .instance
            .addToBlockchain(receiver, amount, message, keyword)
            .send()
            .await
            .map_err(|e| GatewayError::Rejected(e.to_string()))?;

        Ok(Box::new(PendingReceipt {
            hash: *pending.tx_hash(),
            pending,
        }))
    }
}

impl std::fmt::Debug for ContractLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractLedger")
            .field("address", &self.address())
            .field("read_timeout", &self.read_timeout)
            .finish()
    }
}

/// Pending handle over the node's receipt wait.
struct PendingReceipt {
    hash: TxHash,
    pending: PendingTransactionBuilder<Ethereum>,
}

#[async_trait]
impl PendingAppend for PendingReceipt {
    fn tx_hash(&self) -> TxHash {
        self.hash
    }

    async fn wait(self: Box<Self>) -> GatewayResult<()> {
        let hash = self.hash;
        let receipt = self
            .pending
            .get_receipt()
            .await
            .map_err(|e| GatewayError::Rpc(e.to_string()))?;

        if receipt.status() {
            Ok(())
        } else {
            Err(GatewayError::Reverted(format!("{hash}")))
        }
    }
}
