//! Shared mocks for integration tests.
//!
//! `MockWallet` and `MockLedger` implement the gateway capability traits
//! over in-memory state, recording every request into a shared ordered log
//! so tests can assert request sequencing.

#![allow(dead_code)]

use alloy::primitives::{Address, TxHash, B256, U256};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use wallet_gateway::gateway::types::{GatewayError, GatewayResult, RawLedgerEntry};
use wallet_gateway::gateway::{
    LedgerClient, PendingAppend, ProviderGateway, TransferRequest, WalletProvider,
};

/// A request issued to a mock collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Accounts,
    RequestAccounts,
    Transfer {
        from: Address,
        to: Address,
        value: U256,
    },
    Append {
        to: Address,
        amount: U256,
        message: String,
        keyword: String,
    },
    Wait,
    ReadAll,
    ReadCount,
}

pub type OpLog = Arc<Mutex<Vec<Op>>>;

pub fn new_log() -> OpLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn ops(log: &OpLog) -> Vec<Op> {
    log.lock().unwrap().clone()
}

pub fn test_account() -> Address {
    "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        .parse()
        .unwrap()
}

pub fn test_recipient() -> Address {
    "0x70997970C51812dc3A010C7d01b50e0d17dc79C8"
        .parse()
        .unwrap()
}

pub fn entry(amount: U256, timestamp: u64) -> RawLedgerEntry {
    RawLedgerEntry {
        sender: test_account(),
        receiver: test_recipient(),
        amount,
        message: "lunch".to_string(),
        keyword: "food".to_string(),
        timestamp: U256::from(timestamp),
    }
}

/// Scripted wallet capability.
pub struct MockWallet {
    pub accounts: Vec<Address>,
    pub fail_transfer: bool,
    pub log: OpLog,
}

impl MockWallet {
    pub fn new(log: OpLog, accounts: Vec<Address>) -> Self {
        Self {
            accounts,
            fail_transfer: false,
            log,
        }
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn accounts(&self) -> GatewayResult<Vec<Address>> {
        self.log.lock().unwrap().push(Op::Accounts);
        Ok(self.accounts.clone())
    }

    async fn request_accounts(&self) -> GatewayResult<Vec<Address>> {
        self.log.lock().unwrap().push(Op::RequestAccounts);
        Ok(self.accounts.clone())
    }

    async fn send_transfer(&self, transfer: TransferRequest) -> GatewayResult<TxHash> {
        self.log.lock().unwrap().push(Op::Transfer {
            from: transfer.from,
            to: transfer.to,
            value: transfer.value,
        });
        if self.fail_transfer {
            return Err(GatewayError::Rejected("user rejected signature".to_string()));
        }
        Ok(B256::repeat_byte(0x11))
    }
}

/// In-memory ledger capability.
pub struct MockLedger {
    pub entries: Arc<Mutex<Vec<RawLedgerEntry>>>,
    pub log: OpLog,
    pub fail_reads: bool,
    pub fail_append: bool,
    pub fail_wait: bool,
    /// When set, `wait` suspends until the test notifies.
    pub confirm_gate: Option<Arc<Notify>>,
    /// Sender recorded on appended entries.
    pub append_sender: Address,
}

impl MockLedger {
    pub fn new(log: OpLog) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            log,
            fail_reads: false,
            fail_append: false,
            fail_wait: false,
            confirm_gate: None,
            append_sender: test_account(),
        }
    }

    pub fn seeded(log: OpLog, entries: Vec<RawLedgerEntry>) -> Self {
        let ledger = Self::new(log);
        *ledger.entries.lock().unwrap() = entries;
        ledger
    }
}

#[async_trait]
impl LedgerClient for MockLedger {
    async fn all_transactions(&self) -> GatewayResult<Vec<RawLedgerEntry>> {
        self.log.lock().unwrap().push(Op::ReadAll);
        if self.fail_reads {
            return Err(GatewayError::Rpc("node unreachable".to_string()));
        }
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn transaction_count(&self) -> GatewayResult<u64> {
        self.log.lock().unwrap().push(Op::ReadCount);
        if self.fail_reads {
            return Err(GatewayError::Rpc("node unreachable".to_string()));
        }
        Ok(self.entries.lock().unwrap().len() as u64)
    }

    async fn append(
        &self,
        receiver: Address,
        amount: U256,
        message: String,
        keyword: String,
    ) -> GatewayResult<Box<dyn PendingAppend>> {
        self.log.lock().unwrap().push(Op::Append {
            to: receiver,
            amount,
            message: message.clone(),
            keyword: keyword.clone(),
        });
        if self.fail_append {
            return Err(GatewayError::Rejected("node rejected append".to_string()));
        }

        let timestamp = 1_700_000_000 + self.entries.lock().unwrap().len() as u64;
        self.entries.lock().unwrap().push(RawLedgerEntry {
            sender: self.append_sender,
            receiver,
            amount,
            message,
            keyword,
            timestamp: U256::from(timestamp),
        });

        Ok(Box::new(MockPending {
            hash: B256::repeat_byte(0x22),
            gate: self.confirm_gate.clone(),
            fail: self.fail_wait,
            log: self.log.clone(),
        }))
    }
}

struct MockPending {
    hash: TxHash,
    gate: Option<Arc<Notify>>,
    fail: bool,
    log: OpLog,
}

#[async_trait]
impl PendingAppend for MockPending {
    fn tx_hash(&self) -> TxHash {
        self.hash
    }

    async fn wait(self: Box<Self>) -> GatewayResult<()> {
        self.log.lock().unwrap().push(Op::Wait);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail {
            return Err(GatewayError::Rpc("transaction dropped".to_string()));
        }
        Ok(())
    }
}

/// A gateway wired to the given mocks.
pub fn mock_gateway(wallet: MockWallet, ledger: MockLedger) -> ProviderGateway {
    ProviderGateway::new(Some(Arc::new(wallet)), Some(Arc::new(ledger)))
}
