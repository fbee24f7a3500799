//! Session store behavior over scripted collaborators.

use std::sync::Arc;

use alloy::primitives::U256;
use wallet_gateway::service::TransactionService;
use wallet_gateway::session::{CountCache, FormField, SessionStore};

mod common;
use common::{
    entry, mock_gateway, new_log, ops, test_account, test_recipient, MockLedger, MockWallet, Op,
};

fn store_with(wallet: MockWallet, ledger: MockLedger, cache: CountCache) -> SessionStore {
    let service = Arc::new(TransactionService::new(mock_gateway(wallet, ledger)));
    SessionStore::new(service, cache)
}

#[tokio::test]
async fn test_initialize_lists_and_counts() {
    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("count");
    let log = new_log();
    let wallet = MockWallet::new(log.clone(), vec![test_account()]);
    let ledger = MockLedger::seeded(
        log.clone(),
        vec![entry(U256::from(100_000_000_000_000u64), 1_700_000_000)],
    );
    let store = store_with(wallet, ledger, CountCache::new(Some(cache_path.clone())));

    store.initialize().await.unwrap();

    let state = store.snapshot().await;
    assert_eq!(state.current_account, Some(test_account()));
    assert_eq!(state.transactions.len(), 1);
    assert_eq!(state.transaction_count, Some(1));
    // The live count was persisted to the slot.
    assert_eq!(std::fs::read_to_string(&cache_path).unwrap(), "1");
}

#[tokio::test]
async fn test_initialize_without_authorized_account() {
    let log = new_log();
    let wallet = MockWallet::new(log.clone(), Vec::new());
    let ledger = MockLedger::new(log.clone());
    let store = store_with(wallet, ledger, CountCache::disabled());

    store.initialize().await.unwrap();

    let state = store.snapshot().await;
    assert!(state.current_account.is_none());
    assert!(state.transactions.is_empty());
    // No account, so the ledger listing was never requested...
    assert!(!ops(&log).contains(&Op::ReadAll));
    // ...but the count still was.
    assert_eq!(state.transaction_count, Some(0));
}

#[tokio::test]
async fn test_initialize_keeps_cached_count_when_reads_fail() {
    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("count");
    std::fs::write(&cache_path, "7").unwrap();

    let log = new_log();
    let wallet = MockWallet::new(log.clone(), vec![test_account()]);
    let mut ledger = MockLedger::new(log.clone());
    ledger.fail_reads = true;
    let store = store_with(wallet, ledger, CountCache::new(Some(cache_path.clone())));

    // Read failures degrade silently; prior cached state stays displayed.
    store.initialize().await.unwrap();

    let state = store.snapshot().await;
    assert_eq!(state.current_account, Some(test_account()));
    assert!(state.transactions.is_empty());
    assert_eq!(state.transaction_count, Some(7));
    // The stale slot was not overwritten.
    assert_eq!(std::fs::read_to_string(&cache_path).unwrap(), "7");
}

#[tokio::test]
async fn test_connect_stores_account() {
    let log = new_log();
    let wallet = MockWallet::new(log.clone(), vec![test_account()]);
    let ledger = MockLedger::new(log.clone());
    let store = store_with(wallet, ledger, CountCache::disabled());

    let account = store.connect().await.unwrap();
    assert_eq!(account, test_account());
    assert_eq!(store.snapshot().await.current_account, Some(test_account()));
    assert_eq!(ops(&log), vec![Op::RequestAccounts]);
}

#[tokio::test]
async fn test_send_refreshes_state_and_keeps_form() {
    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("count");
    let log = new_log();
    let wallet = MockWallet::new(log.clone(), vec![test_account()]);
    let ledger = MockLedger::seeded(
        log.clone(),
        vec![entry(U256::from(1_000_000_000_000_000_000u64), 1_700_000_000)],
    );
    let store = store_with(wallet, ledger, CountCache::new(Some(cache_path.clone())));

    store.initialize().await.unwrap();
    store
        .patch_field(FormField::AddressTo, &test_recipient().to_string())
        .await;
    store.patch_field(FormField::Amount, "0.01").await;
    store.patch_field(FormField::Keyword, "food").await;
    store.patch_field(FormField::Message, "lunch").await;

    let count = store.send().await.unwrap();
    assert_eq!(count, 2);

    let state = store.snapshot().await;
    assert_eq!(state.transaction_count, Some(2));
    assert_eq!(state.transactions.len(), 2);
    assert_eq!(std::fs::read_to_string(&cache_path).unwrap(), "2");

    // The form keeps its values after a successful send.
    assert_eq!(state.form.amount, "0.01");
    assert_eq!(state.form.keyword, "food");
}
