//! Observable session state.
//!
//! # Responsibilities
//! - Hold the UI-observable entities: account, form fields, loading flag,
//!   transaction list, transaction count
//! - Expose the mutation entry points presentation code calls
//!
//! # Design Decisions
//! - Single logical owner: all mutation goes through this store on the
//!   runtime's cooperative event loop
//! - Transient read failures are logged and swallowed here, leaving prior
//!   cached state displayed (stale-but-available); `MissingProvider`
//!   propagates
//! - Form data is NOT cleared after a successful send (a deliberate
//!   product decision, see DESIGN.md); callers wanting a fresh form use
//!   `reset_form`

use alloy::primitives::Address;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};

use crate::service::{
    ServiceError, ServiceResult, SubmitRequest, TransactionRecord, TransactionService,
};
use crate::session::cache::CountCache;

/// The transaction form, patched field by field from user input.
///
/// No validation happens here; the wallet and contract reject what they
/// reject at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pub address_to: String,
    pub amount: String,
    pub keyword: String,
    pub message: String,
}

/// A single form field, for patch-style updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    AddressTo,
    Amount,
    Keyword,
    Message,
}

/// Snapshot of everything the presentation layer observes.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub current_account: Option<Address>,
    pub form: FormData,
    pub transactions: Vec<TransactionRecord>,
    pub transaction_count: Option<u64>,
}

/// Owns the session state and mediates between presentation code and the
/// transaction service.
pub struct SessionStore {
    service: Arc<TransactionService>,
    state: RwLock<SessionState>,
    count_cache: CountCache,
    loading: watch::Receiver<bool>,
}

impl SessionStore {
    pub fn new(service: Arc<TransactionService>, count_cache: CountCache) -> Self {
        let loading = service.in_flight();
        Self {
            service,
            state: RwLock::new(SessionState::default()),
            count_cache,
            loading,
        }
    }

    /// Startup sequence: seed the count from the persisted slot, check for
    /// an already-authorized account (no prompt), list the ledger when one
    /// is present, and refresh the live count.
    ///
    /// Ledger read failures are logged and swallowed; an absent wallet
    /// capability propagates.
    pub async fn initialize(&self) -> ServiceResult<()> {
        if let Some(count) = self.count_cache.load() {
            self.state.write().await.transaction_count = Some(count);
        }

        let accounts = self.service.get_accounts().await?;
        match accounts.first() {
            Some(account) => {
                self.state.write().await.current_account = Some(*account);
                tracing::info!(account = %account, "Found connected account");

                match self.service.list_transactions().await {
                    Ok(transactions) => {
                        self.state.write().await.transactions = transactions;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to fetch transaction history");
                    }
                }
            }
            None => {
                tracing::debug!("No authorized accounts found");
            }
        }

        self.refresh_count().await;
        Ok(())
    }

    /// Prompt the wallet for access and store the authorized account.
    pub async fn connect(&self) -> ServiceResult<Address> {
        let account = self.service.request_connection().await?;
        self.state.write().await.current_account = Some(account);
        Ok(account)
    }

    /// Patch a single form field.
    pub async fn patch_field(&self, field: FormField, value: &str) {
        let mut state = self.state.write().await;
        let slot = match field {
            FormField::AddressTo => &mut state.form.address_to,
            FormField::Amount => &mut state.form.amount,
            FormField::Keyword => &mut state.form.keyword,
            FormField::Message => &mut state.form.message,
        };
        *slot = value.to_string();
    }

    /// Replace the whole form.
    pub async fn set_form(&self, form: FormData) {
        self.state.write().await.form = form;
    }

    /// Clear the form to its defaults.
    pub async fn reset_form(&self) {
        self.state.write().await.form = FormData::default();
    }

    /// Submit the current form from the connected account.
    ///
    /// On success the count is refreshed and persisted and the transaction
    /// list re-fetched. The form keeps its values.
    pub async fn send(&self) -> ServiceResult<u64> {
        let (form, account) = {
            let state = self.state.read().await;
            (state.form.clone(), state.current_account)
        };
        let from = account.ok_or(ServiceError::NotConnected)?;

        let count = self
            .service
            .submit(SubmitRequest {
                address_to: form.address_to,
                amount: form.amount,
                keyword: form.keyword,
                message: form.message,
                from,
            })
            .await?;

        {
            let mut state = self.state.write().await;
            state.transaction_count = Some(count);
        }
        if let Err(e) = self.count_cache.store(count) {
            tracing::warn!(error = %e, "Failed to persist transaction count");
        }

        match self.service.list_transactions().await {
            Ok(transactions) => {
                self.state.write().await.transactions = transactions;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to refresh transaction history");
            }
        }

        Ok(count)
    }

    /// True while a submission awaits confirmation.
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Subscribe to loading-flag changes.
    pub fn loading_changes(&self) -> watch::Receiver<bool> {
        self.loading.clone()
    }

    /// Clone the current state for display.
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    async fn refresh_count(&self) {
        match self.service.transaction_count().await {
            Ok(count) => {
                self.state.write().await.transaction_count = Some(count);
                if let Err(e) = self.count_cache.store(count) {
                    tracing::warn!(error = %e, "Failed to persist transaction count");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch transaction count");
            }
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("loading", &self.is_loading())
            .finish()
    }
}
