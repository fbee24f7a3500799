//! Wallet-connected transaction gateway library.

pub mod config;
pub mod gateway;
pub mod observability;
pub mod service;
pub mod session;

pub use config::GatewayConfig;
pub use gateway::ProviderGateway;
pub use service::TransactionService;
pub use session::SessionStore;
