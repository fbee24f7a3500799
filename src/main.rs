//! Wallet-connected transaction gateway CLI.
//!
//! # Architecture Overview
//!
//! ```text
//! CLI command
//!     → session  (observable state, form fields, persisted count slot)
//!     → service  (submission sequencing, in-flight signal, ledger reads)
//!     → gateway  (wallet capability + contract-bound ledger client)
//!     → JSON-RPC endpoint / deployed contract
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use wallet_gateway::config::loader::load_config;
use wallet_gateway::config::GatewayConfig;
use wallet_gateway::gateway::ProviderGateway;
use wallet_gateway::observability::{logging, metrics};
use wallet_gateway::service::TransactionService;
use wallet_gateway::session::{CountCache, FormField, SessionStore};

#[derive(Parser)]
#[command(name = "wallet-gateway")]
#[command(about = "Wallet-connected gateway for an on-chain transfer ledger", long_about = None)]
struct Cli {
    /// Path to the TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List already-authorized wallet accounts
    Accounts,
    /// Prompt the wallet to authorize an account
    Connect,
    /// List all ledger transactions
    List {
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the ledger transaction count
    Count,
    /// Submit a transfer and record it on the ledger
    Send {
        /// Recipient address
        #[arg(long)]
        to: String,
        /// Amount as a decimal string (e.g. "0.01")
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "")]
        keyword: String,
        #[arg(long, default_value = "")]
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    tracing::info!(
        rpc_url = %config.provider.rpc_url,
        contract = %config.ledger.contract_address,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let gateway = ProviderGateway::connect(&config).await?;
    let service = Arc::new(TransactionService::new(gateway));
    let cache = CountCache::new(config.session.count_cache_path.clone().map(PathBuf::from));
    let store = SessionStore::new(service.clone(), cache);

    match cli.command {
        Commands::Accounts => {
            let accounts = service.get_accounts().await?;
            if accounts.is_empty() {
                println!("No authorized accounts");
            } else {
                for account in accounts {
                    println!("{account}");
                }
            }
        }
        Commands::Connect => {
            let account = store.connect().await?;
            println!("Connected: {account}");
        }
        Commands::List { json } => {
            let transactions = service.list_transactions().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&transactions)?);
            } else if transactions.is_empty() {
                println!("Ledger is empty");
            } else {
                for record in &transactions {
                    println!("{record}");
                }
            }
        }
        Commands::Count => {
            println!("{}", service.transaction_count().await?);
        }
        Commands::Send {
            to,
            amount,
            keyword,
            message,
        } => {
            store.initialize().await?;
            if store.snapshot().await.current_account.is_none() {
                store.connect().await?;
            }
            store.patch_field(FormField::AddressTo, &to).await;
            store.patch_field(FormField::Amount, &amount).await;
            store.patch_field(FormField::Keyword, &keyword).await;
            store.patch_field(FormField::Message, &message).await;

            let count = store.send().await?;
            println!("Confirmed; ledger now holds {count} transactions");
        }
    }

    Ok(())
}
