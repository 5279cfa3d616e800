// VeloBank - Core Library
// Flows, catalogs, validation and routing; the terminal client sits on top

pub mod analytics;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod entities;
pub mod export;
pub mod flow;
pub mod money;
pub mod router;
pub mod validation;

// Only compile the terminal client when the TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use auth::{Authenticator, DemoAuthenticator};
pub use catalog::{
    account_overview, categories, filter_by_category, list_cards, list_contacts, list_merchants,
    list_transactions, recent_transactions, sum_by_category, AccountOverview, CategoryFilter,
};
pub use config::Settings;
pub use entities::{
    AuthenticatedUser, Card, CardRegistry, CardTheme, Category, Identity, Transaction, TransactionKind,
};
pub use flow::{
    CompletionTimer, Flow, FlowError, FlowKind, PaymentFlow, PaymentStep, Transition, TransferFlow,
    TransferStep,
};
pub use router::{Router, ViewId};
pub use validation::ValidationError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
