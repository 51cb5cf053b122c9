//! This crate contains everything needed to talk to a ledger node over HTTP.
//!
//! The node itself (persistent ledger, proof-of-work miner, validator) is an
//! external collaborator.  This crate only knows its five endpoints, the
//! response envelope they share, and how to classify what goes wrong.

pub mod envelope;
pub mod error;
pub mod ledger;
pub mod ledger_api;
pub mod prefs;

pub use envelope::ApiResponse;
pub use error::ApiError;
pub use ledger::LedgerBlock;
pub use ledger::Transaction;
pub use ledger::TransactionRequest;
pub use ledger_api::http::HttpLedgerApi;
pub use ledger_api::LedgerApi;
pub use prefs::client_prefs::ClientPrefs;
