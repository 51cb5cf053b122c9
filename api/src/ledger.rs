//! Ledger data as delivered by the node.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// A single value transfer recorded in a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub sender: String,
    pub receiver: String,
    pub amount: u64,
    pub timestamp: DateTime<Utc>,
    pub signature: String,
}

impl Transaction {
    /// Mining rewards are minted by the node and carry no sender.
    pub fn is_mining_reward(&self) -> bool {
        self.sender.is_empty()
    }

    /// The sender as it should be shown to a user.
    pub fn display_sender(&self) -> &str {
        if self.is_mining_reward() {
            "MINING REWARD"
        } else {
            &self.sender
        }
    }
}

/// An immutable batch of transactions plus linkage and proof metadata.
///
/// Blocks are identified by `hash`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerBlock {
    pub index: u64,
    pub timestamp: DateTime<Utc>,
    pub transactions: Vec<Transaction>,
    pub previous_hash: String,
    pub hash: String,
    pub nonce: u64,
}

impl LedgerBlock {
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// First `len` characters of the block hash followed by "...".
    pub fn abbreviated_hash(&self, len: usize) -> String {
        abbreviate(&self.hash, len)
    }

    pub fn abbreviated_previous_hash(&self, len: usize) -> String {
        abbreviate(&self.previous_hash, len)
    }
}

fn abbreviate(s: &str, len: usize) -> String {
    if s.chars().count() <= len {
        return s.to_string();
    }
    let head: String = s.chars().take(len).collect();
    format!("{head}...")
}

/// Body of a `POST /transaction` request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub sender: String,
    pub receiver: String,
    pub amount: u64,
}
