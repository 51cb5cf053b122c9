//! The two state-changing actions and their follow-up refreshes.

use std::cell::Cell;
use std::rc::Rc;

use api::ApiError;
use api::LedgerApi;
use api::LedgerBlock;
use api::TransactionRequest;
use dioxus_logger::tracing;

use crate::app_state::WatchedAddress;
use crate::changes::ChangeFeed;
use crate::notifications::Notifier;
use crate::sync::Synchronizer;

pub const INVALID_TRANSACTION: &str = "Please fill all fields with valid values";
pub const TRANSACTION_ADDED: &str = "Transaction added successfully!";
pub const TRANSACTION_REJECTED: &str = "Failed to add transaction. Please try again.";
pub const TRANSACTION_NETWORK_ERROR: &str = "Network error: could not add transaction.";
pub const BLOCK_MINED: &str = "Block mined successfully!";
pub const MINING_REJECTED: &str = "Failed to mine block.";
pub const MINING_NETWORK_ERROR: &str = "Network error: mining failed. Please try again.";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("sender is required")]
    MissingSender,
    #[error("receiver is required")]
    MissingReceiver,
    #[error("amount must be greater than zero")]
    ZeroAmount,
}

#[derive(Debug, thiserror::Error)]
pub enum MutationError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("a mine request is already in flight")]
    AlreadyMining,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Checks a transaction locally, before anything goes over the wire.
pub fn validate_transaction(
    sender: &str,
    receiver: &str,
    amount: u64,
) -> Result<TransactionRequest, ValidationError> {
    let sender = sender.trim();
    let receiver = receiver.trim();
    if sender.is_empty() {
        return Err(ValidationError::MissingSender);
    }
    if receiver.is_empty() {
        return Err(ValidationError::MissingReceiver);
    }
    if amount == 0 {
        return Err(ValidationError::ZeroAmount);
    }
    Ok(TransactionRequest {
        sender: sender.to_string(),
        receiver: receiver.to_string(),
        amount,
    })
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::EnumIs)]
pub enum MiningState {
    #[default]
    Idle,
    Mining,
}

/// At most one mine request in flight.
#[derive(Clone, Debug, Default)]
struct MiningLock(Rc<Cell<MiningState>>);

impl MiningLock {
    fn state(&self) -> MiningState {
        self.0.get()
    }

    /// `Idle -> Mining`, or `None` if already mining.
    fn try_acquire(&self, changes: &ChangeFeed) -> Option<MiningGuard> {
        if self.0.get().is_mining() {
            return None;
        }
        self.0.set(MiningState::Mining);
        changes.bump();
        Some(MiningGuard {
            lock: self.0.clone(),
            changes: changes.clone(),
        })
    }
}

/// Returns the lock to `Idle` when dropped, however the request settled.
struct MiningGuard {
    lock: Rc<Cell<MiningState>>,
    changes: ChangeFeed,
}

impl Drop for MiningGuard {
    fn drop(&mut self) {
        self.lock.set(MiningState::Idle);
        self.changes.bump();
    }
}

/// Runs mutations against the node and the refreshes that follow them.
///
/// Calls into the [`Synchronizer`] only after a mutation succeeded; the
/// synchronizer never calls back.
pub struct MutationCoordinator<A> {
    api: Rc<A>,
    sync: Synchronizer<A>,
    notifier: Notifier,
    watched: WatchedAddress,
    mining: MiningLock,
    changes: ChangeFeed,
}

impl<A> Clone for MutationCoordinator<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            sync: self.sync.clone(),
            notifier: self.notifier.clone(),
            watched: self.watched.clone(),
            mining: self.mining.clone(),
            changes: self.changes.clone(),
        }
    }
}

impl<A: LedgerApi> MutationCoordinator<A> {
    pub fn new(
        api: Rc<A>,
        sync: Synchronizer<A>,
        notifier: Notifier,
        watched: WatchedAddress,
        changes: ChangeFeed,
    ) -> Self {
        Self {
            api,
            sync,
            notifier,
            watched,
            mining: MiningLock::default(),
            changes,
        }
    }

    pub fn mining_state(&self) -> MiningState {
        self.mining.state()
    }

    pub fn is_mining(&self) -> bool {
        self.mining.state().is_mining()
    }

    /// Queues a transaction on the node.
    ///
    /// Only blocks are refreshed afterwards: balances do not move until the
    /// transaction is mined.
    pub async fn submit_transaction(
        &self,
        sender: &str,
        receiver: &str,
        amount: u64,
    ) -> Result<(), MutationError> {
        let request = match validate_transaction(sender, receiver, amount) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!("rejected transaction locally: {}", e);
                self.notifier.error(INVALID_TRANSACTION);
                return Err(e.into());
            }
        };

        match self.api.submit_transaction(&request).await {
            Ok(ack) => {
                tracing::info!(
                    "transaction {} -> {} ({}) accepted: {}",
                    request.sender,
                    request.receiver,
                    request.amount,
                    ack
                );
                self.notifier.success(TRANSACTION_ADDED);
                self.sync.refresh_blocks().await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("failed to add transaction: {}", e);
                self.notifier
                    .error(failure_message(&e, TRANSACTION_REJECTED, TRANSACTION_NETWORK_ERROR));
                Err(e.into())
            }
        }
    }

    /// Mines pending transactions into a new block.
    ///
    /// Refused with [`MutationError::AlreadyMining`] while another mine
    /// request is in flight; callers are expected to make that unreachable.
    /// On success blocks, the watched balance and chain validity are all
    /// refreshed concurrently.
    pub async fn mine_block(&self) -> Result<Option<LedgerBlock>, MutationError> {
        let Some(guard) = self.mining.try_acquire(&self.changes) else {
            tracing::warn!("mine requested while a block is already being mined");
            return Err(MutationError::AlreadyMining);
        };
        let result = self.api.mine().await;
        drop(guard);

        match result {
            Ok(block) => {
                if let Some(block) = &block {
                    tracing::info!("mined block #{} ({})", block.index, block.hash);
                }
                self.notifier.success(BLOCK_MINED);
                let address = self.watched.get();
                futures::join!(
                    self.sync.refresh_blocks(),
                    self.sync.refresh_balance(&address),
                    self.sync.refresh_chain_validity(),
                );
                Ok(block)
            }
            Err(e) => {
                tracing::warn!("failed to mine block: {}", e);
                self.notifier
                    .error(failure_message(&e, MINING_REJECTED, MINING_NETWORK_ERROR));
                Err(e.into())
            }
        }
    }
}

/// The node's own reason for a rejection, a fallback for a silent one, and a
/// fixed message for anything that never reached a verdict.
fn failure_message(e: &ApiError, rejected: &str, transport: &str) -> String {
    if e.is_rejection() {
        e.server_message().unwrap_or(rejected).to_string()
    } else {
        transport.to_string()
    }
}
