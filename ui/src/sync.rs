//! Locally cached copies of remote ledger state and the reads that refresh them.

use std::cell::RefCell;
use std::rc::Rc;

use api::LedgerApi;
use api::LedgerBlock;
use dioxus_logger::tracing;

use crate::changes::ChangeFeed;

/// Local cache of the node's state.
///
/// Each field is replaced wholesale by a successful read of that field and
/// left untouched by a failed one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncState {
    /// Oldest first, exactly as delivered.
    pub blocks: Vec<LedgerBlock>,
    pub balance: u64,
    pub chain_valid: bool,
}

impl Default for SyncState {
    fn default() -> Self {
        Self {
            blocks: Vec::new(),
            balance: 0,
            chain_valid: true,
        }
    }
}

impl SyncState {
    /// Display order; storage order is never changed.
    pub fn blocks_newest_first(&self) -> impl Iterator<Item = &LedgerBlock> {
        self.blocks.iter().rev()
    }

    pub fn latest_block(&self) -> Option<&LedgerBlock> {
        self.blocks.last()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn transaction_count(&self) -> usize {
        self.blocks.iter().map(LedgerBlock::transaction_count).sum()
    }
}

/// What happened to a single read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumIs)]
pub enum RefreshOutcome {
    /// The response replaced the cached value.
    Applied,
    /// The response was superseded by a newer request and dropped.
    Stale,
    /// The read failed; the cached value is unchanged.
    Failed,
}

/// Orders the responses of one resource by when their requests were issued.
#[derive(Debug, Default)]
struct RequestClock {
    issued: u64,
    applied: u64,
}

impl RequestClock {
    fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Accepts `ticket` unless something issued later has already been applied.
    fn settle(&mut self, ticket: u64) -> bool {
        if ticket > self.applied {
            self.applied = ticket;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Default)]
struct SyncInner {
    state: SyncState,
    ready: bool,
    blocks_clock: RequestClock,
    validity_clock: RequestClock,
    balance_clock: RequestClock,
    /// Address of the most recent balance request.
    balance_address: Option<String>,
}

/// Owns [`SyncState`] and performs the three independent reads.
///
/// Reads are never retried and never polled; they run when something asks.
pub struct Synchronizer<A> {
    api: Rc<A>,
    inner: Rc<RefCell<SyncInner>>,
    changes: ChangeFeed,
}

impl<A> Clone for Synchronizer<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            inner: self.inner.clone(),
            changes: self.changes.clone(),
        }
    }
}

impl<A: LedgerApi> Synchronizer<A> {
    pub fn new(api: Rc<A>, changes: ChangeFeed) -> Self {
        Self {
            api,
            inner: Rc::new(RefCell::new(SyncInner::default())),
            changes,
        }
    }

    /// Copy of the cached state.
    pub fn state(&self) -> SyncState {
        self.inner.borrow().state.clone()
    }

    /// Reads the cached state without copying it.
    pub fn with_state<R>(&self, f: impl FnOnce(&SyncState) -> R) -> R {
        f(&self.inner.borrow().state)
    }

    /// False until the startup barrier has settled.
    pub fn is_ready(&self) -> bool {
        self.inner.borrow().ready
    }

    /// Startup barrier: runs all three reads concurrently and becomes ready
    /// once every one of them has settled, whatever the outcomes.
    pub async fn initialize(&self, address: &str) {
        let (blocks, balance, validity) = futures::join!(
            self.refresh_blocks(),
            self.refresh_balance(address),
            self.refresh_chain_validity(),
        );
        tracing::info!(
            "initial sync settled: blocks={:?} balance={:?} validity={:?}",
            blocks,
            balance,
            validity
        );
        self.inner.borrow_mut().ready = true;
        self.changes.bump();
    }

    pub async fn refresh_blocks(&self) -> RefreshOutcome {
        let ticket = self.inner.borrow_mut().blocks_clock.issue();
        match self.api.blocks().await {
            Ok(blocks) => self.apply("blocks", |inner| {
                inner.blocks_clock.settle(ticket) && {
                    inner.state.blocks = blocks;
                    true
                }
            }),
            Err(e) => {
                tracing::warn!("failed to fetch blocks: {}", e);
                RefreshOutcome::Failed
            }
        }
    }

    /// Fetches the balance of exactly `address`.
    ///
    /// A response is dropped if a balance request for a different address was
    /// issued after this one, or if a later request has already been applied.
    pub async fn refresh_balance(&self, address: &str) -> RefreshOutcome {
        let ticket = {
            let mut inner = self.inner.borrow_mut();
            inner.balance_address = Some(address.to_string());
            inner.balance_clock.issue()
        };
        match self.api.balance(address).await {
            Ok(balance) => self.apply("balance", |inner| {
                inner.balance_address.as_deref() == Some(address)
                    && inner.balance_clock.settle(ticket)
                    && {
                        inner.state.balance = balance;
                        true
                    }
            }),
            Err(e) => {
                tracing::warn!("failed to fetch balance for {}: {}", address, e);
                RefreshOutcome::Failed
            }
        }
    }

    pub async fn refresh_chain_validity(&self) -> RefreshOutcome {
        let ticket = self.inner.borrow_mut().validity_clock.issue();
        match self.api.chain_valid().await {
            Ok(valid) => self.apply("chain validity", |inner| {
                inner.validity_clock.settle(ticket) && {
                    inner.state.chain_valid = valid;
                    true
                }
            }),
            Err(e) => {
                tracing::warn!("failed to check chain validity: {}", e);
                RefreshOutcome::Failed
            }
        }
    }

    fn apply(&self, what: &str, update: impl FnOnce(&mut SyncInner) -> bool) -> RefreshOutcome {
        let applied = update(&mut self.inner.borrow_mut());
        if applied {
            self.changes.bump();
            RefreshOutcome::Applied
        } else {
            tracing::debug!("discarding stale {} response", what);
            RefreshOutcome::Stale
        }
    }
}
