//! Scripted in-memory ledger node for engine tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::collections::VecDeque;
use std::rc::Rc;

use api::ApiError;
use api::LedgerApi;
use api::LedgerBlock;
use api::Transaction;
use api::TransactionRequest;
use chrono::TimeZone;
use chrono::Utc;
use futures::future::LocalBoxFuture;
use tokio::sync::oneshot;
use ui::compat::Spawner;

/// Spawns onto the enclosing `tokio::task::LocalSet`.
pub struct LocalSpawner;

impl Spawner for LocalSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }
}

pub fn spawner() -> Rc<dyn Spawner> {
    Rc::new(LocalSpawner)
}

/// Lets spawned local tasks run up to their next real suspension point.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// What the node answers for one endpoint.
#[derive(Clone, Debug)]
pub enum Reply<T> {
    Ok(T),
    Reject(Option<String>),
    Status(u16),
}

impl<T: Clone> Reply<T> {
    fn to_result(&self) -> Result<T, ApiError> {
        match self {
            Reply::Ok(v) => Ok(v.clone()),
            Reply::Reject(message) => Err(ApiError::Rejected {
                message: message.clone(),
            }),
            Reply::Status(code) => Err(ApiError::Status(*code)),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Calls {
    pub blocks: usize,
    pub balance: Vec<String>,
    pub chain_valid: usize,
    pub submit: Vec<TransactionRequest>,
    pub mine: usize,
}

impl Calls {
    pub fn total(&self) -> usize {
        self.blocks + self.balance.len() + self.chain_valid + self.submit.len() + self.mine
    }
}

struct Script {
    blocks: Reply<Vec<LedgerBlock>>,
    balances: HashMap<String, Reply<u64>>,
    chain_valid: Reply<bool>,
    submit: Reply<String>,
    mine: Reply<Option<LedgerBlock>>,
    calls: Calls,
    balance_gates: HashMap<String, VecDeque<oneshot::Receiver<()>>>,
    submit_gates: VecDeque<oneshot::Receiver<()>>,
    mine_gates: VecDeque<oneshot::Receiver<()>>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            blocks: Reply::Ok(vec![block(0, vec![])]),
            balances: HashMap::new(),
            chain_valid: Reply::Ok(true),
            submit: Reply::Ok("Transaction added to pending transactions".to_string()),
            mine: Reply::Ok(Some(block(1, vec![]))),
            calls: Calls::default(),
            balance_gates: HashMap::new(),
            submit_gates: VecDeque::new(),
            mine_gates: VecDeque::new(),
        }
    }
}

/// Cheap handle; clones share one script.
#[derive(Clone, Default)]
pub struct MockLedger(Rc<RefCell<Script>>);

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Calls {
        self.0.borrow().calls.clone()
    }

    pub fn set_blocks(&self, reply: Reply<Vec<LedgerBlock>>) {
        self.0.borrow_mut().blocks = reply;
    }

    pub fn set_balance(&self, address: &str, reply: Reply<u64>) {
        self.0
            .borrow_mut()
            .balances
            .insert(address.to_string(), reply);
    }

    pub fn set_chain_valid(&self, reply: Reply<bool>) {
        self.0.borrow_mut().chain_valid = reply;
    }

    pub fn set_submit(&self, reply: Reply<String>) {
        self.0.borrow_mut().submit = reply;
    }

    pub fn set_mine(&self, reply: Reply<Option<LedgerBlock>>) {
        self.0.borrow_mut().mine = reply;
    }

    /// The next balance call for `address` waits until the sender fires.
    /// Its reply is read only after release.
    pub fn hold_balance(&self, address: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.0
            .borrow_mut()
            .balance_gates
            .entry(address.to_string())
            .or_default()
            .push_back(rx);
        tx
    }

    /// The next submit call waits until the sender fires.
    pub fn hold_submit(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.0.borrow_mut().submit_gates.push_back(rx);
        tx
    }

    /// The next mine call waits until the sender fires.
    pub fn hold_mine(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.0.borrow_mut().mine_gates.push_back(rx);
        tx
    }
}

impl LedgerApi for MockLedger {
    async fn blocks(&self) -> Result<Vec<LedgerBlock>, ApiError> {
        let mut script = self.0.borrow_mut();
        script.calls.blocks += 1;
        script.blocks.to_result()
    }

    async fn balance(&self, address: &str) -> Result<u64, ApiError> {
        let gate = {
            let mut script = self.0.borrow_mut();
            script.calls.balance.push(address.to_string());
            script
                .balance_gates
                .get_mut(address)
                .and_then(VecDeque::pop_front)
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let script = self.0.borrow();
        match script.balances.get(address) {
            Some(reply) => reply.to_result(),
            None => Ok(0),
        }
    }

    async fn chain_valid(&self) -> Result<bool, ApiError> {
        let mut script = self.0.borrow_mut();
        script.calls.chain_valid += 1;
        script.chain_valid.to_result()
    }

    async fn submit_transaction(&self, request: &TransactionRequest) -> Result<String, ApiError> {
        let gate = {
            let mut script = self.0.borrow_mut();
            script.calls.submit.push(request.clone());
            script.submit_gates.pop_front()
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.0.borrow().submit.to_result()
    }

    async fn mine(&self) -> Result<Option<LedgerBlock>, ApiError> {
        let gate = {
            let mut script = self.0.borrow_mut();
            script.calls.mine += 1;
            script.mine_gates.pop_front()
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.0.borrow().mine.to_result()
    }
}

pub fn transfer(id: &str, sender: &str, receiver: &str, amount: u64) -> Transaction {
    Transaction {
        id: id.to_string(),
        sender: sender.to_string(),
        receiver: receiver.to_string(),
        amount,
        timestamp: Utc.with_ymd_and_hms(2025, 1, 5, 10, 0, 0).unwrap(),
        signature: String::new(),
    }
}

pub fn block(index: u64, transactions: Vec<Transaction>) -> LedgerBlock {
    LedgerBlock {
        index,
        timestamp: Utc.with_ymd_and_hms(2025, 1, 5, 10, 0, index as u32).unwrap(),
        transactions,
        previous_hash: if index == 0 {
            "0".to_string()
        } else {
            format!("{:064x}", index - 1)
        },
        hash: format!("{:064x}", index),
        nonce: index * 7,
    }
}

pub async fn run_local<F: std::future::Future>(f: F) -> F::Output {
    tokio::task::LocalSet::new().run_until(f).await
}
