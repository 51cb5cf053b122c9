//! The single application-state object every screen works through.

use std::cell::RefCell;
use std::ops::Deref;
use std::rc::Rc;

use api::ApiError;
use api::ClientPrefs;
use api::HttpLedgerApi;
use api::LedgerApi;
use futures::FutureExt;
use tokio::sync::watch;

use crate::changes::ChangeFeed;
use crate::compat::Spawner;
use crate::mutations::MutationCoordinator;
use crate::notifications::Notifier;
use crate::sync::RefreshOutcome;
use crate::sync::Synchronizer;

/// The address whose balance is tracked.  Changed only by user input.
#[derive(Clone, Debug, Default)]
pub struct WatchedAddress(Rc<RefCell<String>>);

impl WatchedAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(address.into())))
    }

    pub fn get(&self) -> String {
        self.0.borrow().clone()
    }

    /// Returns `false` if the address was already `address`.
    fn set(&self, address: &str) -> bool {
        let mut current = self.0.borrow_mut();
        if *current == address {
            return false;
        }
        *current = address.to_string();
        true
    }
}

pub struct AppStateData<A> {
    pub notifier: Notifier,
    pub sync: Synchronizer<A>,
    pub mutations: MutationCoordinator<A>,
    watched: WatchedAddress,
    changes: ChangeFeed,
    spawner: Rc<dyn Spawner>,
}

/// Cheap to clone; every clone refers to the same state.
pub struct AppState<A = HttpLedgerApi>(Rc<AppStateData<A>>);

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<A> PartialEq for AppState<A> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<A> Deref for AppState<A> {
    type Target = AppStateData<A>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<A: LedgerApi> AppState<A> {
    pub fn new(api: A, spawner: Rc<dyn Spawner>, watch_address: impl Into<String>) -> Self {
        let api = Rc::new(api);
        let changes = ChangeFeed::new();
        let notifier = Notifier::new(spawner.clone(), changes.clone());
        Self::assemble(
            api,
            spawner,
            notifier,
            WatchedAddress::new(watch_address),
            changes,
        )
    }

    /// Builds the state around an existing notifier, e.g. one with a custom
    /// lifetime.  The notifier must share `changes`.
    pub fn with_notifier(
        api: A,
        spawner: Rc<dyn Spawner>,
        notifier: Notifier,
        watch_address: impl Into<String>,
        changes: ChangeFeed,
    ) -> Self {
        Self::assemble(
            Rc::new(api),
            spawner,
            notifier,
            WatchedAddress::new(watch_address),
            changes,
        )
    }

    fn assemble(
        api: Rc<A>,
        spawner: Rc<dyn Spawner>,
        notifier: Notifier,
        watched: WatchedAddress,
        changes: ChangeFeed,
    ) -> Self {
        let sync = Synchronizer::new(api.clone(), changes.clone());
        let mutations = MutationCoordinator::new(
            api,
            sync.clone(),
            notifier.clone(),
            watched.clone(),
            changes.clone(),
        );
        Self(Rc::new(AppStateData {
            notifier,
            sync,
            mutations,
            watched,
            changes,
            spawner,
        }))
    }

    pub fn watched_address(&self) -> String {
        self.watched.get()
    }

    /// Startup barrier over the three reads, for the current watched address.
    pub async fn initialize(&self) {
        let address = self.watched.get();
        self.sync.initialize(&address).await;
    }

    /// Points the balance at `address` and re-fetches it.
    ///
    /// Returns `None` when the address did not change.
    pub async fn watch_address(&self, address: &str) -> Option<RefreshOutcome> {
        if !self.watched.set(address) {
            return None;
        }
        self.changes.bump();
        Some(self.sync.refresh_balance(address).await)
    }

    pub fn revision(&self) -> u64 {
        self.changes.revision()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }
}

/// Detached entry points for the view.
///
/// Each one runs on the spawner, so the request, its notification and its
/// follow-up refreshes complete even if the component that started it is
/// unmounted.
impl<A: LedgerApi + 'static> AppState<A> {
    pub fn spawn_submit_transaction(&self, sender: String, receiver: String, amount: u64) {
        let state = self.clone();
        self.spawner.spawn_local(
            async move {
                let _ = state
                    .mutations
                    .submit_transaction(&sender, &receiver, amount)
                    .await;
            }
            .boxed_local(),
        );
    }

    pub fn spawn_mine_block(&self) {
        let state = self.clone();
        self.spawner.spawn_local(
            async move {
                let _ = state.mutations.mine_block().await;
            }
            .boxed_local(),
        );
    }

    pub fn spawn_watch_address(&self, address: String) {
        let state = self.clone();
        self.spawner.spawn_local(
            async move {
                state.watch_address(&address).await;
            }
            .boxed_local(),
        );
    }
}

impl AppState<HttpLedgerApi> {
    pub fn from_prefs(prefs: &ClientPrefs, spawner: Rc<dyn Spawner>) -> Result<Self, ApiError> {
        let api = HttpLedgerApi::from_prefs(prefs)?;
        Ok(Self::new(api, spawner, prefs.watch_address()))
    }
}
