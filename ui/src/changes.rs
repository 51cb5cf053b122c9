//! Revision counter that lets the view layer know client state moved.

use std::rc::Rc;

use tokio::sync::watch;

/// Bumped by every component after it changes its own state.
///
/// Receivers only learn that *something* changed; they re-read whatever
/// snapshots they display.
#[derive(Clone, Debug)]
pub struct ChangeFeed(Rc<watch::Sender<u64>>);

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self(Rc::new(tx))
    }

    pub fn bump(&self) {
        self.0.send_modify(|rev| *rev = rev.wrapping_add(1));
    }

    pub fn revision(&self) -> u64 {
        *self.0.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.0.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}
