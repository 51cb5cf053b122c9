//! Transient, self-expiring user-facing messages.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use dioxus_logger::tracing;
use futures::future::AbortHandle;
use futures::future::Abortable;
use futures::FutureExt;
use web_time::Instant;

use crate::changes::ChangeFeed;
use crate::compat;
use crate::compat::Spawner;

/// How long a notification stays visible unless dismissed first.
pub const NOTIFICATION_LIFETIME: Duration = Duration::from_secs(4);

/// Unique within one queue; never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, strum::EnumIs, strum::Display, strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    #[default]
    Info,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub created_at: Instant,
}

/// Insertion-ordered notifications keyed by id.
///
/// Pure bookkeeping: nothing here knows about time passing.  [`Notifier`]
/// layers expiry on top.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    entries: Vec<Notification>,
    next_id: u64,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a notification and returns its freshly minted id.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        self.entries.push(Notification {
            id,
            message: message.into(),
            severity,
            created_at: Instant::now(),
        });
        id
    }

    /// Removes `id` if present.  Removing an absent id is a no-op.
    pub fn dismiss(&mut self, id: NotificationId) -> Option<Notification> {
        let pos = self.entries.iter().position(|n| n.id == id)?;
        Some(self.entries.remove(pos))
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.entries.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: NotificationId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Default)]
struct NotifierInner {
    queue: NotificationQueue,
    timers: HashMap<NotificationId, AbortHandle>,
}

/// Shared handle to the notification queue with one expiry timer per entry.
///
/// Dismissing an entry aborts its timer, so a late expiry can never fire
/// against the queue after the entry is gone.
#[derive(Clone)]
pub struct Notifier {
    inner: Rc<RefCell<NotifierInner>>,
    spawner: Rc<dyn Spawner>,
    changes: ChangeFeed,
    lifetime: Duration,
}

impl Notifier {
    pub fn new(spawner: Rc<dyn Spawner>, changes: ChangeFeed) -> Self {
        Self::with_lifetime(spawner, changes, NOTIFICATION_LIFETIME)
    }

    pub fn with_lifetime(spawner: Rc<dyn Spawner>, changes: ChangeFeed, lifetime: Duration) -> Self {
        Self {
            inner: Rc::new(RefCell::new(NotifierInner::default())),
            spawner,
            changes,
            lifetime,
        }
    }

    pub fn push(&self, message: impl Into<String>, severity: Severity) -> NotificationId {
        let (handle, registration) = AbortHandle::new_pair();
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.queue.push(message, severity);
            inner.timers.insert(id, handle);
            id
        };

        let weak = Rc::downgrade(&self.inner);
        let changes = self.changes.clone();
        let lifetime = self.lifetime;
        let expiry = Abortable::new(
            async move {
                compat::sleep(lifetime).await;
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let expired = {
                    let mut inner = inner.borrow_mut();
                    inner.timers.remove(&id);
                    inner.queue.dismiss(id).is_some()
                };
                if expired {
                    tracing::debug!("notification {} expired", id);
                    changes.bump();
                }
            },
            registration,
        );
        self.spawner.spawn_local(expiry.map(|_| ()).boxed_local());

        self.changes.bump();
        id
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.push(message, Severity::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationId {
        self.push(message, Severity::Error)
    }

    pub fn info(&self, message: impl Into<String>) -> NotificationId {
        self.push(message, Severity::Info)
    }

    /// Removes `id` and cancels its timer.  Returns whether it was still queued.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        let removed = {
            let mut inner = self.inner.borrow_mut();
            if let Some(timer) = inner.timers.remove(&id) {
                timer.abort();
            }
            inner.queue.dismiss(id).is_some()
        };
        if removed {
            self.changes.bump();
        }
        removed
    }

    /// Snapshot of the queue in display order.
    pub fn notifications(&self) -> Vec<Notification> {
        self.inner.borrow().queue.iter().cloned().collect()
    }

    pub fn contains(&self, id: NotificationId) -> bool {
        self.inner.borrow().queue.contains(id)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().queue.is_empty()
    }

    /// Expiry timers still armed.
    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }
}
