mod common;

use std::time::Duration;

use common::run_local;
use common::settle;
use common::spawner;
use tokio::time::advance;
use ui::changes::ChangeFeed;
use ui::notifications::Notifier;
use ui::notifications::Severity;
use ui::notifications::NOTIFICATION_LIFETIME;

fn notifier() -> Notifier {
    Notifier::new(spawner(), ChangeFeed::new())
}

#[tokio::test(start_paused = true)]
async fn notification_expires_after_four_seconds() {
    run_local(async {
        let notifier = notifier();
        let id = notifier.info("Block mined successfully!");
        settle().await;
        assert_eq!(notifier.pending_timers(), 1);

        advance(NOTIFICATION_LIFETIME - Duration::from_millis(1)).await;
        settle().await;
        assert!(notifier.contains(id));

        advance(Duration::from_millis(1)).await;
        settle().await;
        assert!(!notifier.contains(id));
        assert!(notifier.is_empty());
        assert_eq!(notifier.pending_timers(), 0);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn dismiss_removes_immediately_and_cancels_the_timer() {
    run_local(async {
        let notifier = notifier();
        let first = notifier.error("Failed to mine block.");
        let second = notifier.success("Transaction added successfully!");
        settle().await;

        assert!(notifier.dismiss(first));
        assert!(!notifier.contains(first));
        assert_eq!(notifier.pending_timers(), 1);

        // Dismissing twice is a no-op.
        assert!(!notifier.dismiss(first));

        advance(NOTIFICATION_LIFETIME).await;
        settle().await;
        assert!(notifier.is_empty());
        assert!(!notifier.contains(second));
        assert_eq!(notifier.pending_timers(), 0);

        // A fresh entry never reuses a retired id.
        let third = notifier.info("again");
        assert_ne!(third, first);
        assert_ne!(third, second);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn entries_expire_independently_and_keep_insertion_order() {
    run_local(async {
        let notifier = notifier();
        let a = notifier.info("a");
        settle().await;
        advance(Duration::from_secs(1)).await;
        let b = notifier.success("b");
        settle().await;
        advance(Duration::from_secs(1)).await;
        let c = notifier.error("c");
        settle().await;

        let ids: Vec<_> = notifier.notifications().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![a, b, c]);

        // t = 4s: only `a` has lived its full lifetime.
        advance(Duration::from_secs(2)).await;
        settle().await;
        let remaining: Vec<_> = notifier.notifications().iter().map(|n| n.id).collect();
        assert_eq!(remaining, vec![b, c]);
        assert_eq!(notifier.notifications()[1].severity, Severity::Error);

        advance(Duration::from_secs(2)).await;
        settle().await;
        assert!(notifier.is_empty());
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn expiry_after_dismiss_does_not_touch_later_entries() {
    run_local(async {
        let notifier = notifier();
        let early = notifier.info("early");
        settle().await;
        notifier.dismiss(early);

        advance(Duration::from_secs(3)).await;
        let late = notifier.info("late");
        settle().await;

        // The dismissed entry's deadline passes; nothing else is removed.
        advance(Duration::from_secs(2)).await;
        settle().await;
        assert!(notifier.contains(late));
        assert_eq!(notifier.len(), 1);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn every_queue_change_is_published() {
    run_local(async {
        let changes = ChangeFeed::new();
        let notifier = Notifier::new(spawner(), changes.clone());
        let start = changes.revision();

        let kept = notifier.info("kept");
        let dropped = notifier.info("dropped");
        settle().await;
        assert_eq!(changes.revision(), start + 2);

        notifier.dismiss(dropped);
        assert_eq!(changes.revision(), start + 3);

        advance(NOTIFICATION_LIFETIME).await;
        settle().await;
        assert!(!notifier.contains(kept));
        assert_eq!(changes.revision(), start + 4);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn dropping_the_notifier_stops_pending_expiries() {
    run_local(async {
        let notifier = Notifier::with_lifetime(spawner(), ChangeFeed::new(), Duration::from_millis(50));
        notifier.info("orphan");
        settle().await;
        drop(notifier);

        advance(Duration::from_millis(100)).await;
        settle().await;
    })
    .await;
}
