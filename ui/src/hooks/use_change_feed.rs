use dioxus::prelude::*;

use crate::app_state::AppState;

/// Mirrors the state's change feed into a signal.
///
/// Components read the signal to subscribe, then pull whatever snapshot they
/// need out of the [`AppState`] itself.
pub fn use_change_feed(state: &AppState) -> Signal<u64> {
    let mut revision = use_signal(|| state.revision());
    let state = state.clone();

    use_future(move || {
        let mut changes = state.subscribe();
        async move {
            while changes.changed().await.is_ok() {
                let rev = *changes.borrow_and_update();
                revision.set(rev);
            }
        }
    });

    revision
}
