use dioxus::prelude::*;

use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;

/// Returns the shared [`AppState`] and re-renders the caller whenever any
/// part of it changes.
pub fn use_ledger() -> AppState {
    let state_mut = use_context::<AppStateMut>();
    // subscribe
    let _ = state_mut.revision.read();
    use_context::<AppState>()
}
