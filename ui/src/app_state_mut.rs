//! Defines the mutable, reactive state for the application's UI.

use dioxus::prelude::*;

/// A reactive state provided as a Dioxus context.
///
/// The ledger state itself is not reactive; this holds the signal that
/// tells the view it moved.  It is separate from the core `AppState`.
#[derive(Clone, Copy)]
pub struct AppStateMut {
    /// Revision of the `AppState` change feed last seen by the view.
    pub revision: Signal<u64>,
}
