//! The components module contains all shared components for our app. Components are the building blocks of dioxus apps.
pub mod ledger_block;
pub mod pico;
pub mod toast;
