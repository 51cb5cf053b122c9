//! Dismissible notification toasts.

use dioxus::prelude::*;

use crate::hooks::use_ledger::use_ledger;
use crate::notifications::Notification;
use crate::notifications::NotificationId;
use crate::notifications::Severity;

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "✓",
        Severity::Error => "✗",
        Severity::Info => "ℹ",
    }
}

/// Renders the notification queue top-right, oldest first.
#[component]
pub fn ToastContainer() -> Element {
    let state = use_ledger();
    let toasts = state.notifier.notifications();

    rsx! {
        div {
            class: "toast-container",
            for toast in toasts {
                Toast {
                    key: "{toast.id}",
                    toast: toast.clone(),
                    on_dismiss: {
                        let state = state.clone();
                        move |id: NotificationId| {
                            state.notifier.dismiss(id);
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn Toast(toast: Notification, on_dismiss: EventHandler<NotificationId>) -> Element {
    let class: &'static str = toast.severity.into();
    let id = toast.id;

    rsx! {
        div {
            class: "toast toast-{class}",
            role: "status",
            span { class: "toast-icon", "{severity_icon(toast.severity)}" }
            span { class: "toast-message", "{toast.message}" }
            button {
                class: "toast-close",
                "aria-label": "Close",
                onclick: move |_| on_dismiss.call(id),
                "×"
            }
        }
    }
}
