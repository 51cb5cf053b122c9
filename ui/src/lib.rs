// The client-side Dioxus application logic.
//
// The engine (`notifications`, `sync`, `mutations`, `app_state`) does not
// depend on Dioxus beyond the spawner in `compat`; the components only read
// snapshots from it and call its operations.

use std::rc::Rc;

use dioxus::prelude::*;

pub mod app_state;
mod app_state_mut;
pub mod changes;
pub mod compat;
mod components;
pub mod hooks;
pub mod mutations;
pub mod notifications;
mod screens;
pub mod sync;

use api::ClientPrefs;
use app_state::AppState;
use app_state_mut::AppStateMut;
use compat::DioxusSpawner;
use components::pico::Button;
use components::pico::ButtonType;
use components::pico::Container;
use components::toast::ToastContainer;
use hooks::use_change_feed::use_change_feed;
use hooks::use_ledger::use_ledger;
use screens::explorer::ExplorerScreen;
use screens::how_to::HowToScreen;

/// Enum to represent the different screens in our application.
#[derive(Clone, Copy, PartialEq, Default)]
enum Screen {
    #[default]
    Explorer,
    HowTo,
}

impl Screen {
    /// Helper to get the display name for each screen.
    fn name(&self) -> &'static str {
        match self {
            Screen::Explorer => "Explorer",
            Screen::HowTo => "How to Use",
        }
    }
}

/// A list of all available screens for easy iteration.
const ALL_SCREENS: [Screen; 2] = [Screen::Explorer, Screen::HowTo];

/// Navigation links plus, on the explorer, the mine button.
#[component]
fn Header(mut active_screen: Signal<Screen>) -> Element {
    let state = use_ledger();
    let mining = state.mutations.is_mining();
    let mut nav_open = use_signal(|| false);

    rsx! {
        header {
            class: "app-header",
            nav {
                ul {
                    li {
                        Button {
                            button_type: ButtonType::Secondary,
                            outline: true,
                            on_click: move |_| nav_open.toggle(),
                            "≡"
                        }
                    }
                    li { strong { "Ledger Explorer" } }
                }
                ul {
                    class: if nav_open() { "header-nav open" } else { "header-nav" },
                    for screen in ALL_SCREENS {
                        li {
                            a {
                                href: "#",
                                class: if active_screen() == screen { "active-tab" } else { "" },
                                onclick: move |event| {
                                    event.prevent_default();
                                    active_screen.set(screen);
                                    nav_open.set(false);
                                },
                                "{screen.name()}"
                            }
                        }
                    }
                    if active_screen() == Screen::Explorer {
                        li {
                            // Disabled while mining: a second mine request is never issued.
                            Button {
                                button_type: ButtonType::Contrast,
                                disabled: mining,
                                busy: mining,
                                on_click: move |_| state.spawn_mine_block(),
                                if mining { "Mining Block..." } else { "Mine New Block" }
                            }
                        }
                    }
                }
            }
        }
    }
}

//=============================================================================
// MAIN APPLICATION COMPONENT (Client-side)
//=============================================================================

#[allow(non_snake_case)]
pub fn App() -> Element {
    let responsive_css = r#"
    * { box-sizing: border-box; }

    .app-header nav { flex-wrap: wrap; }
    .header-nav a.active-tab { color: var(--pico-primary); font-weight: bold; }

    .explorer {
        display: grid;
        grid-template-columns: minmax(260px, 1fr) 3fr;
        gap: 1rem;
    }
    .blocks-container { max-height: 70vh; overflow-y: auto; }
    .block-header, .chain-header { display: flex; justify-content: space-between; align-items: baseline; gap: 1rem; }
    .block-details { display: grid; grid-template-columns: max-content 1fr; gap: 0 1rem; margin: 0; }
    .block-details dd { margin: 0; }
    .transactions { margin-top: 0.5rem; }
    .chain-valid { background: #d1fae5; color: #065f46; }
    .chain-invalid { background: #fee2e2; color: #991b1b; }

    .toast-container {
        position: fixed;
        top: 1rem;
        right: 1rem;
        display: flex;
        flex-direction: column;
        gap: 0.5rem;
        z-index: 1000;
        max-width: 360px;
    }
    .toast {
        display: flex;
        align-items: center;
        gap: 0.5rem;
        padding: 0.75rem 1rem;
        border-radius: var(--pico-border-radius);
        background: var(--pico-card-background-color);
        box-shadow: var(--pico-card-box-shadow);
        border-left: 4px solid var(--pico-muted-color);
    }
    .toast-success { border-left-color: #10b981; }
    .toast-error { border-left-color: #ef4444; }
    .toast-info { border-left-color: #3b82f6; }
    .toast-message { flex: 1; }
    .toast-close { background: none; border: none; padding: 0; width: auto; color: inherit; }

    .loading { display: flex; justify-content: center; padding: 4rem; }

    /* --- Mobile Styles --- */
    @media (max-width: 768px) {
        .explorer { grid-template-columns: 1fr; }
        .header-nav { display: none; width: 100%; }
        .header-nav.open { display: flex; flex-direction: column; }
    }
    @media (min-width: 769px) {
        .app-header nav > ul:first-child > li:first-child { display: none; }
    }
"#;

    rsx! {
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1.0",
        }
        document::Link {
            rel: "stylesheet",
            href: "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.cyan.min.css",
        }
        style {
            "{responsive_css}"
        }
        AppBody {}
    }
}

#[component]
fn AppBody() -> Element {
    let app_state = use_hook(|| {
        let prefs = ClientPrefs::default();
        dioxus_logger::tracing::info!("prefs: {:?}", prefs);
        AppState::from_prefs(&prefs, Rc::new(DioxusSpawner)).map_err(|e| e.to_string())
    });

    match app_state {
        Ok(app_state) => rsx! {
            LoadedApp {
                app_state,
            }
        },
        Err(e) => rsx! {
            p {
                "An error occurred: {e}"
            }
        },
    }
}

/// This component holds the main app logic.
#[component]
fn LoadedApp(app_state: AppState) -> Element {
    use_context_provider(|| app_state.clone());

    let revision = use_change_feed(&app_state);
    use_context_provider(|| AppStateMut { revision });

    // Startup barrier; screens stay hidden until all three reads settle.
    let state = app_state.clone();
    use_future(move || {
        let state = state.clone();
        async move { state.initialize().await }
    });

    let active_screen = use_signal(Screen::default);

    let _ = revision.read();
    let ready = app_state.sync.is_ready();

    rsx! {
        ToastContainer {}
        if !ready {
            div {
                class: "loading",
                "aria-busy": "true",
                "Loading blockchain..."
            }
        } else {
            Container {
                Header {
                    active_screen,
                }
                match active_screen() {
                    Screen::Explorer => rsx! {
                        ExplorerScreen {}
                    },
                    Screen::HowTo => rsx! {
                        HowToScreen {}
                    },
                }
            }
        }
    }
}
