//=============================================================================
// File: src/screens/explorer.rs
//=============================================================================
use dioxus::prelude::*;

use crate::components::ledger_block::LedgerBlockCard;
use crate::components::pico::Button;
use crate::components::pico::Card;
use crate::components::pico::Input;
use crate::hooks::use_ledger::use_ledger;

#[component]
pub fn ExplorerScreen() -> Element {
    rsx! {
        div {
            class: "explorer",
            aside {
                class: "sidebar",
                BalanceCard {}
                TransactionForm {}
            }
            section {
                class: "main-content",
                ChainCard {}
            }
        }
    }
}

/// Balance of the watched address.  Editing the address re-fetches it.
#[component]
fn BalanceCard() -> Element {
    let state = use_ledger();
    let balance = state.sync.with_state(|s| s.balance);
    let address = state.watched_address();

    rsx! {
        Card {
            h3 { "Balance Check" }
            Input {
                label: "Address".to_string(),
                name: "watch_address".to_string(),
                value: address,
                placeholder: "Enter address".to_string(),
                on_input: move |evt: FormEvent| state.spawn_watch_address(evt.value()),
            }
            p { class: "balance", "Balance: " strong { "{balance} coins" } }
        }
    }
}

#[component]
fn TransactionForm() -> Element {
    let state = use_ledger();
    let mut sender = use_signal(|| "user-1".to_string());
    let mut receiver = use_signal(|| "user-2".to_string());
    let mut amount = use_signal(|| "10".to_string());

    rsx! {
        Card {
            h3 { "Add Transaction" }
            Input {
                label: "Sender".to_string(),
                name: "sender".to_string(),
                value: sender(),
                placeholder: "Sender address".to_string(),
                on_input: move |evt: FormEvent| sender.set(evt.value()),
            }
            Input {
                label: "Receiver".to_string(),
                name: "receiver".to_string(),
                value: receiver(),
                placeholder: "Receiver address".to_string(),
                on_input: move |evt: FormEvent| receiver.set(evt.value()),
            }
            Input {
                label: "Amount".to_string(),
                name: "amount".to_string(),
                input_type: "number".to_string(),
                value: amount(),
                placeholder: "Amount".to_string(),
                on_input: move |evt: FormEvent| amount.set(evt.value()),
            }
            Button {
                on_click: move |_| {
                    // Anything that is not a positive whole number is sent on
                    // as zero so the coordinator's validation reports it.
                    let parsed = amount.read().trim().parse::<u64>().unwrap_or(0);
                    state.spawn_submit_transaction(sender(), receiver(), parsed);
                },
                "Add Transaction"
            }
        }
    }
}

#[component]
fn ChainCard() -> Element {
    let state = use_ledger();
    let (blocks, chain_valid, tx_count) = state.sync.with_state(|s| {
        (
            s.blocks_newest_first().cloned().collect::<Vec<_>>(),
            s.chain_valid,
            s.transaction_count(),
        )
    });
    let block_count = blocks.len();

    rsx! {
        Card {
            header {
                class: "chain-header",
                h3 { style: "margin-bottom: 0;", "Blockchain ({block_count} blocks)" }
                small { "{tx_count} transactions" }
                if chain_valid {
                    mark { class: "chain-status chain-valid", "Chain valid" }
                } else {
                    mark { class: "chain-status chain-invalid", "Chain invalid" }
                }
            }
            div {
                class: "blocks-container",
                for block in blocks.iter() {
                    LedgerBlockCard { key: "{block.hash}", block: block.clone() }
                }
            }
        }
    }
}
