use api::LedgerBlock;
use dioxus::prelude::*;

use crate::components::pico::Card;

const HASH_PREVIEW_LEN: usize = 20;

/// One block with its transactions.
#[component]
pub fn LedgerBlockCard(block: LedgerBlock) -> Element {
    let timestamp = block.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let hash = block.abbreviated_hash(HASH_PREVIEW_LEN);
    let previous_hash = block.abbreviated_previous_hash(HASH_PREVIEW_LEN);

    rsx! {
        Card {
            header {
                class: "block-header",
                h4 { style: "margin-bottom: 0;", "Block #{block.index}" }
                small { "{timestamp}" }
            }
            dl {
                class: "block-details",
                dt { "Hash" }
                dd { title: "{block.hash}", code { "{hash}" } }
                dt { "Prev Hash" }
                dd { title: "{block.previous_hash}", code { "{previous_hash}" } }
                dt { "Nonce" }
                dd { "{block.nonce}" }
                dt { "Transactions" }
                dd { "{block.transaction_count()}" }
            }
            if !block.transactions.is_empty() {
                ul {
                    class: "transactions",
                    for tx in block.transactions.iter() {
                        li {
                            key: "{tx.id}",
                            small {
                                "{tx.display_sender()} → {tx.receiver}: {tx.amount} coins"
                            }
                        }
                    }
                }
            }
        }
    }
}
