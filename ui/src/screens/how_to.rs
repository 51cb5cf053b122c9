//=============================================================================
// File: src/screens/how_to.rs
//=============================================================================
use dioxus::prelude::*;

use crate::components::pico::Card;

#[component]
pub fn HowToScreen() -> Element {
    rsx! {
        Card {
            h2 { "How to Use This Explorer" }
            section {
                h3 { "Checking Balances" }
                ol {
                    li { "Enter any address in the Balance Check field." }
                    li { "The balance for that address is fetched from the node." }
                    li { "Try \"miner-address\", \"user-1\" or \"user-2\"." }
                }
            }
            section {
                h3 { "Adding Transactions" }
                ol {
                    li { "Fill in the sender and receiver addresses." }
                    li { "Enter a whole, positive amount of coins." }
                    li { "Click Add Transaction. It is queued until the next block is mined." }
                }
            }
            section {
                h3 { "Mining Blocks" }
                ol {
                    li { "Click Mine New Block in the header." }
                    li { "The node runs proof-of-work; this can take a few seconds." }
                    li { "Pending transactions and a mining reward land in the new block." }
                }
            }
            section {
                h3 { "Exploring the Chain" }
                ul {
                    li { "Blocks are listed newest first with hash, previous hash, nonce and transactions." }
                    li { "Mining rewards show as MINING REWARD." }
                    li { "The chain status badge shows whether the node considers the chain valid." }
                }
            }
        }
    }
}
