pub mod use_change_feed;
pub mod use_ledger;
