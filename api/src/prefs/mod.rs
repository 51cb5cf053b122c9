pub mod client_prefs;
