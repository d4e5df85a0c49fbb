// --- File: crates/barberbook_common/src/http/mod.rs ---
//! HTTP utilities shared by the crates that talk to external providers.

pub mod client;
