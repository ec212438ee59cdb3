//! CLI command implementations.

pub mod config;
pub mod discovery;
pub mod donate;
pub mod proof;
pub mod stats;

// Re-export command handlers
pub use config::{config_init, config_show};
pub use discovery::discovery;
pub use donate::{donate, DonateArgs};
pub use proof::{proof_decode, proof_encode};
pub use stats::stats;
