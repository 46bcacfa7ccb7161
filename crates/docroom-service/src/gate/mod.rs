//! Access gate — the ordered challenge sequence guarding shared content.

pub mod machine;
pub mod service;

pub use machine::{ChallengeProgress, DenialReason, GateState};
pub use service::AccessGate;
