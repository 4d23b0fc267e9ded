//! Alerts Module - Alert Levels & Cooldown State Machine

pub mod state;
pub mod types;

pub use state::AlertStateMachine;
pub use types::{AlertLevel, Emission};
