//! Runtime infrastructure - Tokio runtime bridge for the backend

mod bridge;
mod worker;

pub use bridge::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
