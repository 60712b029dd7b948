//! App layer - screen state and command processing
//!
//! The App actor receives UI events, drives the resource loaders,
//! applies their completions and emits render state.

pub mod actor;
pub mod commands;
pub mod state;

pub use actor::AppActor;
pub use state::AppState;
