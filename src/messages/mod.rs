//! Message types for inter-layer communication in the actor-based architecture.
//!
//! UI events flow from the UI layer to the App layer; render state flows back.

pub mod render;
pub mod ui_events;

pub use render::{Detail, RenderState, ResourceView};
pub use ui_events::UiEvent;
