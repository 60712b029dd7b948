//! # Fetchdeck TUI
//!
//! A terminal browser for REST collections, built around a reusable
//! resource loader.
//!
//! ## Features
//! - Posts, users and photos from a JSON placeholder API
//! - Explicit load states: idle, loading, loaded, failed
//! - Retry from the error panel, manual load from the empty panel, refresh
//! - Detail popups for every record
//! - Last-request-wins handling of overlapping loads
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (state machine owning the loaders)
//! - Network Layer (Tokio tasks behind a `Transport` trait)

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::Config;
pub use error::{LoadError, TransportError};
pub use messages::{Detail, RenderState, ResourceView, UiEvent};
pub use models::{Account, Address, Article, Organization, Photo, Resource};
pub use network::{LoadState, ReqwestTransport, ResourceLoader, Transport, TransportResponse};
