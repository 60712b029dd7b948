//! Network layer - transports, decoding and the resource loader
//!
//! A `ResourceLoader` issues GETs through a `Transport`, decodes the body into
//! typed records and publishes the outcome as a `LoadState`.

pub mod client;
pub mod decode;
pub mod loader;
pub mod state;
pub mod transport;

pub use client::ReqwestTransport;
pub use loader::{Generation, ResourceLoader};
pub use state::LoadState;
pub use transport::{Transport, TransportResponse};
