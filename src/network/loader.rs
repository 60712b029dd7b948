//! Resource loader - owns one load state and the fetches that feed it
//!
//! Fetches run as Tokio tasks. Their results come back over a channel owned by
//! the loader and are applied only when the owner drains it, either with
//! [`ResourceLoader::next_completion`] from an async event loop or
//! [`ResourceLoader::poll_completions`] from a synchronous one.
//!
//! Overlapping loads follow last-request-wins: every `load` bumps the
//! generation and aborts the task it supersedes, and any completion carrying
//! an older generation is dropped.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::error::LoadError;
use crate::network::decode::interpret_response;
use crate::network::state::LoadState;
use crate::network::transport::Transport;

/// Identifies one `load` call on one loader
pub type Generation = u64;

struct Completion<T> {
    generation: Generation,
    result: Result<Vec<T>, LoadError>,
}

/// Explicit state container for one remote collection
pub struct ResourceLoader<T> {
    label: String,
    transport: Arc<dyn Transport>,
    state: LoadState<T>,
    generation: Generation,
    limit: Option<usize>,
    keep_stale: bool,
    stale: Vec<T>,
    loaded_at: Option<DateTime<Utc>>,
    in_flight: Option<JoinHandle<()>>,
    completion_tx: mpsc::UnboundedSender<Completion<T>>,
    completion_rx: mpsc::UnboundedReceiver<Completion<T>>,
    publisher: watch::Sender<LoadState<T>>,
}

impl<T> ResourceLoader<T> {
    pub fn new(label: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let (publisher, _) = watch::channel(LoadState::Idle);
        ResourceLoader {
            label: label.into(),
            transport,
            state: LoadState::Idle,
            generation: 0,
            limit: None,
            keep_stale: false,
            stale: Vec::new(),
            loaded_at: None,
            in_flight: None,
            completion_tx,
            completion_rx,
            publisher,
        }
    }

    /// Keep only the first `limit` items of each successful load
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Keep the previous collection readable while a reload is in flight
    pub fn keep_stale(mut self, keep: bool) -> Self {
        self.keep_stale = keep;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// When the most recent successful load completed
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Previous collection held over a reload (empty unless `keep_stale`)
    pub fn stale_items(&self) -> &[T] {
        &self.stale
    }

    /// Rows to show: the loaded collection, or the stale one while reloading
    pub fn visible_items(&self) -> &[T] {
        match &self.state {
            LoadState::Loaded(items) => items,
            LoadState::Loading => &self.stale,
            _ => &[],
        }
    }

    /// Observe every published state
    pub fn subscribe(&self) -> watch::Receiver<LoadState<T>> {
        self.publisher.subscribe()
    }
}

impl<T> ResourceLoader<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Start fetching `endpoint`.
    ///
    /// The state is `Loading` by the time this returns. A malformed endpoint
    /// fails immediately without touching the transport and returns `None`.
    /// Must be called from within a Tokio runtime.
    pub fn load(&mut self, endpoint: &str) -> Option<Generation> {
        self.generation += 1;
        self.abort_in_flight();

        let url = match parse_endpoint(endpoint) {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!(loader = %self.label, endpoint, error = %err, "Rejected endpoint");
                self.set_state(LoadState::Failed(err));
                return None;
            }
        };

        let previous = std::mem::replace(&mut self.state, LoadState::Loading);
        if self.keep_stale {
            if let LoadState::Loaded(items) = previous {
                self.stale = items;
            }
        } else {
            self.stale.clear();
        }
        self.publish();

        let generation = self.generation;
        let transport = Arc::clone(&self.transport);
        let completion_tx = self.completion_tx.clone();
        let limit = self.limit;
        tracing::info!(loader = %self.label, generation, url = %url, "Loading");

        self.in_flight = Some(tokio::spawn(async move {
            let result = fetch_collection(transport.as_ref(), &url, limit).await;
            // The receiver is gone once the owning screen is dropped
            let _ = completion_tx.send(Completion { generation, result });
        }));

        Some(generation)
    }

    /// Load unless a non-empty collection is already held or a load is running
    pub fn ensure_loaded(&mut self, endpoint: &str) -> Option<Generation> {
        if self.state.is_loading() || self.state.has_items() {
            return None;
        }
        self.load(endpoint)
    }

    /// Wait for the next completion and apply it.
    ///
    /// Returns `true` if the state changed, `false` if the completion was
    /// superseded. Pending forever while nothing is in flight, which makes it
    /// suitable as a `tokio::select!` branch. Cancel safe.
    pub async fn next_completion(&mut self) -> bool {
        match self.completion_rx.recv().await {
            Some(completion) => self.apply(completion),
            None => false,
        }
    }

    /// Apply every completion that has already arrived, without waiting
    pub fn poll_completions(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.completion_rx.try_recv() {
            changed |= self.apply(completion);
        }
        changed
    }

    fn apply(&mut self, completion: Completion<T>) -> bool {
        if completion.generation != self.generation {
            tracing::debug!(
                loader = %self.label,
                stale = completion.generation,
                current = self.generation,
                "Discarding superseded completion"
            );
            return false;
        }

        self.in_flight = None;
        match completion.result {
            Ok(items) => {
                tracing::info!(loader = %self.label, generation = completion.generation, count = items.len(), "Loaded");
                self.stale.clear();
                self.loaded_at = Some(Utc::now());
                self.set_state(LoadState::Loaded(items));
            }
            Err(err) => {
                tracing::warn!(loader = %self.label, generation = completion.generation, error = %err, "Load failed");
                self.set_state(LoadState::Failed(err));
            }
        }
        true
    }

    fn set_state(&mut self, state: LoadState<T>) {
        self.state = state;
        self.publish();
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for ResourceLoader<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

/// Parse an endpoint, accepting only absolute http(s) URLs
pub fn parse_endpoint(endpoint: &str) -> Result<Url, LoadError> {
    let url = Url::parse(endpoint)
        .map_err(|e| LoadError::InvalidUrl(format!("{}: {}", endpoint, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(LoadError::InvalidUrl(format!(
            "{}: unsupported scheme `{}`",
            endpoint, scheme
        ))),
    }
}

/// One GET, status check, strict decode and optional prefix truncation
pub async fn fetch_collection<T: DeserializeOwned>(
    transport: &dyn Transport,
    url: &Url,
    limit: Option<usize>,
) -> Result<Vec<T>, LoadError> {
    let response = transport.get(url).await?;
    let mut items = interpret_response(response)?;
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    Ok(items)
}
