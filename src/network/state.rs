//! Load state - lifecycle of one resource fetch

use crate::error::LoadError;

/// Where a resource is in its fetch lifecycle
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(Vec<T>),
    Failed(LoadError),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, LoadState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// Loaded items, if the last load succeeded
    pub fn items(&self) -> Option<&[T]> {
        match self {
            LoadState::Loaded(items) => Some(items),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// True when a non-empty collection is held
    pub fn has_items(&self) -> bool {
        self.items().is_some_and(|items| !items.is_empty())
    }

    /// Short status label for the status bar
    pub fn label(&self) -> String {
        match self {
            LoadState::Idle => String::from("idle"),
            LoadState::Loading => String::from("loading"),
            LoadState::Loaded(items) => format!("{} items", items.len()),
            LoadState::Failed(err) => format!("failed ({})", err.kind()),
        }
    }
}
