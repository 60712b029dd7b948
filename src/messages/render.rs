//! Render state - data structure sent from App layer to UI for rendering

use chrono::{DateTime, Utc};

use crate::models::{Account, Article, Photo, Resource};
use crate::network::LoadState;

/// Snapshot of one resource tab
#[derive(Debug, Clone)]
pub struct ResourceView<T> {
    pub state: LoadState<T>,
    /// Previous collection kept visible while a refresh runs
    pub stale: Vec<T>,
    pub selected: usize,
    pub endpoint: String,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl<T> Default for ResourceView<T> {
    fn default() -> Self {
        ResourceView {
            state: LoadState::Idle,
            stale: Vec::new(),
            selected: 0,
            endpoint: String::new(),
            loaded_at: None,
        }
    }
}

impl<T> ResourceView<T> {
    /// Items to list: the loaded collection, or the stale one during a refresh
    pub fn visible_items(&self) -> &[T] {
        match &self.state {
            LoadState::Loaded(items) => items,
            LoadState::Loading => &self.stale,
            _ => &[],
        }
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.visible_items().get(self.selected)
    }
}

/// Record shown in the detail popup
#[derive(Debug, Clone, PartialEq)]
pub enum Detail {
    Post(Article),
    User(Account),
    Photo(Photo),
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub active_tab: Resource,

    pub posts: ResourceView<Article>,
    pub users: ResourceView<Account>,
    pub photos: ResourceView<Photo>,

    // Popups
    pub detail: Option<Detail>,
    pub detail_scroll: u16,
    pub show_help: bool,
}

impl RenderState {
    pub fn is_loading(&self, resource: Resource) -> bool {
        match resource {
            Resource::Posts => self.posts.state.is_loading(),
            Resource::Users => self.users.state.is_loading(),
            Resource::Photos => self.photos.state.is_loading(),
        }
    }

    /// Status label of one tab
    pub fn label(&self, resource: Resource) -> String {
        match resource {
            Resource::Posts => self.posts.state.label(),
            Resource::Users => self.users.state.label(),
            Resource::Photos => self.photos.state.label(),
        }
    }

    pub fn loaded_at(&self, resource: Resource) -> Option<DateTime<Utc>> {
        match resource {
            Resource::Posts => self.posts.loaded_at,
            Resource::Users => self.users.loaded_at,
            Resource::Photos => self.photos.loaded_at,
        }
    }
}
