//! App state - screen data plus one loader per resource

use std::sync::Arc;

use crate::config::Config;
use crate::messages::{Detail, RenderState, ResourceView};
use crate::models::{Account, Article, Photo, Resource};
use crate::network::{ResourceLoader, Transport};

/// Main application state
///
/// Owns the loaders exclusively; nothing else mutates their load state.
pub struct AppState {
    pub config: Config,
    pub active_tab: Resource,

    pub posts: ResourceLoader<Article>,
    pub users: ResourceLoader<Account>,
    pub photos: ResourceLoader<Photo>,

    /// Selected row per tab, indexed by `Resource::index`
    pub selected: [usize; 3],

    // Popups
    pub detail: Option<Detail>,
    pub detail_scroll: u16,
    pub show_help: bool,
}

impl AppState {
    pub fn new(config: Config, transport: Arc<dyn Transport>) -> Self {
        let keep_stale = config.keep_stale_on_refresh;
        AppState {
            posts: ResourceLoader::new(Resource::Posts.path(), Arc::clone(&transport))
                .with_limit(config.post_limit)
                .keep_stale(keep_stale),
            users: ResourceLoader::new(Resource::Users.path(), Arc::clone(&transport))
                .keep_stale(keep_stale),
            photos: ResourceLoader::new(Resource::Photos.path(), transport)
                .with_limit(config.photo_limit)
                .keep_stale(keep_stale),
            config,
            active_tab: Resource::Posts,
            selected: [0; 3],
            detail: None,
            detail_scroll: 0,
            show_help: false,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            active_tab: self.active_tab,
            posts: self.view(Resource::Posts, &self.posts),
            users: self.view(Resource::Users, &self.users),
            photos: self.view(Resource::Photos, &self.photos),
            detail: self.detail.clone(),
            detail_scroll: self.detail_scroll,
            show_help: self.show_help,
        }
    }

    fn view<T: Clone>(&self, resource: Resource, loader: &ResourceLoader<T>) -> ResourceView<T> {
        ResourceView {
            state: loader.state().clone(),
            stale: loader.stale_items().to_vec(),
            selected: self.selected[resource.index()],
            endpoint: self.config.endpoint(resource),
            loaded_at: loader.loaded_at(),
        }
    }
}
