//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::messages::Detail;
use crate::models::Resource;
use crate::network::{Generation, ResourceLoader};

/// What a tab currently shows, independent of its record type
#[derive(Debug, Clone, Copy, PartialEq)]
struct TabSummary {
    loading: bool,
    failed: bool,
    len: usize,
}

fn summarize<T>(loader: &ResourceLoader<T>) -> TabSummary {
    TabSummary {
        loading: loader.is_loading(),
        failed: loader.state().error().is_some(),
        len: loader.visible_items().len(),
    }
}

impl AppState {
    // ========================
    // Tabs
    // ========================

    /// Show `tab`, loading it on first appearance
    pub fn switch_tab(&mut self, tab: Resource) {
        self.active_tab = tab;
        self.close_detail();
        self.ensure_active_loaded();
    }

    pub fn next_tab(&mut self) {
        let next = (self.active_tab.index() + 1) % Resource::ALL.len();
        self.switch_tab(Resource::ALL[next]);
    }

    pub fn prev_tab(&mut self) {
        let count = Resource::ALL.len();
        let prev = (self.active_tab.index() + count - 1) % count;
        self.switch_tab(Resource::ALL[prev]);
    }

    // ========================
    // Loading
    // ========================

    /// Load the active tab unless it already has something to show
    pub fn ensure_active_loaded(&mut self) -> Option<Generation> {
        let endpoint = self.config.endpoint(self.active_tab);
        match self.active_tab {
            Resource::Posts => self.posts.ensure_loaded(&endpoint),
            Resource::Users => self.users.ensure_loaded(&endpoint),
            Resource::Photos => self.photos.ensure_loaded(&endpoint),
        }
    }

    /// Manual load from the empty panel
    pub fn load_active(&mut self) -> Option<Generation> {
        let summary = self.active_summary();
        if summary.loading || summary.failed || summary.len > 0 {
            return None;
        }
        self.start_load(self.active_tab)
    }

    /// Retry from the error panel
    pub fn retry_active(&mut self) -> Option<Generation> {
        if !self.active_summary().failed {
            return None;
        }
        self.start_load(self.active_tab)
    }

    /// Reload a populated list
    pub fn refresh_active(&mut self) -> Option<Generation> {
        let summary = self.active_summary();
        if summary.loading || summary.len == 0 {
            return None;
        }
        self.start_load(self.active_tab)
    }

    fn start_load(&mut self, resource: Resource) -> Option<Generation> {
        let endpoint = self.config.endpoint(resource);
        tracing::info!(resource = resource.path(), endpoint = %endpoint, "Load requested");
        match resource {
            Resource::Posts => self.posts.load(&endpoint),
            Resource::Users => self.users.load(&endpoint),
            Resource::Photos => self.photos.load(&endpoint),
        }
    }

    /// Keep the selection inside the collection after a load finishes
    pub fn on_load_finished(&mut self, resource: Resource) {
        let len = self.summary(resource).len;
        let selected = &mut self.selected[resource.index()];
        *selected = (*selected).min(len.saturating_sub(1));
    }

    fn summary(&self, resource: Resource) -> TabSummary {
        match resource {
            Resource::Posts => summarize(&self.posts),
            Resource::Users => summarize(&self.users),
            Resource::Photos => summarize(&self.photos),
        }
    }

    fn active_summary(&self) -> TabSummary {
        self.summary(self.active_tab)
    }

    // ========================
    // List navigation
    // ========================

    pub fn next_item(&mut self) {
        let len = self.active_summary().len;
        let selected = &mut self.selected[self.active_tab.index()];
        if *selected + 1 < len {
            *selected += 1;
        }
    }

    pub fn prev_item(&mut self) {
        let selected = &mut self.selected[self.active_tab.index()];
        *selected = selected.saturating_sub(1);
    }

    /// Open the selected record of the active tab
    pub fn open_detail(&mut self) {
        let index = self.selected[self.active_tab.index()];
        let detail = match self.active_tab {
            Resource::Posts => self.posts.visible_items().get(index).cloned().map(Detail::Post),
            Resource::Users => self.users.visible_items().get(index).cloned().map(Detail::User),
            Resource::Photos => self.photos.visible_items().get(index).cloned().map(Detail::Photo),
        };
        if detail.is_some() {
            self.detail = detail;
            self.detail_scroll = 0;
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
        self.detail_scroll = 0;
    }

    pub fn scroll_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::Config;
    use crate::error::LoadError;
    use crate::network::transport::testing::StaticTransport;
    use crate::network::{LoadState, TransportResponse};

    fn posts_json(count: u64) -> String {
        let items: Vec<String> = (1..=count)
            .map(|id| format!(r#"{{"userId":1,"id":{},"title":"t{}","body":"b"}}"#, id, id))
            .collect();
        format!("[{}]", items.join(","))
    }

    const USERS_JSON: &str = r#"[{"id":1,"name":"Ann","username":"ann","email":"a@b.c",
        "phone":"1","website":"ann.dev",
        "address":{"street":"s","suite":"x","city":"c","zipcode":"z"},
        "company":{"name":"n","catchPhrase":"p","bs":"b"}}]"#;

    fn app(transport: StaticTransport) -> (AppState, Arc<StaticTransport>) {
        let transport = Arc::new(transport);
        let state = AppState::new(Config::default(), transport.clone());
        (state, transport)
    }

    #[tokio::test]
    async fn test_first_appearance_loads_once() {
        let (mut state, transport) = app(
            StaticTransport::default().route("/users", TransportResponse::ok(USERS_JSON)),
        );

        state.switch_tab(Resource::Users);
        assert!(state.users.is_loading());
        state.switch_tab(Resource::Users);
        state.users.next_completion().await;

        state.switch_tab(Resource::Posts);
        state.posts.next_completion().await;
        state.switch_tab(Resource::Users);
        assert!(!state.users.is_loading());

        assert_eq!(state.users.state().items().map(|u| u.len()), Some(1));
        assert_eq!(state.active_tab, Resource::Users);
        // One for users, one for posts on its first appearance
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_posts_tab_shows_first_ten() {
        let (mut state, _) =
            app(StaticTransport::default().route("/posts", TransportResponse::ok(posts_json(15))));

        state.ensure_active_loaded();
        state.posts.next_completion().await;

        let render = state.to_render_state();
        assert_eq!(render.posts.visible_items().len(), 10);
        assert_eq!(render.posts.endpoint, "https://jsonplaceholder.typicode.com/posts");
    }

    #[tokio::test]
    async fn test_retry_only_from_error_panel() {
        let (mut state, transport) = app(
            StaticTransport::default().route("/users", TransportResponse::new(500, "boom")),
        );

        state.switch_tab(Resource::Users);
        assert_eq!(state.retry_active(), None, "no retry while loading");
        state.users.next_completion().await;
        assert_eq!(
            state.users.state().error(),
            Some(&LoadError::Network("HTTP 500: boom".into()))
        );
        assert_eq!(state.load_active(), None, "error panel offers retry, not load");

        assert!(state.retry_active().is_some());
        assert!(state.users.is_loading());
        state.users.next_completion().await;
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_load_from_empty_panel() {
        let (mut state, transport) =
            app(StaticTransport::default().route("/photos", TransportResponse::ok("[]")));

        state.switch_tab(Resource::Photos);
        state.photos.next_completion().await;
        assert_eq!(state.photos.state(), &LoadState::Loaded(Vec::new()));
        assert_eq!(state.refresh_active(), None, "nothing to refresh");

        assert!(state.load_active().is_some());
        state.photos.next_completion().await;
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_refresh_reloads_and_clamps_selection() {
        let (mut state, _) =
            app(StaticTransport::default().route("/posts", TransportResponse::ok(posts_json(3))));

        state.ensure_active_loaded();
        state.posts.next_completion().await;
        state.selected[0] = 7;
        state.on_load_finished(Resource::Posts);
        assert_eq!(state.selected[0], 2);

        assert!(state.refresh_active().is_some());
        assert_eq!(state.refresh_active(), None, "already refreshing");
        state.posts.next_completion().await;
        assert!(state.posts.state().has_items());
    }

    #[tokio::test]
    async fn test_navigation_and_detail() {
        let (mut state, _) =
            app(StaticTransport::default().route("/posts", TransportResponse::ok(posts_json(2))));

        state.ensure_active_loaded();
        state.posts.next_completion().await;

        state.next_item();
        state.next_item();
        assert_eq!(state.selected[0], 1);
        state.open_detail();
        match &state.detail {
            Some(Detail::Post(article)) => assert_eq!(article.id, 2),
            other => panic!("expected post detail, got {:?}", other),
        }

        state.scroll_down();
        state.close_detail();
        assert_eq!(state.detail, None);
        assert_eq!(state.detail_scroll, 0);

        state.prev_item();
        state.prev_item();
        assert_eq!(state.selected[0], 0);
    }

    #[tokio::test]
    async fn test_refresh_keeps_stale_rows_usable() {
        let transport = Arc::new(
            StaticTransport::default().route("/posts", TransportResponse::ok(posts_json(2))),
        );
        let config = Config {
            keep_stale_on_refresh: true,
            ..Config::default()
        };
        let mut state = AppState::new(config, transport.clone());

        state.ensure_active_loaded();
        state.posts.next_completion().await;
        assert!(state.refresh_active().is_some());
        assert!(state.posts.is_loading());

        let render = state.to_render_state();
        assert_eq!(render.posts.visible_items().len(), 2);

        state.next_item();
        assert_eq!(state.selected[0], 1);
        state.open_detail();
        match &state.detail {
            Some(Detail::Post(article)) => assert_eq!(article.id, 2),
            other => panic!("expected post detail from stale rows, got {:?}", other),
        }

        state.posts.next_completion().await;
        assert_eq!(state.posts.state().items().map(|p| p.len()), Some(2));
        assert!(state.posts.stale_items().is_empty());
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_refresh_without_keep_stale_hides_rows() {
        let (mut state, _) =
            app(StaticTransport::default().route("/posts", TransportResponse::ok(posts_json(2))));

        state.ensure_active_loaded();
        state.posts.next_completion().await;
        assert!(state.refresh_active().is_some());

        assert!(state.posts.visible_items().is_empty());
        state.open_detail();
        assert_eq!(state.detail, None);
        state.posts.next_completion().await;
    }

    #[test]
    fn test_invalid_base_url_fails_without_io() {
        let transport = Arc::new(StaticTransport::default());
        let config = Config {
            base_url: String::from("not a url"),
            ..Config::default()
        };
        let mut state = AppState::new(config, transport.clone());

        assert_eq!(state.ensure_active_loaded(), None);
        assert!(matches!(
            state.posts.state(),
            LoadState::Failed(LoadError::InvalidUrl(_))
        ));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_tab_cycling_wraps() {
        let (mut state, _) = app(StaticTransport::default());
        state.prev_tab();
        assert_eq!(state.active_tab, Resource::Photos);
        state.next_tab();
        assert_eq!(state.active_tab, Resource::Posts);
    }
}
