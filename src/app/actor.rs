//! App actor - message loop processing UI events and load completions

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{RenderState, UiEvent};
use crate::models::Resource;

/// App actor that owns the screen state and its loaders
pub struct AppActor {
    state: AppState,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(state: AppState, render_tx: mpsc::UnboundedSender<RenderState>) -> Self {
        AppActor { state, render_tx }
    }

    /// Run the actor message loop
    ///
    /// Load completions are applied here, on the actor's own task, so the
    /// render state only ever reflects one writer.
    pub async fn run(mut self, mut ui_rx: mpsc::UnboundedReceiver<UiEvent>) {
        // The first tab appears immediately
        self.state.ensure_active_loaded();
        self.render();

        loop {
            tokio::select! {
                event = ui_rx.recv() => {
                    match event {
                        Some(event) => {
                            if self.handle_ui_event(event) {
                                break;
                            }
                            self.render();
                        }
                        None => break,
                    }
                }
                changed = self.state.posts.next_completion() => {
                    if changed {
                        self.state.on_load_finished(Resource::Posts);
                        self.render();
                    }
                }
                changed = self.state.users.next_completion() => {
                    if changed {
                        self.state.on_load_finished(Resource::Users);
                        self.render();
                    }
                }
                changed = self.state.photos.next_completion() => {
                    if changed {
                        self.state.on_load_finished(Resource::Photos);
                        self.render();
                    }
                }
            }
        }
        tracing::info!("App actor stopped");
    }

    fn render(&self) {
        let _ = self.render_tx.send(self.state.to_render_state());
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Tabs
            UiEvent::SwitchTab(tab) => self.state.switch_tab(tab),
            UiEvent::NextTab => self.state.next_tab(),
            UiEvent::PrevTab => self.state.prev_tab(),

            // List navigation
            UiEvent::NextItem => self.state.next_item(),
            UiEvent::PrevItem => self.state.prev_item(),
            UiEvent::OpenDetail => self.state.open_detail(),
            UiEvent::CloseDetail => self.state.close_detail(),
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            // Loading
            UiEvent::Load => {
                self.state.load_active();
            }
            UiEvent::Retry => {
                self.state.retry_active();
            }
            UiEvent::Refresh => {
                self.state.refresh_active();
            }

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::config::Config;
    use crate::network::transport::testing::StaticTransport;
    use crate::network::{LoadState, TransportResponse};

    const USERS_JSON: &str = r#"[{"id":1,"name":"Ann","username":"ann","email":"a@b.c",
        "phone":"1","website":"ann.dev",
        "address":{"street":"s","suite":"x","city":"c","zipcode":"z"},
        "company":{"name":"n","catchPhrase":"p","bs":"b"}}]"#;

    /// Receive render states until one satisfies `pred`
    async fn wait_for(
        render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
        pred: impl Fn(&RenderState) -> bool,
    ) -> RenderState {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let state = render_rx.recv().await.expect("actor stopped");
                if pred(&state) {
                    return state;
                }
            }
        })
        .await
        .expect("timed out waiting for render state")
    }

    #[tokio::test]
    async fn test_actor_loads_first_tab_and_switches() {
        let transport = Arc::new(
            StaticTransport::default()
                .route("/posts", TransportResponse::ok("[]"))
                .route("/users", TransportResponse::ok(USERS_JSON)),
        );
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();
        let actor = AppActor::new(AppState::new(Config::default(), transport), render_tx);
        let handle = tokio::spawn(actor.run(ui_rx));

        let first = render_rx.recv().await.unwrap();
        assert!(first.posts.state.is_loading());

        let loaded = wait_for(&mut render_rx, |s| !s.posts.state.is_loading()).await;
        assert_eq!(loaded.posts.state, LoadState::Loaded(Vec::new()));

        ui_tx.send(UiEvent::SwitchTab(Resource::Users)).unwrap();
        let users = wait_for(&mut render_rx, |s| s.users.state.has_items()).await;
        assert_eq!(users.active_tab, Resource::Users);

        ui_tx.send(UiEvent::OpenDetail).unwrap();
        let detail = wait_for(&mut render_rx, |s| s.detail.is_some()).await;
        assert!(matches!(detail.detail, Some(crate::messages::Detail::User(_))));

        ui_tx.send(UiEvent::Quit).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_actor_stops_when_ui_goes_away() {
        let transport = Arc::new(StaticTransport::default());
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (render_tx, _render_rx) = mpsc::unbounded_channel();
        let actor = AppActor::new(AppState::new(Config::default(), transport), render_tx);
        let handle = tokio::spawn(actor.run(ui_rx));

        drop(ui_tx);
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("actor did not stop")
            .unwrap();
    }
}
