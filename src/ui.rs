use ratatui::{prelude::*, widgets::*};

use crate::error::LoadError;
use crate::messages::ResourceView;
use crate::network::LoadState;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// The fixed presentations a resource tab can take
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Presentation<'a> {
    /// Loading with nothing to show yet
    Spinner,
    /// Error panel with a retry action
    Error(&'a LoadError),
    /// Empty panel with a manual load action
    Empty,
    /// Populated list; `refreshing` while a reload runs over stale items
    List { refreshing: bool },
}

/// Pick the presentation for a tab
pub fn presentation<T>(view: &ResourceView<T>) -> Presentation<'_> {
    match &view.state {
        LoadState::Loading if view.stale.is_empty() => Presentation::Spinner,
        LoadState::Loading => Presentation::List { refreshing: true },
        LoadState::Failed(err) => Presentation::Error(err),
        LoadState::Idle => Presentation::Empty,
        LoadState::Loaded(items) if items.is_empty() => Presentation::Empty,
        LoadState::Loaded(_) => Presentation::List { refreshing: false },
    }
}

/// Spinner glyph for the given UI tick
pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Renders tabs
pub fn render_tabs<'a>(titles: Vec<Line<'a>>, selected: usize) -> Tabs<'a> {
    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan).bold())
        .divider("|")
}

/// Border color for a load state
pub fn state_color<T>(state: &LoadState<T>) -> Color {
    match state {
        LoadState::Idle => Color::Gray,
        LoadState::Loading => Color::Yellow,
        LoadState::Loaded(_) => Color::Cyan,
        LoadState::Failed(_) => Color::Red,
    }
}

/// Cut `text` to `max` characters, marking the cut
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut)
}

/// First line of a possibly multi-line text
pub fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}
