//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::models::Resource;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Tab navigation
    SwitchTab(Resource),
    NextTab,
    PrevTab,

    // List navigation
    NextItem,
    PrevItem,
    OpenDetail,
    CloseDetail,
    ScrollUp,
    ScrollDown,

    // Loading
    /// Manual load from the empty panel
    Load,
    /// Retry from the error panel
    Retry,
    /// Reload a populated list
    Refresh,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on which popup is open
pub fn key_to_ui_event(key: KeyEvent, show_help: bool, detail_open: bool) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    if detail_open {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => Some(UiEvent::CloseDetail),
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::ScrollUp),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::ScrollDown),
            KeyCode::Char('q') => Some(UiEvent::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('1') => Some(UiEvent::SwitchTab(Resource::Posts)),
        KeyCode::Char('2') => Some(UiEvent::SwitchTab(Resource::Users)),
        KeyCode::Char('3') => Some(UiEvent::SwitchTab(Resource::Photos)),
        KeyCode::Tab => Some(UiEvent::NextTab),
        KeyCode::BackTab => Some(UiEvent::PrevTab),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::PrevItem),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::NextItem),
        KeyCode::Enter => Some(UiEvent::OpenDetail),
        KeyCode::Char('l') => Some(UiEvent::Load),
        KeyCode::Char('r') => Some(UiEvent::Retry),
        KeyCode::Char('R') => Some(UiEvent::Refresh),
        _ => None,
    }
}
