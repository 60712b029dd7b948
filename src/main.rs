//! Fetchdeck TUI - browse REST collections through resource loaders
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - state machine owning one loader per resource
//! - Network Layer (Tokio) - spawned fetches behind a `Transport`

use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use fetchdeck_tui::constants::{APP_NAME, APP_VERSION, DEFAULT_LOG_FILE};
use fetchdeck_tui::messages::ui_events::key_to_ui_event;
use fetchdeck_tui::ui::{self, Presentation};
use fetchdeck_tui::{
    Account, AppActor, AppState, Article, Config, Detail, Photo, RenderState, ReqwestTransport,
    Resource, ResourceView, UiEvent,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = Config::default_path();
    let (config, config_error) = match Config::load_from(&config_path) {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };

    // Initialize logging to file
    let _log_guard = init_logging(&config);
    if let Some(err) = config_error {
        tracing::warn!(
            path = %config_path.display(),
            error = %format!("{:#}", err),
            "Ignoring invalid config, using defaults"
        );
    }
    tracing::info!(base_url = %config.base_url, "Starting {} {}", APP_NAME, APP_VERSION);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _terminal_guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn app actor
    let transport = Arc::new(ReqwestTransport::new(config.request_timeout()));
    let app_actor = AppActor::new(AppState::new(config, transport), render_tx);
    tokio::spawn(app_actor.run(ui_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

fn init_logging(config: &Config) -> tracing_appender::non_blocking::WorkerGuard {
    let path = config.log_file.as_path();
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path.file_name().unwrap_or(OsStr::new(DEFAULT_LOG_FILE));

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    guard
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();
    let mut tick: usize = 0;

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state, tick))?;
        tick = tick.wrapping_add(1);

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.show_help,
                    current_state.detail.is_some(),
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState, tick: usize) {
    let area = f.area();

    // Main layout with tab bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_tab_bar(f, state, main_chunks[0], tick);

    let content = main_chunks[1];
    match state.active_tab {
        Resource::Posts => draw_collection(f, &state.posts, Resource::Posts, content, tick, post_row),
        Resource::Users => draw_collection(f, &state.users, Resource::Users, content, tick, user_row),
        Resource::Photos => draw_collection(f, &state.photos, Resource::Photos, content, tick, photo_row),
    }

    draw_status_bar(f, state, main_chunks[2]);

    // Popups
    if let Some(detail) = &state.detail {
        draw_detail_popup(f, detail, state.detail_scroll, area);
    }

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_tab_bar(f: &mut Frame, state: &RenderState, area: Rect, tick: usize) {
    let titles: Vec<Line> = Resource::ALL
        .iter()
        .map(|resource| {
            let marker = if state.is_loading(*resource) {
                format!(" {}", ui::spinner_frame(tick))
            } else {
                String::new()
            };
            Line::from(format!(" {}:{}{} ", resource.index() + 1, resource.title(), marker))
        })
        .collect();

    f.render_widget(ui::render_tabs(titles, state.active_tab.index()), area);
}

/// Draw one resource tab in whichever presentation its state calls for
fn draw_collection<T>(
    f: &mut Frame,
    view: &ResourceView<T>,
    resource: Resource,
    area: Rect,
    tick: usize,
    row: fn(&T, usize) -> ListItem<'static>,
) {
    let noun = resource.title().to_lowercase();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ui::state_color(&view.state)));

    match ui::presentation(view) {
        Presentation::Spinner => {
            let text = vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("{} Loading {}...", ui::spinner_frame(tick), noun),
                    Style::default().fg(Color::Yellow),
                )),
                Line::from(Span::styled(
                    view.endpoint.clone(),
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            let spinner = Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(block.title(format!(" {} ", resource.title())));
            f.render_widget(spinner, area);
        }
        Presentation::Error(err) => {
            let text = vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("Could not load {}", noun),
                    Style::default().fg(Color::Red).bold(),
                )),
                Line::from(""),
                Line::from(err.to_string()),
                Line::from(""),
                Line::from(Span::styled(
                    "Press 'r' to retry",
                    Style::default().fg(Color::Yellow),
                )),
            ];
            let panel = Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block.title(format!(" {} - {} ", resource.title(), err.kind())));
            f.render_widget(panel, area);
        }
        Presentation::Empty => {
            let text = vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("No {} to show", noun),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Press 'l' to load",
                    Style::default().fg(Color::Yellow),
                )),
            ];
            let panel = Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(block.title(format!(" {} ", resource.title())));
            f.render_widget(panel, area);
        }
        Presentation::List { refreshing } => {
            let width = area.width.saturating_sub(4) as usize;
            let items: Vec<ListItem> = view
                .visible_items()
                .iter()
                .map(|item| row(item, width))
                .collect();

            let title = if refreshing {
                format!(
                    " {} ({}) {} refreshing ",
                    resource.title(),
                    items.len(),
                    ui::spinner_frame(tick)
                )
            } else {
                format!(" {} ({}) ", resource.title(), items.len())
            };

            let list = List::new(items)
                .block(block.title(title))
                .highlight_style(Style::default().bg(Color::DarkGray).bold())
                .highlight_symbol("> ");

            let mut list_state = ListState::default();
            list_state.select(Some(view.selected));
            f.render_stateful_widget(list, area, &mut list_state);
        }
    }
}

fn post_row(article: &Article, width: usize) -> ListItem<'static> {
    ListItem::new(vec![
        Line::from(Span::styled(
            ui::truncate(&article.title, width),
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(Span::styled(
            ui::truncate(ui::first_line(&article.body), width),
            Style::default().fg(Color::Gray),
        )),
        Line::from(vec![
            Span::styled(format!("user {}", article.user_id), Style::default().fg(Color::Blue)),
            Span::styled(format!("  #{}", article.id), Style::default().fg(Color::DarkGray)),
        ]),
    ])
}

fn user_row(account: &Account, width: usize) -> ListItem<'static> {
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(
                format!("[{}] ", account.initial()),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ),
            Span::styled(
                ui::truncate(&account.name, width.saturating_sub(4)),
                Style::default().fg(Color::White).bold(),
            ),
        ]),
        Line::from(vec![
            Span::styled(account.handle(), Style::default().fg(Color::Gray)),
            Span::raw("  "),
            Span::styled(account.email.clone(), Style::default().fg(Color::Blue)),
        ]),
    ])
}

fn photo_row(photo: &Photo, width: usize) -> ListItem<'static> {
    ListItem::new(vec![
        Line::from(Span::styled(
            ui::truncate(&photo.title, width),
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(Span::styled(
            format!("{}  #{}", photo.album_label(), photo.id),
            Style::default().fg(Color::DarkGray),
        )),
    ])
}

fn draw_detail_popup(f: &mut Frame, detail: &Detail, scroll: u16, area: Rect) {
    let popup_area = centered_rect(70, 70, area);

    let heading = Style::default().fg(Color::Cyan).bold();
    let dim = Style::default().fg(Color::DarkGray);

    let (title, lines) = match detail {
        Detail::Post(article) => (
            format!(" Post #{} ", article.id),
            vec![
                Line::from(Span::styled(article.title.clone(), Style::default().bold())),
                Line::from(Span::styled(format!("by user {}", article.user_id), dim)),
                Line::from(""),
            ]
            .into_iter()
            .chain(article.body.lines().map(|line| Line::from(line.to_string())))
            .collect::<Vec<_>>(),
        ),
        Detail::User(account) => (
            format!(" {} ", account.name),
            vec![
                Line::from(vec![
                    Span::styled(account.name.clone(), Style::default().bold()),
                    Span::raw("  "),
                    Span::styled(account.handle(), dim),
                ]),
                Line::from(""),
                Line::from(Span::styled("Contact", heading)),
                Line::from(format!("  Email:   {}", account.email)),
                Line::from(format!("  Phone:   {}", account.phone)),
                Line::from(format!("  Website: {}", account.website)),
                Line::from(""),
                Line::from(Span::styled("Address", heading)),
                Line::from(format!("  {}", account.address.street_line())),
                Line::from(format!("  {}", account.address.city_line())),
                Line::from(""),
                Line::from(Span::styled("Company", heading)),
                Line::from(format!("  {}", account.organization.name)),
                Line::from(Span::styled(
                    format!("  \"{}\"", account.organization.slogan),
                    Style::default().italic(),
                )),
                Line::from(Span::styled(format!("  {}", account.organization.tagline), dim)),
            ],
        ),
        Detail::Photo(photo) => (
            format!(" Photo #{} ", photo.id),
            vec![
                Line::from(Span::styled(photo.title.clone(), Style::default().bold())),
                Line::from(Span::styled(photo.album_label(), dim)),
                Line::from(""),
                Line::from(Span::styled("Image", heading)),
                Line::from(format!("  {}", photo.url)),
                Line::from(Span::styled("Thumbnail", heading)),
                Line::from(format!("  {}", photo.thumbnail_url)),
            ],
        ),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_bottom(" Esc:close | ↑↓:scroll ")
        .style(Style::default().bg(Color::Black));

    let popup = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    f.render_widget(Clear, popup_area);
    f.render_widget(popup, popup_area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let tab = state.active_tab;
    let updated = state
        .loaded_at(tab)
        .map(|at| format!(" | updated {}", at.with_timezone(&chrono::Local).format("%H:%M:%S")))
        .unwrap_or_default();

    let status = format!(
        " {}{} | 1-3:tab | ↑↓:select | Enter:open | r:retry | l:load | R:refresh | ?:help | q:quit ",
        state.label(tab),
        updated
    );

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 TABS
   1 / 2 / 3          Posts / Users / Photos
   Tab / Shift+Tab    Next / previous tab

 LIST
   ↑ / ↓  (k / j)     Move selection
   Enter              Open details
   Esc                Close details

 LOADING
   l                  Load an empty tab
   r                  Retry after an error
   R                  Refresh a loaded tab

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} {} - Help ", APP_NAME, APP_VERSION))
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
