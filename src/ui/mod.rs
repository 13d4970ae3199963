//! Terminal UI components
//!
//! Built with ratatui. Rendering is a pure function of [`App`] state.

pub mod detail;
pub mod results;
pub mod theme;
pub mod watchlist;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus, InputMode};
use crate::session::{ToastKind, View};

/// Longest message block shown above the body
const MAX_MESSAGE_LINES: usize = 4;

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default().style(Style::default().bg(Theme::BACKGROUND)),
        area,
    );

    let messages = message_lines(app);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                     // Header
            Constraint::Length(messages.len() as u16), // Messages
            Constraint::Min(1),                        // Body
            Constraint::Length(1),                     // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    if !messages.is_empty() {
        frame.render_widget(Paragraph::new(messages).wrap(Wrap { trim: false }), chunks[1]);
    }
    render_body(frame, chunks[2], app);
    render_status_bar(frame, chunks[3], app);

    if let Some(label) = &app.busy {
        render_busy(frame, area, label);
    }
}

/// Header with logo and search box
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(14), Constraint::Min(1)])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled("CINE", Theme::title()),
        Span::styled(
            "LIST",
            Style::default()
                .fg(Theme::SECONDARY)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(logo, header_chunks[0]);

    let editing = app.input_mode == InputMode::Editing;
    let search_text = if editing {
        let (before, after) = app.query.split();
        format!("⌕ {}│{}", before, after)
    } else if app.query.text.is_empty() {
        "⌕ Press / to search titles...".to_string()
    } else {
        format!("⌕ {}", app.query.text)
    };

    let search_box = Paragraph::new(search_text)
        .style(if editing {
            Theme::input().fg(Theme::PRIMARY)
        } else {
            Theme::input()
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if editing {
                    Theme::border_focused()
                } else {
                    Theme::border()
                })
                .title(Span::styled(" SEARCH ", Theme::title())),
        );
    frame.render_widget(search_box, header_chunks[1]);
}

/// Error, info and toast lines, in that order
fn message_lines(app: &App) -> Vec<Line<'static>> {
    let session = &app.session;
    let mut lines = Vec::new();

    if let Some(err) = &session.error_message {
        for (i, text) in err.lines().enumerate() {
            let prefix = if i == 0 { "✗ " } else { "  " };
            lines.push(Line::from(Span::styled(format!("{}{}", prefix, text), Theme::error())));
        }
    }
    if let Some(info) = &session.info_message {
        lines.push(Line::from(Span::styled(format!("ℹ {}", info), Theme::info())));
    }
    if let Some(toast) = &session.toast {
        let (icon, style) = match toast.kind {
            ToastKind::Success => ("✓", Theme::success()),
            ToastKind::Info => ("ℹ", Theme::info()),
            ToastKind::Error => ("✗", Theme::error()),
        };
        lines.push(Line::from(Span::styled(format!("{} {}", icon, toast.text), style)));
    }

    lines.truncate(MAX_MESSAGE_LINES);
    lines
}

/// Main pane plus watchlist sidebar
fn render_body(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
        .split(area);

    let main_focused = app.focus == Focus::Main && app.input_mode == InputMode::Normal;
    let session = &app.session;

    match session.view() {
        View::Idle => render_welcome(frame, columns[0]),
        View::Results(results) => {
            results::render(frame, columns[0], results, &app.results_list, main_focused)
        }
        View::Detail(title) => detail::render(
            frame,
            columns[0],
            title,
            session.streaming_message.as_ref(),
            session.watchlist.contains(&title.id),
            main_focused,
        ),
    }

    watchlist::render(
        frame,
        columns[1],
        &session.watchlist,
        &app.watchlist_list,
        app.focus == Focus::Watchlist,
    );
}

fn render_welcome(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(" Movie Search & Watchlist ", Theme::title()));

    let keys = [
        ("  /  ", "Search for movies & shows"),
        (" ↑↓  ", "Navigate lists"),
        ("  ↵  ", "Open details"),
        ("  a  ", "Add to watchlist"),
        (" tab ", "Switch to watchlist"),
        ("  d  ", "Remove from watchlist"),
        ("  q  ", "Quit"),
    ];

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("e.g. The Dark Knight", Theme::dimmed())),
        Line::from(""),
    ];
    lines.extend(keys.iter().map(|(key, desc)| {
        Line::from(vec![
            Span::styled(*key, Theme::keybind()),
            Span::styled(*desc, Theme::dimmed()),
        ])
    }));

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}

/// Status bar with mode and key hints
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::PRIMARY),
        ),
        InputMode::Editing => Span::styled(
            " INSERT ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::ACCENT),
        ),
    };

    let hints = match (app.focus, app.session.view()) {
        (_, _) if app.input_mode == InputMode::Editing => " ↵:search  esc:cancel ",
        (Focus::Watchlist, _) => " ↑↓:move  d:remove  tab/esc:back ",
        (Focus::Main, View::Detail(_)) => " a:add  esc:back  tab:watchlist  q:quit ",
        (Focus::Main, View::Results(_)) => " ↵:details  /:search  tab:watchlist  q:quit ",
        (Focus::Main, View::Idle) => " /:search  q:quit ",
    };

    let status = Paragraph::new(Line::from(vec![
        mode,
        Span::styled(hints, Theme::dimmed()),
    ]))
    .style(Theme::status_bar());
    frame.render_widget(status, area);
}

/// Centered overlay while an action runs
fn render_busy(frame: &mut Frame, area: Rect, label: &str) {
    let width = (label.chars().count() as u16 + 6).min(area.width);
    let height = 3.min(area.height);
    let popup = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, popup);
    let widget = Paragraph::new(format!("⟳ {}", label))
        .style(Theme::loading())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border_focused())
                .style(Style::default().bg(Theme::BACKGROUND)),
        );
    frame.render_widget(widget, popup);
}
