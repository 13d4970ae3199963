//! Title detail view
//!
//! Metadata for the selected title plus its streaming availability.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::models::Title;
use crate::session::StreamingMessage;
use crate::ui::Theme;

/// Render the detail pane for `title`
pub fn render(
    frame: &mut Frame,
    area: Rect,
    title: &Title,
    streaming: Option<&StreamingMessage>,
    in_watchlist: bool,
    focused: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(" Details ", Theme::title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(5)])
        .split(inner);

    render_info(frame, chunks[0], title, in_watchlist);
    render_streaming(frame, chunks[1], streaming);
}

fn field(label: &'static str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), Theme::label()),
        Span::styled(value.into(), Theme::text()),
    ])
}

fn render_info(frame: &mut Frame, area: Rect, title: &Title, in_watchlist: bool) {
    let year = title
        .start_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} ({})", title.display_title(), year),
            Theme::accent(),
        )),
        Line::from(Span::styled(format!("IMDb ID: {}", title.id), Theme::dimmed())),
        Line::from(""),
        field("Rating", title.rating_line()),
        field("Genres", title.genres_line()),
    ];
    if !title.title_type.is_empty() {
        lines.push(field("Type", title.title_type.clone()));
    }
    if let Some(url) = &title.primary_image {
        lines.push(field("Poster", url.clone()));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Description", Theme::label())));
    lines.push(Line::from(Span::styled(
        title
            .description
            .clone()
            .unwrap_or_else(|| "No description available.".to_string()),
        Theme::text(),
    )));
    lines.push(Line::from(""));

    let watchlist_hint = if in_watchlist {
        Line::from(Span::styled("✓ In your watchlist", Theme::success()))
    } else {
        Line::from(vec![
            Span::styled(" a ", Theme::keybind()),
            Span::styled("Add to watchlist", Theme::dimmed()),
        ])
    };
    lines.push(Line::from(vec![
        Span::styled(" esc ", Theme::keybind()),
        Span::styled("Back to search results", Theme::dimmed()),
    ]));
    lines.push(watchlist_hint);

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_streaming(frame: &mut Frame, area: Rect, streaming: Option<&StreamingMessage>) {
    let (text, style) = match streaming {
        None => ("No streaming information fetched yet.".to_string(), Theme::dimmed()),
        Some(StreamingMessage::Info(text)) => (text.clone(), Theme::info()),
        Some(StreamingMessage::Error(text)) => (format!("⚠ {}", text), Theme::warning()),
    };

    let panel = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Theme::border())
                .title(Span::styled(" Streaming Availability ", Theme::title())),
        );
    frame.render_widget(panel, area);
}
