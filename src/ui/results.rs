//! Search results view
//!
//! Scrollable list of titles from the last search.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::app::ListState;
use crate::models::Title;
use crate::ui::Theme;

/// Render the results list into `area`
pub fn render(frame: &mut Frame, area: Rect, results: &[Title], list: &ListState, focused: bool) {
    let border_style = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Span::styled(
            format!(" Search Results ({}) ", results.len()),
            Theme::title(),
        ));

    if results.is_empty() {
        let empty = Paragraph::new("No results to display (matching the search or with valid IDs).")
            .style(Theme::dimmed())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2) as usize;
    let mut view = list.clone();
    view.scroll_into_view(visible_height);

    let items: Vec<ListItem> = results
        .iter()
        .enumerate()
        .skip(view.offset)
        .take(visible_height)
        .map(|(i, title)| render_item(title, i == view.selected))
        .collect();

    frame.render_widget(List::new(items).block(block).style(Theme::text()), area);
}

/// Format: ▸ Title (Year) [type] ★ 8.5
fn render_item(title: &Title, is_selected: bool) -> ListItem<'static> {
    let marker = if is_selected { "▸ " } else { "  " };
    let year = title
        .start_year
        .map(|y| format!(" ({})", y))
        .unwrap_or_default();

    let mut spans = vec![
        Span::styled(
            marker,
            if is_selected {
                Theme::accent()
            } else {
                Theme::dimmed()
            },
        ),
        Span::styled(
            title.display_title().to_string(),
            if is_selected {
                Theme::highlighted()
            } else {
                Theme::text()
            },
        ),
        Span::styled(year, Theme::meta()),
    ];

    if !title.title_type.is_empty() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!("[{}]", title.title_type), Theme::dimmed()));
    }
    if let Some(rating) = title.average_rating {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!("★ {:.1}", rating), Theme::rating(rating)));
    }

    ListItem::new(Line::from(spans))
}
