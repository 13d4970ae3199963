//! Watchlist sidebar

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::app::ListState;
use crate::models::Watchlist;
use crate::ui::Theme;

pub fn render(frame: &mut Frame, area: Rect, watchlist: &Watchlist, list: &ListState, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(
            format!(" My Watchlist ({}) ", watchlist.len()),
            Theme::title(),
        ));

    if watchlist.is_empty() {
        let empty = Paragraph::new("Your watchlist is empty. Add titles from the details view.")
            .style(Theme::dimmed())
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2) as usize;
    let mut view = list.clone();
    view.scroll_into_view(visible_height);

    let items: Vec<ListItem> = watchlist
        .sorted()
        .into_iter()
        .enumerate()
        .skip(view.offset)
        .take(visible_height)
        .map(|(i, (_, entry))| {
            let is_selected = focused && i == view.selected;
            let year = entry
                .year
                .as_ref()
                .map(|y| format!(" ({})", y))
                .unwrap_or_default();
            let mut spans = vec![
                Span::styled(
                    entry.title.clone(),
                    if is_selected {
                        Theme::highlighted()
                    } else {
                        Theme::text()
                    },
                ),
                Span::styled(year, Theme::meta()),
            ];
            if !entry.title_type.is_empty() {
                spans.push(Span::styled(format!(" [{}]", entry.title_type), Theme::dimmed()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    frame.render_widget(List::new(items).block(block).style(Theme::text()), area);
}
