// Card list rendering.
// Left-hand list of every resolved card, with an empty state.

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, CardItem};
use crate::reconcile::Source;

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(" Repos "));
    frame.render_widget(text, area);
}

fn source_marker(source: Source) -> Span<'static> {
    match source {
        Source::Cache => Span::styled("● ", Style::default().fg(Color::Blue)),
        Source::Fetched => Span::styled("● ", Style::default().fg(Color::Green)),
    }
}

fn card_line(item: &CardItem) -> Line<'_> {
    Line::from(vec![
        source_marker(item.source),
        Span::styled(
            item.view.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ★ {}", item.view.stars),
            Style::default().fg(Color::Yellow),
        ),
    ])
}

/// Render the list of cards.
pub fn render_cards_list(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.items.is_empty() {
        render_empty(frame, area, "No repositories to show");
        return;
    }

    let items: Vec<ListItem> = app.items.iter().map(|i| ListItem::new(card_line(i))).collect();
    let title = format!(" Repos ({}) ", app.items.len());

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}
