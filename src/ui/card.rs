// Repo card rendering.
// Detail pane showing every field of the selected card.

use ratatui::{prelude::*, widgets::*};

use crate::app::CardItem;
use crate::reconcile::Source;

fn label(text: &'static str) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::Cyan))
}

/// Draw the selected card.
pub fn draw_card(frame: &mut Frame, item: &CardItem, area: Rect) {
    let view = &item.view;

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                view.username.as_str(),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(" / "),
            Span::styled(
                view.name.as_str(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];

    if !view.description.is_empty() {
        lines.push(Line::from(view.description.as_str()));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled(format!("★ {}", view.stars), Style::default().fg(Color::Yellow)),
        Span::raw("   "),
        label("watchers "),
        Span::raw(view.watchers.to_string()),
        Span::raw("   "),
        label("forks "),
        Span::raw(view.forks.to_string()),
    ]));
    lines.push(Line::from(vec![
        label("updated   "),
        Span::raw(view.updated_at.as_str()),
    ]));

    if !view.languages.is_empty() {
        lines.push(Line::from(vec![
            label("languages "),
            Span::raw(view.languages.join(", ")),
        ]));
    }
    if !view.topics.is_empty() {
        let mut spans = vec![label("topics    ")];
        for topic in &view.topics {
            spans.push(Span::styled(
                format!(" {} ", topic),
                Style::default().fg(Color::Black).bg(Color::Blue),
            ));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    if !view.html_url.is_empty() {
        lines.push(Line::from(Span::styled(
            view.html_url.as_str(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if !view.avatar_url.is_empty() {
        lines.push(Line::from(vec![
            label("avatar    "),
            Span::styled(view.avatar_url.as_str(), Style::default().fg(Color::DarkGray)),
        ]));
    }

    let source = match item.source {
        Source::Cache => "cached",
        Source::Fetched => "fetched",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", item.request))
        .title_bottom(Line::from(format!(" {} ", source)).right_aligned());

    let card = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(card, area);
}
