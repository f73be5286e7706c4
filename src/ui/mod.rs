// UI module for rendering the card browser.
// Lays out the title bar, card list, selected card, status bar, and help overlay.

mod card;
mod list;

use ratatui::{prelude::*, widgets::*};

use crate::app::App;

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_title(frame, chunks[0]);
    draw_content(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

fn draw_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        " repocards ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(title, area);
}

/// Card list on the left, selected card on the right.
fn draw_content(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    list::render_cards_list(frame, app, chunks[0]);

    match app.selected() {
        Some(item) => card::draw_card(frame, item, chunks[1]),
        None => {
            let block = Block::default().borders(Borders::ALL).title(" Card ");
            frame.render_widget(block, chunks[1]);
        }
    }
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = match &app.error {
        Some(error) => Line::from(Span::styled(
            format!(" ❌ {}", error),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(vec![
            Span::styled(" j/k", Style::default().fg(Color::Cyan)),
            Span::raw(" move  "),
            Span::styled("?", Style::default().fg(Color::Cyan)),
            Span::raw(" help  "),
            Span::styled("q", Style::default().fg(Color::Cyan)),
            Span::raw(" quit"),
        ]),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Create a centered popup
    let popup_width = 44.min(area.width);
    let popup_height = 13.min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan));
    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![key("  ↑/↓ or j/k    "), Span::raw("Select card")]),
        Line::from(vec![key("  Home/End g/G  "), Span::raw("First / last card")]),
        Line::from(vec![key("  ?             "), Span::raw("Show/hide this help")]),
        Line::from(vec![key("  q             "), Span::raw("Quit")]),
        Line::from(""),
        Line::from(vec![
            Span::styled("● ", Style::default().fg(Color::Blue)),
            Span::raw("from cache   "),
            Span::styled("● ", Style::default().fg(Color::Green)),
            Span::raw("fetched"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardRequest, CardTarget, CardView};
    use crate::github::{Languages, mock::sample_repo};
    use crate::reconcile::Source;
    use crate::record::RepoRecord;
    use crate::session::CardGroup;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_draw_selected_card() {
        let record = RepoRecord::assemble(
            sample_repo("octocat", "Hello-World"),
            vec!["demo".to_string()],
            Languages::from([("Rust".to_string(), 10)]),
            3,
        );
        let group = CardGroup {
            request: CardRequest {
                user: "octocat".to_string(),
                target: CardTarget::Single("hello-world".to_string()),
            },
            cards: vec![CardView::from(&record)],
            source: Source::Fetched,
        };
        let mut app = App::new(vec![group], None);
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();

        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Hello-World"));
        assert!(text.contains("octocat/hello-world"));
        assert!(text.contains("Rust"));
    }

    #[test]
    fn test_draw_error_and_empty_state() {
        let mut app = App::new(vec![], Some("boom".to_string()));
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();

        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("No repositories to show"));
        assert!(text.contains("boom"));
    }
}
