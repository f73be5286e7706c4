// App state and main event loop.
// Holds the resolved cards and handles keyboard navigation between them.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::ListState;

use crate::cards::CardView;
use crate::reconcile::Source;
use crate::session::CardGroup;
use crate::ui;

/// One card in the browser with the request it came from.
#[derive(Debug, Clone)]
pub struct CardItem {
    pub request: String,
    pub source: Source,
    pub view: CardView,
}

/// Main application state.
pub struct App {
    pub items: Vec<CardItem>,
    pub list_state: ListState,
    /// Error that ended the processing pass early, shown in the status bar.
    pub error: Option<String>,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(groups: Vec<CardGroup>, error: Option<String>) -> Self {
        let items: Vec<CardItem> = groups
            .into_iter()
            .flat_map(|group| {
                let request = group.request.label();
                let source = group.source;
                group.cards.into_iter().map(move |view| CardItem {
                    request: request.clone(),
                    source,
                    view,
                })
            })
            .collect();

        let mut list_state = ListState::default();
        if !items.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            items,
            list_state,
            error,
            show_help: false,
            should_quit: false,
        }
    }

    pub fn selected(&self) -> Option<&CardItem> {
        self.list_state.selected().and_then(|i| self.items.get(i))
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        if self.show_help {
            if matches!(code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }

        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Home | KeyCode::Char('g') => self.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.select_last(),
            _ => {}
        }
    }

    fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i >= self.items.len() - 1 => i,
            Some(i) => i + 1,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn select_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(i));
    }

    fn select_first(&mut self) {
        if !self.items.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    fn select_last(&mut self) {
        if !self.items.is_empty() {
            self.list_state.select(Some(self.items.len() - 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardRequest, CardTarget};
    use crate::github::{Languages, mock::sample_repo};
    use crate::record::RepoRecord;

    fn group(names: &[&str]) -> CardGroup {
        CardGroup {
            request: CardRequest {
                user: "octocat".to_string(),
                target: CardTarget::AllRepos { sort: None },
            },
            cards: names
                .iter()
                .map(|name| {
                    CardView::from(&RepoRecord::assemble(
                        sample_repo("octocat", name),
                        vec![],
                        Languages::new(),
                        0,
                    ))
                })
                .collect(),
            source: Source::Cache,
        }
    }

    #[test]
    fn test_flattens_groups_and_selects_first() {
        let app = App::new(vec![group(&["a", "b"]), group(&["c"])], None);

        assert_eq!(app.items.len(), 3);
        assert_eq!(app.selected().unwrap().view.name, "a");
        assert_eq!(app.items[2].request, "octocat/%all");
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut app = App::new(vec![group(&["a", "b"])], None);

        app.handle_key(KeyCode::Char('k'));
        assert_eq!(app.list_state.selected(), Some(0));

        app.handle_key(KeyCode::Char('j'));
        app.handle_key(KeyCode::Down);
        assert_eq!(app.list_state.selected(), Some(1));

        app.handle_key(KeyCode::Char('g'));
        assert_eq!(app.list_state.selected(), Some(0));
        app.handle_key(KeyCode::Char('G'));
        assert_eq!(app.list_state.selected(), Some(1));
    }

    #[test]
    fn test_help_swallows_keys_until_closed() {
        let mut app = App::new(vec![], None);

        app.handle_key(KeyCode::Char('?'));
        assert!(app.show_help);

        app.handle_key(KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(!app.should_quit);

        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
