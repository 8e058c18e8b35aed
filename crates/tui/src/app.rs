//! Interactive view state for the live table.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::widgets::TableState;

/// What the caller should do after an event is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep running.
    Continue,
    /// Tear down the terminal and exit.
    Quit,
}

/// Selection and pane state. The data itself lives in the store; this
/// only tracks where the cursor is and whether the detail pane is open.
#[derive(Debug)]
pub struct App {
    table: TableState,
    detail_open: bool,
}

impl Default for App {
    fn default() -> Self {
        Self {
            table: TableState::default().with_selected(0),
            detail_open: false,
        }
    }
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row index the cursor is on.
    pub fn selected(&self) -> usize {
        self.table.selected().unwrap_or(0)
    }

    /// Whether the detail pane is open.
    pub fn detail_open(&self) -> bool {
        self.detail_open
    }

    pub(crate) fn table_state(&mut self) -> &mut TableState {
        &mut self.table
    }

    /// Keep the selection inside `0..rows`. Rows only ever grow, but the
    /// first frames may render before any data has arrived. A cleared
    /// selection stays cleared until a key restores it.
    pub(crate) fn clamp(&mut self, rows: usize) {
        let Some(selected) = self.table.selected() else {
            return;
        };
        if rows == 0 {
            self.table.select(Some(0));
        } else if selected >= rows {
            self.table.select(Some(rows - 1));
        }
    }

    /// Apply one terminal event against a table of `rows` rows.
    pub fn on_event(&mut self, event: &Event, rows: usize) -> Action {
        let Event::Key(key) = event else {
            return Action::Continue;
        };
        if key.kind == KeyEventKind::Release {
            return Action::Continue;
        }
        self.on_key(*key, rows)
    }

    fn on_key(&mut self, key: KeyEvent, rows: usize) -> Action {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Up => {
                self.table.select(Some(self.selected().saturating_sub(1)));
                Action::Continue
            }
            KeyCode::Down => {
                match self.table.selected() {
                    None => self.table.select(Some(0)),
                    Some(selected) if selected + 1 < rows => {
                        self.table.select(Some(selected + 1));
                    }
                    Some(_) => {}
                }
                Action::Continue
            }
            KeyCode::Enter => {
                if rows > 0 {
                    if self.table.selected().is_none() {
                        self.table.select(Some(0));
                    }
                    self.detail_open = true;
                }
                Action::Continue
            }
            KeyCode::Esc => {
                if self.detail_open {
                    self.detail_open = false;
                } else {
                    self.table.select(None);
                }
                Action::Continue
            }
            _ => Action::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn q_and_ctrl_c_quit() {
        let mut app = App::new();
        assert_eq!(app.on_event(&key(KeyCode::Char('q')), 0), Action::Quit);

        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(app.on_event(&ctrl_c, 0), Action::Quit);
    }

    #[test]
    fn plain_c_does_not_quit() {
        let mut app = App::new();
        assert_eq!(app.on_event(&key(KeyCode::Char('c')), 0), Action::Continue);
    }

    #[test]
    fn arrows_move_within_bounds() {
        let mut app = App::new();
        app.on_event(&key(KeyCode::Down), 3);
        app.on_event(&key(KeyCode::Down), 3);
        assert_eq!(app.selected(), 2);

        // Already on the last row.
        app.on_event(&key(KeyCode::Down), 3);
        assert_eq!(app.selected(), 2);

        app.on_event(&key(KeyCode::Up), 3);
        assert_eq!(app.selected(), 1);
        app.on_event(&key(KeyCode::Up), 3);
        app.on_event(&key(KeyCode::Up), 3);
        assert_eq!(app.selected(), 0);
    }

    #[test]
    fn enter_opens_and_esc_closes_the_detail_pane() {
        let mut app = App::new();
        app.on_event(&key(KeyCode::Enter), 2);
        assert!(app.detail_open());
        app.on_event(&key(KeyCode::Esc), 2);
        assert!(!app.detail_open());
        // Closing the pane leaves the cursor alone.
        assert_eq!(app.table.selected(), Some(0));
    }

    #[test]
    fn esc_clears_the_selection_and_arrows_restore_it() {
        let mut app = App::new();
        app.on_event(&key(KeyCode::Esc), 2);
        assert_eq!(app.table.selected(), None);

        app.on_event(&key(KeyCode::Down), 2);
        assert_eq!(app.table.selected(), Some(0));

        app.on_event(&key(KeyCode::Esc), 2);
        app.on_event(&key(KeyCode::Up), 2);
        assert_eq!(app.table.selected(), Some(0));
    }

    #[test]
    fn enter_restores_a_cleared_selection() {
        let mut app = App::new();
        app.on_event(&key(KeyCode::Esc), 2);
        app.on_event(&key(KeyCode::Enter), 2);
        assert!(app.detail_open());
        assert_eq!(app.table.selected(), Some(0));
    }

    #[test]
    fn enter_on_an_empty_table_does_nothing() {
        let mut app = App::new();
        app.on_event(&key(KeyCode::Enter), 0);
        assert!(!app.detail_open());
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut app = App::new();
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(app.on_event(&Event::Key(release), 0), Action::Continue);
    }
}
