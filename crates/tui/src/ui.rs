//! Table and detail pane rendering.

use logfold_engine::{field_text, State, TREND_BUCKETS};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::spark::spark;

/// Draw one frame: the group table, plus the detail pane when open.
///
/// Everything rendered is copied out of `state` while the caller's read
/// guard is held, so a frame is always one consistent view of the store.
pub fn draw(frame: &mut Frame, state: &State, app: &mut App) {
    app.clamp(state.len());

    let area = frame.area();
    if app.detail_open() {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        draw_table(frame, panes[0], state, app);
        draw_detail(frame, panes[1], state, app);
    } else {
        draw_table(frame, area, state, app);
    }
}

fn draw_table(frame: &mut Frame, area: Rect, state: &State, app: &mut App) {
    let keys = state.keys();

    let mut header_cells = vec![Cell::from("trend"), Cell::from("count")];
    header_cells.extend(keys.iter().map(|key| Cell::from(key.clone())));
    let header = Row::new(header_cells).style(Style::default().bg(Color::Red).fg(Color::Black));

    let mut rows = Vec::with_capacity(state.len());
    for i in 0..state.len() {
        let Some(group) = state.get(i) else { break };

        let mut counts = group.trend().counts();
        counts.reverse();
        let trend = format!("{:>width$}", spark(&counts), width = TREND_BUCKETS);

        let mut cells = vec![Cell::from(trend), Cell::from(group.count().to_string())];
        let record = group.latest();
        cells.extend(keys.iter().map(|key| Cell::from(field_text(record, key))));
        rows.push(Row::new(cells));
    }

    let mut widths = vec![
        Constraint::Length(TREND_BUCKETS as u16),
        Constraint::Length(8),
    ];
    widths.extend(keys.iter().map(|_| Constraint::Fill(1)));

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(table, area, app.table_state());
}

fn draw_detail(frame: &mut Frame, area: Rect, state: &State, app: &App) {
    let Some(group) = state.get(app.selected()) else {
        return;
    };
    let pretty = serde_json::to_string_pretty(group.latest())
        .unwrap_or_else(|err| format!("unrenderable record: {err}"));

    let pane = Paragraph::new(pretty)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("record"));
    frame.render_widget(pane, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use logfold_engine::{Config, Record, Store};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn rec(message: &str) -> Record {
        serde_json::json!({ "message": message })
            .as_object()
            .cloned()
            .unwrap()
    }

    fn rendered_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn table_shows_headers_and_groups() {
        let store = Store::new(Config {
            keys: vec!["message".to_string()],
            ..Config::default()
        })
        .unwrap();
        store.write().push(rec("read timeout"));
        store.write().push(rec("read timeout"));
        store.write().push(rec("disk full"));

        let mut terminal = Terminal::new(TestBackend::new(70, 10)).unwrap();
        let mut app = App::new();
        terminal
            .draw(|frame| draw(frame, &store.read(), &mut app))
            .unwrap();

        let text = rendered_text(&terminal);
        assert!(text.contains("trend"));
        assert!(text.contains("count"));
        assert!(text.contains("message"));
        assert!(text.contains("read timeout"));
        assert!(text.contains("disk full"));
    }

    #[test]
    fn detail_pane_shows_the_selected_record() {
        let store = Store::new(Config {
            keys: vec!["message".to_string()],
            ..Config::default()
        })
        .unwrap();
        store.write().push(rec("read timeout"));

        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        let mut app = App::new();
        app.on_event(
            &crossterm::event::Event::Key(crossterm::event::KeyEvent::new(
                crossterm::event::KeyCode::Enter,
                crossterm::event::KeyModifiers::NONE,
            )),
            1,
        );
        terminal
            .draw(|frame| draw(frame, &store.read(), &mut app))
            .unwrap();

        let text = rendered_text(&terminal);
        assert!(text.contains("record"));
        assert!(text.contains("\"message\""));
    }

    #[test]
    fn empty_store_renders_without_rows() {
        let store = Store::new(Config::default()).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        let mut app = App::new();
        terminal
            .draw(|frame| draw(frame, &store.read(), &mut app))
            .unwrap();

        let text = rendered_text(&terminal);
        assert!(text.contains("trend"));
        assert!(text.contains("count"));
    }
}
