//! Rendering - reads store snapshots, never mutates them

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;

/// Render the entire application UI
pub fn render(app: &App, f: &mut Frame) {
    let area = f.area();
    let log_height = if app.config.show_log_panel { 10 } else { 0 };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(5),
            Constraint::Length(log_height),
            Constraint::Length(1),
        ])
        .split(area);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[0]);

    render_vanilla(app, panels[0], f);
    render_counter(app, panels[1], f);
    render_async_counter(app, panels[2], f);
    render_todos(app, rows[1], f);
    if app.config.show_log_panel {
        render_log(app, rows[2], f);
    }
    render_help(rows[3], f);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
}

fn render_vanilla(app: &App, area: Rect, f: &mut Frame) {
    let state = app.vanilla.state();
    let switch = if *state.toggle {
        Span::styled("● on", Style::default().fg(Color::Green).bold())
    } else {
        Span::styled("○ off", Style::default().fg(Color::DarkGray))
    };

    let lines = vec![
        Line::from(vec![Span::raw("toggle  "), switch]),
        Line::from(vec![
            Span::raw("counter "),
            Span::styled(state.counter.to_string(), Style::default().bold()),
        ]),
    ];
    f.render_widget(Paragraph::new(lines).block(panel("Vanilla")), area);
}

fn render_counter(app: &App, area: Rect, f: &mut Frame) {
    let number = app.root.reader().select(|state| state.counter.number);
    let line = Line::from(vec![
        Span::raw("number "),
        Span::styled(number.to_string(), Style::default().bold()),
    ]);
    f.render_widget(Paragraph::new(line).block(panel("Counter")), area);
}

fn render_async_counter(app: &App, area: Rect, f: &mut Frame) {
    let value = app.async_counter.state();
    let lines = vec![
        Line::from(vec![
            Span::raw("value "),
            Span::styled(value.to_string(), Style::default().bold()),
        ]),
        Line::from(Span::styled(
            format!("applies after {} ms", app.config.async_delay_ms),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(lines).block(panel("Async counter")), area);
}

fn render_todos(app: &App, area: Rect, f: &mut Frame) {
    let state = app.root.state();
    let items: Vec<ListItem> = state
        .todos
        .todos
        .iter()
        .enumerate()
        .map(|(index, todo)| {
            let mark = if todo.done { "[x]" } else { "[ ]" };
            let mut style = if todo.done {
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };
            if index == app.todo_cursor {
                style = style.bg(Color::Blue).fg(Color::White);
            }
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", mark), style),
                Span::styled(format!("#{} {}", todo.id, todo.text), style),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(panel("Todos")), area);
}

fn render_log(app: &App, area: Rect, f: &mut Frame) {
    let available_height = area.height.saturating_sub(2) as usize; // -2 for borders
    let entries = app.journal.entries();
    let start_index = entries.len().saturating_sub(available_height);

    let lines: Vec<Line> = entries[start_index..]
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled(format!("{:<24}", entry.kind), Style::default().fg(Color::Yellow)),
                Span::raw(format!("{} → {}", entry.prev_state, entry.next_state)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(panel("Action log (ctrl+l to clear)")), area);
}

fn render_help(area: Rect, f: &mut Frame) {
    let help = "t toggle  +/- vanilla  u/d counter  n/space/x todo  j/k move  a/z async  q quit";
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(help, Style::default().fg(Color::DarkGray)))),
        area,
    );
}
