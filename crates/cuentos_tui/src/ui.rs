//! UI rendering for TUI.

use crate::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

/// Draw the main UI.
#[tracing::instrument(skip_all)]
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(5), // Status
            Constraint::Min(0),    // Candidates
            Constraint::Length(3), // Help bar
        ])
        .split(f.area());

    draw_header(f, chunks[0]);
    draw_status(f, app, chunks[1]);
    draw_candidates(f, app, chunks[2]);
    draw_help_bar(f, app, chunks[3]);

    if app.modal.is_visible() {
        draw_story(f, app);
    }
}

/// Draw the header.
fn draw_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("Cuentos")
        .block(Block::default().borders(Borders::ALL))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

/// Draw the shared status region.
fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let status = Paragraph::new(app.status.text())
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(status, area);
}

/// Draw the candidate list under its heading.
#[tracing::instrument(skip_all)]
fn draw_candidates(f: &mut Frame, app: &App, area: Rect) {
    let Some(list) = app.selection.list() else {
        f.render_widget(Block::default().borders(Borders::ALL), area);
        return;
    };

    let armed = app.selection.is_armed();
    let items: Vec<ListItem> = list
        .items()
        .iter()
        .map(|candidate| {
            let focused = app.selection.focus() == Some(*candidate.index());
            let style = match (focused, armed) {
                (true, true) => Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                (true, false) => Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                (false, true) => Style::default(),
                (false, false) => Style::default().fg(Color::DarkGray),
            };
            ListItem::new(format!("{}. {}", candidate.index() + 1, candidate.text())).style(style)
        })
        .collect();

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(list.kind().heading());
    if let Some(notice) = &app.notice {
        block = block.title_bottom(Line::from(notice.as_str()).right_aligned());
    }
    f.render_widget(List::new(items).block(block), area);
}

/// Draw the help bar.
fn draw_help_bar(f: &mut Frame, app: &App, area: Rect) {
    let help_text = if app.modal.is_visible() {
        "Esc/x: Close story | q: Quit"
    } else if app.selection.is_armed() {
        "↑↓: Navigate | Enter: Choose | 1-9: Choose directly | q: Quit"
    } else {
        "q: Quit"
    };
    let help = Paragraph::new(help_text)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray));
    f.render_widget(help, area);
}

/// Draw the story surface over everything else.
#[tracing::instrument(skip_all)]
fn draw_story(f: &mut Frame, app: &App) {
    let area = centered(f.area(), 80, 70);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    f.render_widget(Clear, area);

    let story = Paragraph::new(app.modal.surface().text())
        .block(Block::default().borders(Borders::ALL).title("Your story"))
        .wrap(Wrap { trim: false });
    f.render_widget(story, chunks[0]);

    let audio = app
        .modal
        .audio()
        .loaded_source()
        .map(|source| source.as_str())
        .unwrap_or("none");
    let audio_line = Paragraph::new(Line::from(vec![
        Span::styled("♪ ", Style::default().fg(Color::Yellow)),
        Span::raw(audio),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Audio"));
    f.render_widget(audio_line, chunks[1]);
}

/// A rectangle of the given percentages, centered in `area`.
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    area
}
