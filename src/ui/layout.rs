//! Main UI layout and rendering for the notewalk TUI.
//!
//! Draws the header, tag bar, tree panel, and status bar, plus the help and
//! confirmation overlays when their modes are active.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, NavState};
use crate::ui::colors::ColorScheme;
use crate::ui::input::InputMode;
use crate::ui::tree_view::render_tree_view;

/// Application version string.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
const APP_NAME: &str = "notewalk";

/// Main render function that draws the entire UI.
pub fn render_ui(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Tag / bookmark bar
            Constraint::Min(1),    // Tree panel
            Constraint::Length(3), // Status bar
        ])
        .split(size);

    render_header(frame, main_layout[0], app);
    render_tag_bar(frame, main_layout[1], app);

    // The tree panel height drives paging and scroll clamping.
    app.viewport_height = main_layout[2].height.saturating_sub(2) as usize;
    render_tree_view(
        frame,
        main_layout[2],
        &app.rows,
        app.selected_index,
        app.scroll_offset,
        &app.color_scheme,
    );

    render_status_bar(frame, main_layout[3], app);

    match app.modes.current() {
        InputMode::Help => render_help_overlay(frame, size, &app.color_scheme),
        InputMode::Confirm(_) => render_confirm_overlay(frame, size, app),
        _ => {}
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let scheme = &app.color_scheme;
    let shown_path = if app.current_path.is_empty() { "(root)" } else { app.current_path.as_str() };

    let line = Line::from(vec![
        Span::styled(
            format!(" {APP_NAME} v{VERSION} "),
            Style::default().fg(scheme.header_fg).add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(scheme.border)),
        Span::styled(shown_path.to_string(), Style::default().fg(scheme.accent)),
    ]);

    let header = Paragraph::new(line)
        .style(Style::default().bg(scheme.header_bg))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(scheme.border)));
    frame.render_widget(header, area);
}

fn render_tag_bar(frame: &mut Frame, area: Rect, app: &App) {
    let scheme = &app.color_scheme;
    let mut spans: Vec<Span> = Vec::new();

    if app.tags.is_empty() && app.bookmarks.is_empty() {
        spans.push(Span::styled(" no tags or bookmarks", Style::default().fg(scheme.text_dim)));
    } else {
        for tag in &app.tags {
            spans.push(Span::styled(format!(" [{tag}]"), Style::default().fg(scheme.tag)));
        }
        for (label, path) in &app.bookmarks {
            spans.push(Span::styled(format!(" {label}→{path}"), Style::default().fg(scheme.accent)));
        }
    }

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(scheme.border))
            .title(" Tags & Bookmarks "),
    );
    frame.render_widget(bar, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let scheme = &app.color_scheme;

    let line = match app.modes.current() {
        InputMode::Goto => Line::from(vec![
            Span::styled(" goto: ", Style::default().fg(scheme.key_fg)),
            Span::styled(app.goto_input.clone(), Style::default().fg(scheme.text)),
            Span::styled("▏", Style::default().fg(scheme.accent)),
            Span::styled("  Enter to navigate, Esc to cancel", Style::default().fg(scheme.text_dim)),
        ]),
        InputMode::Confirm(_) => Line::from(Span::styled(
            " confirm: y / n",
            Style::default().fg(scheme.warning_fg),
        )),
        _ => status_line(app, scheme),
    };

    let status = Paragraph::new(line)
        .style(Style::default().fg(scheme.status_fg).bg(scheme.status_bg))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(scheme.border)));
    frame.render_widget(status, area);
}

fn status_line(app: &App, scheme: &ColorScheme) -> Line<'static> {
    if let Some(ref notice) = app.notice {
        let color = if notice.is_error { scheme.error_fg } else { scheme.text };
        return Line::from(Span::styled(format!(" {}", notice.text), Style::default().fg(color)));
    }

    match app.nav_state {
        NavState::Loading => {
            Line::from(Span::styled(" fetching…", Style::default().fg(scheme.warning_fg)))
        }
        NavState::Failed(ref msg) => {
            Line::from(Span::styled(format!(" {msg}"), Style::default().fg(scheme.error_fg)))
        }
        _ => Line::from(vec![
            Span::styled(" j/k", Style::default().fg(scheme.key_fg)),
            Span::styled(" move ", Style::default().fg(scheme.text_dim)),
            Span::styled("J/K", Style::default().fg(scheme.key_fg)),
            Span::styled(" siblings ", Style::default().fg(scheme.text_dim)),
            Span::styled("Enter", Style::default().fg(scheme.key_fg)),
            Span::styled(" reveal ", Style::default().fg(scheme.text_dim)),
            Span::styled("h", Style::default().fg(scheme.key_fg)),
            Span::styled(" collapse ", Style::default().fg(scheme.text_dim)),
            Span::styled("p", Style::default().fg(scheme.key_fg)),
            Span::styled(" goto ", Style::default().fg(scheme.text_dim)),
            Span::styled("?", Style::default().fg(scheme.key_fg)),
            Span::styled(" help ", Style::default().fg(scheme.text_dim)),
            Span::styled("q", Style::default().fg(scheme.key_fg)),
            Span::styled(" quit", Style::default().fg(scheme.text_dim)),
        ]),
    }
}

fn render_help_overlay(frame: &mut Frame, size: Rect, scheme: &ColorScheme) {
    let area = centered_rect(54, 18, size);
    frame.render_widget(Clear, area);

    let entries: &[(&str, &str)] = &[
        ("j / k, ↓ / ↑", "move selection"),
        ("J / K", "next / previous sibling"),
        ("Backspace", "jump to parent"),
        ("Enter, l, →", "navigate to node (fetch subtree)"),
        ("h, ←", "collapse loaded children"),
        ("g / G", "first / last row"),
        ("Ctrl-u / Ctrl-d", "page up / down"),
        ("p, /", "goto path"),
        ("r", "re-fetch current path"),
        ("d", "delete node from view"),
        ("q, Esc", "quit"),
    ];

    let mut lines = vec![Line::from("")];
    for (keys, what) in entries {
        lines.push(Line::from(vec![
            Span::styled(format!("  {keys:<16}"), Style::default().fg(scheme.key_fg)),
            Span::styled((*what).to_string(), Style::default().fg(scheme.text)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  any key to close",
        Style::default().fg(scheme.text_dim),
    )));

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(scheme.accent))
            .title(" Keys "),
    );
    frame.render_widget(help, area);
}

fn render_confirm_overlay(frame: &mut Frame, size: Rect, app: &App) {
    let scheme = &app.color_scheme;
    let area = centered_rect(50, 5, size);
    frame.render_widget(Clear, area);

    let target = app
        .selected_row()
        .map(|r| r.title.clone())
        .unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled(
            format!(" Remove \"{target}\" and its subtree from the view?"),
            Style::default().fg(scheme.text),
        )),
        Line::from(Span::styled(" y: yes   n: no", Style::default().fg(scheme.key_fg))),
    ];

    let dialog = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(scheme.warning_fg))
            .title(" Confirm "),
    );
    frame.render_widget(dialog, area);
}

/// Center a `width` x `height` rectangle inside `size`, clamped to fit.
fn centered_rect(width: u16, height: u16, size: Rect) -> Rect {
    let width = width.min(size.width);
    let height = height.min(size.height);
    Rect {
        x: size.x + (size.width - width) / 2,
        y: size.y + (size.height - height) / 2,
        width,
        height,
    }
}
