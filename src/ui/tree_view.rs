//! Tree view widget for the notewalk TUI.
//!
//! Renders the flattened display rows: indention glyphs, node title, an
//! unfetched-children marker, tags, and a dimmed first-paragraph snippet.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tree::DisplayRow;
use crate::ui::colors::ColorScheme;

/// Marker shown after nodes whose children exist but are not fetched.
const PENDING_MARKER: &str = " …";

/// Label shown for the root row, which the engine leaves with an empty
/// indention. Display-only; the engine itself never special-cases the root.
const ROOT_LABEL: &str = "(root)";

/// Truncate a string to at most `max_width` display cells, appending "..."
/// when anything was cut. Wide characters count as their rendered width, so
/// the result never overflows the cell budget.
fn truncate_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let ellipsis = max_width > 3;
    let budget = if ellipsis { max_width - 3 } else { max_width };

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    if ellipsis {
        out.push_str("...");
    }
    out
}

/// Render the tree rows into `area`.
///
/// `selected_index` is highlighted; `scroll_offset` is the first visible row.
pub fn render_tree_view(
    frame: &mut Frame,
    area: Rect,
    rows: &[DisplayRow],
    selected_index: usize,
    scroll_offset: usize,
    scheme: &ColorScheme,
) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let visible_height = area.height.saturating_sub(2) as usize;

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_height)
        .map(|(i, row)| {
            let line = render_row(row, inner_width, scheme);
            let item = ListItem::new(line);
            if i == selected_index {
                item.style(Style::default().bg(scheme.selected_bg).add_modifier(Modifier::BOLD))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(scheme.border))
            .title(" Tree "),
    );

    frame.render_widget(list, area);
}

fn render_row(row: &DisplayRow, width: usize, scheme: &ColorScheme) -> Line<'static> {
    let mut spans: Vec<Span> = Vec::new();

    if row.depth == 0 && row.indention.is_empty() {
        spans.push(Span::styled(ROOT_LABEL.to_string(), Style::default().fg(scheme.guide)));
    } else {
        spans.push(Span::styled(row.indention.clone(), Style::default().fg(scheme.guide)));
    }

    let title_style = if row.has_children {
        Style::default().fg(scheme.branch)
    } else {
        Style::default().fg(scheme.leaf)
    };
    let title = if row.title.is_empty() { "(untitled)" } else { row.title.as_str() };
    spans.push(Span::styled(format!(" {title}"), title_style));

    // Collapsed/unfetched marker, distinct from a true leaf.
    if row.has_children && !row.children_shown {
        spans.push(Span::styled(PENDING_MARKER.to_string(), Style::default().fg(scheme.pending)));
    }

    for tag in &row.tags {
        spans.push(Span::styled(format!(" [{tag}]"), Style::default().fg(scheme.tag)));
    }

    // Fill the remaining width with a dimmed snippet of the first paragraph.
    let used: usize = spans.iter().map(|s| s.content.width()).sum();
    let budget = width.saturating_sub(used + 3);
    if budget > 4 && !row.first_paragraph.is_empty() {
        let mut snippet = truncate_width(&row.first_paragraph, budget);
        if row.more_text && !snippet.ends_with("...") {
            snippet.push('…');
        }
        spans.push(Span::styled(format!("  {snippet}"), Style::default().fg(scheme.text_dim)));
    }

    Line::from(spans)
}
