use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

use crate::models::Memory;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::Config;

/// Sidebar list of memories, newest first. Daily-task entries carry a
/// star marker.
pub fn render_memory_list(
    f: &mut Frame,
    area: Rect,
    memories: &[Memory],
    list_state: &mut ListState,
    search_query: &str,
    config: &Config,
) {
    let theme = config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let highlight_bg = parse_color(&theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let title = if search_query.is_empty() {
        format!(" Memories ({}) ", memories.len())
    } else {
        format!(" Search: {} ({}) ", search_query, memories.len())
    };

    let items: Vec<ListItem> = memories
        .iter()
        .map(|memory| {
            let marker = if memory.is_daily { "★ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(parse_color(&theme.highlight_bg))),
                Span::raw(memory.title.clone()),
                Span::styled(
                    format!("  {}", memory.date_str),
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .highlight_style(
            Style::default()
                .fg(highlight_fg)
                .bg(highlight_bg)
                .add_modifier(Modifier::BOLD),
        );

    f.render_stateful_widget(list, area, list_state);
}
