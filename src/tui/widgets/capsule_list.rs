use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

use crate::capsule::CapsuleStatus;
use crate::models::Capsule;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::utils;
use crate::Config;

/// Sidebar list of capsules with a lock indicator. Status is recomputed
/// from the clock on every render, so a capsule flips to open without
/// any stored state change.
pub fn render_capsule_list(
    f: &mut Frame,
    area: Rect,
    capsules: &[Capsule],
    list_state: &mut ListState,
    config: &Config,
) {
    let theme = config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let highlight_bg = parse_color(&theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let now = utils::now_millis();
    let items: Vec<ListItem> = capsules
        .iter()
        .map(|capsule| {
            let (marker, marker_style) = match CapsuleStatus::of(capsule.open_at, now) {
                CapsuleStatus::Locked => ("🔒 ", Style::default().add_modifier(Modifier::DIM)),
                CapsuleStatus::Unlocked => ("🔓 ", Style::default().fg(highlight_bg)),
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, marker_style),
                Span::raw(capsule.title.clone()),
                Span::styled(
                    format!("  {}", utils::format_date(capsule.open_at)),
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Capsules ({}) ", capsules.len()))
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
