use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::config::KeyBindings;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::popup_area;
use crate::Config;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config) {
    let theme = config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let highlight_bg = parse_color(&theme.highlight_bg);

    let popup = popup_area(area, 60, 70);
    f.render_widget(Clear, popup);

    let kb: &KeyBindings = &config.key_bindings;
    let rows: &[(&str, &str)] = &[
        (kb.quit.as_str(), "Quit"),
        (kb.tab_left.as_str(), "Previous tab"),
        (kb.tab_right.as_str(), "Next tab"),
        (kb.list_up.as_str(), "Move up"),
        (kb.list_down.as_str(), "Move down"),
        (kb.new.as_str(), "New memory / capsule"),
        (kb.edit.as_str(), "Edit memory"),
        (kb.delete.as_str(), "Delete"),
        (kb.search.as_str(), "Search memories"),
        (kb.select.as_str(), "Open capsule"),
        (kb.share.as_str(), "Copy to clipboard"),
        (kb.toggle_daily.as_str(), "Toggle daily marker"),
        (kb.save.as_str(), "Save form"),
        ("Esc", "Back / cancel"),
    ];

    let mut lines = vec![Line::from("")];
    for (key, action) in rows {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:>8}  ", key),
                Style::default().fg(highlight_bg).add_modifier(Modifier::BOLD),
            ),
            Span::raw(action.to_string()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc closes this help",
        Style::default().add_modifier(Modifier::DIM),
    )));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Keys ")
                .title_alignment(Alignment::Center)
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .style(Style::default().fg(fg_color).bg(bg_color));

    f.render_widget(paragraph, popup);
}
