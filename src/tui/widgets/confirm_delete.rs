use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::app::DeleteTarget;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::tui::widgets::popup_area;
use crate::Config;

pub fn render_confirm_delete(
    f: &mut Frame,
    area: Rect,
    target: &DeleteTarget,
    selection: usize,
    config: &Config,
) {
    let theme = config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let highlight_bg = parse_color(&theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let popup = popup_area(area, 50, 35);
    // Clear first so content doesn't show through
    f.render_widget(Clear, popup);

    let (kind, name) = match target {
        DeleteTarget::Memory(memory) => ("memory", memory.title.as_str()),
        DeleteTarget::Capsule(capsule) => ("time capsule", capsule.title.as_str()),
    };

    let mut lines = vec![
        Line::from(format!("Delete this {}?", kind)),
        Line::from(""),
        Line::from(name.to_string()),
        Line::from(""),
    ];

    for (index, option) in ["Delete", "Cancel"].iter().enumerate() {
        let is_selected = index == selection;
        let prefix = if is_selected { "> " } else { "  " };
        let style = if is_selected {
            Style::default().fg(highlight_fg).bg(highlight_bg)
        } else {
            Style::default().fg(fg_color).bg(bg_color)
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}", prefix, option),
            style,
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from("↑↓ to choose, Enter to confirm, Esc to cancel"));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm")
                .title_alignment(Alignment::Center)
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    f.render_widget(paragraph, popup);
}
