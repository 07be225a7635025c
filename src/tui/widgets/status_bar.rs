use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::Config;

/// One-line bar at the bottom: the active toast when there is one,
/// otherwise key hints for the current mode.
pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    message: Option<&String>,
    key_hints: &[String],
    config: &Config,
) {
    let theme = config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let highlight_bg = parse_color(&theme.highlight_bg);

    let max_width = area.width as usize;

    let (content, style) = if let Some(msg) = message {
        let msg_fg = get_contrast_text_color(highlight_bg);
        (
            truncate_with_ellipsis(msg, max_width),
            Style::default()
                .fg(msg_fg)
                .bg(highlight_bg)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            fit_hints(key_hints, max_width),
            Style::default().fg(fg_color).bg(bg_color),
        )
    };

    let paragraph = Paragraph::new(content).style(style);
    f.render_widget(paragraph, area);
}

fn truncate_with_ellipsis(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
    truncated + "..."
}

/// Join as many hints as fit, bullet-separated, with a trailing ellipsis
/// when some are dropped.
fn fit_hints(key_hints: &[String], max_width: usize) -> String {
    let separator = " • ";
    let mut text = String::new();
    for (i, hint) in key_hints.iter().enumerate() {
        let would_be = if i == 0 {
            hint.chars().count()
        } else {
            text.chars().count() + separator.chars().count() + hint.chars().count()
        };
        if would_be > max_width {
            if !text.is_empty() {
                text = truncate_with_ellipsis(&(text + "…"), max_width);
            } else {
                text = truncate_with_ellipsis(hint, max_width);
            }
            return text;
        }
        if i > 0 {
            text.push_str(separator);
        }
        text.push_str(hint);
    }
    text
}
