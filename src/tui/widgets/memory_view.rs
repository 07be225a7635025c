use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::Memory;
use crate::tui::widgets::color::parse_color;
use crate::Config;

/// Main-pane view of the selected memory.
pub fn render_memory_view(
    f: &mut Frame,
    area: Rect,
    memory: Option<&Memory>,
    scroll: usize,
    config: &Config,
) {
    let theme = config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let highlight_bg = parse_color(&theme.highlight_bg);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Memory ")
        .style(Style::default().fg(fg_color).bg(bg_color));

    let Some(memory) = memory else {
        let paragraph = Paragraph::new("No memories yet. Press 'n' to create one.")
            .block(block)
            .style(Style::default().add_modifier(Modifier::DIM));
        f.render_widget(paragraph, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            memory.title.clone(),
            Style::default().fg(highlight_bg).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{}  {}", memory.date_str, memory.time_str),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    if memory.is_daily {
        lines.push(Line::from(Span::styled(
            "★ Task of the day",
            Style::default().fg(highlight_bg),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Photo: {}", memory.photo),
        Style::default().add_modifier(Modifier::DIM),
    )));
    lines.push(Line::from(""));
    for text_line in memory.desc.lines() {
        lines.push(Line::from(text_line.to_string()));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0));

    f.render_widget(paragraph, area);
}
