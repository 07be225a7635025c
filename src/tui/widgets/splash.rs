use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Gauge, Paragraph};
use ratatui::Frame;

use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::popup_area;
use crate::Config;

/// Boot splash: app title over a progress bar. Progress is time-driven,
/// not work-driven.
pub fn render_splash(f: &mut Frame, area: Rect, progress: f64, config: &Config) {
    let theme = config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let highlight_bg = parse_color(&theme.highlight_bg);

    f.render_widget(
        Block::default().style(Style::default().bg(bg_color)),
        area,
    );

    let center = popup_area(area, 60, 30);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(center);

    let title = Paragraph::new("👑 Crown Memories")
        .style(Style::default().fg(highlight_bg).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let subtitle = Paragraph::new("keep today for later")
        .style(Style::default().fg(fg_color).add_modifier(Modifier::DIM))
        .alignment(Alignment::Center);
    f.render_widget(subtitle, chunks[1]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(highlight_bg).bg(bg_color))
        .ratio(progress.clamp(0.0, 1.0))
        .label("");
    f.render_widget(gauge, chunks[3]);
}
