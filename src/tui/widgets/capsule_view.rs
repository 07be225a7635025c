use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::app::CapsuleDetailState;
use crate::tui::widgets::color::parse_color;
use crate::utils;
use crate::Config;

/// Full-pane capsule detail. Locked capsules show only the countdown and
/// open date; the sealed content stays hidden until the threshold passes.
pub fn render_capsule_detail(
    f: &mut Frame,
    area: Rect,
    detail: &CapsuleDetailState,
    config: &Config,
) {
    if detail.unlocked {
        render_unlocked(f, area, detail, config);
    } else {
        render_locked(f, area, detail, config);
    }
}

fn render_locked(f: &mut Frame, area: Rect, detail: &CapsuleDetailState, config: &Config) {
    let theme = config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let highlight_bg = parse_color(&theme.highlight_bg);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            detail.capsule.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "THE CAPSULE IS STILL CLOSED",
            Style::default().fg(highlight_bg).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            detail.countdown.display(),
            Style::default()
                .fg(highlight_bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Days   Hours  Minutes",
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Opens {}", utils::format_datetime(detail.capsule.open_at)),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Time capsule ")
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}

fn render_unlocked(f: &mut Frame, area: Rect, detail: &CapsuleDetailState, config: &Config) {
    let theme = config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let highlight_bg = parse_color(&theme.highlight_bg);

    let capsule = &detail.capsule;
    let mut lines = vec![
        Line::from(Span::styled(
            capsule.title.clone(),
            Style::default().fg(highlight_bg).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "Sealed {}  •  Opened {}",
                utils::format_datetime(capsule.create_at),
                utils::format_datetime(capsule.open_at)
            ),
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Photo: {}", capsule.photo),
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(""),
    ];
    for text_line in capsule.text.lines() {
        lines.push(Line::from(text_line.to_string()));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Time capsule ")
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

/// Placeholder main pane for the capsule list when nothing is selected
/// or the detail view is closed.
pub fn render_capsule_hint(f: &mut Frame, area: Rect, has_capsules: bool, config: &Config) {
    let theme = config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);

    let text = if has_capsules {
        "Press Enter to open the selected capsule."
    } else {
        "No time capsules yet. Press 'n' to seal one."
    };

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Time capsule ")
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .style(Style::default().add_modifier(Modifier::DIM));

    f.render_widget(paragraph, area);
}
