use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::TaskStatus;
use crate::tui::app::{TaskField, TaskUiState};
use crate::tui::widgets::color::parse_color;
use crate::Config;

/// Daily-task screen. One pane, five states: idle card, running form
/// with countdown, timeout, done, prize.
pub fn render_task_view(
    f: &mut Frame,
    area: Rect,
    status: TaskStatus,
    task_ui: &TaskUiState,
    config: &Config,
) {
    match status {
        TaskStatus::Idle => render_card(
            f,
            area,
            config,
            "Task of the day",
            &[
                "Capture one small moment from today.",
                "You get 15 minutes once you start.",
                "",
                "[ Enter ]  Start the task",
            ],
        ),
        TaskStatus::Running => render_running(f, area, task_ui, config),
        TaskStatus::Timeout => render_card(
            f,
            area,
            config,
            "Time is up",
            &[
                "The 15 minutes ran out.",
                "",
                "[ Enter ]  Try again",
                "[ Esc ]    Back home",
            ],
        ),
        TaskStatus::Done => render_card(
            f,
            area,
            config,
            "Task complete",
            &[
                "Your moment was saved to memories.",
                "",
                "[ Enter ]  Take the prize",
            ],
        ),
        TaskStatus::Prize => render_card(
            f,
            area,
            config,
            "👑 A crown for today",
            &["Come back tomorrow for a new task.", "", "[ Enter ]  Back home"],
        ),
    }
}

fn render_card(f: &mut Frame, area: Rect, config: &Config, title: &str, body: &[&str]) {
    let theme = config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let highlight_bg = parse_color(&theme.highlight_bg);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(highlight_bg).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for body_line in body {
        lines.push(Line::from(body_line.to_string()));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Daily task ")
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn render_running(f: &mut Frame, area: Rect, task_ui: &TaskUiState, config: &Config) {
    let theme = config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let highlight_bg = parse_color(&theme.highlight_bg);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Daily task ")
        .style(Style::default().fg(fg_color).bg(bg_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Countdown
            Constraint::Min(3),    // Text input
            Constraint::Length(3), // Photo input
            Constraint::Length(1), // Hint
        ])
        .split(inner);

    let secs = task_ui.remaining_secs();
    let countdown = Paragraph::new(vec![Line::from(Span::styled(
        format!("{:02} : {:02}", secs / 60, secs % 60),
        Style::default().fg(highlight_bg).add_modifier(Modifier::BOLD),
    ))])
    .alignment(Alignment::Center);
    f.render_widget(countdown, chunks[0]);

    let field_block = |title: &str, focused: bool| {
        let style = if focused {
            Style::default().fg(highlight_bg)
        } else {
            Style::default().fg(fg_color)
        };
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title))
            .border_style(style)
    };

    let text = Paragraph::new(task_ui.text.content().to_string())
        .block(field_block(
            "What happened today?",
            task_ui.current_field == TaskField::Text,
        ))
        .wrap(Wrap { trim: false });
    f.render_widget(text, chunks[1]);

    let photo = Paragraph::new(task_ui.photo.content().to_string()).block(field_block(
        "Photo path (optional)",
        task_ui.current_field == TaskField::Photo,
    ));
    f.render_widget(photo, chunks[2]);

    let hint = Paragraph::new("Tab switches fields • Ctrl+s saves")
        .style(Style::default().add_modifier(Modifier::DIM))
        .alignment(Alignment::Center);
    f.render_widget(hint, chunks[3]);
}
