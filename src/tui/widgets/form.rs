use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::Capsule;
use crate::tui::app::{CapsuleField, CapsuleForm, MemoryField, MemoryForm};
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::editor::Editor;
use crate::utils;
use crate::Config;

fn field_block(title: &str, focused: bool, config: &Config) -> Block<'static> {
    let theme = config.get_active_theme();
    let style = if focused {
        Style::default().fg(parse_color(&theme.highlight_bg))
    } else {
        Style::default().fg(parse_color(&theme.fg))
    };
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(style)
}

fn render_field(
    f: &mut Frame,
    area: Rect,
    title: &str,
    editor: &Editor,
    focused: bool,
    config: &Config,
) {
    let paragraph = Paragraph::new(editor.content().to_string())
        .block(field_block(title, focused, config))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

pub fn render_memory_form(f: &mut Frame, area: Rect, form: &MemoryForm, config: &Config) {
    let theme = config.get_active_theme();
    let title = if form.editing_id.is_some() {
        " Edit memory "
    } else {
        " New memory "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().fg(parse_color(&theme.fg)).bg(parse_color(&theme.bg)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Photo
            Constraint::Min(4),    // Description
            Constraint::Length(3), // Date
            Constraint::Length(3), // Time
        ])
        .split(inner);

    let focus = form.current_field;
    render_field(f, chunks[0], "Name", &form.title, focus == MemoryField::Title, config);
    render_field(f, chunks[1], "Photo path", &form.photo, focus == MemoryField::Photo, config);
    render_field(f, chunks[2], "Description", &form.desc, focus == MemoryField::Desc, config);
    render_field(f, chunks[3], "Date (YYYY-MM-DD)", &form.date, focus == MemoryField::Date, config);
    render_field(f, chunks[4], "Time (HH:MM)", &form.time, focus == MemoryField::Time, config);
}

pub fn render_capsule_form(f: &mut Frame, area: Rect, form: &CapsuleForm, config: &Config) {
    let theme = config.get_active_theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" New time capsule ")
        .style(Style::default().fg(parse_color(&theme.fg)).bg(parse_color(&theme.bg)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Photo
            Constraint::Min(4),    // Message
            Constraint::Length(3), // Open date
            Constraint::Length(3), // Open time
        ])
        .split(inner);

    let focus = form.current_field;
    render_field(f, chunks[0], "Name", &form.title, focus == CapsuleField::Title, config);
    render_field(f, chunks[1], "Photo path", &form.photo, focus == CapsuleField::Photo, config);
    render_field(
        f,
        chunks[2],
        "Message to the future",
        &form.text,
        focus == CapsuleField::Text,
        config,
    );
    render_field(
        f,
        chunks[3],
        "Open date (YYYY-MM-DD)",
        &form.open_date,
        focus == CapsuleField::OpenDate,
        config,
    );
    render_field(
        f,
        chunks[4],
        "Open time (HH:MM)",
        &form.open_time,
        focus == CapsuleField::OpenTime,
        config,
    );
}

/// Confirmation step before a capsule is sealed. The draft exists only
/// in memory until the user commits.
pub fn render_capsule_confirm(f: &mut Frame, area: Rect, draft: &Capsule, config: &Config) {
    let theme = config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let highlight_bg = parse_color(&theme.highlight_bg);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            draft.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Once sealed, the capsule cannot be changed"),
        Line::from(format!(
            "and will stay closed until {}.",
            utils::format_datetime(draft.open_at)
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[ Enter ]  Close the capsule",
            Style::default().fg(highlight_bg).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "[ Esc ]    Keep editing",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Seal the capsule? ")
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}
