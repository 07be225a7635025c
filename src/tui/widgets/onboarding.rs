use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::popup_area;
use crate::Config;

pub struct Slide {
    pub title: &'static str,
    pub body: &'static str,
}

/// First-run walkthrough, shown once and then skipped on every later
/// start.
pub const SLIDES: &[Slide] = &[
    Slide {
        title: "Welcome to Crown Memories",
        body: "A quiet place to keep the moments worth keeping.",
    },
    Slide {
        title: "Memories",
        body: "Write down what happened, attach a photo, find it again later with search.",
    },
    Slide {
        title: "Time capsules",
        body: "Seal a message to your future self. It stays locked until the date you chose.",
    },
    Slide {
        title: "Task of the day",
        body: "One small prompt each day. Finish it within 15 minutes and earn your crown.",
    },
];

pub fn render_onboarding(f: &mut Frame, area: Rect, slide_index: usize, config: &Config) {
    let theme = config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let highlight_bg = parse_color(&theme.highlight_bg);

    f.render_widget(
        Block::default().style(Style::default().bg(bg_color)),
        area,
    );

    let slide = &SLIDES[slide_index.min(SLIDES.len() - 1)];
    let is_last = slide_index + 1 >= SLIDES.len();

    let dots: String = (0..SLIDES.len())
        .map(|i| if i == slide_index { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ");

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            slide.title,
            Style::default().fg(highlight_bg).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(slide.body),
        Line::from(""),
        Line::from(Span::styled(dots, Style::default().add_modifier(Modifier::DIM))),
        Line::from(""),
        Line::from(Span::styled(
            if is_last {
                "[ Enter ]  Get started"
            } else {
                "[ Enter ]  Next"
            },
            Style::default().fg(highlight_bg),
        )),
    ];

    let popup = popup_area(area, 70, 60);
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup);
}
