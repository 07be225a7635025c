use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::models::Memory;
use crate::tui::app::{App, Mode, Tab};
use crate::tui::layout::Layout;
use crate::tui::widgets;
use crate::tui::widgets::color::parse_color;

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    let theme = app.config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);

    // Outer frame around the whole UI
    let outer = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(outer, f.area());

    // Splash and onboarding own the whole screen
    match app.ui.mode {
        Mode::Splash => {
            widgets::splash::render_splash(f, layout.inner_area, app.splash_progress(), &app.config);
            return;
        }
        Mode::Onboarding => {
            widgets::onboarding::render_onboarding(
                f,
                layout.inner_area,
                app.boot.onboarding_slide,
                &app.config,
            );
            return;
        }
        _ => {}
    }

    widgets::tabs::render_tabs(f, layout.tabs_area, app.ui.current_tab, &app.config);

    match app.ui.current_tab {
        Tab::Memories => render_memories_tab(f, app, layout),
        Tab::Capsules => render_capsules_tab(f, app, layout),
        Tab::Task => render_task_tab(f, app, layout),
    }

    if app.ui.mode == Mode::Help {
        widgets::help::render_help(f, layout.inner_area, &app.config);
    }

    if let Some(target) = app.modals.delete_confirmation.clone() {
        widgets::confirm_delete::render_confirm_delete(
            f,
            layout.inner_area,
            &target,
            app.modals.delete_modal_selection,
            &app.config,
        );
    }

    let hints = get_key_hints(app);
    widgets::status_bar::render_status_bar(
        f,
        layout.status_area,
        app.status.message.as_ref(),
        &hints,
        &app.config,
    );
}

fn render_memories_tab(f: &mut Frame, app: &mut App, layout: &Layout) {
    let visible: Vec<Memory> = app.visible_memories().into_iter().cloned().collect();
    let query = app.search.query.clone();
    let config = app.config.clone();

    widgets::memory_list::render_memory_list(
        f,
        layout.sidebar_area,
        &visible,
        &mut app.ui.list_state,
        &query,
        &config,
    );

    match app.ui.mode {
        Mode::Form => {
            if let Some(form) = app.memory_form.as_ref() {
                widgets::form::render_memory_form(f, layout.main_area, form, &config);
            }
        }
        _ => {
            let selected = visible.get(app.ui.selected_index);
            widgets::memory_view::render_memory_view(
                f,
                layout.main_area,
                selected,
                app.ui.detail_scroll,
                &config,
            );
        }
    }
}

fn render_capsules_tab(f: &mut Frame, app: &mut App, layout: &Layout) {
    let capsules = app.capsules.list().to_vec();
    let config = app.config.clone();

    widgets::capsule_list::render_capsule_list(
        f,
        layout.sidebar_area,
        &capsules,
        &mut app.ui.list_state,
        &config,
    );

    match app.ui.mode {
        Mode::Form => {
            if let Some(form) = app.capsule_form.as_ref() {
                widgets::form::render_capsule_form(f, layout.main_area, form, &config);
            }
        }
        Mode::ConfirmCapsule => {
            if let Some(draft) = app.capsule_draft.as_ref() {
                widgets::form::render_capsule_confirm(f, layout.main_area, draft, &config);
            }
        }
        Mode::CapsuleDetail => {
            if let Some(detail) = app.capsule_detail.as_ref() {
                widgets::capsule_view::render_capsule_detail(f, layout.main_area, detail, &config);
            }
        }
        _ => {
            widgets::capsule_view::render_capsule_hint(
                f,
                layout.main_area,
                !capsules.is_empty(),
                &config,
            );
        }
    }
}

fn render_task_tab(f: &mut Frame, app: &mut App, layout: &Layout) {
    // No sidebar here; the task screen takes the full content band
    let area = layout.sidebar_area.union(layout.main_area);
    let status = app.daily_task.peek().status;
    widgets::task_view::render_task_view(f, area, status, &app.task_ui, &app.config);
}

fn get_key_hints(app: &App) -> Vec<String> {
    let kb = &app.config.key_bindings;
    match app.ui.mode {
        Mode::Splash | Mode::Onboarding => vec![],
        Mode::Help => vec!["Esc: close".to_string()],
        Mode::Search => vec![
            "Type to filter".to_string(),
            "Enter: keep".to_string(),
            "Esc: clear".to_string(),
        ],
        Mode::Form => vec![
            "Tab: next field".to_string(),
            format!("{}: save", kb.save),
            "Esc: cancel".to_string(),
        ],
        Mode::ConfirmCapsule => vec![
            "Enter: close the capsule".to_string(),
            "Esc: keep editing".to_string(),
        ],
        Mode::CapsuleDetail => vec![
            "Esc: back".to_string(),
            format!("{}: share", kb.share),
            format!("{}: delete", kb.delete),
        ],
        Mode::View => match app.ui.current_tab {
            Tab::Memories => vec![
                format!("{}: new", kb.new),
                format!("{}: edit", kb.edit),
                format!("{}: delete", kb.delete),
                format!("{}: search", kb.search),
                format!("{}: share", kb.share),
                format!("{}/{}: tabs", kb.tab_left, kb.tab_right),
                format!("{}: quit", kb.quit),
            ],
            Tab::Capsules => vec![
                format!("{}: open", kb.select),
                format!("{}: new", kb.new),
                format!("{}: delete", kb.delete),
                format!("{}/{}: tabs", kb.tab_left, kb.tab_right),
                format!("{}: quit", kb.quit),
            ],
            Tab::Task => vec![
                "Enter: act".to_string(),
                format!("{}/{}: tabs", kb.tab_left, kb.tab_right),
                format!("{}: quit", kb.quit),
            ],
        },
    }
}
