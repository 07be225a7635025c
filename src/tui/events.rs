use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, size as terminal_size, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io;
use std::time::Duration;

use crate::models::TaskStatus;
use crate::tui::app::{Mode, Tab, TaskField};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::tui::App;
use crate::utils::{parse_key_binding, ParsedKeyBinding};

/// Guard that ensures terminal state is restored even on panic.
/// If the terminal is left in raw mode or the alternate screen, the
/// user's shell becomes unusable.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Manual restore on normal exit; the guard then does nothing on drop
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Ignore errors, we're already in a cleanup path
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

/// Event poll timeout. Short enough that countdowns tick visibly every
/// second, long enough to stay idle-cheap.
const POLL_TIMEOUT: Duration = Duration::from_millis(250);

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check terminal size before entering the alternate screen so the
    // error prints into the normal terminal
    let (width, height) = terminal_size().map_err(TuiError::IoError)?;
    let min_width = Layout::MIN_WIDTH + 2;
    let min_height = Layout::MIN_HEIGHT + 2;
    if width < min_width || height < min_height {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width, min_height
        )));
    }

    let mut guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    loop {
        // Timers first: splash progress, capsule watch, task countdown,
        // toast auto-clear
        app.tick()?;

        let terminal_size = terminal.size()?;
        let terminal_rect = Rect::new(0, 0, terminal_size.width, terminal_size.height);
        terminal.draw(|f| {
            let layout = Layout::calculate(terminal_rect, app.config.sidebar_width_percent, false);
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        if event::poll(POLL_TIMEOUT)? {
            match event::read()? {
                Event::Key(key_event) => {
                    // Press only, to avoid double-processing on Windows
                    if key_event.kind == KeyEventKind::Press && handle_key_event(&mut app, key_event)? {
                        break;
                    }
                }
                Event::Resize(_, _) => {
                    // Next draw picks up the new size
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    guard.restore()?;

    Ok(())
}

fn matches_key_event(key_event: KeyEvent, binding: &ParsedKeyBinding) -> bool {
    key_event.code == binding.key_code
        && key_event.modifiers.contains(KeyModifiers::CONTROL) == binding.requires_ctrl
}

fn binding(key_str: &str) -> Result<ParsedKeyBinding, TuiError> {
    parse_key_binding(key_str).map_err(TuiError::KeyBindingError)
}

fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    // Modal first: it captures all input
    if app.modals.delete_confirmation.is_some() {
        return handle_delete_confirmation_modal(app, key_event);
    }

    match app.ui.mode {
        Mode::Splash => Ok(false), // Not cancellable
        Mode::Onboarding => handle_onboarding_mode(app, key_event),
        Mode::Help => handle_help_mode(app, key_event),
        Mode::Search => handle_search_mode(app, key_event),
        Mode::Form => handle_form_mode(app, key_event),
        Mode::ConfirmCapsule => handle_confirm_capsule_mode(app, key_event),
        Mode::CapsuleDetail => handle_capsule_detail_mode(app, key_event),
        Mode::View => handle_view_mode(app, key_event),
    }
}

fn handle_delete_confirmation_modal(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match key_event.code {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
            app.modals.delete_modal_selection = 1 - app.modals.delete_modal_selection;
        }
        KeyCode::Enter => {
            if app.modals.delete_modal_selection == 0 {
                app.confirm_delete()?;
            } else {
                app.cancel_delete();
            }
        }
        KeyCode::Esc => {
            app.cancel_delete();
        }
        _ => {}
    }
    Ok(false)
}

fn handle_onboarding_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match key_event.code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right => {
            app.advance_onboarding()?;
        }
        _ => {}
    }
    Ok(false)
}

fn handle_help_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let help_binding = binding(&app.config.key_bindings.help)?;
    if key_event.code == KeyCode::Esc || matches_key_event(key_event, &help_binding) {
        app.ui.mode = Mode::View;
    }
    Ok(false)
}

fn handle_search_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match key_event.code {
        KeyCode::Esc => {
            app.search.query.clear();
            app.ui.mode = Mode::View;
            app.sync_list_state();
        }
        KeyCode::Enter => {
            // Keep the filter, go back to list navigation
            app.ui.mode = Mode::View;
        }
        KeyCode::Backspace => {
            app.search.query.pop();
            app.sync_list_state();
        }
        KeyCode::Char(c) => {
            app.search.query.push(c);
            app.sync_list_state();
        }
        _ => {}
    }
    Ok(false)
}

fn handle_form_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let save_binding = binding(&app.config.key_bindings.save)?;
    if matches_key_event(key_event, &save_binding) {
        if app.memory_form.is_some() {
            app.save_memory_form()?;
        } else if app.capsule_form.is_some() {
            app.confirm_capsule_form();
        }
        return Ok(false);
    }

    match key_event.code {
        KeyCode::Esc => {
            app.cancel_form();
            return Ok(false);
        }
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.memory_form.as_mut() {
                form.next_field();
            } else if let Some(form) = app.capsule_form.as_mut() {
                form.next_field();
            }
            return Ok(false);
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = app.memory_form.as_mut() {
                form.prev_field();
            } else if let Some(form) = app.capsule_form.as_mut() {
                form.prev_field();
            }
            return Ok(false);
        }
        _ => {}
    }

    // Everything else goes to the focused editor
    let editor = if let Some(form) = app.memory_form.as_mut() {
        Some(form.current_editor())
    } else if let Some(form) = app.capsule_form.as_mut() {
        Some(form.current_editor())
    } else {
        None
    };
    if let Some(editor) = editor {
        match key_event.code {
            KeyCode::Char(c) => {
                if !key_event.modifiers.contains(KeyModifiers::CONTROL) {
                    editor.insert_char(c);
                }
            }
            KeyCode::Enter => editor.insert_newline(),
            KeyCode::Backspace => editor.backspace(),
            KeyCode::Left => editor.move_left(),
            KeyCode::Right => editor.move_right(),
            KeyCode::Home => editor.move_home(),
            KeyCode::End => editor.move_end(),
            _ => {}
        }
    }
    Ok(false)
}

fn handle_confirm_capsule_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match key_event.code {
        // "Close the capsule"
        KeyCode::Enter => app.seal_capsule()?,
        KeyCode::Esc => app.reopen_capsule_form(),
        _ => {}
    }
    Ok(false)
}

fn handle_capsule_detail_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let delete_binding = binding(&app.config.key_bindings.delete)?;
    let share_binding = binding(&app.config.key_bindings.share)?;

    if key_event.code == KeyCode::Esc {
        app.close_capsule_detail();
    } else if matches_key_event(key_event, &delete_binding) {
        app.request_delete();
    } else if matches_key_event(key_event, &share_binding) {
        // Sharing a still-locked capsule is not offered
        if app.capsule_detail.as_ref().is_some_and(|d| d.unlocked) {
            app.share_open_capsule();
        }
    }
    Ok(false)
}

fn handle_view_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    // The task tab is a button-driven state machine; forms and lists
    // don't apply there
    if app.ui.current_tab == Tab::Task {
        return handle_task_tab(app, key_event);
    }

    let kb = app.config.key_bindings.clone();

    if matches_key_event(key_event, &binding(&kb.quit)?) {
        app.should_quit = true;
        return Ok(true);
    }
    if matches_key_event(key_event, &binding(&kb.help)?) {
        app.ui.mode = Mode::Help;
        return Ok(false);
    }
    if matches_key_event(key_event, &binding(&kb.tab_left)?) {
        app.prev_tab();
        return Ok(false);
    }
    if matches_key_event(key_event, &binding(&kb.tab_right)?) {
        app.next_tab();
        return Ok(false);
    }
    if matches_key_event(key_event, &binding(&kb.tab_1)?) {
        app.switch_tab(Tab::Memories);
        return Ok(false);
    }
    if matches_key_event(key_event, &binding(&kb.tab_2)?) {
        app.switch_tab(Tab::Capsules);
        return Ok(false);
    }
    if matches_key_event(key_event, &binding(&kb.tab_3)?) {
        app.switch_tab(Tab::Task);
        return Ok(false);
    }
    if matches_key_event(key_event, &binding(&kb.list_down)?) || key_event.code == KeyCode::Down {
        app.select_next();
        return Ok(false);
    }
    if matches_key_event(key_event, &binding(&kb.list_up)?) || key_event.code == KeyCode::Up {
        app.select_prev();
        return Ok(false);
    }
    if matches_key_event(key_event, &binding(&kb.new)?) {
        match app.ui.current_tab {
            Tab::Memories => app.open_new_memory_form(),
            Tab::Capsules => app.open_new_capsule_form(),
            Tab::Task => {}
        }
        return Ok(false);
    }
    if matches_key_event(key_event, &binding(&kb.delete)?) {
        app.request_delete();
        return Ok(false);
    }

    match app.ui.current_tab {
        Tab::Memories => {
            if matches_key_event(key_event, &binding(&kb.edit)?) {
                app.open_edit_memory_form();
            } else if matches_key_event(key_event, &binding(&kb.search)?) {
                app.ui.mode = Mode::Search;
            } else if matches_key_event(key_event, &binding(&kb.share)?) {
                app.share_selected_memory();
            } else if matches_key_event(key_event, &binding(&kb.toggle_daily)?) {
                app.toggle_selected_daily()?;
            } else if key_event.code == KeyCode::Esc && !app.search.query.is_empty() {
                app.search.query.clear();
                app.sync_list_state();
            }
        }
        Tab::Capsules => {
            if matches_key_event(key_event, &binding(&kb.select)?) {
                app.open_capsule_detail();
            }
        }
        Tab::Task => {}
    }
    Ok(false)
}

fn handle_task_tab(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let kb = app.config.key_bindings.clone();
    let status = app.task_status()?;

    // Global keys still work outside the running-task inputs
    if status != TaskStatus::Running {
        if matches_key_event(key_event, &binding(&kb.quit)?) {
            app.should_quit = true;
            return Ok(true);
        }
        if matches_key_event(key_event, &binding(&kb.tab_left)?) {
            app.prev_tab();
            return Ok(false);
        }
        if matches_key_event(key_event, &binding(&kb.tab_right)?) {
            app.next_tab();
            return Ok(false);
        }
        if matches_key_event(key_event, &binding(&kb.tab_1)?) {
            app.switch_tab(Tab::Memories);
            return Ok(false);
        }
        if matches_key_event(key_event, &binding(&kb.tab_2)?) {
            app.switch_tab(Tab::Capsules);
            return Ok(false);
        }
    }

    match status {
        TaskStatus::Idle => {
            if key_event.code == KeyCode::Enter {
                app.start_task()?;
            }
        }
        TaskStatus::Running => {
            let save_binding = binding(&kb.save)?;
            if matches_key_event(key_event, &save_binding) {
                app.complete_task()?;
                return Ok(false);
            }
            match key_event.code {
                KeyCode::Tab | KeyCode::BackTab => {
                    app.task_ui.current_field = match app.task_ui.current_field {
                        TaskField::Text => TaskField::Photo,
                        TaskField::Photo => TaskField::Text,
                    };
                }
                KeyCode::Esc => {
                    // Leaving the running screen keeps the state; the
                    // countdown continues
                    app.switch_tab(Tab::Memories);
                }
                _ => {
                    let editor = app.task_ui.current_editor();
                    match key_event.code {
                        KeyCode::Char(c) => {
                            if !key_event.modifiers.contains(KeyModifiers::CONTROL) {
                                editor.insert_char(c);
                            }
                        }
                        KeyCode::Enter => editor.insert_newline(),
                        KeyCode::Backspace => editor.backspace(),
                        KeyCode::Left => editor.move_left(),
                        KeyCode::Right => editor.move_right(),
                        KeyCode::Home => editor.move_home(),
                        KeyCode::End => editor.move_end(),
                        _ => {}
                    }
                }
            }
        }
        TaskStatus::Timeout => match key_event.code {
            // "Try again"
            KeyCode::Enter => app.retry_task()?,
            // "Back home"
            KeyCode::Esc => app.task_back_home()?,
            _ => {}
        },
        TaskStatus::Done => {
            if key_event.code == KeyCode::Enter {
                // "Take the prize"
                app.take_prize()?;
            }
        }
        TaskStatus::Prize => {
            if key_event.code == KeyCode::Enter || key_event.code == KeyCode::Esc {
                // "Back home"
                app.task_back_home()?;
            }
        }
    }
    Ok(false)
}
