use ratatui::widgets::ListState;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::info;

use crate::capsule::{Countdown, UnlockWatch};
use crate::config::Config;
use crate::models::{Capsule, Memory, TaskStatus};
use crate::storage::Storage;
use crate::store::{CapsuleStore, DailyTaskStore, MemoryStore, SEEN_ONBOARD_KEY};
use crate::tui::error::TuiError;
use crate::tui::widgets::editor::Editor;
use crate::utils;

/// Fixed boot splash duration
pub const SPLASH_DURATION: Duration = Duration::from_millis(1800);
/// Daily task completion budget
pub const TASK_BUDGET_SECS: u64 = 15 * 60;
/// Toast auto-dismiss delay
const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Memories,
    Capsules,
    Task,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Boot progress bar, not cancellable
    Splash,
    /// First-run slides
    Onboarding,
    /// List + detail panes of the current tab
    View,
    /// Live memory search
    Search,
    /// Create/edit form of the current tab
    Form,
    /// Capsule creation confirmation step
    ConfirmCapsule,
    /// Capsule detail (locked countdown or unlocked content)
    CapsuleDetail,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryField {
    Title,
    Photo,
    Desc,
    Date,
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapsuleField {
    Title,
    Photo,
    Text,
    OpenDate,
    OpenTime,
}

#[derive(Debug, Clone)]
pub struct MemoryForm {
    pub current_field: MemoryField,
    pub title: Editor,
    pub photo: Editor,
    pub desc: Editor,
    pub date: Editor,
    pub time: Editor,
    /// None for new memories, Some(id) when editing
    pub editing_id: Option<String>,
}

impl MemoryForm {
    pub fn new() -> Self {
        let now = utils::now_millis();
        Self {
            current_field: MemoryField::Title,
            title: Editor::new(),
            photo: Editor::new(),
            desc: Editor::multiline(),
            date: Editor::with_content(&utils::format_date(now)),
            time: Editor::with_content(&utils::format_time(now)),
            editing_id: None,
        }
    }

    pub fn from_memory(memory: &Memory) -> Self {
        Self {
            current_field: MemoryField::Title,
            title: Editor::with_content(&memory.title),
            photo: Editor::with_content(&memory.photo),
            desc: Editor::multiline_with_content(&memory.desc),
            date: Editor::with_content(&utils::format_date(memory.ts)),
            time: Editor::with_content(&utils::format_time(memory.ts)),
            editing_id: Some(memory.id.clone()),
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            MemoryField::Title => MemoryField::Photo,
            MemoryField::Photo => MemoryField::Desc,
            MemoryField::Desc => MemoryField::Date,
            MemoryField::Date => MemoryField::Time,
            MemoryField::Time => MemoryField::Title,
        };
    }

    pub fn prev_field(&mut self) {
        self.current_field = match self.current_field {
            MemoryField::Title => MemoryField::Time,
            MemoryField::Photo => MemoryField::Title,
            MemoryField::Desc => MemoryField::Photo,
            MemoryField::Date => MemoryField::Desc,
            MemoryField::Time => MemoryField::Date,
        };
    }

    pub fn current_editor(&mut self) -> &mut Editor {
        match self.current_field {
            MemoryField::Title => &mut self.title,
            MemoryField::Photo => &mut self.photo,
            MemoryField::Desc => &mut self.desc,
            MemoryField::Date => &mut self.date,
            MemoryField::Time => &mut self.time,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CapsuleForm {
    pub current_field: CapsuleField,
    pub title: Editor,
    pub photo: Editor,
    pub text: Editor,
    pub open_date: Editor,
    pub open_time: Editor,
}

impl CapsuleForm {
    pub fn new() -> Self {
        // Default opening moment: 24 hours from now
        let tomorrow = utils::now_millis() + 86_400_000;
        Self {
            current_field: CapsuleField::Title,
            title: Editor::new(),
            photo: Editor::new(),
            text: Editor::multiline(),
            open_date: Editor::with_content(&utils::format_date(tomorrow)),
            open_time: Editor::with_content(&utils::format_time(tomorrow)),
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            CapsuleField::Title => CapsuleField::Photo,
            CapsuleField::Photo => CapsuleField::Text,
            CapsuleField::Text => CapsuleField::OpenDate,
            CapsuleField::OpenDate => CapsuleField::OpenTime,
            CapsuleField::OpenTime => CapsuleField::Title,
        };
    }

    pub fn prev_field(&mut self) {
        self.current_field = match self.current_field {
            CapsuleField::Title => CapsuleField::OpenTime,
            CapsuleField::Photo => CapsuleField::Title,
            CapsuleField::Text => CapsuleField::Photo,
            CapsuleField::OpenDate => CapsuleField::Text,
            CapsuleField::OpenTime => CapsuleField::OpenDate,
        };
    }

    pub fn current_editor(&mut self) -> &mut Editor {
        match self.current_field {
            CapsuleField::Title => &mut self.title,
            CapsuleField::Photo => &mut self.photo,
            CapsuleField::Text => &mut self.text,
            CapsuleField::OpenDate => &mut self.open_date,
            CapsuleField::OpenTime => &mut self.open_time,
        }
    }
}

#[derive(Debug, Clone)]
pub enum DeleteTarget {
    Memory(Memory),
    Capsule(Capsule),
}

/// State of an open capsule detail view. Dropping it cancels the polling
/// loop; nothing ticks while the list is shown.
pub struct CapsuleDetailState {
    pub capsule: Capsule,
    pub watch: UnlockWatch,
    pub countdown: Countdown,
    /// Which presentation is active; flips once when the watch fires
    pub unlocked: bool,
}

impl CapsuleDetailState {
    pub fn open(capsule: Capsule) -> Self {
        let now = utils::now_millis();
        let watch = UnlockWatch::with_now(capsule.open_at, now);
        // Immediate computation on entry, not waiting for the first tick
        let countdown = watch.remaining(now);
        let unlocked = watch.entered_unlocked();
        Self {
            capsule,
            watch,
            countdown,
            unlocked,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Text,
    Photo,
}

/// Transient UI state of the daily-task screen
pub struct TaskUiState {
    pub current_field: TaskField,
    pub text: Editor,
    pub photo: Editor,
    /// Running-task deadline; recomputed display, never persisted
    pub deadline: Option<Instant>,
}

impl Default for TaskUiState {
    fn default() -> Self {
        Self {
            current_field: TaskField::Text,
            text: Editor::multiline(),
            photo: Editor::new(),
            deadline: None,
        }
    }
}

impl TaskUiState {
    pub fn remaining_secs(&self) -> u64 {
        match self.deadline {
            Some(deadline) => deadline
                .saturating_duration_since(Instant::now())
                .as_secs(),
            None => 0,
        }
    }

    pub fn current_editor(&mut self) -> &mut Editor {
        match self.current_field {
            TaskField::Text => &mut self.text,
            TaskField::Photo => &mut self.photo,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

#[derive(Debug, Default)]
pub struct ModalState {
    pub delete_confirmation: Option<DeleteTarget>,
    /// 0 = Yes, 1 = No
    pub delete_modal_selection: usize,
}

pub struct UiState {
    pub current_tab: Tab,
    pub mode: Mode,
    pub selected_index: usize,
    pub list_state: ListState,
    pub detail_scroll: usize,
}

pub struct BootState {
    pub splash_started: Instant,
    pub onboarding_slide: usize,
}

pub struct App {
    pub config: Config,
    pub storage: Rc<Storage>,

    pub memories: MemoryStore,
    pub capsules: CapsuleStore,
    pub daily_task: DailyTaskStore,

    pub ui: UiState,
    pub search: SearchState,
    pub status: StatusState,
    pub modals: ModalState,
    pub boot: BootState,

    pub memory_form: Option<MemoryForm>,
    pub capsule_form: Option<CapsuleForm>,
    pub capsule_draft: Option<Capsule>,
    pub capsule_detail: Option<CapsuleDetailState>,
    pub task_ui: TaskUiState,

    pub should_quit: bool,
}

impl App {
    pub fn new(
        config: Config,
        storage: Rc<Storage>,
        memories: MemoryStore,
        capsules: CapsuleStore,
        daily_task: DailyTaskStore,
    ) -> Result<Self, TuiError> {
        let mut app = Self {
            config,
            storage,
            memories,
            capsules,
            daily_task,
            ui: UiState {
                current_tab: Tab::Memories,
                mode: Mode::Splash,
                selected_index: 0,
                list_state: ListState::default(),
                detail_scroll: 0,
            },
            search: SearchState::default(),
            status: StatusState::default(),
            modals: ModalState::default(),
            boot: BootState {
                splash_started: Instant::now(),
                onboarding_slide: 0,
            },
            memory_form: None,
            capsule_form: None,
            capsule_draft: None,
            capsule_detail: None,
            task_ui: TaskUiState::default(),
            should_quit: false,
        };
        app.sync_list_state();
        Ok(app)
    }

    /// Cooperative timer pass, called once per event-loop iteration.
    /// Everything time-dependent recomputes from the clock here: splash
    /// progress, the capsule unlock watch, the task countdown and the
    /// toast auto-dismiss.
    pub fn tick(&mut self) -> Result<(), TuiError> {
        self.check_status_message_timeout();

        if self.ui.mode == Mode::Splash && self.splash_progress() >= 1.0 {
            self.finish_splash()?;
        }

        // Capsule countdown, alive only while the detail view is open
        if self.ui.mode == Mode::CapsuleDetail {
            let mut unlocked_id = None;
            if let Some(detail) = self.capsule_detail.as_mut() {
                let now = utils::now_millis();
                detail.countdown = detail.watch.remaining(now);
                if detail.watch.poll(now).is_some() {
                    detail.unlocked = true;
                    unlocked_id = Some(detail.capsule.id.clone());
                }
            }
            if let Some(id) = unlocked_id {
                info!(%id, "capsule unlocked");
                self.set_status_message("The capsule is now open!".to_string());
            }
        }

        // Daily task countdown
        let status = self.daily_task.get()?.status;
        if status == TaskStatus::Running {
            if self.task_ui.deadline.is_none() {
                // (Re-)entering the running screen restarts the budget
                self.task_ui.deadline = Some(Instant::now() + Duration::from_secs(TASK_BUDGET_SECS));
            }
            if self.task_ui.remaining_secs() == 0
                && self
                    .task_ui
                    .deadline
                    .is_some_and(|d| Instant::now() >= d)
            {
                self.task_ui.deadline = None;
                self.daily_task.set_status(TaskStatus::Timeout)?;
            }
        }

        Ok(())
    }

    /// Splash progress in 0.0..=1.0
    pub fn splash_progress(&self) -> f64 {
        let elapsed = self.boot.splash_started.elapsed().as_secs_f64();
        (elapsed / SPLASH_DURATION.as_secs_f64()).min(1.0)
    }

    fn finish_splash(&mut self) -> Result<(), TuiError> {
        let seen = self.storage.get_raw(SEEN_ONBOARD_KEY)?;
        self.ui.mode = if seen.as_deref() == Some("1") {
            Mode::View
        } else {
            Mode::Onboarding
        };
        Ok(())
    }

    pub fn advance_onboarding(&mut self) -> Result<(), TuiError> {
        if self.boot.onboarding_slide + 1 < crate::tui::widgets::onboarding::SLIDES.len() {
            self.boot.onboarding_slide += 1;
        } else {
            self.storage.set_raw(SEEN_ONBOARD_KEY, "1")?;
            self.ui.mode = Mode::View;
        }
        Ok(())
    }

    // ── toasts ──

    /// Last-write-wins: a second message while one is showing simply
    /// restarts the timer for the new message.
    pub fn set_status_message(&mut self, message: String) {
        self.status.message = Some(message);
        self.status.message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status.message = None;
        self.status.message_time = None;
    }

    fn check_status_message_timeout(&mut self) {
        if let Some(time) = self.status.message_time {
            if time.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.clear_status_message();
            }
        }
    }

    // ── lists and selection ──

    /// Memories visible in the sidebar: live substring filter while a
    /// search query is present.
    pub fn visible_memories(&self) -> Vec<&Memory> {
        if self.search.query.is_empty() {
            self.memories.list().iter().collect()
        } else {
            self.memories.search(&self.search.query)
        }
    }

    pub fn visible_count(&self) -> usize {
        match self.ui.current_tab {
            Tab::Memories => self.visible_memories().len(),
            Tab::Capsules => self.capsules.list().len(),
            Tab::Task => 0,
        }
    }

    pub fn selected_memory(&self) -> Option<&Memory> {
        self.visible_memories().get(self.ui.selected_index).copied()
    }

    pub fn selected_capsule(&self) -> Option<&Capsule> {
        self.capsules.list().get(self.ui.selected_index)
    }

    pub fn sync_list_state(&mut self) {
        let count = self.visible_count();
        if count == 0 {
            self.ui.selected_index = 0;
            self.ui.list_state.select(None);
        } else {
            if self.ui.selected_index >= count {
                self.ui.selected_index = count - 1;
            }
            self.ui.list_state.select(Some(self.ui.selected_index));
        }
    }

    pub fn select_next(&mut self) {
        let count = self.visible_count();
        if count > 0 && self.ui.selected_index + 1 < count {
            self.ui.selected_index += 1;
        }
        self.ui.detail_scroll = 0;
        self.sync_list_state();
    }

    pub fn select_prev(&mut self) {
        self.ui.selected_index = self.ui.selected_index.saturating_sub(1);
        self.ui.detail_scroll = 0;
        self.sync_list_state();
    }

    pub fn switch_tab(&mut self, new_tab: Tab) {
        self.ui.current_tab = new_tab;
        self.ui.selected_index = 0;
        self.ui.detail_scroll = 0;
        self.search.query.clear();
        self.sync_list_state();
    }

    pub fn next_tab(&mut self) {
        let next = match self.ui.current_tab {
            Tab::Memories => Tab::Capsules,
            Tab::Capsules => Tab::Task,
            Tab::Task => Tab::Memories,
        };
        self.switch_tab(next);
    }

    pub fn prev_tab(&mut self) {
        let prev = match self.ui.current_tab {
            Tab::Memories => Tab::Task,
            Tab::Capsules => Tab::Memories,
            Tab::Task => Tab::Capsules,
        };
        self.switch_tab(prev);
    }

    // ── memory form ──

    pub fn open_new_memory_form(&mut self) {
        self.memory_form = Some(MemoryForm::new());
        self.ui.mode = Mode::Form;
    }

    pub fn open_edit_memory_form(&mut self) {
        if let Some(memory) = self.selected_memory() {
            self.memory_form = Some(MemoryForm::from_memory(memory));
            self.ui.mode = Mode::Form;
        }
    }

    /// Validate and save the memory form. Title and photo are required;
    /// a validation failure aborts the save with no partial write.
    pub fn save_memory_form(&mut self) -> Result<(), TuiError> {
        let Some(form) = self.memory_form.take() else {
            return Ok(());
        };

        if form.title.is_empty() || form.photo.is_empty() {
            self.set_status_message("Fill in name and pick a photo.".to_string());
            self.memory_form = Some(form);
            return Ok(());
        }

        let ts = match parse_form_timestamp(form.date.content(), form.time.content()) {
            Some(ts) => ts,
            None => {
                self.set_status_message("Invalid date or time (YYYY-MM-DD / HH:MM).".to_string());
                self.memory_form = Some(form);
                return Ok(());
            }
        };

        match form.editing_id {
            Some(id) => {
                // Edit keeps the id; everything else is replaced
                let is_daily = self
                    .memories
                    .list()
                    .iter()
                    .find(|m| m.id == id)
                    .map(|m| m.is_daily)
                    .unwrap_or(false);
                let updated = Memory {
                    id,
                    title: form.title.content().to_string(),
                    desc: form.desc.content().to_string(),
                    photo: form.photo.content().to_string(),
                    date_str: utils::format_date(ts),
                    time_str: utils::format_time(ts),
                    ts,
                    is_daily,
                };
                self.memories.update(updated)?;
                self.set_status_message("The changes were made successfully!".to_string());
            }
            None => {
                let memory = Memory::new(
                    form.title.content().to_string(),
                    form.desc.content().to_string(),
                    form.photo.content().to_string(),
                    ts,
                );
                self.memories.add(memory)?;
                self.set_status_message("The memory was created".to_string());
            }
        }

        self.ui.mode = Mode::View;
        self.sync_list_state();
        Ok(())
    }

    pub fn cancel_form(&mut self) {
        self.memory_form = None;
        self.capsule_form = None;
        self.capsule_draft = None;
        self.ui.mode = Mode::View;
    }

    pub fn toggle_selected_daily(&mut self) -> Result<(), TuiError> {
        if let Some(memory) = self.selected_memory() {
            let mut updated = memory.clone();
            updated.is_daily = !updated.is_daily;
            self.memories.update(updated)?;
        }
        Ok(())
    }

    // ── capsule form and lifecycle ──

    pub fn open_new_capsule_form(&mut self) {
        self.capsule_form = Some(CapsuleForm::new());
        self.ui.mode = Mode::Form;
    }

    /// Validate the capsule form and move to the confirmation step.
    pub fn confirm_capsule_form(&mut self) {
        let Some(form) = self.capsule_form.take() else {
            return;
        };

        if form.title.is_empty() || form.photo.is_empty() {
            self.set_status_message("Fill in name and pick a photo.".to_string());
            self.capsule_form = Some(form);
            return;
        }

        let open_at = match parse_form_timestamp(form.open_date.content(), form.open_time.content())
        {
            Some(ts) => ts,
            None => {
                self.set_status_message("Invalid date or time (YYYY-MM-DD / HH:MM).".to_string());
                self.capsule_form = Some(form);
                return;
            }
        };

        self.capsule_draft = Some(Capsule::new(
            form.title.content().to_string(),
            form.photo.content().to_string(),
            form.text.content().to_string(),
            open_at,
        ));
        self.ui.mode = Mode::ConfirmCapsule;
    }

    /// "Close the capsule": persist the draft and return to the list.
    pub fn seal_capsule(&mut self) -> Result<(), TuiError> {
        if let Some(draft) = self.capsule_draft.take() {
            info!(id = %draft.id, open_at = draft.open_at, "capsule sealed");
            self.capsules.add(draft)?;
            self.set_status_message("The time capsule was created".to_string());
        }
        self.ui.mode = Mode::View;
        self.sync_list_state();
        Ok(())
    }

    /// Back from confirmation to the form for more edits.
    pub fn reopen_capsule_form(&mut self) {
        if let Some(draft) = self.capsule_draft.take() {
            let mut form = CapsuleForm::new();
            form.title = Editor::with_content(&draft.title);
            form.photo = Editor::with_content(&draft.photo);
            form.text = Editor::multiline_with_content(&draft.text);
            form.open_date = Editor::with_content(&utils::format_date(draft.open_at));
            form.open_time = Editor::with_content(&utils::format_time(draft.open_at));
            self.capsule_form = Some(form);
        }
        self.ui.mode = Mode::Form;
    }

    /// Enter the capsule detail view, starting the unlock watch. A capsule
    /// whose open time has already passed renders unlocked directly.
    pub fn open_capsule_detail(&mut self) {
        if let Some(capsule) = self.selected_capsule() {
            self.capsule_detail = Some(CapsuleDetailState::open(capsule.clone()));
            self.ui.mode = Mode::CapsuleDetail;
        }
    }

    /// Dismiss the detail view; dropping the state cancels the countdown.
    pub fn close_capsule_detail(&mut self) {
        self.capsule_detail = None;
        self.ui.mode = Mode::View;
        self.sync_list_state();
    }

    // ── deletion ──

    pub fn request_delete(&mut self) {
        let target = match self.ui.current_tab {
            Tab::Memories => self.selected_memory().cloned().map(DeleteTarget::Memory),
            Tab::Capsules => {
                // Delete is offered from the detail view as well as the list
                if let Some(detail) = self.capsule_detail.as_ref() {
                    Some(DeleteTarget::Capsule(detail.capsule.clone()))
                } else {
                    self.selected_capsule().cloned().map(DeleteTarget::Capsule)
                }
            }
            Tab::Task => None,
        };
        if target.is_some() {
            self.modals.delete_confirmation = target;
            self.modals.delete_modal_selection = 0;
        }
    }

    pub fn confirm_delete(&mut self) -> Result<(), TuiError> {
        match self.modals.delete_confirmation.take() {
            Some(DeleteTarget::Memory(memory)) => {
                self.memories.remove(&memory.id)?;
                self.set_status_message("The memory was deleted".to_string());
            }
            Some(DeleteTarget::Capsule(capsule)) => {
                self.capsules.remove(&capsule.id)?;
                self.set_status_message("Time capsule deleted".to_string());
                if self.ui.mode == Mode::CapsuleDetail {
                    self.close_capsule_detail();
                }
            }
            None => {}
        }
        self.sync_list_state();
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.modals.delete_confirmation = None;
    }

    // ── share (clipboard) ──

    pub fn share_selected_memory(&mut self) {
        let Some(memory) = self.selected_memory() else {
            return;
        };
        let text = format!(
            "{}\n\n{}\n\n{} / {}",
            memory.title, memory.desc, memory.date_str, memory.time_str
        );
        self.copy_to_clipboard(&text);
    }

    pub fn share_open_capsule(&mut self) {
        let Some(detail) = self.capsule_detail.as_ref() else {
            return;
        };
        let c = &detail.capsule;
        let text = format!(
            "{}\n\n{}\n\nCreated: {}\nOpen date: {}",
            c.title,
            c.text,
            utils::format_datetime(c.create_at),
            utils::format_datetime(c.open_at)
        );
        self.copy_to_clipboard(&text);
    }

    /// The terminal stand-in for the OS share sheet. Failures surface as
    /// a generic toast, mirroring the swallowed share errors.
    fn copy_to_clipboard(&mut self, text: &str) {
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.to_string())) {
            Ok(()) => self.set_status_message("Copied to clipboard".to_string()),
            Err(_) => self.set_status_message("Share failed".to_string()),
        }
    }

    // ── daily task ──

    pub fn task_status(&mut self) -> Result<TaskStatus, TuiError> {
        Ok(self.daily_task.get()?.status)
    }

    pub fn start_task(&mut self) -> Result<(), TuiError> {
        self.task_ui = TaskUiState::default();
        self.task_ui.deadline = Some(Instant::now() + Duration::from_secs(TASK_BUDGET_SECS));
        self.daily_task.start()?;
        Ok(())
    }

    /// "Try again" from the timeout screen re-enters running without
    /// changing the stored date.
    pub fn retry_task(&mut self) -> Result<(), TuiError> {
        self.task_ui = TaskUiState::default();
        self.task_ui.deadline = Some(Instant::now() + Duration::from_secs(TASK_BUDGET_SECS));
        self.daily_task.set_status(TaskStatus::Running)?;
        Ok(())
    }

    /// Submit the running task. Requires text or a photo; creates a plain
    /// new daily memory record.
    pub fn complete_task(&mut self) -> Result<(), TuiError> {
        if self.task_ui.text.is_empty() && self.task_ui.photo.is_empty() {
            self.set_status_message("Write something or attach a photo".to_string());
            return Ok(());
        }
        let photo = if self.task_ui.photo.is_empty() {
            None
        } else {
            Some(self.task_ui.photo.content().to_string())
        };
        let memory = Memory::from_daily_task(self.task_ui.text.content().to_string(), photo);
        self.memories.add(memory)?;
        self.task_ui.deadline = None;
        self.daily_task.set_status(TaskStatus::Done)?;
        Ok(())
    }

    pub fn take_prize(&mut self) -> Result<(), TuiError> {
        self.daily_task.set_status(TaskStatus::Prize)?;
        Ok(())
    }

    /// "Back home" from the timeout and prize screens: reset to idle and
    /// return to the memories tab.
    pub fn task_back_home(&mut self) -> Result<(), TuiError> {
        self.task_ui = TaskUiState::default();
        self.daily_task.reset()?;
        self.switch_tab(Tab::Memories);
        Ok(())
    }
}

fn parse_form_timestamp(date_str: &str, time_str: &str) -> Option<i64> {
    let date = utils::parse_date(date_str).ok()?;
    let time = utils::parse_time(time_str).ok()?;
    utils::to_epoch_millis(date, time)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let storage = Rc::new(Storage::open_in_memory().unwrap());
        let memories = MemoryStore::load(Rc::clone(&storage)).unwrap();
        let capsules = CapsuleStore::load(Rc::clone(&storage)).unwrap();
        let daily_task = DailyTaskStore::load(Rc::clone(&storage)).unwrap();
        let mut app =
            App::new(Config::default(), storage, memories, capsules, daily_task).unwrap();
        app.ui.mode = Mode::View;
        app
    }

    #[test]
    fn memory_form_requires_title_and_photo() {
        let mut app = test_app();
        app.open_new_memory_form();
        app.save_memory_form().unwrap();
        // Save is aborted with no partial write
        assert!(app.memories.list().is_empty());
        assert_eq!(app.ui.mode, Mode::Form);
        assert!(app.status.message.is_some());
    }

    #[test]
    fn memory_form_saves_and_returns_to_view() {
        let mut app = test_app();
        app.open_new_memory_form();
        {
            let form = app.memory_form.as_mut().unwrap();
            for c in "Trip".chars() {
                form.title.insert_char(c);
            }
            form.current_field = MemoryField::Photo;
            for c in "/tmp/a.jpg".chars() {
                form.photo.insert_char(c);
            }
        }
        app.save_memory_form().unwrap();
        assert_eq!(app.ui.mode, Mode::View);
        assert_eq!(app.memories.list().len(), 1);
        assert_eq!(app.memories.list()[0].title, "Trip");
    }

    #[test]
    fn capsule_draft_flows_through_confirmation() {
        let mut app = test_app();
        app.switch_tab(Tab::Capsules);
        app.open_new_capsule_form();
        {
            let form = app.capsule_form.as_mut().unwrap();
            for c in "2030".chars() {
                form.title.insert_char(c);
            }
            form.current_field = CapsuleField::Photo;
            for c in "p.jpg".chars() {
                form.photo.insert_char(c);
            }
        }
        app.confirm_capsule_form();
        assert_eq!(app.ui.mode, Mode::ConfirmCapsule);
        assert!(app.capsule_draft.is_some());
        // Nothing persisted until the capsule is sealed
        assert!(app.capsules.list().is_empty());

        app.seal_capsule().unwrap();
        assert_eq!(app.capsules.list().len(), 1);
        assert_eq!(app.ui.mode, Mode::View);
    }

    #[test]
    fn capsule_detail_opens_unlocked_when_open_at_passed() {
        let mut app = test_app();
        let capsule = Capsule::new(
            "old".into(),
            "p.jpg".into(),
            "text".into(),
            utils::now_millis() - 10_000,
        );
        app.capsules.add(capsule).unwrap();
        app.switch_tab(Tab::Capsules);
        app.open_capsule_detail();

        let detail = app.capsule_detail.as_ref().unwrap();
        // Never shows the locked/counting presentation
        assert!(detail.unlocked);
        app.tick().unwrap();
        // And the one-shot toast never fires for it
        assert_ne!(
            app.status.message.as_deref(),
            Some("The capsule is now open!")
        );
    }

    #[test]
    fn closing_detail_cancels_the_watch() {
        let mut app = test_app();
        let capsule = Capsule::new(
            "soon".into(),
            "p.jpg".into(),
            "text".into(),
            utils::now_millis() + 60_000,
        );
        app.capsules.add(capsule).unwrap();
        app.switch_tab(Tab::Capsules);
        app.open_capsule_detail();
        assert!(app.capsule_detail.is_some());
        app.close_capsule_detail();
        assert!(app.capsule_detail.is_none());
        assert_eq!(app.ui.mode, Mode::View);
    }

    #[test]
    fn completing_task_requires_content_and_creates_daily_memory() {
        let mut app = test_app();
        app.start_task().unwrap();
        assert_eq!(app.task_status().unwrap(), TaskStatus::Running);

        // No text and no photo: rejected
        app.complete_task().unwrap();
        assert_eq!(app.task_status().unwrap(), TaskStatus::Running);
        assert!(app.memories.list().is_empty());

        for c in "saw a rainbow".chars() {
            app.task_ui.text.insert_char(c);
        }
        app.complete_task().unwrap();
        assert_eq!(app.task_status().unwrap(), TaskStatus::Done);
        assert_eq!(app.memories.list().len(), 1);
        assert!(app.memories.list()[0].is_daily);

        app.take_prize().unwrap();
        assert_eq!(app.task_status().unwrap(), TaskStatus::Prize);
        app.task_back_home().unwrap();
        assert_eq!(app.task_status().unwrap(), TaskStatus::Idle);
        assert_eq!(app.ui.current_tab, Tab::Memories);
    }

    #[test]
    fn toast_is_last_write_wins() {
        let mut app = test_app();
        app.set_status_message("first".to_string());
        app.set_status_message("second".to_string());
        assert_eq!(app.status.message.as_deref(), Some("second"));
    }

    #[test]
    fn search_narrows_visible_memories() {
        let mut app = test_app();
        let m1 = Memory::new("Beach".into(), "sand and waves".into(), "a.jpg".into(), 0);
        let m2 = Memory::new("Dinner".into(), "pasta".into(), "b.jpg".into(), 0);
        app.memories.add(m1).unwrap();
        app.memories.add(m2).unwrap();

        app.search.query = "waves".to_string();
        let visible = app.visible_memories();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Beach");

        app.search.query = "zzz".to_string();
        assert!(app.visible_memories().is_empty());
    }
}
