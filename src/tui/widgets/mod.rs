pub mod capsule_list;
pub mod capsule_view;
pub mod color;
pub mod confirm_delete;
pub mod editor;
pub mod form;
pub mod help;
pub mod memory_list;
pub mod memory_view;
pub mod onboarding;
pub mod splash;
pub mod status_bar;
pub mod tabs;
pub mod task_view;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Centered popup rect taking the given percentage of the area.
/// Based on the ratatui popup example.
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
