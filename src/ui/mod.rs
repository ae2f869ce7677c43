//! UI module for rendering the TUI

mod forms;
mod layout;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let areas = layout::create_layout(frame.area(), app.banner.is_visible());

    if let Some(banner_area) = areas.banner {
        layout::draw_banner(frame, banner_area, app);
    }
    layout::draw_header(frame, areas.header, app);
    forms::draw_current_form(frame, areas.body, app);
    layout::draw_status_bar(frame, areas.status, app);
}
