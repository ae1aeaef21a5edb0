mod activity;
mod detail;
mod input_box;
mod layout;
mod status_bar;
mod tab_list;
mod theme;
mod title_bar;

use crate::app::state::{AppState, FocusPanel};
use ratatui::prelude::*;
use ratatui::widgets::Block;
use theme::Theme;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    tab_list::render(frame, app_layout.tab_list, state);
    title_bar::render(frame, app_layout.title_bar, state);
    detail::render(frame, app_layout.detail, state);
    activity::render(frame, app_layout.activity, state);
    input_box::render(frame, app_layout.input_box, state);
    status_bar::render(frame, app_layout.status_bar, state);
}

/// Bordered panel styled by whether `panel` has focus.
fn panel_block<'a>(title: &'a str, panel: FocusPanel, state: &AppState) -> Block<'a> {
    let focused = state.focus == panel;
    let (border_style, border_type, bg) = if focused {
        (
            Theme::border_focused(),
            Theme::border_type_focused(),
            Theme::panel_bg_focused(),
        )
    } else {
        (Theme::border(), Theme::border_type(), Theme::panel_bg())
    };

    Block::bordered()
        .title(title)
        .title_style(if focused { Theme::title() } else { Theme::border() })
        .border_type(border_type)
        .border_style(border_style)
        .style(bg)
}
