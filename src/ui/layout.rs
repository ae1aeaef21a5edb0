use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub tab_list: Rect,
    pub title_bar: Rect,
    pub detail: Rect,
    pub activity: Rect,
    pub input_box: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    // Main vertical split: content | status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let content = main_chunks[0];
    let status_bar = main_chunks[1];

    // Horizontal: tab list | gap | right content
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints([
            Constraint::Length(28), // Work tab list
            Constraint::Min(30),    // Right content
        ])
        .split(content);

    let tab_list = h_chunks[0];
    let right_panel = h_chunks[1];

    // Right panel: title bar | detail | activity | input
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),      // Title bar
            Constraint::Percentage(35), // Selected tab fields
            Constraint::Min(4),         // Activity log
            Constraint::Length(3),      // Input box
        ])
        .split(right_panel);

    AppLayout {
        tab_list,
        title_bar: right_chunks[0],
        detail: right_chunks[1],
        activity: right_chunks[2],
        input_box: right_chunks[3],
        status_bar,
    }
}
