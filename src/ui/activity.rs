use crate::app::state::*;
use crate::ui::panel_block;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = panel_block(" Activity ", FocusPanel::Activity, state);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let available_height = inner.height as usize;
    let total = state.activity.len();

    // Compute visible range with scroll offset
    let end = total.saturating_sub(state.activity_scroll);
    let start = end.saturating_sub(available_height);

    let lines: Vec<Line> = state.activity[start..end]
        .iter()
        .map(format_activity)
        .collect();

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);

    if total > available_height {
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(available_height)).position(start);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .thumb_symbol("┃")
            .track_symbol(Some("│"))
            .thumb_style(Theme::scrollbar_thumb())
            .track_style(Theme::scrollbar_track());

        frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

fn format_activity(entry: &Activity) -> Line<'static> {
    let ts = Span::styled(format!("[{}] ", entry.timestamp), Theme::timestamp());
    let (marker, style) = match entry.kind {
        ActivityKind::Added => ("+ ", Theme::added()),
        ActivityKind::Removed => ("- ", Theme::removed()),
        ActivityKind::Updated => ("~ ", Theme::updated()),
        ActivityKind::Reordered => ("⇅ ", Theme::reordered()),
        ActivityKind::Info => ("• ", Theme::info_message()),
        ActivityKind::Error => ("✘ ", Theme::error_message()),
    };
    Line::from(vec![
        ts,
        Span::styled(marker, style),
        Span::styled(entry.text.clone(), style),
    ])
}
