use crate::app::state::*;
use crate::ui::panel_block;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

/// Fields of the selected tab; lights up together with the tab list.
pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = panel_block(" Details ", FocusPanel::TabList, state);

    let Some(entry) = state.selected_entry() else {
        let empty = Paragraph::new("No work tab selected.")
            .style(Style::default().fg(Theme::TEXT_MUTED))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let row = |key: String, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<10} ", key), Theme::field_key()),
            Span::styled(value, Theme::field_value()),
        ])
    };

    let mut lines = vec![
        row("id".into(), entry.id.clone()),
        row("state".into(), entry.state.clone()),
    ];
    for (key, value) in &entry.fields {
        let shown = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        lines.push(row(key.clone(), shown));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, area);
}
