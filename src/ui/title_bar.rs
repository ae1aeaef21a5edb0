use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let bg = |style: Style| style.bg(Theme::BG_ELEVATED);

    let mut spans = vec![
        Span::styled(" ◆ ", bg(Style::default().fg(Theme::ACCENT_TEAL))),
        Span::styled(
            state.config.ui.title.as_str(),
            bg(Style::default()
                .fg(Theme::TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD)),
        ),
        Span::styled(" │ ", bg(Style::default().fg(Theme::BORDER_DIM))),
    ];

    match state.selected_entry() {
        Some(tab) => {
            spans.push(Span::styled(
                tab.id.as_str(),
                bg(Style::default()
                    .fg(Theme::ACCENT_TEAL)
                    .add_modifier(Modifier::BOLD)),
            ));
            spans.push(Span::styled(" · ", bg(Style::default().fg(Theme::BORDER_DIM))));
            spans.push(Span::styled(
                tab.state.as_str(),
                bg(Style::default()
                    .fg(Theme::TEXT_SECONDARY)
                    .add_modifier(Modifier::ITALIC)),
            ));
        }
        None => spans.push(Span::styled(
            "/help for commands",
            bg(Style::default()
                .fg(Theme::TEXT_SECONDARY)
                .add_modifier(Modifier::ITALIC)),
        )),
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Theme::BG_ELEVATED));
    frame.render_widget(paragraph, area);
}
