use crate::app::state::*;
use crate::ui::panel_block;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = format!(" Work tabs ({}) ", state.store.len());
    let block = panel_block(&title, FocusPanel::TabList, state);

    if state.store.is_empty() {
        let empty = Paragraph::new(" /new <id> to open one")
            .style(Style::default().fg(Theme::TEXT_MUTED))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    // Borders take two columns, the index gutter four
    let inner_w = area.width.saturating_sub(2) as usize;
    let id_w = (inner_w.saturating_sub(4) * 3 / 5).max(4);
    let state_w = inner_w.saturating_sub(4 + id_w + 1);

    let items: Vec<ListItem> = state
        .store
        .work_tabs()
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let id_style = if i == state.selected {
                Theme::tab_selected()
            } else {
                Theme::tab_normal()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>2}. ", i + 1), Theme::timestamp()),
                Span::styled(fit(&tab.id, id_w), id_style),
                Span::raw(" "),
                Span::styled(fit(&tab.state, state_w), Theme::tab_state()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Theme::BG_ELEVATED));
    let mut list_state = ListState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Cut `s` to `width` terminal columns (marking the cut with `…`) and pad the
/// rest with spaces.
pub fn fit(s: &str, width: usize) -> String {
    if s.width() <= width {
        return format!("{}{}", s, " ".repeat(width - s.width()));
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
