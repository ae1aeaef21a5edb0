use crate::app::commands::{self, ParsedCommand};
use crate::app::event::AppEvent;
use crate::app::state::*;
use autoq::store::WorkTabPatch;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

pub fn handle_event(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent);
        }
        AppEvent::Tick => handle_tick(state),
    }

    // Store notifications queued while handling the event
    state.drain_changes();
}

fn handle_tick(state: &mut AppState) {
    state.expire_status(Instant::now());
}

fn handle_terminal(state: &mut AppState, event: CEvent) {
    match event {
        CEvent::Key(key) => handle_key(state, key),
        CEvent::Resize(_, _) => state.dirty = true,
        _ => {}
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.focus {
        FocusPanel::Input => handle_input_key(state, key),
        FocusPanel::TabList => handle_tab_list_key(state, key),
        FocusPanel::Activity => handle_activity_key(state, key),
    }
}

fn handle_input_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            let text = state.input.take_text();
            let text = text.trim();
            if text.is_empty() {
                return;
            }
            if text.starts_with('/') {
                handle_command(state, text);
                return;
            }
            // Plain text relabels the selected tab
            match state.selected_id() {
                Some(id) => {
                    state
                        .store
                        .update_work_tab(&id, WorkTabPatch::new().state(text));
                }
                None => state.info("No work tab selected. Open one with /new <id>."),
            }
        }
        KeyCode::Backspace => {
            if key.modifiers.contains(KeyModifiers::ALT) {
                state.input.delete_word_back();
            } else {
                state.input.delete_back();
            }
        }
        KeyCode::Delete => state.input.delete_forward(),
        KeyCode::Left => state.input.move_left(),
        KeyCode::Right => state.input.move_right(),
        KeyCode::Home => state.input.move_home(),
        KeyCode::End => state.input.move_end(),
        KeyCode::Up => state.input.history_up(),
        KeyCode::Down => state.input.history_down(),
        KeyCode::Tab => {
            if state.input.text.starts_with('/') {
                try_command_completion(state);
            } else {
                state.cycle_focus();
            }
        }
        KeyCode::PageUp => scroll_up(state),
        KeyCode::PageDown => scroll_down(state),
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'a' => state.input.move_home(),
                    'e' => state.input.move_end(),
                    'w' => state.input.delete_word_back(),
                    'u' => state.input.clear(),
                    _ => {}
                }
            } else {
                state.input.insert_char(c);
            }
        }
        _ => {}
    }
}

fn handle_tab_list_key(state: &mut AppState, key: KeyEvent) {
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Up if alt => state.move_selected(-1),
        KeyCode::Down if alt => state.move_selected(1),
        KeyCode::Char('K') => state.move_selected(-1),
        KeyCode::Char('J') => state.move_selected(1),
        KeyCode::Up | KeyCode::Char('k') => state.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => state.select_next(),
        KeyCode::Home => state.selected = 0,
        KeyCode::End => state.selected = state.store.len().saturating_sub(1),
        KeyCode::Delete | KeyCode::Char('d') => state.close_selected(),
        KeyCode::Enter => {
            if let Some(id) = state.selected_id() {
                state.input.set_text(format!("/state {} ", id));
                state.focus = FocusPanel::Input;
            }
        }
        KeyCode::Tab => state.cycle_focus(),
        KeyCode::Char('/') => {
            state.focus = FocusPanel::Input;
            state.input.set_text("/".to_string());
        }
        _ => {}
    }
}

fn handle_activity_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::PageUp | KeyCode::Up => scroll_up(state),
        KeyCode::PageDown | KeyCode::Down => scroll_down(state),
        KeyCode::Tab => state.cycle_focus(),
        KeyCode::Char(c) => {
            // Start typing: switch to input
            state.focus = FocusPanel::Input;
            state.input.insert_char(c);
        }
        _ => {}
    }
}

fn handle_command(state: &mut AppState, text: &str) {
    let Some(cmd) = commands::parse_command(text) else {
        state.error(format!("Unknown command or missing argument: {} (try /help)", text));
        return;
    };

    match cmd {
        ParsedCommand::New { id } => {
            if !state.store.add_work_tab(id.as_str()) {
                state.info(format!("{} is already open", id));
            }
            state.select_id(&id);
        }
        ParsedCommand::Close { id } => {
            let Some(id) = id.or_else(|| state.selected_id()) else {
                state.info("Nothing to close");
                return;
            };
            if !state.store.remove_work_tab(&id) {
                state.info(format!("No work tab {}", id));
            }
        }
        ParsedCommand::State { id, label } => {
            if !state.store.contains(&id) {
                state.info(format!("No work tab {}", id));
            } else if !state
                .store
                .update_work_tab(&id, WorkTabPatch::new().state(label))
            {
                state.info(format!("{} unchanged", id));
            }
        }
        ParsedCommand::Set { id, key, value } => {
            if key == "id" {
                state.error("A work tab's id cannot be changed");
            } else if !state.store.contains(&id) {
                state.info(format!("No work tab {}", id));
            } else if state
                .store
                .update_work_tab(&id, WorkTabPatch::new().field(key.as_str(), value))
            {
                state.set_status(format!("{}.{} updated", id, key));
            } else {
                state.info(format!("{} unchanged", id));
            }
        }
        ParsedCommand::Move { ids } => {
            let selected = state.selected_id();
            if !state.store.reorder_work_tabs(ids.as_slice()) {
                state.info("Order unchanged");
            }
            if let Some(id) = selected {
                state.select_id(&id);
            }
        }
        ParsedCommand::Show { id } => {
            let Some(id) = id.or_else(|| state.selected_id()) else {
                state.info("Nothing selected");
                return;
            };
            let lines = match state.store.get_work_tab(&id) {
                Some(entry) => {
                    let mut lines = vec![format!("{}: state = {}", entry.id, entry.state)];
                    for (key, value) in &entry.fields {
                        lines.push(format!("{}: {} = {}", entry.id, key, value));
                    }
                    lines
                }
                None => vec![format!("{}: not found", id)],
            };
            for line in lines {
                state.info(line);
            }
        }
        ParsedCommand::List => {
            let ids = state.store.work_tab_ids().join(", ");
            if ids.is_empty() {
                state.info("No work tabs");
            } else {
                state.info(format!("Work tabs: {}", ids));
            }
        }
        ParsedCommand::Help => {
            for line in commands::HELP {
                state.info(*line);
            }
        }
        ParsedCommand::Quit => state.should_quit = true,
    }
}

fn scroll_up(state: &mut AppState) {
    let max_scroll = state.activity.len().saturating_sub(1);
    state.activity_scroll = (state.activity_scroll + 5).min(max_scroll);
    state.dirty = true;
}

fn scroll_down(state: &mut AppState) {
    state.activity_scroll = state.activity_scroll.saturating_sub(5);
    state.dirty = true;
}

fn try_command_completion(state: &mut AppState) {
    // Clone text to avoid borrow conflicts
    let text = state.input.text.clone();

    let parts: Vec<&str> = text[1..].splitn(2, ' ').collect();
    let cmd = parts.first().unwrap_or(&"").to_lowercase();

    // Completing the command name itself
    if parts.len() == 1 {
        if let Some(first) = commands::COMMANDS.iter().find(|c| c.starts_with(cmd.as_str())) {
            state.input.set_text(format!("/{} ", first));
        }
        return;
    }

    // Completing a work tab id as the last word
    if !commands::ID_COMMANDS.contains(&cmd.as_str()) {
        return;
    }
    let word_start = text.rfind(' ').map(|i| i + 1).unwrap_or(0);
    let partial = &text[word_start..];
    let found = state
        .store
        .work_tab_ids()
        .into_iter()
        .find(|id| id.starts_with(partial))
        .map(String::from);
    if let Some(id) = found {
        state.input.set_text(format!("{}{} ", &text[..word_start], id));
    }
}
