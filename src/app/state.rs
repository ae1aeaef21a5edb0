use autoq::config::AppConfig;
use autoq::store::{StoreChange, WorkTabEntry, WorkTabStore};
use chrono::Local;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone)]
pub struct Activity {
    pub timestamp: String,
    pub text: String,
    pub kind: ActivityKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivityKind {
    Added,
    Removed,
    Updated,
    Reordered,
    Info,
    Error,
}

#[derive(Debug)]
pub struct InputState {
    pub text: String,
    pub cursor: usize,
    pub history: Vec<String>,
    pub history_index: Option<usize>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            history: Vec::new(),
            history_index: None,
        }
    }

    pub fn set_text(&mut self, text: String) {
        self.cursor = text.len();
        self.text = text;
        self.history_index = None;
    }

    /// Terminal columns left of the cursor.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].width()
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn take_text(&mut self) -> String {
        let text = std::mem::take(&mut self.text);
        self.cursor = 0;
        self.history_index = None;
        if !text.is_empty() {
            self.history.push(text.clone());
        }
        text
    }

    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let idx = match self.history_index {
            Some(i) if i > 0 => i - 1,
            Some(_) => return,
            None => self.history.len() - 1,
        };
        self.history_index = Some(idx);
        self.text = self.history[idx].clone();
        self.cursor = self.text.len();
    }

    pub fn history_down(&mut self) {
        match self.history_index {
            Some(i) if i + 1 < self.history.len() => {
                let idx = i + 1;
                self.history_index = Some(idx);
                self.text = self.history[idx].clone();
                self.cursor = self.text.len();
            }
            Some(_) => {
                self.history_index = None;
                self.clear();
            }
            None => {}
        }
    }

    pub fn delete_word_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let mut pos = self.cursor;
        // Skip trailing whitespace
        while pos > 0 && self.text.as_bytes().get(pos - 1) == Some(&b' ') {
            pos -= 1;
        }
        while pos > 0 && self.text.as_bytes().get(pos - 1) != Some(&b' ') {
            pos -= 1;
        }
        self.text.drain(pos..self.cursor);
        self.cursor = pos;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusPanel {
    TabList,
    Activity,
    Input,
}

pub struct AppState {
    pub config: AppConfig,
    pub store: WorkTabStore,
    pending_changes: Rc<RefCell<Vec<StoreChange>>>,
    pub activity: Vec<Activity>,
    pub activity_scroll: usize,
    pub selected: usize,
    pub input: InputState,
    pub focus: FocusPanel,
    pub should_quit: bool,
    pub dirty: bool,
    pub status_message: Option<(String, Instant)>,
}

impl AppState {
    pub fn new(config: AppConfig, mut store: WorkTabStore) -> Self {
        let pending_changes = Rc::new(RefCell::new(Vec::new()));
        let sink = pending_changes.clone();
        store.subscribe(move |change, _| sink.borrow_mut().push(change.clone()));

        Self {
            config,
            store,
            pending_changes,
            activity: Vec::new(),
            activity_scroll: 0,
            selected: 0,
            input: InputState::new(),
            focus: FocusPanel::Input,
            should_quit: false,
            dirty: true,
            status_message: None,
        }
    }

    /// Turn store notifications collected since the last call into activity
    /// lines and keep the selection inside the list.
    pub fn drain_changes(&mut self) {
        let changes: Vec<StoreChange> = self.pending_changes.borrow_mut().drain(..).collect();
        for change in changes {
            let (kind, text) = match &change {
                StoreChange::Added { id } => (ActivityKind::Added, format!("opened {}", id)),
                StoreChange::Removed { id } => (ActivityKind::Removed, format!("closed {}", id)),
                StoreChange::Updated { id } => {
                    let state = self
                        .store
                        .get_work_tab(id)
                        .map(|t| t.state.as_str())
                        .unwrap_or("?");
                    (ActivityKind::Updated, format!("{} → {}", id, state))
                }
                StoreChange::Reordered => (
                    ActivityKind::Reordered,
                    format!("order: {}", self.store.work_tab_ids().join(", ")),
                ),
            };
            self.push_activity(kind, text);
        }
        self.clamp_selection();
    }

    pub fn push_activity(&mut self, kind: ActivityKind, text: String) {
        self.activity.push(Activity {
            timestamp: Local::now().format(&self.config.ui.timestamp_format).to_string(),
            text,
            kind,
        });
        let max = self.config.ui.max_activity.max(1);
        if self.activity.len() > max {
            let excess = self.activity.len() - max;
            self.activity.drain(..excess);
            self.activity_scroll = self.activity_scroll.saturating_sub(excess);
        }
        self.dirty = true;
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push_activity(ActivityKind::Info, text.into());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push_activity(ActivityKind::Error, text.into());
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status_message = Some((text.into(), Instant::now()));
        self.dirty = true;
    }

    pub fn expire_status(&mut self, now: Instant) {
        let timeout = Duration::from_secs(self.config.ui.status_timeout_secs);
        if let Some((_, at)) = self.status_message {
            if now.duration_since(at) >= timeout {
                self.status_message = None;
                self.dirty = true;
            }
        }
    }

    pub fn selected_entry(&self) -> Option<&WorkTabEntry> {
        self.store.work_tabs().get(self.selected)
    }

    pub fn selected_id(&self) -> Option<String> {
        self.selected_entry().map(|t| t.id.clone())
    }

    pub fn select_id(&mut self, id: &str) {
        if let Some(idx) = self.store.position(id) {
            self.selected = idx;
            self.dirty = true;
        }
    }

    pub fn select_next(&mut self) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1) % len;
        self.dirty = true;
    }

    pub fn select_prev(&mut self) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        self.selected = if self.selected == 0 {
            len - 1
        } else {
            self.selected - 1
        };
        self.dirty = true;
    }

    /// Shift the selected tab one slot up (`-1`) or down (`1`).
    pub fn move_selected(&mut self, delta: isize) {
        let mut ids: Vec<String> = self
            .store
            .work_tab_ids()
            .into_iter()
            .map(String::from)
            .collect();
        let from = self.selected;
        let Some(to) = from.checked_add_signed(delta).filter(|&to| to < ids.len()) else {
            return;
        };
        if from >= ids.len() {
            return;
        }
        ids.swap(from, to);
        if self.store.reorder_work_tabs(ids.as_slice()) {
            self.selected = to;
        }
    }

    pub fn close_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.remove_work_tab(&id);
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.store.len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPanel::Input => FocusPanel::TabList,
            FocusPanel::TabList => FocusPanel::Activity,
            FocusPanel::Activity => FocusPanel::Input,
        };
        self.dirty = true;
    }

    pub fn status_line(&self) -> String {
        if let Some((ref msg, _)) = self.status_message {
            return msg.clone();
        }
        let mut s = format!("Work tabs: {}", self.store.len());
        if !self.store.is_persistent() {
            s.push_str(" | not saved");
        }
        s
    }
}
