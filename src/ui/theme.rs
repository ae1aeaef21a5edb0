use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

pub struct Theme;

impl Theme {
    pub const BG_ELEVATED: Color = Color::Rgb(36, 40, 48);
    pub const BG_FOCUSED: Color = Color::Rgb(28, 31, 38);
    pub const BORDER_DIM: Color = Color::Rgb(70, 76, 88);
    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 224, 232);
    pub const TEXT_SECONDARY: Color = Color::Rgb(150, 156, 170);
    pub const TEXT_MUTED: Color = Color::Rgb(100, 106, 120);
    pub const ACCENT_TEAL: Color = Color::Rgb(80, 200, 210);
    pub const ACCENT_GREEN: Color = Color::Rgb(90, 210, 130);
    pub const ACCENT_AMBER: Color = Color::Rgb(230, 180, 80);
    pub const ACCENT_ROSE: Color = Color::Rgb(230, 110, 130);
    pub const ACCENT_LAVENDER: Color = Color::Rgb(175, 140, 220);

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER_DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT_TEAL)
    }

    pub fn border_type() -> BorderType {
        BorderType::Plain
    }

    pub fn border_type_focused() -> BorderType {
        BorderType::Rounded
    }

    pub fn panel_bg() -> Style {
        Style::default()
    }

    pub fn panel_bg_focused() -> Style {
        Style::default().bg(Self::BG_FOCUSED)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn timestamp() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    pub fn tab_normal() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn tab_selected() -> Style {
        Style::default()
            .fg(Self::ACCENT_TEAL)
            .bg(Self::BG_ELEVATED)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_state() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    pub fn field_key() -> Style {
        Style::default().fg(Self::ACCENT_LAVENDER)
    }

    pub fn field_value() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn added() -> Style {
        Style::default().fg(Self::ACCENT_GREEN)
    }

    pub fn removed() -> Style {
        Style::default().fg(Self::ACCENT_ROSE)
    }

    pub fn updated() -> Style {
        Style::default().fg(Self::ACCENT_AMBER)
    }

    pub fn reordered() -> Style {
        Style::default().fg(Self::ACCENT_LAVENDER)
    }

    pub fn info_message() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    pub fn error_message() -> Style {
        Style::default().fg(Self::ACCENT_ROSE)
    }

    pub fn input_text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Self::BG_ELEVATED)
    }

    pub fn scrollbar_thumb() -> Style {
        Style::default().fg(Self::ACCENT_TEAL)
    }

    pub fn scrollbar_track() -> Style {
        Style::default().fg(Self::BORDER_DIM)
    }
}
