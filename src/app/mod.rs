//! Core application logic: state management, command parsing, and event handling.

pub mod commands;
pub mod event;
pub mod handler;
pub mod state;
