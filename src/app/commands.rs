//! User slash-command parser.
//!
//! Parses `/command arg1 arg2 ...` input lines into typed [`ParsedCommand`]
//! values that the event handler turns into store operations.

use serde_json::Value;

/// A parsed user command. Each variant corresponds to a `/command`.
#[derive(Debug, PartialEq)]
pub enum ParsedCommand {
    New { id: String },
    Close { id: Option<String> },
    State { id: String, label: String },
    Set { id: String, key: String, value: Value },
    Move { ids: Vec<String> },
    Show { id: Option<String> },
    List,
    Help,
    Quit,
}

/// Command names offered by Tab completion.
pub const COMMANDS: &[&str] = &[
    "new", "add", "open", "close", "rm", "state", "set", "move", "show", "list", "ls", "help",
    "quit", "exit",
];

/// Commands whose first argument is a work tab id.
pub const ID_COMMANDS: &[&str] = &["close", "rm", "state", "set", "move", "show"];

pub const HELP: &[&str] = &[
    "/new <id>                open a work tab",
    "/close [id]              close a tab (default: selected)",
    "/state <id> <label>      set a tab's state",
    "/set <id> <key> <value>  set any field (JSON or text)",
    "/move <id> [id...]       put these tabs first, in order",
    "/show [id]               print a tab's fields",
    "/list                    print tab ids in order",
    "/quit                    exit",
    "Tab list: ↑/↓ select, Alt+↑/↓ or K/J move, Del/d close, Enter edit state",
];

/// Parse a slash-command string into a [`ParsedCommand`].
///
/// Returns `None` if the input does not start with `/`, is not a recognized
/// command, or lacks a required argument. Command names are case-insensitive;
/// ids and values are taken verbatim.
pub fn parse_command(input: &str) -> Option<ParsedCommand> {
    let input = input.trim();
    let body = input.strip_prefix('/')?;

    let mut parts = body.splitn(2, char::is_whitespace);
    let cmd = parts.next()?.to_lowercase();
    let rest = parts.next().unwrap_or("").trim();

    match cmd.as_str() {
        "new" | "add" | "open" => {
            let id = first_word(rest)?;
            Some(ParsedCommand::New { id })
        }
        "close" | "rm" => Some(ParsedCommand::Close {
            id: first_word(rest),
        }),
        "state" => {
            let (id, label) = split_word(rest)?;
            if label.is_empty() {
                return None;
            }
            Some(ParsedCommand::State {
                id,
                label: label.to_string(),
            })
        }
        "set" => {
            let (id, rest) = split_word(rest)?;
            let (key, raw) = split_word(rest)?;
            if raw.is_empty() {
                return None;
            }
            Some(ParsedCommand::Set {
                id,
                key,
                value: parse_value(raw),
            })
        }
        "move" => {
            let ids: Vec<String> = rest.split_whitespace().map(String::from).collect();
            if ids.is_empty() {
                return None;
            }
            Some(ParsedCommand::Move { ids })
        }
        "show" => Some(ParsedCommand::Show {
            id: first_word(rest),
        }),
        "list" | "ls" => Some(ParsedCommand::List),
        "help" => Some(ParsedCommand::Help),
        "quit" | "exit" => Some(ParsedCommand::Quit),
        _ => None,
    }
}

/// JSON when it parses as JSON, otherwise the raw text as a string.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn first_word(s: &str) -> Option<String> {
    s.split_whitespace().next().map(String::from)
}

fn split_word(s: &str) -> Option<(String, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => Some((word.to_string(), rest.trim())),
        None => Some((s.to_string(), "")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_and_aliases() {
        for line in ["/new a", "/add a", "/OPEN a", "  /new a extra  "] {
            assert_eq!(
                parse_command(line),
                Some(ParsedCommand::New { id: "a".into() }),
                "{}",
                line
            );
        }
        assert_eq!(parse_command("/new"), None);
    }

    #[test]
    fn test_close_optional_id() {
        assert_eq!(parse_command("/close"), Some(ParsedCommand::Close { id: None }));
        assert_eq!(
            parse_command("/rm job-7"),
            Some(ParsedCommand::Close {
                id: Some("job-7".into())
            })
        );
    }

    #[test]
    fn test_state_keeps_spaces_in_label() {
        assert_eq!(
            parse_command("/state a 完成 (checked)"),
            Some(ParsedCommand::State {
                id: "a".into(),
                label: "完成 (checked)".into()
            })
        );
        assert_eq!(parse_command("/state a"), None);
        assert_eq!(parse_command("/state"), None);
    }

    #[test]
    fn test_set_parses_json_or_text() {
        assert_eq!(
            parse_command("/set a progress 40"),
            Some(ParsedCommand::Set {
                id: "a".into(),
                key: "progress".into(),
                value: json!(40)
            })
        );
        assert_eq!(
            parse_command("/set a note needs review"),
            Some(ParsedCommand::Set {
                id: "a".into(),
                key: "note".into(),
                value: json!("needs review")
            })
        );
        assert_eq!(
            parse_command(r#"/set a tags ["x","y"]"#),
            Some(ParsedCommand::Set {
                id: "a".into(),
                key: "tags".into(),
                value: json!(["x", "y"])
            })
        );
        assert_eq!(parse_command("/set a progress"), None);
    }

    #[test]
    fn test_move_collects_ids() {
        assert_eq!(
            parse_command("/move c  a"),
            Some(ParsedCommand::Move {
                ids: vec!["c".into(), "a".into()]
            })
        );
        assert_eq!(parse_command("/move"), None);
    }

    #[test]
    fn test_misc_commands() {
        assert_eq!(parse_command("/show"), Some(ParsedCommand::Show { id: None }));
        assert_eq!(parse_command("/ls"), Some(ParsedCommand::List));
        assert_eq!(parse_command("/help"), Some(ParsedCommand::Help));
        assert_eq!(parse_command("/exit"), Some(ParsedCommand::Quit));
    }

    #[test]
    fn test_not_a_command() {
        assert_eq!(parse_command("hello"), None);
        assert_eq!(parse_command("/bogus a"), None);
        assert_eq!(parse_command("/"), None);
    }
}
