//! Board scripts: one command per line, `#` starts a comment.
//!
//! `edit` takes the rest of its line as the card text, so a `#` there is
//! part of the text rather than a comment.

use cardboard_core::{CardId, CardSize, CardType};
use kurbo::Point;
use thiserror::Error;

/// A parse failure, tagged with its 1-based line number.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

/// One board operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Create(CardType),
    Move { id: CardId, to: Point },
    Resize { id: CardId, size: CardSize },
    Edit { id: CardId, text: Option<String> },
    Progress { id: CardId, value: i64 },
    Delete(CardId),
    Connect(CardId),
    CancelConnect,
    Link { from: CardId, to: CardId },
    Unlink(usize),
    Undo,
    Redo,
    Save,
    Load,
    Export,
}

/// Parse a whole script. Blank lines and comments are skipped.
pub fn parse_script(source: &str) -> Result<Vec<(usize, Command)>, ScriptError> {
    let mut commands = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let content = strip_comment(raw);
        if content.is_empty() {
            continue;
        }
        let command = parse_line(content).map_err(|message| ScriptError { line, message })?;
        commands.push((line, command));
    }
    Ok(commands)
}

fn strip_comment(raw: &str) -> &str {
    let line = raw.trim();
    if line.starts_with('#') {
        return "";
    }
    let verb = line.split_whitespace().next().unwrap_or("");
    if verb == "edit" {
        return line;
    }
    line.split_once('#').map_or(line, |(code, _)| code).trim()
}

fn parse_line(line: &str) -> Result<Command, String> {
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match verb {
        "note" => {
            expect_args(verb, &args, 0)?;
            Command::Create(CardType::Note)
        }
        "task" => {
            expect_args(verb, &args, 0)?;
            Command::Create(CardType::Task)
        }
        "move" => {
            expect_args(verb, &args, 3)?;
            Command::Move {
                id: CardId::from(args[0]),
                to: Point::new(number(args[1])?, number(args[2])?),
            }
        }
        "resize" => {
            expect_args(verb, &args, 3)?;
            Command::Resize {
                id: CardId::from(args[0]),
                size: CardSize::new(integer(args[1])?, integer(args[2])?),
            }
        }
        "edit" => {
            let (id, text) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "edit expects a card id and text".to_string())?;
            Command::Edit {
                id: CardId::from(id),
                text: Some(text.trim().to_string()),
            }
        }
        "clear-text" => {
            expect_args(verb, &args, 1)?;
            Command::Edit {
                id: CardId::from(args[0]),
                text: Some(String::new()),
            }
        }
        "cancel-edit" => {
            expect_args(verb, &args, 1)?;
            Command::Edit {
                id: CardId::from(args[0]),
                text: None,
            }
        }
        "progress" => {
            expect_args(verb, &args, 2)?;
            Command::Progress {
                id: CardId::from(args[0]),
                value: integer(args[1])?,
            }
        }
        "delete" => {
            expect_args(verb, &args, 1)?;
            Command::Delete(CardId::from(args[0]))
        }
        "connect" => {
            expect_args(verb, &args, 1)?;
            Command::Connect(CardId::from(args[0]))
        }
        "cancel-connect" => {
            expect_args(verb, &args, 0)?;
            Command::CancelConnect
        }
        "link" => {
            expect_args(verb, &args, 2)?;
            Command::Link {
                from: CardId::from(args[0]),
                to: CardId::from(args[1]),
            }
        }
        "unlink" => {
            expect_args(verb, &args, 1)?;
            Command::Unlink(integer(args[0])?)
        }
        "undo" => {
            expect_args(verb, &args, 0)?;
            Command::Undo
        }
        "redo" => {
            expect_args(verb, &args, 0)?;
            Command::Redo
        }
        "save" => {
            expect_args(verb, &args, 0)?;
            Command::Save
        }
        "load" => {
            expect_args(verb, &args, 0)?;
            Command::Load
        }
        "export" => {
            expect_args(verb, &args, 0)?;
            Command::Export
        }
        other => return Err(format!("unknown command `{}`", other)),
    };
    Ok(command)
}

fn expect_args(verb: &str, args: &[&str], count: usize) -> Result<(), String> {
    if args.len() == count {
        Ok(())
    } else {
        Err(format!("{} expects {} argument(s), got {}", verb, count, args.len()))
    }
}

fn number(arg: &str) -> Result<f64, String> {
    arg.parse().map_err(|_| format!("`{}` is not a number", arg))
}

fn integer<T: std::str::FromStr>(arg: &str) -> Result<T, String> {
    arg.parse().map_err(|_| format!("`{}` is not an integer", arg))
}
