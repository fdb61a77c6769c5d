pub mod lexer;
pub mod command;
pub mod dotted;

use serde_json::Value;
use crate::query::error::CommandError;

pub use lexer::{LexError, Token};

/// Class and id a command points at, exactly as typed. Validation happens at
/// execution time so that errors come out in a fixed order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Target {
    pub class: Option<String>,
    pub id: Option<String>,
}

impl Target {
    pub fn new(class: Option<String>, id: Option<String>) -> Self {
        Target { class, id }
    }
}

/// A parsed console line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Empty,
    Quit,
    Help(Option<String>),
    Create { class: Option<String> },
    Show(Target),
    Destroy(Target),
    All { class: Option<String> },
    Count { class: Option<String> },
    Update {
        target: Target,
        attribute: Option<String>,
        value: Option<Value>,
    },
    UpdateMany {
        target: Target,
        attributes: Vec<(String, Value)>,
    },
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parses one line in either the plain form (`show User 1234`) or the dotted
/// form (`User.show("1234")`).
pub fn parse_line(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }

    let ident_end = line.find(|c: char| !is_ident_char(c)).unwrap_or(line.len());
    if ident_end > 0 && line[ident_end..].starts_with('.') {
        return dotted::parse(&line[..ident_end], &line[ident_end + 1..]);
    }

    command::parse(line)
}
