use serde_json::Value;
use crate::metadata::ClassKind;
use crate::query::error::CommandError;
use super::lexer::{tokenize, Token};
use super::{Command, Target};

/// One argument of a dotted call.
#[derive(Debug, Clone, PartialEq)]
enum Arg {
    Scalar(Token),
    Dict(Vec<(String, Value)>),
}

/// Parses `<method>(<args>)`, the part of a dotted call after `<Class>.`.
/// An unknown class is reported before anything in the call is looked at.
pub fn parse(class: &str, call: &str) -> Result<Command, CommandError> {
    if ClassKind::from_name(class).is_none() {
        return Err(CommandError::ClassNotFound);
    }

    let call = call.trim_end();
    let open = call.find('(').ok_or(CommandError::InvalidCall)?;
    if !call.ends_with(')') {
        return Err(CommandError::InvalidCall);
    }

    let method = &call[..open];
    let inner = &call[open + 1..call.len() - 1];
    let class = Some(class.to_string());

    let tokens = tokenize(inner).map_err(|_| {
        if inner.contains('{') {
            CommandError::InvalidDictionary
        } else {
            CommandError::InvalidCall
        }
    })?;
    let args = parse_call_args(&tokens)?;

    match method {
        "all" | "count" => {
            if !args.is_empty() {
                return Err(CommandError::InvalidCall);
            }
            if method == "all" {
                Ok(Command::All { class })
            } else {
                Ok(Command::Count { class })
            }
        }
        "show" | "destroy" => {
            let target = match args.as_slice() {
                [] => Target::new(class, None),
                [Arg::Scalar(id)] => Target::new(class, id.text()),
                _ => return Err(CommandError::InvalidCall),
            };
            if method == "show" {
                Ok(Command::Show(target))
            } else {
                Ok(Command::Destroy(target))
            }
        }
        "update" => parse_update(class, args),
        _ => Err(CommandError::InvalidCall),
    }
}

fn parse_update(class: Option<String>, args: Vec<Arg>) -> Result<Command, CommandError> {
    let mut args = args.into_iter();
    let id = match args.next() {
        None => None,
        Some(Arg::Scalar(token)) => token.text(),
        Some(Arg::Dict(_)) => return Err(CommandError::InvalidCall),
    };
    let target = Target::new(class, id);

    let (attribute, value) = match (args.next(), args.next(), args.next()) {
        (Some(Arg::Dict(attributes)), None, None) => {
            return Ok(Command::UpdateMany { target, attributes });
        }
        (None, None, None) => (None, None),
        (Some(Arg::Scalar(name)), None, None) => (name.text(), None),
        (Some(Arg::Scalar(name)), Some(Arg::Scalar(value)), None) => (name.text(), value.value()),
        _ => return Err(CommandError::InvalidCall),
    };

    Ok(Command::Update { target, attribute, value })
}

/// Splits the call tokens into comma-separated arguments.
fn parse_call_args(tokens: &[Token]) -> Result<Vec<Arg>, CommandError> {
    let mut args = Vec::new();
    let mut pos = 0;

    while pos < tokens.len() {
        let arg = match &tokens[pos] {
            Token::LBrace => {
                let (pairs, next) = parse_dict(tokens, pos)?;
                pos = next;
                Arg::Dict(pairs)
            }
            token @ (Token::Word(_) | Token::Str(_) | Token::Number(_)) => {
                pos += 1;
                Arg::Scalar(token.clone())
            }
            _ => return Err(CommandError::InvalidCall),
        };
        args.push(arg);

        match tokens.get(pos) {
            None => break,
            Some(Token::Comma) if pos + 1 < tokens.len() => pos += 1,
            _ => return Err(CommandError::InvalidCall),
        }
    }

    Ok(args)
}

/// Parses `{key: value, ...}` starting at the opening brace. Returns the
/// pairs in order and the position just past the closing brace.
fn parse_dict(tokens: &[Token], start: usize) -> Result<(Vec<(String, Value)>, usize), CommandError> {
    let mut pairs = Vec::new();
    let mut pos = start + 1;

    loop {
        match tokens.get(pos) {
            Some(Token::RBrace) => return Ok((pairs, pos + 1)),
            Some(token) => {
                let key = token.text().ok_or(CommandError::InvalidDictionary)?;
                if tokens.get(pos + 1) != Some(&Token::Colon) {
                    return Err(CommandError::InvalidDictionary);
                }
                let value = tokens.get(pos + 2)
                    .and_then(Token::value)
                    .ok_or(CommandError::InvalidDictionary)?;
                pairs.push((key, value));
                pos += 3;
            }
            None => return Err(CommandError::InvalidDictionary),
        }

        match tokens.get(pos) {
            Some(Token::Comma) => pos += 1,
            Some(Token::RBrace) => {}
            _ => return Err(CommandError::InvalidDictionary),
        }
    }
}
