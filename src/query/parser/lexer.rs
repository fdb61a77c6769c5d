use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("unterminated quote starting at column {0}")]
    UnterminatedQuote(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Unquoted run of characters that is not a number.
    Word(String),
    /// Quoted string, quotes removed.
    Str(String),
    /// Unquoted numeric literal, kept as written.
    Number(String),
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Colon,
}

impl Token {
    /// Text of a scalar token, as it would be used for a class name, id or
    /// attribute name.
    pub fn text(&self) -> Option<String> {
        match self {
            Token::Word(s) | Token::Str(s) | Token::Number(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Value of a scalar token. Numbers become JSON numbers, everything else
    /// a JSON string. An integer literal too large for 64 bits stays a string
    /// rather than losing digits as a float.
    pub fn value(&self) -> Option<Value> {
        match self {
            Token::Number(raw) => Some(number_value(raw)),
            Token::Word(s) | Token::Str(s) => Some(Value::String(s.clone())),
            _ => None,
        }
    }
}

fn number_value(raw: &str) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(n) = raw.parse::<u64>() {
        return Value::from(n);
    }
    let is_float = raw.contains(|c| matches!(c, '.' | 'e' | 'E'));
    match raw.parse::<f64>() {
        Ok(n) if is_float => Value::from(n),
        _ => Value::String(raw.to_string()),
    }
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

fn is_punct(c: char) -> bool {
    matches!(c, '(' | ')' | '{' | '}' | ',' | ':')
}

/// Reads a quoted string whose opening quote is at `start`. Returns the
/// content and the index just past the closing quote.
fn read_quoted(chars: &[char], start: usize) -> Result<(String, usize), LexError> {
    let quote = chars[start];
    let mut end = start + 1;
    while end < chars.len() && chars[end] != quote {
        end += 1;
    }
    if end == chars.len() {
        return Err(LexError::UnterminatedQuote(start));
    }
    Ok((chars[start + 1..end].iter().collect(), end + 1))
}

/// Splits a plain command line on whitespace. Quoted sections keep their
/// spaces and lose their quotes, so `"Betty Holberton"` is one argument.
pub fn split_args(line: &str) -> Result<Vec<String>, LexError> {
    let chars: Vec<char> = line.chars().collect();
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            if in_arg {
                args.push(std::mem::take(&mut current));
                in_arg = false;
            }
            i += 1;
        } else if is_quote(c) {
            let (content, next) = read_quoted(&chars, i)?;
            current.push_str(&content);
            in_arg = true;
            i = next;
        } else {
            current.push(c);
            in_arg = true;
            i += 1;
        }
    }

    if in_arg {
        args.push(current);
    }
    Ok(args)
}

/// Tokenizes the argument list of a dotted call such as
/// `"1234", {"name": "Nevada", "rank": 3}`.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if is_quote(c) {
            let (content, next) = read_quoted(&chars, i)?;
            tokens.push(Token::Str(content));
            i = next;
            continue;
        }

        let punct = match c {
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            '{' => Some(Token::LBrace),
            '}' => Some(Token::RBrace),
            ',' => Some(Token::Comma),
            ':' => Some(Token::Colon),
            _ => None,
        };
        if let Some(token) = punct {
            tokens.push(token);
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && !chars[i].is_whitespace() && !is_quote(chars[i]) && !is_punct(chars[i]) {
            i += 1;
        }
        let word: String = chars[start..i].iter().collect();
        tokens.push(classify_word(word));
    }

    Ok(tokens)
}

fn classify_word(word: String) -> Token {
    if word.parse::<i64>().is_ok() {
        return Token::Number(word);
    }
    // Words like "inf" or "NaN" parse as floats but are not numbers here.
    let has_digit = word.chars().any(|c| c.is_ascii_digit());
    if has_digit && word.parse::<f64>().map(f64::is_finite).unwrap_or(false) {
        return Token::Number(word);
    }
    Token::Word(word)
}
