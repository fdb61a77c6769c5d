use serde_json::Value;
use crate::query::error::CommandError;
use super::lexer::split_args;
use super::{Command, Target};

/// Parses the plain form: a command word followed by whitespace-separated
/// arguments. Arguments past the ones a command uses are ignored.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let args = split_args(line)
        .map_err(|_| CommandError::UnknownSyntax(line.to_string()))?;

    let Some(word) = args.first() else {
        return Ok(Command::Empty);
    };
    let arg = |i: usize| args.get(i).cloned();

    let command = match word.as_str() {
        "quit" | "EOF" => Command::Quit,
        "help" => Command::Help(arg(1)),
        "create" => Command::Create { class: arg(1) },
        "show" => Command::Show(Target::new(arg(1), arg(2))),
        "destroy" => Command::Destroy(Target::new(arg(1), arg(2))),
        "all" => Command::All { class: arg(1) },
        "count" => Command::Count { class: arg(1) },
        "update" => Command::Update {
            target: Target::new(arg(1), arg(2)),
            attribute: arg(3),
            value: arg(4).map(Value::String),
        },
        _ => return Err(CommandError::UnknownSyntax(line.to_string())),
    };

    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(class: &str, id: &str) -> Target {
        Target::new(Some(class.to_string()), Some(id.to_string()))
    }

    #[test]
    fn test_parse_create() {
        assert_eq!(parse("create User").unwrap(), Command::Create { class: Some("User".to_string()) });
        assert_eq!(parse("create").unwrap(), Command::Create { class: None });
    }

    #[test]
    fn test_parse_show_and_destroy() {
        assert_eq!(parse("show BaseModel 1234-1234").unwrap(), Command::Show(target("BaseModel", "1234-1234")));
        assert_eq!(parse("destroy City 42").unwrap(), Command::Destroy(target("City", "42")));
        assert_eq!(
            parse("show BaseModel").unwrap(),
            Command::Show(Target::new(Some("BaseModel".to_string()), None))
        );
    }

    #[test]
    fn test_parse_all() {
        assert_eq!(parse("all").unwrap(), Command::All { class: None });
        assert_eq!(parse("all Place").unwrap(), Command::All { class: Some("Place".to_string()) });
    }

    #[test]
    fn test_parse_update_with_quoted_value() {
        let command = parse("update User 1234 first_name \"Betty Holberton\" extra").unwrap();
        assert_eq!(command, Command::Update {
            target: target("User", "1234"),
            attribute: Some("first_name".to_string()),
            value: Some(Value::String("Betty Holberton".to_string())),
        });
    }

    #[test]
    fn test_parse_partial_update() {
        let command = parse("update User 1234 email").unwrap();
        assert_eq!(command, Command::Update {
            target: target("User", "1234"),
            attribute: Some("email".to_string()),
            value: None,
        });
    }

    #[test]
    fn test_parse_quit_and_help() {
        assert_eq!(parse("quit").unwrap(), Command::Quit);
        assert_eq!(parse("EOF").unwrap(), Command::Quit);
        assert_eq!(parse("help").unwrap(), Command::Help(None));
        assert_eq!(parse("help create").unwrap(), Command::Help(Some("create".to_string())));
    }

    #[test]
    fn test_commands_are_case_sensitive() {
        assert!(matches!(parse("CREATE User"), Err(CommandError::UnknownSyntax(_))));
    }

    #[test]
    fn test_unterminated_quote_is_unknown_syntax() {
        assert!(matches!(
            parse("update User 1 name \"Betty"),
            Err(CommandError::UnknownSyntax(_))
        ));
    }
}
