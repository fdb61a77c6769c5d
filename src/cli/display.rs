use std::io::{self, Write};
use crate::query::{CommandError, CommandOutput};

const HELP_TOPICS: &[(&str, &str)] = &[
    ("create", "Creates a new instance of a class, saves it and prints its id.\nUsage: create <class>"),
    ("show", "Prints the string representation of an instance.\nUsage: show <class> <id> or <class>.show(<id>)"),
    ("destroy", "Deletes an instance based on its class and id.\nUsage: destroy <class> <id> or <class>.destroy(<id>)"),
    ("all", "Prints the string representation of all instances, optionally of one class.\nUsage: all [<class>] or <class>.all()"),
    ("update", "Updates an instance attribute and saves the change.\nUsage: update <class> <id> <attribute> \"<value>\"\n       <class>.update(<id>, <attribute>, <value>)\n       <class>.update(<id>, {<attribute>: <value>, ...})"),
    ("count", "Prints the number of instances of a class.\nUsage: count <class> or <class>.count()"),
    ("quit", "Quit command to exit the program"),
    ("EOF", "EOF command to exit the program"),
    ("help", "List available commands with \"help\" or detailed help with \"help <command>\"."),
];

fn write_help(out: &mut impl Write, topic: Option<&str>) -> io::Result<()> {
    match topic {
        None => {
            writeln!(out)?;
            writeln!(out, "Documented commands (type help <topic>):")?;
            writeln!(out, "========================================")?;
            let names: Vec<&str> = HELP_TOPICS.iter().map(|(name, _)| *name).collect();
            writeln!(out, "{}", names.join("  "))?;
            writeln!(out)
        }
        Some(topic) => match HELP_TOPICS.iter().find(|(name, _)| *name == topic) {
            Some((_, text)) => writeln!(out, "{}", text),
            None => writeln!(out, "*** No help on {}", topic),
        },
    }
}

pub fn write_result(out: &mut impl Write, result: &CommandOutput) -> io::Result<()> {
    match result {
        CommandOutput::Nothing | CommandOutput::Quit => Ok(()),
        CommandOutput::Created(id) => writeln!(out, "{}", id),
        CommandOutput::Instance(text) => writeln!(out, "{}", text),
        CommandOutput::Instances(list) => writeln!(out, "[{}]", list.join(", ")),
        CommandOutput::Count(count) => writeln!(out, "{}", count),
        CommandOutput::Help(topic) => write_help(out, topic.as_deref()),
    }
}

pub fn write_error(out: &mut impl Write, error: &CommandError) -> io::Result<()> {
    writeln!(out, "{}", error)
}
