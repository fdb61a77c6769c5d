use std::path::PathBuf;
use clap::Parser;

/// Command interpreter for HBNB records.
#[derive(Parser, Debug)]
#[command(name = "hbnb_console", version)]
pub struct Args {
    /// JSON file the records are stored in
    #[arg(short, long, default_value = "file.json")]
    pub file: PathBuf,

    /// Log more (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Run a single command line and exit, e.g. `create User`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Args {
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }

    /// The one-shot command line, if any words were given.
    pub fn one_shot(&self) -> Option<String> {
        if self.command.is_empty() {
            None
        } else {
            Some(self.command.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["hbnb_console"]).unwrap();
        assert_eq!(args.file, PathBuf::from("file.json"));
        assert_eq!(args.log_level(), "warn");
        assert_eq!(args.one_shot(), None);
    }

    #[test]
    fn test_file_and_verbosity() {
        let args = Args::try_parse_from(["hbnb_console", "--file", "/tmp/store.json", "-vv"]).unwrap();
        assert_eq!(args.file, PathBuf::from("/tmp/store.json"));
        assert_eq!(args.log_level(), "trace");
    }

    #[test]
    fn test_one_shot_command() {
        let args = Args::try_parse_from(["hbnb_console", "-f", "db.json", "create", "User"]).unwrap();
        assert_eq!(args.one_shot(), Some("create User".to_string()));
    }
}
