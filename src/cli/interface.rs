use std::io::{self, BufRead, Write};
use crate::query::{CommandEngine, CommandOutput};
use crate::storage::{FileStorage, StorageError};
use super::display::{write_error, write_result};

pub struct CLI {
    pub storage: FileStorage,
    pub prompt: String,
}

impl CLI {
    /// Builds the shell and loads whatever the store file holds. Only a
    /// missing file gives an empty store; any other load failure is returned
    /// so the file is never overwritten by a partial state.
    pub fn new(mut storage: FileStorage) -> Result<Self, StorageError> {
        storage.reload()?;

        Ok(CLI {
            storage,
            prompt: "(hbnb) ".to_string(),
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Reads lines from `input` until `quit`, `EOF` or end of input.
    pub fn run_with<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> io::Result<()> {
        loop {
            write!(output, "{}", self.prompt)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                break;
            }

            if !self.execute_line(line.trim_end_matches(&['\n', '\r'][..]), &mut output)? {
                break;
            }
        }
        Ok(())
    }

    /// Runs one line and prints its outcome. Returns false when the shell
    /// should stop.
    pub fn execute_line<W: Write>(&mut self, line: &str, output: &mut W) -> io::Result<bool> {
        match CommandEngine::new(&mut self.storage).execute(line) {
            Ok(CommandOutput::Quit) => Ok(false),
            Ok(result) => {
                write_result(output, &result)?;
                Ok(true)
            }
            Err(error) => {
                write_error(output, &error)?;
                Ok(true)
            }
        }
    }
}
