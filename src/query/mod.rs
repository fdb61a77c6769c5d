pub mod error;
pub mod result;
pub mod engine;
pub mod parser;

pub use error::CommandError;
pub use result::CommandOutput;
pub use engine::CommandEngine;
pub use parser::{Command, Target};
