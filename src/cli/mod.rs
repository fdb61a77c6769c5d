pub mod args;
pub mod display;
pub mod interface;

pub use args::Args;
pub use display::{write_error, write_result};
pub use interface::CLI;
