//! External process execution and environment detection.

pub mod command;
pub mod platform;

pub use command::{execute, CommandResult, Invocation};
pub use platform::{is_bare_file_name, is_ci};
