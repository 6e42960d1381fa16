//! Host adapters

mod stdio;

pub use stdio::{write_commands, StdioHost};
