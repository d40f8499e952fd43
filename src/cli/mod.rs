//! Command-line front end: argument parsing, help text, and display
//! infrastructure shared with the I/O layer.

pub mod args;
pub mod constants;
pub mod help;
