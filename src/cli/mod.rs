//! Command-line interface (enabled with the `cli` feature)

mod main;

pub use main::{main, Cli, CliContainerFormat, Command};
