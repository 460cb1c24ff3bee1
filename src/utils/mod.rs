//! Small helpers shared by the parser, the report and the CLI.

pub mod date;
pub mod plural;
