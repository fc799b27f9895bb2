//! Command handler modules.
//!
//! Each handler takes its output streams as `&mut dyn Write` and reports
//! failures through [`CliError`](crate::error::CliError); the caller turns
//! them into exit codes.

mod cfg;
mod load;
mod parse;

pub use cfg::handle_cfg_command;
pub use load::handle_load_command;
pub use parse::handle_parse_command;
