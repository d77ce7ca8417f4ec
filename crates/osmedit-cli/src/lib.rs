//! Library side of the `osmedit` command-line tool.

pub mod commands;
pub mod logging;
