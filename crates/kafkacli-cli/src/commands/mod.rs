//! Subcommands of both tools

pub mod connect;
pub mod registry;
