//! CLI subcommands

pub mod clean;
pub mod generate;
pub mod index;
pub mod list;
