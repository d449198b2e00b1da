//! CLI module for tutor-loop - command-line interface and subcommands.
//!
//! A presentation layer over the orchestrator: it validates input, triggers
//! operations and renders whatever stage the loop settles in.

pub mod commands;
pub mod input;
pub mod render;

pub use commands::Cli;
