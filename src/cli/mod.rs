//! CLI module for rls-config
//!
//! Command definitions, argument parsing, and command execution for the
//! `rlscfg` binary.

pub mod commands;

pub use commands::*;
