//! rls-config - RLS client settings loader
//!
//! Reads the RLS editor client's settings through an injected
//! configuration accessor and exposes them as an immutable, typed snapshot.

pub mod cli;
pub mod config;
pub mod error;
pub mod utils;

// Re-export commonly used types
pub use config::{
    reveal_output_channel_on_from_str, ConfigurationAccessor, InMemoryConfiguration,
    RevealOutputChannelOn, RlsConfiguration, WorkspaceConfiguration,
};
pub use error::{RlsConfigError, Result};
