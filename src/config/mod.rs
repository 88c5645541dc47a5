//! Configuration management module
//!
//! This module reads the RLS client settings through a host-provided
//! accessor and packages them into an immutable snapshot. It also provides
//! the settings-file accessor used when running outside the editor.

pub mod accessor;
pub mod settings;
pub mod workspace;

pub use accessor::*;
pub use settings::*;
pub use workspace::*;
