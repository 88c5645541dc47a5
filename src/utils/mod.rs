//! Utility functions module
//!
//! This module contains settings text sanitization and output formatting.

pub mod format;
pub mod sanitizer;

pub use format::*;
pub use sanitizer::*;
