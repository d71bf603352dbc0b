//! Unit tests for configuration loading and accessors.
//!
//! - `helpers`: shared layer-composition utilities
//! - `precedence`: file and environment layering
//! - `accessors`: URL, timeout, mapping, and credential accessors
//! - `loading`: end-to-end loading from a temporary home directory

mod accessors;
mod helpers;
