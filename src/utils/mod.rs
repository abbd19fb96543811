//! Project-specific utilities live here.

pub mod ids;

/// Formats a shared log target prefix for module logs.
pub fn log_prefix(module: &str) -> String {
    format!("course_library::{module}")
}
