//! Course library application: author and course resource modules plus bootstrap.

pub mod bootstrap;
pub mod modules;
pub mod utils;

pub use modules::*;
