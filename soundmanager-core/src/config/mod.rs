//! Configuration loading and validation for the sound manager.

mod loader;
mod types;
mod validator;

pub use loader::ConfigLoader;
pub use types::*;
pub use validator::ConfigValidator;
