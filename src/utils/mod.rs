// Utils
pub mod config;
pub mod error;
pub mod logging;
pub mod validation;

pub use error::{KsmError, Result};
