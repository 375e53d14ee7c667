// System Layer
pub mod platform;

pub use platform::{current_platform, Platform};
