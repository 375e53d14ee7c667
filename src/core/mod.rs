// Core: 단축키 엔진
pub mod keyboard;
pub mod manager;
pub mod notifier;
pub mod registry;
pub mod resolver;
pub mod sequence;

pub use manager::{HandleOptions, ShortcutHandler, ShortcutHandlers, ShortcutManager};
pub use notifier::CallbackHandler;
pub use sequence::DEFAULT_WINDOW_MILLIS;
