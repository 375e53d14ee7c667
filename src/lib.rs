//! KSM: 키보드 단축키 관리자
//!
//! 사용자 액션에 키 조합을 연결하고, 스코프/플랫폼/시퀀스 모드에 따라
//! 키 입력을 매칭된 액션 핸들러로 보냅니다.
//!
//! ```rust,ignore
//! use ksm::{KeyboardShortcut, KeymapValues, ShortcutManager};
//!
//! let manager = ShortcutManager::new();
//! manager.register_shortcuts(&[
//!     KeyboardShortcut::new("save", KeymapValues::list(["ctrl+s"])).scopes(["editor"]),
//! ])?;
//! ```

pub mod core;
pub mod models;
pub mod system;
pub mod utils;

pub use crate::core::{HandleOptions, ShortcutHandler, ShortcutHandlers, ShortcutManager};
pub use crate::models::{
    CallbackEventKind, DisplayConfig, EventTarget, Key, KeyPress, KeyboardShortcut, KeymapConfig,
    KeymapMode, KeymapValues, ModifierKey, Modifiers, ShortcutNotification, ShortcutValueUpdate,
    UserAction, DEFAULT_SCOPE,
};
pub use crate::system::Platform;
pub use crate::utils::config::ShortcutConfigFile;
pub use crate::utils::error::{KsmError, Result};
