// Data Models
pub mod event;
pub mod shortcut;

pub use event::{
    CallbackEventKind, EventTarget, Key, KeyPress, ModifierKey, Modifiers, ShortcutNotification,
};
pub use shortcut::{
    scoped_keymap_value, DisplayConfig, KeyboardShortcut, KeymapConfig, KeymapMode, KeymapValues,
    ShortcutValueUpdate, UserAction, DEFAULT_SCOPE,
};
