// UI Components
pub mod command_bar;
pub mod invocation_log;
pub mod shortcut_table;
pub mod status_bar;

pub use command_bar::CommandBar;
pub use invocation_log::InvocationLog;
pub use shortcut_table::ShortcutTable;
pub use status_bar::StatusBar;
