// UI Layer
pub mod components;
pub mod layout;
pub mod theme;

pub use components::{CommandBar, InvocationLog, ShortcutTable, StatusBar};
pub use layout::{compute_layout, LayoutAreas, LayoutMode, MIN_HEIGHT, MIN_WIDTH};
pub use theme::Theme;
