// Shortcut table component - 등록된 단축키 목록
//
// id, 레이블, 키, 스코프, 상태를 표로 표시

use crate::ui::Theme;
use ksm::KeyboardShortcut;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, Widget},
};

pub struct ShortcutTable<'a> {
    shortcuts: &'a [KeyboardShortcut],
    /// 마지막으로 호출된 액션 (강조 표시)
    last_fired: Option<&'a str>,
    /// 현재 스코프 (None이면 전체)
    active_scope: Option<&'a str>,
    bg_color: Color,
    fg_color: Color,
    dim_color: Color,
    border_color: Color,
    header_color: Color,
    highlight_bg: Color,
    highlight_fg: Color,
    disabled_color: Color,
}

impl<'a> ShortcutTable<'a> {
    pub fn new(shortcuts: &'a [KeyboardShortcut]) -> Self {
        let theme = Theme::default();
        Self {
            shortcuts,
            last_fired: None,
            active_scope: None,
            bg_color: theme.bg_primary,
            fg_color: theme.fg_primary,
            dim_color: theme.fg_dim,
            border_color: theme.border,
            header_color: theme.header_fg,
            highlight_bg: theme.highlight_bg,
            highlight_fg: theme.highlight_fg,
            disabled_color: theme.disabled,
        }
    }

    pub fn last_fired(mut self, user_action_id: Option<&'a str>) -> Self {
        self.last_fired = user_action_id;
        self
    }

    pub fn active_scope(mut self, scope: Option<&'a str>) -> Self {
        self.active_scope = scope;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.bg_primary;
        self.fg_color = theme.fg_primary;
        self.dim_color = theme.fg_dim;
        self.border_color = theme.border;
        self.header_color = theme.header_fg;
        self.highlight_bg = theme.highlight_bg;
        self.highlight_fg = theme.highlight_fg;
        self.disabled_color = theme.disabled;
        self
    }

    /// 현재 스코프 밖의 단축키는 흐리게 표시
    fn in_active_scope(&self, shortcut: &KeyboardShortcut) -> bool {
        match self.active_scope {
            Some(scope) => shortcut.user_action.scopes.iter().any(|s| s == scope),
            None => true,
        }
    }

    fn state_label(shortcut: &KeyboardShortcut) -> &'static str {
        let action = &shortcut.user_action;
        if !action.enabled {
            "disabled"
        } else if action.managed_externally {
            "external"
        } else if shortcut.keymap.values != shortcut.keymap.default_values {
            "custom"
        } else {
            "default"
        }
    }

    fn row_style(&self, shortcut: &KeyboardShortcut) -> Style {
        if self.last_fired == Some(shortcut.id()) {
            Style::default()
                .fg(self.highlight_fg)
                .bg(self.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else if !shortcut.user_action.is_active() {
            Style::default().fg(self.disabled_color)
        } else if !self.in_active_scope(shortcut) {
            Style::default().fg(self.dim_color)
        } else {
            Style::default().fg(self.fg_color)
        }
    }
}

impl Widget for ShortcutTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(["Action", "Label", "Keys", "Scopes", "State"]).style(
            Style::default()
                .fg(self.header_color)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = self
            .shortcuts
            .iter()
            .map(|shortcut| {
                let scopes = if shortcut.user_action.scopes.is_empty() {
                    "-".to_string()
                } else {
                    shortcut.user_action.scopes.join(",")
                };
                Row::new([
                    Cell::from(shortcut.id().to_string()),
                    Cell::from(shortcut.display_label().to_string()),
                    Cell::from(shortcut.keymap.values.display()),
                    Cell::from(scopes),
                    Cell::from(Self::state_label(shortcut)),
                ])
                .style(self.row_style(shortcut))
            })
            .collect();

        let title = Span::styled(
            format!(" Shortcuts ({}) ", self.shortcuts.len()),
            Style::default().fg(self.fg_color),
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color))
            .title(title)
            .style(Style::default().bg(self.bg_color));

        let widths = [
            Constraint::Percentage(24),
            Constraint::Percentage(22),
            Constraint::Percentage(26),
            Constraint::Percentage(16),
            Constraint::Percentage(12),
        ];
        Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(1)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ksm::KeymapValues;

    fn sample() -> Vec<KeyboardShortcut> {
        vec![
            KeyboardShortcut::new("save", KeymapValues::list(["ctrl+s"]))
                .scopes(["editor"])
                .label("Save"),
            KeyboardShortcut::new("hidden", KeymapValues::list(["h"])).enabled(false),
        ]
    }

    #[test]
    fn test_state_label() {
        let shortcuts = sample();
        assert_eq!(ShortcutTable::state_label(&shortcuts[0]), "default");
        assert_eq!(ShortcutTable::state_label(&shortcuts[1]), "disabled");

        let custom = shortcuts[0]
            .clone()
            .default_values(KeymapValues::list(["ctrl+shift+s"]));
        assert_eq!(ShortcutTable::state_label(&custom), "custom");
    }

    #[test]
    fn test_render_lists_shortcuts() {
        let shortcuts = sample();
        let area = Rect::new(0, 0, 80, 6);
        let mut buf = Buffer::empty(area);
        ShortcutTable::new(&shortcuts)
            .last_fired(Some("save"))
            .render(area, &mut buf);

        let text: String = buf.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Shortcuts (2)"));
        assert!(text.contains("ctrl+s"));
        assert!(text.contains("editor"));
    }
}
