// Command bar component - 하단 단축키 안내

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// (키, 레이블)
pub type CommandHint = (String, String);

pub struct CommandBar<'a> {
    hints: &'a [CommandHint],
    bg_color: Color,
    key_fg_color: Color,
    label_fg_color: Color,
}

impl<'a> CommandBar<'a> {
    pub fn new(hints: &'a [CommandHint]) -> Self {
        let theme = Theme::default();
        Self {
            hints,
            bg_color: theme.bg_primary,
            key_fg_color: theme.command_key_fg,
            label_fg_color: theme.fg_primary,
        }
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.bg_primary;
        self.key_fg_color = theme.command_key_fg;
        self.label_fg_color = theme.fg_primary;
        self
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let mut spans = Vec::with_capacity(self.hints.len() * 2);
        for (key, label) in self.hints {
            spans.push(Span::styled(
                format!(" {}", key),
                Style::default().fg(self.key_fg_color),
            ));
            spans.push(Span::styled(
                format!(" {} ", label),
                Style::default().fg(self.label_fg_color),
            ));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
