// Invocation log component - 호출/알림 기록

use crate::app::{LogEntry, LogKind};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use std::collections::VecDeque;

pub struct InvocationLog<'a> {
    entries: &'a VecDeque<LogEntry>,
    bg_color: Color,
    fg_color: Color,
    time_color: Color,
    border_color: Color,
    accent_color: Color,
}

impl<'a> InvocationLog<'a> {
    pub fn new(entries: &'a VecDeque<LogEntry>) -> Self {
        let theme = Theme::default();
        Self {
            entries,
            bg_color: theme.bg_primary,
            fg_color: theme.fg_primary,
            time_color: theme.fg_dim,
            border_color: theme.border,
            accent_color: theme.accent,
        }
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.bg_primary;
        self.fg_color = theme.fg_primary;
        self.time_color = theme.fg_dim;
        self.border_color = theme.border;
        self.accent_color = theme.accent;
        self
    }
}

impl Widget for InvocationLog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color))
            .title(" Log ")
            .style(Style::default().bg(self.bg_color));

        // 최신 항목이 위로
        let visible = area.height.saturating_sub(2) as usize;
        let lines: Vec<Line> = self
            .entries
            .iter()
            .rev()
            .take(visible)
            .map(|entry| {
                let message_color = match entry.kind {
                    LogKind::Invoked => self.accent_color,
                    LogKind::Notification => self.fg_color,
                };
                Line::from(vec![
                    Span::styled(
                        entry.at.format("%H:%M:%S ").to_string(),
                        Style::default().fg(self.time_color),
                    ),
                    Span::styled(entry.message.clone(), Style::default().fg(message_color)),
                ])
            })
            .collect();

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
