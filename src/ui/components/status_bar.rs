// Status bar component - 상태바 컴포넌트
//
// 현재 스코프, 시퀀스 모드, 대기 중인 입력, 플랫폼 표시

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct StatusBar<'a> {
    /// 현재 스코프 레이블
    scope: &'a str,
    sequence_mode: bool,
    /// 시퀀스 트래커에 모인 입력 (공백 구분)
    pending_keys: &'a str,
    platform: &'a str,
    /// 일시적인 안내 메시지
    message: Option<&'a str>,
    bg_color: Color,
    fg_color: Color,
    accent_color: Color,
    message_color: Color,
}

impl Default for StatusBar<'_> {
    fn default() -> Self {
        let theme = Theme::default();
        Self {
            scope: "all",
            sequence_mode: false,
            pending_keys: "",
            platform: "Other",
            message: None,
            bg_color: theme.status_bar_bg,
            fg_color: theme.status_bar_fg,
            accent_color: Color::Yellow,
            message_color: theme.warning,
        }
    }
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(mut self, scope: &'a str) -> Self {
        self.scope = scope;
        self
    }

    pub fn sequence_mode(mut self, enabled: bool) -> Self {
        self.sequence_mode = enabled;
        self
    }

    pub fn pending_keys(mut self, keys: &'a str) -> Self {
        self.pending_keys = keys;
        self
    }

    pub fn platform(mut self, platform: &'a str) -> Self {
        self.platform = platform;
        self
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.status_bar_bg;
        self.fg_color = theme.status_bar_fg;
        self.message_color = theme.warning;
        self
    }

    fn left_info(&self) -> String {
        let sequence = if self.sequence_mode { "ON" } else { "OFF" };
        format!(" scope: {} | sequence: {}", self.scope, sequence)
    }

    fn pending_info(&self) -> String {
        if self.pending_keys.is_empty() {
            String::new()
        } else {
            format!(" | keys: {}", self.pending_keys)
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let left_info = self.left_info();
        let pending_info = self.pending_info();
        let message_info = self
            .message
            .map(|message| format!(" | {}", message))
            .unwrap_or_default();
        let right_info = format!("[{}] ", self.platform);

        let left_len = left_info.chars().count()
            + pending_info.chars().count()
            + message_info.chars().count();
        let padding_len = (area.width as usize)
            .saturating_sub(left_len + right_info.chars().count());

        let line = Line::from(vec![
            Span::styled(left_info, Style::default().fg(self.fg_color)),
            Span::styled(pending_info, Style::default().fg(self.accent_color)),
            Span::styled(message_info, Style::default().fg(self.message_color)),
            Span::raw(" ".repeat(padding_len)),
            Span::styled(right_info, Style::default().fg(self.fg_color)),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_bar_text() {
        let bar = StatusBar::new()
            .scope("editor")
            .sequence_mode(true)
            .pending_keys("g");
        assert_eq!(bar.left_info(), " scope: editor | sequence: ON");
        assert_eq!(bar.pending_info(), " | keys: g");

        let bar = StatusBar::new();
        assert_eq!(bar.left_info(), " scope: all | sequence: OFF");
        assert!(bar.pending_info().is_empty());
    }
}
