// Layout - 화면 영역 계산
//
// ┌ 단축키 테이블 ┬ 호출 로그 ┐
// ├ 상태바 ───────┴───────────┤
// └ 커맨드 바 ────────────────┘

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Normal,
    /// 터미널이 너무 작음
    TooSmall,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutAreas {
    pub shortcut_table: Rect,
    pub invocation_log: Rect,
    pub status_bar: Rect,
    pub command_bar: Rect,
}

pub fn compute_layout(area: Rect) -> (LayoutMode, LayoutAreas) {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        return (LayoutMode::TooSmall, LayoutAreas::default());
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[0]);

    (
        LayoutMode::Normal,
        LayoutAreas {
            shortcut_table: columns[0],
            invocation_log: columns[1],
            status_bar: rows[1],
            command_bar: rows[2],
        },
    )
}
