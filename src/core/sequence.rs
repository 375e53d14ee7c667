//! 시퀀스 모드 트래커
//!
//! 연속된 단일 키 입력을 모아 `g g` 같은 시퀀스 문자열을 만듭니다.
//! 마지막 입력 후 유휴 시간(기본 1000ms)이 지나면 모인 입력은 버려집니다.
//! 입력이 들어올 때마다 만료 시각이 다시 계산됩니다 (debounce).

use std::time::{Duration, Instant};

pub const DEFAULT_WINDOW_MILLIS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct SequenceTracker {
    enabled: bool,
    key_strokes: Vec<String>,
    window: Duration,
    /// 유휴 타이머 만료 시각 (None = idle)
    deadline: Option<Instant>,
}

impl Default for SequenceTracker {
    fn default() -> Self {
        Self {
            enabled: false,
            key_strokes: Vec::new(),
            window: Duration::from_millis(DEFAULT_WINDOW_MILLIS),
            deadline: None,
        }
    }
}

impl SequenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 시퀀스 모드 설정. `window_millis`가 0보다 크면 유휴 시간도 교체
    pub fn set_mode(&mut self, enabled: bool, window_millis: Option<u64>) {
        self.enabled = enabled;
        if let Some(millis) = window_millis.filter(|millis| *millis > 0) {
            self.window = Duration::from_millis(millis);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn push(&mut self, combo: &str) {
        self.push_at(combo, Instant::now());
    }

    /// 입력 추가 후 유휴 타이머 재시작
    pub fn push_at(&mut self, combo: &str, now: Instant) {
        if self.is_expired_at(now) {
            self.key_strokes.clear();
        }
        self.key_strokes.push(combo.to_string());
        self.deadline = Some(now + self.window);
        tracing::debug!(key_strokes = ?self.key_strokes, "sequence keystroke pushed");
    }

    /// 현재 입력 목록의 복사본
    pub fn snapshot(&self) -> Vec<String> {
        self.snapshot_at(Instant::now())
    }

    pub fn snapshot_at(&self, now: Instant) -> Vec<String> {
        if self.is_expired_at(now) {
            return Vec::new();
        }
        self.key_strokes.clone()
    }

    /// 공백으로 이은 시퀀스 문자열
    pub fn sequence_at(&self, now: Instant) -> String {
        self.snapshot_at(now).join(" ")
    }

    pub fn clear(&mut self) {
        self.key_strokes.clear();
        self.deadline = None;
    }

    /// 유휴 타이머가 이미 만료되었는지
    fn is_expired_at(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }
}
