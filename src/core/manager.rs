//! 단축키 관리자
//!
//! 레지스트리, 시퀀스 트래커, 옵저버 알림, 플랫폼 정보를 하나의 인스턴스로 묶습니다.
//! 전역 상태가 없으므로 여러 관리자를 독립적으로 둘 수 있습니다.
//!
//! 모든 변경(병합 + 인덱스 재구성)은 레지스트리 쓰기 잠금 안에서 한 번에 일어나고,
//! 조회는 읽기 잠금으로 항상 완성된 인덱스만 봅니다.

use crate::core::keyboard::{event_to_combo, is_focus_in_editable_element, is_single_key_tap};
use crate::core::notifier::CallbackNotifier;
use crate::core::registry::ShortcutRegistry;
use crate::core::resolver::{resolve, LookupContext};
use crate::core::sequence::SequenceTracker;
use crate::models::{CallbackEventKind, KeyPress, KeyboardShortcut, ShortcutValueUpdate};
use crate::system::{current_platform, Platform};
use crate::utils::error::Result;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::time::Instant;


/// 매칭된 액션의 핸들러
pub type ShortcutHandler<'a> = Box<dyn FnMut(&KeyPress, &KeyboardShortcut) + 'a>;

/// 액션 id → 핸들러
pub type ShortcutHandlers<'a> = HashMap<String, ShortcutHandler<'a>>;

/// `handle_keyboard_event` 옵션
#[derive(Default, Clone, Copy)]
pub struct HandleOptions<'a> {
    /// 조회할 스코프 (비어 있으면 기본 스코프)
    pub user_action_scopes: &'a [String],
    /// false를 반환하면 핸들러 호출과 알림을 모두 생략
    pub is_keyboard_event_handler_enabled: Option<&'a dyn Fn() -> bool>,
}

impl<'a> HandleOptions<'a> {
    pub fn scopes(scopes: &'a [String]) -> Self {
        Self {
            user_action_scopes: scopes,
            is_keyboard_event_handler_enabled: None,
        }
    }

    pub fn enabled_when(mut self, predicate: &'a dyn Fn() -> bool) -> Self {
        self.is_keyboard_event_handler_enabled = Some(predicate);
        self
    }
}

pub struct ShortcutManager {
    registry: RwLock<ShortcutRegistry>,
    sequence: Mutex<SequenceTracker>,
    notifier: CallbackNotifier,
    platform: Platform,
}

impl Default for ShortcutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortcutManager {
    pub fn new() -> Self {
        Self::with_platform(current_platform())
    }

    /// 플랫폼을 지정해서 생성 (windowsOnly/macintoshOnly 판정용)
    pub fn with_platform(platform: Platform) -> Self {
        Self {
            registry: RwLock::new(ShortcutRegistry::new()),
            sequence: Mutex::new(SequenceTracker::new()),
            notifier: CallbackNotifier::new(),
            platform,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn register_callback<F>(&self, handler: F)
    where
        F: Fn(CallbackEventKind, &[KeyboardShortcut]) + Send + Sync + 'static,
    {
        self.notifier.register(handler);
    }

    /// 단축키 등록. 목록 전체가 검증을 통과해야 병합됩니다.
    pub fn register_shortcuts(&self, shortcuts: &[KeyboardShortcut]) -> Result<()> {
        self.registry.write().register(shortcuts)?;
        tracing::debug!(count = shortcuts.len(), "shortcuts registered");
        self.notifier
            .notify(CallbackEventKind::Registered, shortcuts.to_vec());
        Ok(())
    }

    // === 시퀀스 모드 ===

    pub fn set_sequence_mode(&self, enabled: bool, window_millis: Option<u64>) {
        self.sequence.lock().set_mode(enabled, window_millis);
        tracing::debug!(enabled, ?window_millis, "sequence mode updated");
    }

    pub fn is_sequence_mode_enabled(&self) -> bool {
        self.sequence.lock().is_enabled()
    }

    /// 현재 모인 시퀀스 입력 (복사본)
    pub fn sequence_keystrokes(&self) -> Vec<String> {
        self.sequence.lock().snapshot()
    }

    pub fn clear_sequence(&self) {
        self.sequence.lock().clear();
    }

    // === 조회 ===

    pub fn is_shortcut_registered(&self, user_action_id: &str) -> bool {
        self.registry.read().is_registered(user_action_id)
    }

    /// `scope:mode:combo` 키가 이미 사용 중인지
    pub fn is_shortcut_keymap_taken(&self, scoped_keymap_value: &str) -> bool {
        self.registry.read().is_keymap_taken(scoped_keymap_value)
    }

    pub fn get_shortcut(&self, user_action_id: &str) -> Option<KeyboardShortcut> {
        self.registry.read().get(user_action_id).cloned()
    }

    pub fn get_all_shortcuts(&self, scopes: Option<&[String]>) -> Vec<KeyboardShortcut> {
        self.registry.read().all(scopes)
    }

    // === 변경 ===

    pub fn update_shortcut_value(&self, update: &ShortcutValueUpdate) -> Result<()> {
        let updated = self.registry.write().update_value(update)?;
        self.notifier
            .notify(CallbackEventKind::UpdatedValue, vec![updated]);
        Ok(())
    }

    /// 항목별로 적용. 실패한 항목에서 멈추며 앞서 적용된 항목은 유지됩니다.
    pub fn update_shortcut_values(&self, updates: &[ShortcutValueUpdate]) -> Result<()> {
        for update in updates {
            self.update_shortcut_value(update)?;
        }
        Ok(())
    }

    pub fn reset_shortcut_to_default_value(&self, user_action_id: &str) -> Result<()> {
        let reset = self.registry.write().reset(user_action_id)?;
        self.notifier.notify(CallbackEventKind::ResetValue, vec![reset]);
        Ok(())
    }

    pub fn reset_all_shortcuts_to_default_value(&self, scopes: Option<&[String]>) {
        let reset = self.registry.write().reset_all(scopes);
        if !reset.is_empty() {
            self.notifier.notify(CallbackEventKind::ResetValue, reset);
        }
    }

    /// 삭제된 개수 반환
    pub fn delete_shortcuts(&self, user_action_ids: &[String]) -> Result<usize> {
        let removed = self.registry.write().delete(user_action_ids)?;
        Ok(self.notify_deleted(removed))
    }

    pub fn delete_all_shortcuts(&self, scope: Option<&str>) -> usize {
        let removed = self.registry.write().delete_all(scope);
        self.notify_deleted(removed)
    }

    fn notify_deleted(&self, removed: Vec<KeyboardShortcut>) -> usize {
        let count = removed.len();
        if count > 0 {
            tracing::debug!(count, "shortcuts deleted");
            self.notifier.notify(CallbackEventKind::Deleted, removed);
        }
        count
    }

    // === 이벤트 처리 ===

    /// 키 입력과 매칭되는 단축키 조회
    ///
    /// 단일 키 입력은 매칭 결과와 관계없이 시퀀스 트래커에 쌓입니다.
    /// 반복 입력은 트래커에 쌓지 않고 무시합니다.
    pub fn match_keyboard_event(
        &self,
        event: &KeyPress,
        scopes: &[String],
    ) -> Option<KeyboardShortcut> {
        if event.repeat {
            return None;
        }
        let combo = event_to_combo(event)?;
        let now = Instant::now();

        let (sequence, sequence_mode_enabled) = {
            let mut tracker = self.sequence.lock();
            if is_single_key_tap(&combo) {
                tracker.push_at(&combo, now);
            }
            (tracker.sequence_at(now), tracker.is_enabled())
        };

        let context = LookupContext {
            combo: &combo,
            sequence: &sequence,
            platform: self.platform,
            sequence_mode_enabled,
        };
        let registry = self.registry.read();
        resolve(&registry, &context, scopes).cloned()
    }

    /// 키 입력 처리
    ///
    /// 매칭된 액션의 핸들러를 호출하고 호출된 단축키를 반환합니다.
    /// 반복 입력, 매칭 실패, 핸들러 없음, 비활성 조건, 편집 요소 포커스는 모두 None.
    pub fn handle_keyboard_event(
        &self,
        event: &mut KeyPress,
        handlers: &mut ShortcutHandlers<'_>,
        options: HandleOptions<'_>,
    ) -> Option<KeyboardShortcut> {
        if event.repeat {
            return None;
        }

        let shortcut = self.match_keyboard_event(event, options.user_action_scopes)?;
        let handler = handlers.get_mut(shortcut.id())?;

        if let Some(is_enabled) = options.is_keyboard_event_handler_enabled {
            if !is_enabled() {
                return None;
            }
        }

        let keymap = &shortcut.keymap;
        if !keymap.allow_shortcut_on_editable_elements && is_focus_in_editable_element(&event.target)
        {
            return None;
        }
        if !keymap.do_not_stop_propagation_on_match {
            event.stop_propagation();
            event.prevent_default();
        }

        tracing::debug!(user_action_id = shortcut.id(), "calling shortcut handler");
        handler(&*event, &shortcut);
        self.notifier
            .notify(CallbackEventKind::CalledShortcutHandler, vec![shortcut.clone()]);
        Some(shortcut)
    }
}
