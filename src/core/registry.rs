//! 단축키 레지스트리
//!
//! 등록 순서를 유지하는 단축키 목록과 두 개의 조회 인덱스를 관리합니다.
//!
//! - `by_user_action_id`: 등록된 모든 액션 (비활성/외부 관리 포함)
//! - `by_scoped_keymap_value`: 활성 액션만, `scope:mode:combo` 키
//!
//! 인덱스는 변경 호출마다 새로 만든 뒤 한 번에 교체합니다.
//! 부분적으로 갱신된 인덱스가 읽히는 일은 없습니다.

use crate::models::{
    scoped_keymap_value, KeyboardShortcut, KeymapMode, KeymapValues, ShortcutValueUpdate,
    UserAction, DEFAULT_SCOPE,
};
use crate::utils::error::{KsmError, Result};
use crate::utils::validation::{
    should_not_be_empty, should_not_be_empty_list, validate_shortcut, validate_value_update,
};
use std::collections::HashMap;

/// 조회 인덱스 (값은 `shortcuts` 위치)
#[derive(Debug, Default)]
struct ShortcutIndex {
    by_user_action_id: HashMap<String, usize>,
    by_scoped_keymap_value: HashMap<String, usize>,
}

impl ShortcutIndex {
    /// 키맵 인덱스는 등록 시점 순서로 채움 (나중에 등록된 쪽이 같은 키를 차지)
    fn build(shortcuts: &[KeyboardShortcut], revisions: &HashMap<String, u64>) -> Self {
        let mut by_user_action_id = HashMap::with_capacity(shortcuts.len());
        let mut by_scoped_keymap_value = HashMap::new();

        let mut positions: Vec<usize> = (0..shortcuts.len()).collect();
        positions.sort_by_key(|&position| {
            revisions
                .get(&shortcuts[position].user_action.id)
                .copied()
                .unwrap_or_default()
        });

        for position in positions {
            let shortcut = &shortcuts[position];
            by_user_action_id.insert(shortcut.user_action.id.clone(), position);

            if !shortcut.user_action.is_active() {
                continue;
            }
            if shortcut.keymap.values.is_empty() {
                tracing::warn!(
                    user_action_id = %shortcut.user_action.id,
                    "shortcut has empty keymap values, skipped while indexing"
                );
                continue;
            }

            for (mode, combo) in shortcut.keymap.values.entries() {
                for scope in indexed_scopes(&shortcut.user_action) {
                    by_scoped_keymap_value
                        .insert(scoped_keymap_value(scope, mode, combo), position);
                }
            }
        }

        Self {
            by_user_action_id,
            by_scoped_keymap_value,
        }
    }
}

/// 액션이 인덱싱되는 스코프: 기본 스코프 + 선언된 스코프
fn indexed_scopes(user_action: &UserAction) -> impl Iterator<Item = &str> {
    std::iter::once(DEFAULT_SCOPE).chain(user_action.scopes.iter().map(String::as_str))
}

/// 값 충돌을 검사할 스코프: 선언된 스코프, 없으면 기본 스코프
///
/// 기본 스코프 항목은 모든 액션이 공유하므로 스코프가 있는 액션에는 쓰지 않습니다.
fn conflict_scopes(user_action: &UserAction) -> Vec<&str> {
    if user_action.scopes.is_empty() {
        vec![DEFAULT_SCOPE]
    } else {
        user_action.scopes.iter().map(String::as_str).collect()
    }
}

fn matches_scopes(shortcut: &KeyboardShortcut, scopes: Option<&[String]>) -> bool {
    match scopes {
        Some(scopes) if !scopes.is_empty() => shortcut.user_action.has_any_scope(scopes),
        _ => true,
    }
}

#[derive(Debug, Default)]
pub struct ShortcutRegistry {
    shortcuts: Vec<KeyboardShortcut>,
    /// 액션 id → 마지막 등록 순번
    revisions: HashMap<String, u64>,
    next_revision: u64,
    index: ShortcutIndex,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }

    fn reindex(&mut self) {
        let index = ShortcutIndex::build(&self.shortcuts, &self.revisions);
        tracing::debug!(
            shortcuts = self.shortcuts.len(),
            scoped_keymap_values = index.by_scoped_keymap_value.len(),
            "shortcut indexes rebuilt"
        );
        self.index = index;
    }

    /// 단축키 등록
    ///
    /// 목록 전체를 먼저 검증한 뒤 병합합니다. 같은 id가 이미 있으면 목록의
    /// 그 자리를 교체하고, 새 id는 제출 순서대로 뒤에 붙입니다.
    /// 키맵 충돌은 어느 경우든 가장 최근에 등록된 액션이 이깁니다.
    pub fn register(&mut self, shortcuts: &[KeyboardShortcut]) -> Result<()> {
        should_not_be_empty_list(shortcuts, "shortcuts")?;
        for shortcut in shortcuts {
            validate_shortcut(shortcut)?;
        }

        // 같은 호출 안의 중복 id도 한 자리로 모음
        let mut positions = self.index.by_user_action_id.clone();
        for shortcut in shortcuts {
            match positions.get(&shortcut.user_action.id) {
                Some(position) => self.shortcuts[*position] = shortcut.clone(),
                None => {
                    positions.insert(shortcut.user_action.id.clone(), self.shortcuts.len());
                    self.shortcuts.push(shortcut.clone());
                }
            }
            self.revisions.insert(shortcut.user_action.id.clone(), self.next_revision);
            self.next_revision += 1;
        }
        self.reindex();
        Ok(())
    }

    fn position(&self, user_action_id: &str) -> Option<usize> {
        self.index.by_user_action_id.get(user_action_id).copied()
    }

    pub fn is_registered(&self, user_action_id: &str) -> bool {
        self.index.by_user_action_id.contains_key(user_action_id)
    }

    /// `scope:mode:combo` 키가 인덱스에 있는지
    pub fn is_keymap_taken(&self, scoped_keymap_value: &str) -> bool {
        self.index
            .by_scoped_keymap_value
            .contains_key(scoped_keymap_value)
    }

    pub fn lookup(&self, scoped_keymap_value: &str) -> Option<&KeyboardShortcut> {
        self.index
            .by_scoped_keymap_value
            .get(scoped_keymap_value)
            .map(|position| &self.shortcuts[*position])
    }

    pub fn get(&self, user_action_id: &str) -> Option<&KeyboardShortcut> {
        if user_action_id.is_empty() {
            return None;
        }
        self.position(user_action_id)
            .map(|position| &self.shortcuts[position])
    }

    /// 등록 순서대로 복사본 반환 (스코프가 주어지면 교집합이 있는 것만)
    pub fn all(&self, scopes: Option<&[String]>) -> Vec<KeyboardShortcut> {
        self.shortcuts
            .iter()
            .filter(|shortcut| matches_scopes(shortcut, scopes))
            .cloned()
            .collect()
    }

    /// 런타임 키맵 재정의
    ///
    /// 제안된 값이 이 액션의 스코프에서 다른 액션의 `always` 값과 겹치면
    /// 거부됩니다. 스코프가 없는 액션은 기본 스코프에서 검사합니다.
    pub fn update_value(&mut self, update: &ShortcutValueUpdate) -> Result<KeyboardShortcut> {
        validate_value_update(update)?;
        let position = self
            .position(&update.user_action_id)
            .ok_or_else(|| KsmError::NotRegistered(update.user_action_id.clone()))?;

        let target = &self.shortcuts[position];
        for value in &update.keymap_values {
            for scope in conflict_scopes(&target.user_action) {
                let key = scoped_keymap_value(scope, KeymapMode::Always, value);
                if let Some(owner) = self.lookup(&key) {
                    if owner.user_action.id != update.user_action_id {
                        tracing::warn!(
                            user_action_id = %update.user_action_id,
                            value = %value,
                            owner = %owner.user_action.id,
                            "keymap value already in use"
                        );
                        return Err(KsmError::Conflict {
                            value: value.clone(),
                            user_action_id: owner.user_action.id.clone(),
                        });
                    }
                }
            }
        }

        if !target.keymap.overridable {
            return Err(KsmError::Permission(update.user_action_id.clone()));
        }

        let shortcut = &mut self.shortcuts[position];
        shortcut.keymap.values = KeymapValues::List(update.keymap_values.clone());
        let updated = shortcut.clone();
        self.reindex();
        Ok(updated)
    }

    /// id 목록으로 삭제. 등록되지 않은 id는 무시
    pub fn delete(&mut self, user_action_ids: &[String]) -> Result<Vec<KeyboardShortcut>> {
        should_not_be_empty_list(user_action_ids, "userActionIds")?;
        for id in user_action_ids {
            should_not_be_empty(id, "userActionIds[]")?;
        }
        Ok(self.remove_where(|shortcut| user_action_ids.contains(&shortcut.user_action.id)))
    }

    /// 전체 삭제, 스코프가 주어지면 그 스코프를 선언한 것만
    pub fn delete_all(&mut self, scope: Option<&str>) -> Vec<KeyboardShortcut> {
        match scope {
            Some(scope) => self.remove_where(|shortcut| {
                shortcut.user_action.scopes.iter().any(|s| s == scope)
            }),
            None => self.remove_where(|_| true),
        }
    }

    fn remove_where<F>(&mut self, predicate: F) -> Vec<KeyboardShortcut>
    where
        F: Fn(&KeyboardShortcut) -> bool,
    {
        let (removed, kept): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.shortcuts).into_iter().partition(|s| predicate(s));
        self.shortcuts = kept;
        for shortcut in &removed {
            self.revisions.remove(&shortcut.user_action.id);
        }
        if !removed.is_empty() {
            self.reindex();
        }
        removed
    }

    /// 기본값으로 되돌림
    pub fn reset(&mut self, user_action_id: &str) -> Result<KeyboardShortcut> {
        should_not_be_empty(user_action_id, "userActionId")?;
        let position = self
            .position(user_action_id)
            .ok_or_else(|| KsmError::NotRegistered(user_action_id.to_string()))?;

        let shortcut = &mut self.shortcuts[position];
        shortcut.keymap.values = shortcut.keymap.default_values.clone();
        let reset = shortcut.clone();
        self.reindex();
        Ok(reset)
    }

    /// 기본값과 다른 단축키를 모두 되돌림 (스코프가 주어지면 교집합이 있는 것만)
    pub fn reset_all(&mut self, scopes: Option<&[String]>) -> Vec<KeyboardShortcut> {
        let mut reset = Vec::new();
        for shortcut in self.shortcuts.iter_mut() {
            if !matches_scopes(shortcut, scopes)
                || shortcut.keymap.values == shortcut.keymap.default_values
            {
                continue;
            }
            shortcut.keymap.values = shortcut.keymap.default_values.clone();
            reset.push(shortcut.clone());
        }
        if !reset.is_empty() {
            self.reindex();
        }
        reset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shortcut(id: &str, values: &[&str]) -> KeyboardShortcut {
        KeyboardShortcut::new(id, KeymapValues::list(values.iter().copied()))
    }

    fn scopes(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn ids(shortcuts: &[KeyboardShortcut]) -> Vec<&str> {
        shortcuts.iter().map(|s| s.id()).collect()
    }

    #[test]
    fn test_register_indexes_default_and_declared_scopes() {
        let mut registry = ShortcutRegistry::new();
        registry
            .register(&[shortcut("save", &["ctrl+s"]).scopes(["editor", "modal"])])
            .unwrap();

        assert!(registry.is_keymap_taken("DEFAULT_SCOPE:always:ctrl+s"));
        assert!(registry.is_keymap_taken("editor:always:ctrl+s"));
        assert!(registry.is_keymap_taken("modal:always:ctrl+s"));
        assert!(!registry.is_keymap_taken("list:always:ctrl+s"));
        assert!(!registry.is_keymap_taken("ctrl+s"));
    }

    #[test]
    fn test_register_mode_keyed_values() {
        let mut registry = ShortcutRegistry::new();
        registry
            .register(&[KeyboardShortcut::new(
                "find",
                KeymapValues::modes([
                    (KeymapMode::WindowsOnly, "ctrl+f"),
                    (KeymapMode::MacintoshOnly, "meta+f"),
                ]),
            )])
            .unwrap();

        assert!(registry.is_keymap_taken("DEFAULT_SCOPE:windowsOnly:ctrl+f"));
        assert!(registry.is_keymap_taken("DEFAULT_SCOPE:macintoshOnly:meta+f"));
        assert!(!registry.is_keymap_taken("DEFAULT_SCOPE:always:ctrl+f"));
    }

    #[test]
    fn test_inactive_shortcuts_are_registered_but_not_keymap_indexed() {
        let mut registry = ShortcutRegistry::new();
        registry
            .register(&[
                shortcut("disabled", &["ctrl+d"]).enabled(false),
                shortcut("external", &["ctrl+e"]).managed_externally(true),
            ])
            .unwrap();

        assert!(registry.is_registered("disabled"));
        assert!(registry.is_registered("external"));
        assert!(!registry.is_keymap_taken("DEFAULT_SCOPE:always:ctrl+d"));
        assert!(!registry.is_keymap_taken("DEFAULT_SCOPE:always:ctrl+e"));
        assert_eq!(registry.all(None).len(), 2);
    }

    #[test]
    fn test_colliding_combo_last_write_wins() {
        let mut registry = ShortcutRegistry::new();
        registry
            .register(&[shortcut("first", &["ctrl+k"]), shortcut("second", &["ctrl+k"])])
            .unwrap();

        let owner = registry.lookup("DEFAULT_SCOPE:always:ctrl+k").unwrap();
        assert_eq!(owner.id(), "second");
    }

    #[test]
    fn test_register_validates_whole_list_before_merge() {
        let mut registry = ShortcutRegistry::new();
        let result = registry.register(&[shortcut("ok", &["ctrl+o"]), shortcut("", &["ctrl+p"])]);
        assert!(matches!(result, Err(KsmError::Validation(_))));
        assert!(registry.is_empty());

        assert!(matches!(registry.register(&[]), Err(KsmError::Validation(_))));
    }

    #[test]
    fn test_reregistered_action_wins_colliding_combo() {
        let mut registry = ShortcutRegistry::new();
        registry.register(&[shortcut("a", &["ctrl+k"])]).unwrap();
        registry.register(&[shortcut("b", &["ctrl+k"])]).unwrap();
        registry.register(&[shortcut("a", &["ctrl+k"])]).unwrap();

        assert_eq!(registry.lookup("DEFAULT_SCOPE:always:ctrl+k").unwrap().id(), "a");
        assert_eq!(ids(&registry.all(None)), vec!["a", "b"]);

        registry.delete(&["a".to_string()]).unwrap();
        assert_eq!(registry.lookup("DEFAULT_SCOPE:always:ctrl+k").unwrap().id(), "b");
    }

    #[test]
    fn test_register_upserts_by_id() {
        let mut registry = ShortcutRegistry::new();
        registry
            .register(&[shortcut("a", &["ctrl+a"]), shortcut("b", &["ctrl+b"])])
            .unwrap();
        registry
            .register(&[shortcut("c", &["ctrl+c"]), shortcut("a", &["ctrl+shift+a"])])
            .unwrap();

        assert_eq!(ids(&registry.all(None)), vec!["a", "b", "c"]);
        assert!(!registry.is_keymap_taken("DEFAULT_SCOPE:always:ctrl+a"));
        assert!(registry.is_keymap_taken("DEFAULT_SCOPE:always:ctrl+shift+a"));
    }

    #[test]
    fn test_all_filters_by_scope_in_registration_order() {
        let mut registry = ShortcutRegistry::new();
        registry
            .register(&[
                shortcut("one", &["1"]).scopes(["scopeA"]),
                shortcut("two", &["2"]),
                shortcut("three", &["3"]).scopes(["scopeB", "scopeA"]),
                shortcut("four", &["4"]).scopes(["scopeB"]),
            ])
            .unwrap();

        let scoped = registry.all(Some(scopes(&["scopeA"]).as_slice()));
        assert_eq!(ids(&scoped), vec!["one", "three"]);
        assert_eq!(registry.all(Some(scopes(&[]).as_slice())).len(), 4);
    }

    #[test]
    fn test_update_value_replaces_values() {
        let mut registry = ShortcutRegistry::new();
        registry.register(&[shortcut("save", &["ctrl+s"])]).unwrap();

        let updated = registry
            .update_value(&ShortcutValueUpdate::new("save", ["ctrl+shift+s"]))
            .unwrap();
        assert_eq!(updated.keymap.values, KeymapValues::list(["ctrl+shift+s"]));
        assert!(!registry.is_keymap_taken("DEFAULT_SCOPE:always:ctrl+s"));
        assert!(registry.is_keymap_taken("DEFAULT_SCOPE:always:ctrl+shift+s"));
    }

    #[test]
    fn test_update_value_unknown_id() {
        let mut registry = ShortcutRegistry::new();
        let result = registry.update_value(&ShortcutValueUpdate::new("ghost", ["ctrl+g"]));
        assert!(matches!(result, Err(KsmError::NotRegistered(id)) if id == "ghost"));
    }

    #[test]
    fn test_update_value_conflict_leaves_state_untouched() {
        let mut registry = ShortcutRegistry::new();
        registry
            .register(&[
                shortcut("save", &["ctrl+s"]).scopes(["editor"]),
                shortcut("search", &["ctrl+f"]).scopes(["editor"]),
            ])
            .unwrap();

        let result = registry.update_value(&ShortcutValueUpdate::new("search", ["ctrl+s"]));
        assert!(matches!(
            result,
            Err(KsmError::Conflict { ref user_action_id, .. }) if user_action_id == "save"
        ));
        assert_eq!(
            registry.get("search").unwrap().keymap.values,
            KeymapValues::list(["ctrl+f"])
        );

        // 자기 자신의 값으로 재지정하는 것은 충돌이 아님
        assert!(registry
            .update_value(&ShortcutValueUpdate::new("search", ["ctrl+f", "ctrl+shift+f"]))
            .is_ok());
    }

    #[test]
    fn test_update_value_keeps_own_value_shared_with_other_scope() {
        let mut registry = ShortcutRegistry::new();
        registry
            .register(&[
                shortcut("editor_cancel", &["esc"]).scopes(["editor"]),
                shortcut("modal_close", &["esc"]).scopes(["modal"]),
            ])
            .unwrap();

        let updated = registry
            .update_value(&ShortcutValueUpdate::new("editor_cancel", ["esc", "ctrl+g"]))
            .unwrap();
        assert_eq!(updated.keymap.values, KeymapValues::list(["esc", "ctrl+g"]));
        assert_eq!(registry.lookup("editor:always:esc").unwrap().id(), "editor_cancel");
        assert_eq!(registry.lookup("modal:always:esc").unwrap().id(), "modal_close");
    }

    #[test]
    fn test_update_value_may_take_key_used_only_in_other_scope() {
        let mut registry = ShortcutRegistry::new();
        registry
            .register(&[
                shortcut("editor_undo", &["ctrl+z"]).scopes(["editor"]),
                shortcut("modal_close", &["esc"]).scopes(["modal"]),
            ])
            .unwrap();

        registry
            .update_value(&ShortcutValueUpdate::new("editor_undo", ["esc"]))
            .unwrap();
        assert_eq!(registry.lookup("editor:always:esc").unwrap().id(), "editor_undo");
        assert_eq!(registry.lookup("modal:always:esc").unwrap().id(), "modal_close");
    }

    #[test]
    fn test_update_value_unscoped_checks_default_scope() {
        let mut registry = ShortcutRegistry::new();
        registry
            .register(&[
                shortcut("modal_close", &["esc"]).scopes(["modal"]),
                shortcut("global_undo", &["ctrl+z"]),
            ])
            .unwrap();

        let result = registry.update_value(&ShortcutValueUpdate::new("global_undo", ["esc"]));
        assert!(matches!(
            result,
            Err(KsmError::Conflict { ref user_action_id, .. }) if user_action_id == "modal_close"
        ));
    }

    #[test]
    fn test_update_value_not_overridable() {
        let mut registry = ShortcutRegistry::new();
        registry
            .register(&[shortcut("quit", &["ctrl+q"]).overridable(false)])
            .unwrap();

        let result = registry.update_value(&ShortcutValueUpdate::new("quit", ["ctrl+w"]));
        assert!(matches!(result, Err(KsmError::Permission(_))));
        assert_eq!(
            registry.get("quit").unwrap().keymap.values,
            KeymapValues::list(["ctrl+q"])
        );
    }

    #[test]
    fn test_delete_and_delete_all() {
        let mut registry = ShortcutRegistry::new();
        registry
            .register(&[
                shortcut("a", &["ctrl+a"]).scopes(["list"]),
                shortcut("b", &["ctrl+b"]),
                shortcut("c", &["ctrl+c"]).scopes(["list"]),
            ])
            .unwrap();

        let removed = registry
            .delete(&["b".to_string(), "ghost".to_string()])
            .unwrap();
        assert_eq!(ids(&removed), vec!["b"]);
        assert!(!registry.is_registered("b"));
        assert!(!registry.is_keymap_taken("DEFAULT_SCOPE:always:ctrl+b"));
        assert!(registry.delete(&[]).is_err());

        let removed = registry.delete_all(Some("list"));
        assert_eq!(ids(&removed), vec!["a", "c"]);
        assert!(registry.is_empty());
        assert!(registry.delete_all(None).is_empty());
    }

    #[test]
    fn test_positions_stay_valid_after_delete() {
        let mut registry = ShortcutRegistry::new();
        registry
            .register(&[shortcut("a", &["1"]), shortcut("b", &["2"]), shortcut("c", &["3"])])
            .unwrap();
        registry.delete(&["a".to_string()]).unwrap();

        assert_eq!(registry.get("c").unwrap().id(), "c");
        assert_eq!(registry.lookup("DEFAULT_SCOPE:always:3").unwrap().id(), "c");
    }

    #[test]
    fn test_reset_and_reset_all() {
        let mut registry = ShortcutRegistry::new();
        registry
            .register(&[
                shortcut("save", &["ctrl+s"]).scopes(["editor"]),
                shortcut("open", &["ctrl+o"]),
            ])
            .unwrap();
        registry
            .update_value(&ShortcutValueUpdate::new("save", ["ctrl+shift+s"]))
            .unwrap();
        registry
            .update_value(&ShortcutValueUpdate::new("open", ["ctrl+shift+o"]))
            .unwrap();

        let reset = registry.reset("save").unwrap();
        assert_eq!(reset.keymap.values, KeymapValues::list(["ctrl+s"]));
        assert!(registry.is_keymap_taken("editor:always:ctrl+s"));
        assert!(matches!(registry.reset("ghost"), Err(KsmError::NotRegistered(_))));

        let reset = registry.reset_all(Some(scopes(&["editor"]).as_slice()));
        assert!(reset.is_empty());
        let reset = registry.reset_all(None);
        assert_eq!(ids(&reset), vec!["open"]);
        assert!(registry.is_keymap_taken("DEFAULT_SCOPE:always:ctrl+o"));
    }

    #[test]
    fn test_get_empty_id() {
        let mut registry = ShortcutRegistry::new();
        registry.register(&[shortcut("save", &["ctrl+s"])]).unwrap();
        assert!(registry.get("").is_none());
        assert!(registry.get("ghost").is_none());
        assert_eq!(registry.get("save").unwrap().id(), "save");
    }
}
