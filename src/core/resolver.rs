//! 이벤트 → 단축키 조회
//!
//! 스코프 순서(바깥)와 모드 순서(안쪽)로 후보 키 목록을 만들고
//! 인덱스에서 처음 찾은 단축키를 반환합니다.
//!
//! 모드 순서: `always` → `macintoshOnly` → `windowsOnly` → `sequenceModeOnly`

use crate::core::registry::ShortcutRegistry;
use crate::models::{scoped_keymap_value, KeyboardShortcut, KeymapMode, DEFAULT_SCOPE};
use crate::system::Platform;

/// 조회에 필요한 이벤트/환경 정보
#[derive(Debug, Clone, Copy)]
pub struct LookupContext<'a> {
    /// 현재 입력의 콤보 문자열
    pub combo: &'a str,
    /// 시퀀스 트래커에 모인 입력 (공백 구분)
    pub sequence: &'a str,
    pub platform: Platform,
    pub sequence_mode_enabled: bool,
}

pub fn candidate_keys(context: &LookupContext<'_>, scopes: &[String]) -> Vec<String> {
    let default_scope = [DEFAULT_SCOPE.to_string()];
    let scopes = if scopes.is_empty() {
        &default_scope[..]
    } else {
        scopes
    };

    let mut keys = Vec::with_capacity(scopes.len() * 4);
    for scope in scopes {
        keys.push(scoped_keymap_value(scope, KeymapMode::Always, context.combo));
        if context.platform.is_macintosh() {
            keys.push(scoped_keymap_value(
                scope,
                KeymapMode::MacintoshOnly,
                context.combo,
            ));
        }
        if context.platform.is_windows() {
            keys.push(scoped_keymap_value(
                scope,
                KeymapMode::WindowsOnly,
                context.combo,
            ));
        }
        if context.sequence_mode_enabled {
            keys.push(scoped_keymap_value(
                scope,
                KeymapMode::SequenceModeOnly,
                context.sequence,
            ));
        }
    }
    keys
}

/// 후보 키 중 처음 매칭되는 단축키
pub fn resolve<'r>(
    registry: &'r ShortcutRegistry,
    context: &LookupContext<'_>,
    scopes: &[String],
) -> Option<&'r KeyboardShortcut> {
    let matched = candidate_keys(context, scopes)
        .iter()
        .find_map(|key| registry.lookup(key));
    tracing::debug!(
        combo = context.combo,
        sequence = context.sequence,
        matched = ?matched.map(|shortcut| shortcut.id()),
        "keyboard event resolved"
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KeymapValues;

    fn context<'a>(combo: &'a str, sequence: &'a str, platform: Platform, seq: bool) -> LookupContext<'a> {
        LookupContext {
            combo,
            sequence,
            platform,
            sequence_mode_enabled: seq,
        }
    }

    fn scopes(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_candidate_keys_default_scope() {
        let keys = candidate_keys(&context("k", "", Platform::Other, false), &[]);
        assert_eq!(keys, vec!["DEFAULT_SCOPE:always:k"]);
    }

    #[test]
    fn test_candidate_keys_mode_order() {
        let keys = candidate_keys(&context("g", "g g", Platform::Macintosh, true), &[]);
        assert_eq!(
            keys,
            vec![
                "DEFAULT_SCOPE:always:g",
                "DEFAULT_SCOPE:macintoshOnly:g",
                "DEFAULT_SCOPE:sequenceModeOnly:g g",
            ]
        );

        let keys = candidate_keys(&context("ctrl+f", "", Platform::Windows, false), &[]);
        assert_eq!(
            keys,
            vec!["DEFAULT_SCOPE:always:ctrl+f", "DEFAULT_SCOPE:windowsOnly:ctrl+f"]
        );
    }

    #[test]
    fn test_candidate_keys_scope_order_is_outer() {
        let keys = candidate_keys(
            &context("x", "x", Platform::Other, true),
            &scopes(&["modal", "editor"]),
        );
        assert_eq!(
            keys,
            vec![
                "modal:always:x",
                "modal:sequenceModeOnly:x",
                "editor:always:x",
                "editor:sequenceModeOnly:x",
            ]
        );
    }

    #[test]
    fn test_resolve_first_match_wins_across_scopes() {
        let mut registry = ShortcutRegistry::new();
        registry
            .register(&[
                KeyboardShortcut::new("editor_delete", KeymapValues::list(["x"])).scopes(["editor"]),
                KeyboardShortcut::new("modal_close", KeymapValues::list(["x"])).scopes(["modal"]),
            ])
            .unwrap();

        let ctx = context("x", "x", Platform::Other, false);
        let matched = resolve(&registry, &ctx, &scopes(&["modal", "editor"])).unwrap();
        assert_eq!(matched.id(), "modal_close");
        let matched = resolve(&registry, &ctx, &scopes(&["editor", "modal"])).unwrap();
        assert_eq!(matched.id(), "editor_delete");
        assert!(resolve(&registry, &ctx, &scopes(&["list"])).is_none());
    }

    #[test]
    fn test_resolve_platform_only_values() {
        let mut registry = ShortcutRegistry::new();
        registry
            .register(&[KeyboardShortcut::new(
                "find",
                KeymapValues::modes([(KeymapMode::MacintoshOnly, "meta+f")]),
            )])
            .unwrap();

        let on_mac = context("meta+f", "", Platform::Macintosh, false);
        let on_windows = context("meta+f", "", Platform::Windows, false);
        assert!(resolve(&registry, &on_mac, &[]).is_some());
        assert!(resolve(&registry, &on_windows, &[]).is_none());
    }
}
