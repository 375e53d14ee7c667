//! 단축키 설정 파일 (TOML)
//!
//! 경로 우선순위: `KSM_SHORTCUTS_FILE` 환경변수 → `<config_dir>/ksm/shortcuts.toml`
//!
//! 사용자 재정의 값은 파일에 다시 쓰지 않습니다.

use crate::core::ShortcutManager;
use crate::models::KeyboardShortcut;
use crate::utils::error::{KsmError, Result};
use crate::utils::validation::validate_shortcut;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const SHORTCUTS_FILE_ENV: &str = "KSM_SHORTCUTS_FILE";
const CONFIG_DIR_NAME: &str = "ksm";
const CONFIG_FILE_NAME: &str = "shortcuts.toml";

/// `[sequence_mode]` 섹션
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceModeConfig {
    #[serde(default)]
    pub enabled: bool,
    /// 입력 대기 시간 (ms). 0 이하면 현재 값 유지
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_millis: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_mode: Option<SequenceModeConfig>,
    #[serde(default)]
    pub shortcuts: Vec<KeyboardShortcut>,
}

impl FromStr for ShortcutConfigFile {
    type Err = KsmError;

    fn from_str(contents: &str) -> Result<Self> {
        let config: ShortcutConfigFile = toml::from_str(contents)?;
        for shortcut in &config.shortcuts {
            validate_shortcut(shortcut).map_err(|err| KsmError::Config(err.to_string()))?;
        }
        Ok(config)
    }
}

impl ShortcutConfigFile {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = contents.parse::<ShortcutConfigFile>()?;
        tracing::info!(
            path = %path.display(),
            shortcuts = config.shortcuts.len(),
            "shortcut config loaded"
        );
        Ok(config)
    }

    /// 설정 파일 경로 (파일 존재 여부는 확인하지 않음)
    pub fn locate() -> Option<PathBuf> {
        resolve_config_path(env::var(SHORTCUTS_FILE_ENV).ok(), dirs::config_dir())
    }

    /// 기본 경로의 파일 로드. 파일이 없으면 None
    pub fn load_default() -> Result<Option<Self>> {
        let Some(path) = Self::locate() else {
            return Ok(None);
        };
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no shortcut config file");
            return Ok(None);
        }
        Self::from_file(&path).map(Some)
    }

    /// 관리자에 시퀀스 모드 설정과 단축키를 적용
    pub fn apply_to(&self, manager: &ShortcutManager) -> Result<()> {
        if let Some(sequence_mode) = self.sequence_mode {
            manager.set_sequence_mode(sequence_mode.enabled, sequence_mode.window_millis);
        }
        if !self.shortcuts.is_empty() {
            manager.register_shortcuts(&self.shortcuts)?;
        }
        Ok(())
    }
}

fn resolve_config_path(custom: Option<String>, config_dir: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(custom) = custom {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    config_dir.map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{KeyPress, KeymapMode, KeymapValues, Modifiers};
    use crate::system::Platform;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
        [sequence_mode]
        enabled = true
        window_millis = 800

        [[shortcuts]]
        [shortcuts.user_action]
        id = "save"
        scopes = ["editor"]
        [shortcuts.keymap]
        values = ["ctrl+s"]
        default_values = ["ctrl+s"]
        [shortcuts.display]
        label = "Save"

        [[shortcuts]]
        [shortcuts.user_action]
        id = "go_top"
        [shortcuts.keymap]
        values = { sequenceModeOnly = "g g" }
        default_values = { sequenceModeOnly = "g g" }
        overidable = false
    "#;

    #[test]
    fn test_parse_sample() {
        let config: ShortcutConfigFile = SAMPLE.parse().unwrap();
        assert_eq!(
            config.sequence_mode,
            Some(SequenceModeConfig {
                enabled: true,
                window_millis: Some(800),
            })
        );
        assert_eq!(config.shortcuts.len(), 2);
        assert_eq!(config.shortcuts[0].display_label(), "Save");
        assert!(!config.shortcuts[1].keymap.overridable);
        assert_eq!(
            config.shortcuts[1].keymap.values,
            KeymapValues::modes([(KeymapMode::SequenceModeOnly, "g g")])
        );
    }

    #[test]
    fn test_parse_empty_file() {
        let config: ShortcutConfigFile = "".parse().unwrap();
        assert_eq!(config, ShortcutConfigFile::default());
    }

    #[test]
    fn test_parse_rejects_invalid_shortcut() {
        let result = r#"
            [[shortcuts]]
            [shortcuts.user_action]
            id = "  "
            [shortcuts.keymap]
            values = ["ctrl+s"]
            default_values = ["ctrl+s"]
        "#
        .parse::<ShortcutConfigFile>();
        assert!(matches!(result, Err(KsmError::Config(_))));
    }

    #[test]
    fn test_parse_rejects_malformed_toml() {
        let result = "[[shortcuts]\nid =".parse::<ShortcutConfigFile>();
        assert!(matches!(result, Err(KsmError::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = ShortcutConfigFile::from_file(file.path()).unwrap();
        assert_eq!(config.shortcuts.len(), 2);
    }

    #[test]
    fn test_from_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ShortcutConfigFile::from_file(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(KsmError::Io(_))));
    }

    #[test]
    fn test_resolve_config_path() {
        let config_dir = Some(PathBuf::from("/home/user/.config"));
        assert_eq!(
            resolve_config_path(Some(" /tmp/keys.toml ".to_string()), config_dir.clone()),
            Some(PathBuf::from("/tmp/keys.toml"))
        );
        assert_eq!(
            resolve_config_path(Some("   ".to_string()), config_dir.clone()),
            Some(PathBuf::from("/home/user/.config/ksm/shortcuts.toml"))
        );
        assert_eq!(
            resolve_config_path(None, config_dir),
            Some(PathBuf::from("/home/user/.config/ksm/shortcuts.toml"))
        );
        assert_eq!(resolve_config_path(None, None), None);
    }

    #[test]
    fn test_apply_to_manager() {
        let config: ShortcutConfigFile = SAMPLE.parse().unwrap();
        let manager = ShortcutManager::with_platform(Platform::Other);
        config.apply_to(&manager).unwrap();

        assert!(manager.is_sequence_mode_enabled());
        assert!(manager.is_shortcut_registered("save"));
        assert!(manager.is_shortcut_registered("go_top"));

        let editor = vec!["editor".to_string()];
        let ctrl_s = KeyPress::new(crate::models::Key::Char('s'), Modifiers::ctrl());
        let matched = manager.match_keyboard_event(&ctrl_s, &editor).unwrap();
        assert_eq!(matched.id(), "save");

        manager.match_keyboard_event(&KeyPress::char('g'), &[]);
        let matched = manager.match_keyboard_event(&KeyPress::char('g'), &[]).unwrap();
        assert_eq!(matched.id(), "go_top");
    }
}
