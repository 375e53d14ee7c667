// Keyboard shortcut model - 단축키 데이터 모델
//
// 사용자 액션, 키맵 설정, 표시 정보를 묶은 등록 단위

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 스코프를 선언하지 않은 액션이 인덱싱되는 기본 스코프
pub const DEFAULT_SCOPE: &str = "DEFAULT_SCOPE";

/// 키맵 값이 활성화되는 조건
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeymapMode {
    /// 항상
    Always,
    /// Windows 계열 환경에서만
    WindowsOnly,
    /// macOS 계열 환경에서만
    MacintoshOnly,
    /// 시퀀스 모드가 켜져 있을 때만 (예: `g g`)
    SequenceModeOnly,
}

impl KeymapMode {
    pub const ALL: [KeymapMode; 4] = [
        KeymapMode::Always,
        KeymapMode::WindowsOnly,
        KeymapMode::MacintoshOnly,
        KeymapMode::SequenceModeOnly,
    ];

    /// 인덱스 키에 들어가는 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            KeymapMode::Always => "always",
            KeymapMode::WindowsOnly => "windowsOnly",
            KeymapMode::MacintoshOnly => "macintoshOnly",
            KeymapMode::SequenceModeOnly => "sequenceModeOnly",
        }
    }

    pub fn from_name(name: &str) -> Option<KeymapMode> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == name)
    }
}

impl fmt::Display for KeymapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 키맵 값
///
/// 단순 목록(모두 `always` 모드)이거나 모드별 매핑입니다.
/// TOML에서는 배열 또는 테이블로 표현됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeymapValues {
    List(Vec<String>),
    Modes(BTreeMap<KeymapMode, String>),
}

impl KeymapValues {
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KeymapValues::List(values.into_iter().map(Into::into).collect())
    }

    pub fn modes<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = (KeymapMode, S)>,
        S: Into<String>,
    {
        KeymapValues::Modes(
            values
                .into_iter()
                .map(|(mode, combo)| (mode, combo.into()))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        match self {
            KeymapValues::List(values) => values.is_empty(),
            KeymapValues::Modes(values) => values.is_empty(),
        }
    }

    /// `(모드, 콤보)` 쌍으로 펼침
    pub fn entries(&self) -> Vec<(KeymapMode, &str)> {
        match self {
            KeymapValues::List(values) => values
                .iter()
                .map(|combo| (KeymapMode::Always, combo.as_str()))
                .collect(),
            KeymapValues::Modes(values) => values
                .iter()
                .map(|(mode, combo)| (*mode, combo.as_str()))
                .collect(),
        }
    }

    /// 화면 표시용 문자열 (예: "ctrl+s, g g")
    pub fn display(&self) -> String {
        self.entries()
            .iter()
            .map(|(_, combo)| *combo)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn default_true() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// 사용자 액션
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAction {
    pub id: String,
    /// 선언된 스코프 (비어 있으면 기본 스코프에만 인덱싱)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub enabled: bool,
    /// true면 목록에는 남지만 이벤트 처리는 외부에서 담당
    #[serde(default, skip_serializing_if = "is_false")]
    pub managed_externally: bool,
}

impl UserAction {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            scopes: Vec::new(),
            enabled: true,
            managed_externally: false,
        }
    }

    /// 키 이벤트 처리 대상 여부
    pub fn is_active(&self) -> bool {
        self.enabled && !self.managed_externally
    }

    pub fn has_any_scope(&self, scopes: &[String]) -> bool {
        self.scopes.iter().any(|scope| scopes.contains(scope))
    }
}

/// 키맵 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// 현재 값 (기본값 또는 런타임 재정의 값)
    pub values: KeymapValues,
    /// 기본값 (런타임에 바뀌지 않음)
    pub default_values: KeymapValues,
    #[serde(default = "default_true", alias = "overidable")]
    pub overridable: bool,
    /// input/textarea 등 편집 요소에 포커스가 있어도 동작
    #[serde(default)]
    pub allow_shortcut_on_editable_elements: bool,
    /// 매칭 시 전파/기본 동작을 막지 않음
    #[serde(default)]
    pub do_not_stop_propagation_on_match: bool,
}

impl KeymapConfig {
    pub fn new(values: KeymapValues) -> Self {
        Self {
            default_values: values.clone(),
            values,
            overridable: true,
            allow_shortcut_on_editable_elements: false,
            do_not_stop_propagation_on_match: false,
        }
    }
}

/// 표시 정보 (매칭 로직에서는 사용하지 않음)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 등록/저장/조회 단위
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardShortcut {
    pub user_action: UserAction,
    pub keymap: KeymapConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayConfig>,
}

impl KeyboardShortcut {
    /// 기본값이 `values`와 같은 단축키 생성
    pub fn new(id: impl Into<String>, values: KeymapValues) -> Self {
        Self {
            user_action: UserAction::new(id),
            keymap: KeymapConfig::new(values),
            display: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.user_action.id
    }

    pub fn scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user_action.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.user_action.enabled = enabled;
        self
    }

    pub fn managed_externally(mut self, managed: bool) -> Self {
        self.user_action.managed_externally = managed;
        self
    }

    pub fn overridable(mut self, overridable: bool) -> Self {
        self.keymap.overridable = overridable;
        self
    }

    pub fn allow_on_editable_elements(mut self, allow: bool) -> Self {
        self.keymap.allow_shortcut_on_editable_elements = allow;
        self
    }

    pub fn keep_propagation(mut self, keep: bool) -> Self {
        self.keymap.do_not_stop_propagation_on_match = keep;
        self
    }

    pub fn default_values(mut self, values: KeymapValues) -> Self {
        self.keymap.default_values = values;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.display.get_or_insert_with(DisplayConfig::default).label = Some(label.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.display.get_or_insert_with(DisplayConfig::default).category = Some(category.into());
        self
    }

    /// 표시 레이블 (없으면 id)
    pub fn display_label(&self) -> &str {
        self.display
            .as_ref()
            .and_then(|display| display.label.as_deref())
            .unwrap_or(&self.user_action.id)
    }
}

/// 런타임 키맵 재정의 요청
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutValueUpdate {
    pub user_action_id: String,
    pub keymap_values: Vec<String>,
}

impl ShortcutValueUpdate {
    pub fn new<I, S>(user_action_id: impl Into<String>, keymap_values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user_action_id: user_action_id.into(),
            keymap_values: keymap_values.into_iter().map(Into::into).collect(),
        }
    }
}

/// 인덱스 키 `scope:mode:combo`
pub fn scoped_keymap_value(scope: &str, mode: KeymapMode, combo: &str) -> String {
    format!("{}:{}:{}", scope, mode, combo)
}
