// Key event model - 호스트 키 입력 이벤트
//
// 수식키 플래그, 키 식별자, 대상 요소, 전파/기본 동작 제어

use super::shortcut::KeyboardShortcut;
use serde::{Deserialize, Serialize};

/// 수식키 자체
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKey {
    Meta,
    Alt,
    Control,
    Shift,
}

/// 눌린 기본 키
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// 출력 가능한 한 글자 (스페이스 포함)
    Char(char),
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// 수식키만 눌림
    Modifier(ModifierKey),
    /// 정규화 대상이 아닌 이름 있는 키 (F1, Enter, Tab, ...)
    Other(String),
}

impl Key {
    /// DOM `KeyboardEvent.key` 스타일 이름으로부터 생성
    pub fn from_name(name: &str) -> Key {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Key::Char(c);
        }
        match name {
            "Escape" | "Esc" => Key::Escape,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Meta" => Key::Modifier(ModifierKey::Meta),
            "Alt" => Key::Modifier(ModifierKey::Alt),
            "Control" => Key::Modifier(ModifierKey::Control),
            "Shift" => Key::Modifier(ModifierKey::Shift),
            other => Key::Other(other.to_string()),
        }
    }
}

/// 동시에 눌린 수식키
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        meta: false,
        shift: false,
    };

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn meta() -> Self {
        Self {
            meta: true,
            ..Self::NONE
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }
}

/// 이벤트 대상 요소
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTarget {
    pub tag_name: String,
    /// 명시적으로 편집 가능 표시된 요소 (contenteditable)
    pub content_editable: bool,
}

impl Default for EventTarget {
    fn default() -> Self {
        Self {
            tag_name: "BODY".to_string(),
            content_editable: false,
        }
    }
}

impl EventTarget {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            content_editable: false,
        }
    }

    pub fn content_editable(mut self, editable: bool) -> Self {
        self.content_editable = editable;
        self
    }
}

/// 키 입력 이벤트
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
    /// 키를 누르고 있을 때 반복 발생한 이벤트
    pub repeat: bool,
    pub target: EventTarget,
    propagation_stopped: bool,
    default_prevented: bool,
}

impl KeyPress {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            repeat: false,
            target: EventTarget::default(),
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// 수식키 없는 한 글자 입력
    pub fn char(c: char) -> Self {
        Self::new(Key::Char(c), Modifiers::NONE)
    }

    pub fn repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn target(mut self, target: EventTarget) -> Self {
        self.target = target;
        self
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// 옵저버에게 전달되는 이벤트 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallbackEventKind {
    Registered,
    UpdatedValue,
    CalledShortcutHandler,
    Deleted,
    ResetValue,
}

/// 옵저버에게 전달되는 알림
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutNotification {
    pub kind: CallbackEventKind,
    pub shortcuts: Vec<KeyboardShortcut>,
}
