//! 키 이벤트 정규화
//!
//! 키 입력 이벤트를 `ctrl+shift+k` 형태의 정규 콤보 문자열로 변환합니다.
//! 기능키(F1~F12)와 Enter/Tab 등 이름 있는 키는 정규화하지 않습니다.

use crate::models::{EventTarget, Key, KeyPress, ModifierKey, Modifiers};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

/// 한 글자 키의 키코드 이름 (US 배열 기준, Shift 조합 문자는 원래 키로)
pub fn key_code_name(c: char) -> Option<String> {
    let base = match c {
        'a'..='z' | '0'..='9' => c,
        'A'..='Z' => c.to_ascii_lowercase(),
        '!' => '1',
        '@' => '2',
        '#' => '3',
        '$' => '4',
        '%' => '5',
        '^' => '6',
        '&' => '7',
        '*' => '8',
        '(' => '9',
        ')' => '0',
        ';' | ':' => ';',
        '=' | '+' => '=',
        ',' | '<' => ',',
        '-' | '_' => '-',
        '.' | '>' => '.',
        '/' | '?' => '/',
        '`' | '~' => '`',
        '[' | '{' => '[',
        '\\' | '|' => '\\',
        ']' | '}' => ']',
        '\'' | '"' => '\'',
        _ => return None,
    };
    Some(base.to_string())
}

fn base_key_token(key: &Key) -> Option<String> {
    match key {
        Key::Char(' ') => Some("spacebar".to_string()),
        Key::Char(c) => key_code_name(*c),
        Key::Escape => Some("esc".to_string()),
        Key::ArrowRight => Some("arrowRight".to_string()),
        Key::ArrowDown => Some("arrowDown".to_string()),
        Key::ArrowUp => Some("arrowUp".to_string()),
        Key::ArrowLeft => Some("arrowLeft".to_string()),
        Key::Modifier(_) | Key::Other(_) => None,
    }
}

/// 콤보 토큰 목록 (`["ctrl", "shift", "k"]`)
///
/// 수식키만 눌렸거나 기본 키를 정규화할 수 없으면 빈 목록입니다.
pub fn event_to_tokens(event: &KeyPress) -> Vec<String> {
    let Some(base) = base_key_token(&event.key) else {
        return Vec::new();
    };

    let mut tokens = Vec::with_capacity(5);
    let Modifiers {
        ctrl,
        alt,
        meta,
        shift,
    } = event.modifiers;
    if ctrl {
        tokens.push("ctrl".to_string());
    }
    if alt {
        tokens.push("alt".to_string());
    }
    if meta {
        tokens.push("meta".to_string());
    }
    if shift {
        tokens.push("shift".to_string());
    }
    tokens.push(base);
    tokens
}

/// 정규 콤보 문자열, 매핑할 수 없는 이벤트면 None
pub fn event_to_combo(event: &KeyPress) -> Option<String> {
    let tokens = event_to_tokens(event);
    if tokens.is_empty() {
        return None;
    }
    Some(tokens.join("+"))
}

/// 시퀀스 트래커에 쌓을 수 있는 단일 키 입력인지 (수식키 없는 한 글자)
pub fn is_single_key_tap(combo: &str) -> bool {
    combo.chars().count() == 1
}

/// 포커스가 편집 가능한 요소(input/textarea/contenteditable)에 있는지
pub fn is_focus_in_editable_element(target: &EventTarget) -> bool {
    let tag = target.tag_name.to_ascii_lowercase();
    tag.contains("input") || tag.contains("textarea") || target.content_editable
}

impl From<KeyModifiers> for Modifiers {
    fn from(modifiers: KeyModifiers) -> Self {
        Modifiers {
            ctrl: modifiers.contains(KeyModifiers::CONTROL),
            alt: modifiers.contains(KeyModifiers::ALT),
            meta: modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META),
            shift: modifiers.contains(KeyModifiers::SHIFT),
        }
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::ArrowUp,
            KeyCode::Down => Key::ArrowDown,
            KeyCode::Left => Key::ArrowLeft,
            KeyCode::Right => Key::ArrowRight,
            KeyCode::F(n) => Key::Other(format!("F{}", n)),
            KeyCode::Modifier(modifier) => match modifier {
                ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => {
                    Key::Modifier(ModifierKey::Shift)
                }
                ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => {
                    Key::Modifier(ModifierKey::Control)
                }
                ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => {
                    Key::Modifier(ModifierKey::Alt)
                }
                ModifierKeyCode::LeftSuper
                | ModifierKeyCode::RightSuper
                | ModifierKeyCode::LeftMeta
                | ModifierKeyCode::RightMeta
                | ModifierKeyCode::LeftHyper
                | ModifierKeyCode::RightHyper => Key::Modifier(ModifierKey::Meta),
                other => Key::Other(format!("{:?}", other)),
            },
            other => Key::Other(format!("{:?}", other)),
        }
    }
}

impl From<KeyEvent> for KeyPress {
    fn from(event: KeyEvent) -> Self {
        KeyPress::new(event.code.into(), event.modifiers.into())
            .repeat(event.kind == KeyEventKind::Repeat)
    }
}
