// Argument validation - 인자 검증
//
// 실패 시 KsmError::Validation 반환

use crate::models::{KeyboardShortcut, KeymapValues, ShortcutValueUpdate};
use crate::utils::error::{KsmError, Result};

pub fn should_not_be_empty(value: &str, validation_key: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(KsmError::Validation(format!(
            "{} cannot be empty",
            validation_key
        )));
    }
    Ok(())
}

pub fn should_not_be_empty_list<T>(values: &[T], validation_key: &str) -> Result<()> {
    if values.is_empty() {
        return Err(KsmError::Validation(format!(
            "{} cannot be empty",
            validation_key
        )));
    }
    Ok(())
}

pub fn validate_keymap_values(values: &KeymapValues, validation_key: &str) -> Result<()> {
    if values.is_empty() {
        return Err(KsmError::Validation(format!(
            "{} is not valid",
            validation_key
        )));
    }
    Ok(())
}

pub fn validate_shortcut(shortcut: &KeyboardShortcut) -> Result<()> {
    should_not_be_empty(&shortcut.user_action.id, "shortcut.userAction.id")?;
    validate_keymap_values(&shortcut.keymap.values, "shortcut.keymap.values")?;
    validate_keymap_values(
        &shortcut.keymap.default_values,
        "shortcut.keymap.defaultValues",
    )?;
    Ok(())
}

pub fn validate_value_update(update: &ShortcutValueUpdate) -> Result<()> {
    should_not_be_empty(&update.user_action_id, "actionKeymapValue.userActionId")?;
    should_not_be_empty_list(&update.keymap_values, "actionKeymapValue.keymapValues")?;
    for value in &update.keymap_values {
        should_not_be_empty(value, "actionKeymapValue.keymapValues[]")?;
    }
    Ok(())
}
