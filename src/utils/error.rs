use thiserror::Error;

#[derive(Error, Debug)]
pub enum KsmError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Shortcut not registered for userActionId={0}")]
    NotRegistered(String),

    #[error("Keymap value '{value}' already in use by userActionId={user_action_id}")]
    Conflict {
        value: String,
        user_action_id: String,
    },

    #[error("Keymap value for userActionId={0} is not overridable")]
    Permission(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for KsmError {
    fn from(err: toml::de::Error) -> Self {
        KsmError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, KsmError>;
