use std::fmt;

pub type Result<T> = std::result::Result<T, PersistenceError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A configuration value is missing or malformed.
    Config(String),
    /// The loader could not read the external medium.
    Load(String),
    /// The saver could not write the external medium.
    Save(String),
    /// A record could not be converted between its typed and generic forms.
    Conversion { index: usize, message: String },
    /// An explicit id passed to `create` is already present.
    AlreadyExists { id: String },
    LockPoisoned(&'static str),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Config(message) => write!(f, "configuration error: {}", message),
            PersistenceError::Load(message) => write!(f, "load error: {}", message),
            PersistenceError::Save(message) => write!(f, "save error: {}", message),
            PersistenceError::Conversion { index, message } => {
                write!(f, "cannot convert item {}: {}", index, message)
            }
            PersistenceError::AlreadyExists { id } => {
                write!(f, "item with id {} already exists", id)
            }
            PersistenceError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for PersistenceError {}
