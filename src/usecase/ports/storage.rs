#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    Message(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Message(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// String-keyed blob storage. Every slot holds one serialized value that is
/// read and rewritten as a whole.
pub trait SlotStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Returns whether a slot was actually removed.
    fn remove(&self, key: &str) -> Result<bool, StorageError>;
    fn keys(&self) -> Result<Vec<String>, StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}
