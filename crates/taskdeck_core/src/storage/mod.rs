use crate::error::AppError;
use std::path::PathBuf;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Synchronous string-keyed store, the shape of the host environment's
/// key-value storage. Implementations decide where the strings live.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> Result<Option<String>, AppError>;

    fn save(&self, key: &str, value: &str) -> Result<(), AppError>;
}

const DATA_DIR_ENV_VAR: &str = "TASKDECK_DATA_DIR";

pub fn data_dir() -> Result<PathBuf, AppError> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV_VAR)
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("taskdeck"))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home).join(".config").join("taskdeck"))
    }
}
