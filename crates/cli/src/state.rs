use std::{fs, path::PathBuf};

use common::prelude::{Rent, SecretKey};
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "notes";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DB_FILE_NAME: &str = "db.sqlite";
pub const KEY_FILE_NAME: &str = "key.pem";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default log level, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory for daily rolled log files (stderr only if not set)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    /// Storage pricing used when funding new notes
    #[serde(default)]
    pub rent: Rent,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: None,
            rent: Rent::default(),
        }
    }
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::WARN)
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the notes directory (~/.notes)
    pub notes_dir: PathBuf,
    /// Path to the SQLite ledger
    pub db_path: PathBuf,
    /// Path to the identity key PEM file
    pub key_path: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the notes directory path (custom or default ~/.notes)
    pub fn notes_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new notes directory with a fresh identity
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let notes_dir = Self::notes_dir(custom_path)?;

        if notes_dir.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&notes_dir)?;

        let key = SecretKey::generate();
        let key_path = notes_dir.join(KEY_FILE_NAME);
        fs::write(&key_path, key.to_pem())?;

        let config = config.unwrap_or_default();
        let config_path = notes_dir.join(CONFIG_FILE_NAME);
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        // Empty file; the schema is migrated on first connect
        let db_path = notes_dir.join(DB_FILE_NAME);
        fs::write(&db_path, "")?;

        Ok(Self {
            notes_dir,
            db_path,
            key_path,
            config_path,
            config,
        })
    }

    /// Load existing state from the notes directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let notes_dir = Self::notes_dir(custom_path)?;

        if !notes_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let db_path = notes_dir.join(DB_FILE_NAME);
        let key_path = notes_dir.join(KEY_FILE_NAME);
        let config_path = notes_dir.join(CONFIG_FILE_NAME);

        if !db_path.exists() {
            return Err(StateError::MissingFile(DB_FILE_NAME.to_string()));
        }
        if !key_path.exists() {
            return Err(StateError::MissingFile(KEY_FILE_NAME.to_string()));
        }
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            notes_dir,
            db_path,
            key_path,
            config_path,
            config,
        })
    }

    /// Load the identity key from the key file
    pub fn load_key(&self) -> Result<SecretKey, StateError> {
        let pem = fs::read_to_string(&self.key_path)?;
        let key = SecretKey::from_pem(&pem).map_err(|e| StateError::InvalidKey(e.to_string()))?;
        Ok(key)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("notes directory not initialized. Run 'notes init' first")]
    NotInitialized,

    #[error("notes directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
