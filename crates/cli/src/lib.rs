pub mod database;
pub mod process;

// App state (configuration, paths)
pub mod state;

pub use database::{Database, DatabaseSetupError};
pub use process::init_logging;
pub use state::{AppConfig, AppState, StateError};
