//! Application runtime: wires the OMDb client and SQLite storage into a
//! [`Session`] and drives provider calls on tokio.

mod offline;
mod session;

use picturepulse_api::omdb::OmdbClient;
use picturepulse_core::config::AppConfig;
use picturepulse_core::error::PulseError;
use picturepulse_core::storage::Storage;

pub use offline::{Offline, OfflineError};
pub use session::{FetchUpdate, Session};

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("api error: {0}")]
    Api(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Rating(String),
}

impl From<PulseError> for RuntimeError {
    fn from(e: PulseError) -> Self {
        match e {
            PulseError::Config(msg) => Self::Config(msg),
            PulseError::Rating(msg) => Self::Rating(msg),
            other @ (PulseError::Storage(_) | PulseError::Serialize(_) | PulseError::Io(_)) => {
                Self::Storage(other.to_string())
            }
        }
    }
}

/// A session wired to the real OMDb client and on-disk storage.
pub type AppSession = Session<OmdbClient, Storage>;

/// Build a session from configuration: OMDb client, SQLite storage, watched list.
pub fn open(config: &AppConfig) -> Result<AppSession, RuntimeError> {
    let api_key = config.api_key()?.to_string();
    let client = OmdbClient::with_base_url(api_key, &config.provider.base_url)
        .map_err(|e| RuntimeError::Config(format!("invalid provider.base_url: {e}")))?;

    let db_path = config.ensure_db_path()?;
    let storage = Storage::open(&db_path)?;
    tracing::debug!(path = %db_path.display(), "storage opened");

    Ok(Session::new(client, storage, &config.search))
}

/// Open only the storage-backed parts (no API key needed): for commands that
/// read or edit the watched list offline.
pub fn open_offline(config: &AppConfig) -> Result<Session<Offline, Storage>, RuntimeError> {
    let db_path = config.ensure_db_path()?;
    let storage = Storage::open(&db_path)?;
    Ok(Session::new(Offline, storage, &config.search))
}
