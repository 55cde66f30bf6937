use crate::semester::SemesterConfig;
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    #[cfg(feature = "sqlite")]
    Sqlite(rusqlite::Error),
    InvalidData(String),
    SemesterNotFound(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            #[cfg(feature = "sqlite")]
            PersistenceError::Sqlite(err) => write!(f, "sqlite error: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            PersistenceError::SemesterNotFound(id) => {
                write!(f, "no dates found for semester \"{id}\"")
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Read access to semester configurations keyed by an identifier such as
/// `"SoSe 2024"`.
pub trait SemesterStore {
    fn load(&self, semester: &str) -> PersistenceResult<SemesterConfig>;
    fn list_semesters(&self) -> PersistenceResult<Vec<String>>;
}

pub fn validate_semester(semester: &str, config: &SemesterConfig) -> PersistenceResult<()> {
    config
        .validate()
        .map_err(|err| PersistenceError::InvalidData(format!("semester \"{semester}\": {err}")))
}

pub mod file;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::{JsonSemesterStore, load_semesters_from_json, save_semesters_to_json};
