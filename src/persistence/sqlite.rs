use super::{PersistenceError, PersistenceResult, SemesterStore};
use crate::semester::SemesterConfig;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::{Mutex, MutexGuard};

pub struct SqliteSemesterStore {
    connection: Mutex<Connection>,
}

impl SqliteSemesterStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS semesters (
                id TEXT PRIMARY KEY,
                config_json TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    fn connection(&self) -> PersistenceResult<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| PersistenceError::InvalidData("sqlite connection lock poisoned".into()))
    }

    /// Insert or replace the configuration stored under `semester`.
    pub fn save_semester(&self, semester: &str, config: &SemesterConfig) -> PersistenceResult<()> {
        super::validate_semester(semester, config)?;
        let json = serde_json::to_string(config)?;
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO semesters (id, config_json) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET config_json = excluded.config_json",
            params![semester, json],
        )?;
        Ok(())
    }
}

impl SemesterStore for SqliteSemesterStore {
    fn load(&self, semester: &str) -> PersistenceResult<SemesterConfig> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare("SELECT config_json FROM semesters WHERE id = ?1")?;
        let json: Option<String> = stmt
            .query_row(params![semester], |row| row.get(0))
            .optional()?;

        let Some(json) = json else {
            return Err(PersistenceError::SemesterNotFound(semester.to_string()));
        };

        let config: SemesterConfig = serde_json::from_str(&json)?;
        super::validate_semester(semester, &config)?;
        Ok(config)
    }

    fn list_semesters(&self) -> PersistenceResult<Vec<String>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare("SELECT id FROM semesters ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut ids = Vec::new();
        for id in rows {
            ids.push(id?);
        }
        Ok(ids)
    }
}
