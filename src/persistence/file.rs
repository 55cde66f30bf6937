use super::{PersistenceError, PersistenceResult, SemesterStore};
use crate::semester::SemesterConfig;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Semester configurations in a JSON file of the form
/// `{ "<semester>": { "lecture_period": [start, end], "breaks": [[name, start, end], ...] } }`.
///
/// The file is re-read on every call, nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct JsonSemesterStore {
    path: PathBuf,
}

impl JsonSemesterStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SemesterStore for JsonSemesterStore {
    fn load(&self, semester: &str) -> PersistenceResult<SemesterConfig> {
        let mut semesters = load_semesters_from_json(&self.path)?;
        let config = semesters.remove(semester).ok_or_else(|| {
            tracing::error!(semester, path = %self.path.display(), "no dates found for semester");
            PersistenceError::SemesterNotFound(semester.to_string())
        })?;
        tracing::debug!(semester, breaks = config.breaks.len(), "loaded semester dates");
        Ok(config)
    }

    fn list_semesters(&self) -> PersistenceResult<Vec<String>> {
        Ok(load_semesters_from_json(&self.path)?.into_keys().collect())
    }
}

pub fn load_semesters_from_json<P: AsRef<Path>>(
    path: P,
) -> PersistenceResult<BTreeMap<String, SemesterConfig>> {
    let file = File::open(path)?;
    let semesters: BTreeMap<String, SemesterConfig> =
        serde_json::from_reader(BufReader::new(file))?;
    for (semester, config) in &semesters {
        super::validate_semester(semester, config)?;
    }
    Ok(semesters)
}

pub fn save_semesters_to_json<P: AsRef<Path>>(
    semesters: &BTreeMap<String, SemesterConfig>,
    path: P,
) -> PersistenceResult<()> {
    for (semester, config) in semesters {
        super::validate_semester(semester, config)?;
    }
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, semesters)?;
    Ok(())
}
