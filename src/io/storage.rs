use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::task::{Status, Task};

/// File holding the whole persisted task sequence as one JSON array
pub const TASKS_FILE: &str = "tasks.json";

/// Error type for task persistence
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },
    #[error("malformed task data in {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Read the persisted task sequence. `Ok(None)` means the file does not
/// exist yet; a present-but-unparseable file is an error so callers can
/// apply their own fallback policy.
pub fn read_tasks(data_dir: &Path) -> Result<Option<Vec<Task>>, StorageError> {
    let path = data_dir.join(TASKS_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StorageError::Read { path, source: e }),
    };
    let tasks = serde_json::from_str(&content)
        .map_err(|e| StorageError::Malformed { path, source: e })?;
    Ok(Some(tasks))
}

/// Serialize and persist the full task sequence, replacing any prior value.
/// The write is atomic (temp file + rename); there are no partial writes.
pub fn write_tasks(data_dir: &Path, tasks: &[Task]) -> Result<(), StorageError> {
    let path = data_dir.join(TASKS_FILE);
    let content = serde_json::to_string_pretty(tasks)?;
    atomic_write(&path, content.as_bytes()).map_err(|e| StorageError::Write { path, source: e })
}

/// Write `content` to `path` atomically using a temp file + rename.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// The three sample tasks seeded on a board's first run
pub fn sample_tasks() -> Vec<Task> {
    let mut configure = Task::new(
        "Configurar repositorio Git".into(),
        "Crear repositorio y estructura de carpetas inicial".into(),
        "Ana Gómez".into(),
        vec!["Documentation".into()],
    );
    configure.status = Status::Done;

    let mut board = Task::new(
        "Implementar tablero Kanban".into(),
        "Crear las tres columnas con drag & drop funcional".into(),
        "Luis Martínez".into(),
        vec!["Feature".into(), "Urgente".into()],
    );
    board.status = Status::InProgress;

    let auth = Task::new(
        "Añadir autenticación".into(),
        "Sistema de login básico".into(),
        "Marta Ruiz".into(),
        vec!["Feature".into()],
    );

    vec![configure, board, auth]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn write_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let tasks = sample_tasks();

        write_tasks(dir.path(), &tasks).unwrap();
        let loaded = read_tasks(dir.path()).unwrap().unwrap();

        assert_eq!(loaded, tasks);
    }

    #[test]
    fn read_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_tasks(dir.path()).unwrap().is_none());
    }

    #[test]
    fn read_malformed_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(TASKS_FILE), "not json {{{").unwrap();
        assert!(matches!(
            read_tasks(dir.path()),
            Err(StorageError::Malformed { .. })
        ));
    }

    #[test]
    fn write_replaces_prior_contents() {
        let dir = TempDir::new().unwrap();
        write_tasks(dir.path(), &sample_tasks()).unwrap();
        write_tasks(dir.path(), &[]).unwrap();
        let loaded = read_tasks(dir.path()).unwrap().unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn sample_tasks_cover_all_three_columns() {
        let seeds = sample_tasks();
        assert_eq!(seeds.len(), 3);
        for status in Status::ALL {
            assert!(seeds.iter().any(|t| t.status == status));
        }
    }
}
