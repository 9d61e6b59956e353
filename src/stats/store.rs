use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::infra::persistence::{encode_file_stem, write_atomic};

use super::errors::StatsError;
use super::records::PlayerStatRecord;

/// Абстракция хранилища записей игроков.
///
/// Запись читается и перезаписывается целиком один раз на границе раздачи.
pub trait StatsStore {
    /// Загрузить запись игрока (None — игрок ещё не встречался).
    fn load(&self, name: &str) -> Result<Option<PlayerStatRecord>, StatsError>;

    /// Сохранить запись целиком.
    fn save(&mut self, record: &PlayerStatRecord) -> Result<(), StatsError>;

    /// Имена всех известных игроков.
    fn names(&self) -> Result<Vec<String>, StatsError>;
}

/// Простая in-memory реализация для тестов и запуска без диска.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStatsStore {
    records: HashMap<String, PlayerStatRecord>,
}

impl InMemoryStatsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsStore for InMemoryStatsStore {
    fn load(&self, name: &str) -> Result<Option<PlayerStatRecord>, StatsError> {
        Ok(self.records.get(name).cloned())
    }

    fn save(&mut self, record: &PlayerStatRecord) -> Result<(), StatsError> {
        if record.name.trim().is_empty() {
            return Err(StatsError::EmptyPlayerName);
        }
        self.records.insert(record.name.clone(), record.clone());
        Ok(())
    }

    fn names(&self) -> Result<Vec<String>, StatsError> {
        let mut names: Vec<String> = self.records.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

/// Каталог с JSON-документом на игрока: `<dir>/<имя>.json`.
#[derive(Debug, Clone)]
pub struct JsonDirStatsStore {
    dir: PathBuf,
}

impl JsonDirStatsStore {
    /// Каталог создаётся, если его нет.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StatsError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| io_error(&dir, source))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", encode_file_stem(name)))
    }
}

impl StatsStore for JsonDirStatsStore {
    fn load(&self, name: &str) -> Result<Option<PlayerStatRecord>, StatsError> {
        let path = self.path_for(name);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(io_error(&path, source)),
        };
        let record: PlayerStatRecord =
            serde_json::from_str(&text).map_err(|source| StatsError::Json {
                path: path.display().to_string(),
                source,
            })?;
        if record.name != name {
            return Err(StatsError::NameMismatch {
                path: path.display().to_string(),
                expected: name.to_string(),
                found: record.name,
            });
        }
        Ok(Some(record))
    }

    fn save(&mut self, record: &PlayerStatRecord) -> Result<(), StatsError> {
        if record.name.trim().is_empty() {
            return Err(StatsError::EmptyPlayerName);
        }
        let path = self.path_for(&record.name);
        let json = serde_json::to_vec_pretty(record).map_err(|source| StatsError::Json {
            path: path.display().to_string(),
            source,
        })?;
        write_atomic(&path, &json).map_err(|source| io_error(&path, source))
    }

    fn names(&self) -> Result<Vec<String>, StatsError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| io_error(&self.dir, source))?;
        let mut names = Vec::new();
        for entry in entries {
            let path = entry.map_err(|source| io_error(&self.dir, source))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            // Имя берём из самой записи, а не декодируем из имени файла.
            let text = fs::read_to_string(&path).map_err(|source| io_error(&path, source))?;
            let record: PlayerStatRecord =
                serde_json::from_str(&text).map_err(|source| StatsError::Json {
                    path: path.display().to_string(),
                    source,
                })?;
            names.push(record.name);
        }
        names.sort();
        Ok(names)
    }
}

fn io_error(path: &Path, source: io::Error) -> StatsError {
    StatsError::Io {
        path: path.display().to_string(),
        source,
    }
}
