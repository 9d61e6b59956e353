use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::EngineError;
use crate::eval::DEFAULT_EQUITY_SAMPLES;

/// Настройки советника. Каждое поле необязательно в JSON-документе.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Каталог с `<позиция>.json`; без него — встроенные чарты.
    pub ranges_dir: Option<PathBuf>,
    /// Каталог с записями игроков.
    pub stats_dir: PathBuf,
    /// Бюджет выборок Монте-Карло на один расчёт эквити.
    pub equity_samples: usize,
    /// Ожидаемый тип игры; снимки другого типа пропускаются.
    pub expected_game_type: Option<String>,
    /// Seed для воспроизводимых подсказок.
    pub seed: Option<u64>,
    /// Префикс идентификаторов раздач; по умолчанию — время старта.
    pub session: Option<String>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            ranges_dir: None,
            stats_dir: PathBuf::from("player_data"),
            equity_samples: DEFAULT_EQUITY_SAMPLES,
            expected_game_type: None,
            seed: None,
            session: None,
        }
    }
}

impl AdvisorConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let config_error = |reason: String| EngineError::Config {
            path: path.display().to_string(),
            reason,
        };
        let text = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let config: AdvisorConfig =
            serde_json::from_str(&text).map_err(|e| config_error(e.to_string()))?;
        if config.equity_samples == 0 {
            return Err(config_error("equity_samples должен быть > 0".to_string()));
        }
        Ok(config)
    }

    /// Подходит ли тип игры из снимка (без учёта регистра).
    pub fn accepts_game_type(&self, game_type: Option<&str>) -> bool {
        match (&self.expected_game_type, game_type) {
            (None, _) => true,
            (Some(expected), Some(actual)) => expected.trim().eq_ignore_ascii_case(actual.trim()),
            (Some(_), None) => false,
        }
    }
}
