use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::position::Position;

use super::chart::RangeChart;
use super::errors::RangeError;

/// Встроенные чарты, по документу на позицию.
const BUILTIN_CHARTS: [(Position, &str); 9] = [
    (Position::Utg, include_str!("../../ranges/utg.json")),
    (Position::Utg1, include_str!("../../ranges/utg+1.json")),
    (Position::Utg2, include_str!("../../ranges/utg+2.json")),
    (Position::Lj, include_str!("../../ranges/lj.json")),
    (Position::Hj, include_str!("../../ranges/hj.json")),
    (Position::Co, include_str!("../../ranges/co.json")),
    (Position::Btn, include_str!("../../ranges/btn.json")),
    (Position::Sb, include_str!("../../ranges/sb.json")),
    (Position::Bb, include_str!("../../ranges/bb.json")),
];

/// Хранилище чартов по позициям. Загружается один раз при старте.
#[derive(Clone, Debug, Default)]
pub struct RangeChartStore {
    charts: HashMap<Position, RangeChart>,
    /// Откуда грузили (для сообщений об отсутствующих чартах).
    origin: String,
}

impl RangeChartStore {
    /// Чарты, вшитые в бинарник.
    pub fn builtin() -> Result<Self, RangeError> {
        let mut charts = HashMap::with_capacity(BUILTIN_CHARTS.len());
        for (position, text) in BUILTIN_CHARTS {
            charts.insert(position, RangeChart::from_json(position, text)?);
        }
        Ok(Self {
            charts,
            origin: "встроенные чарты".to_string(),
        })
    }

    /// Прочитать `<dir>/<позиция>.json` для каждой позиции.
    ///
    /// Отсутствующий файл не ошибка загрузки: ошибка вернётся при запросе
    /// этой позиции. Повреждённый файл — ошибка сразу.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, RangeError> {
        let dir = dir.as_ref();
        let mut charts = HashMap::new();

        for position in Position::ALL {
            let path = chart_path(dir, position);
            if !path.exists() {
                log::warn!("Чарт для позиции {} не найден: {}", position, path.display());
                continue;
            }
            let text = fs::read_to_string(&path).map_err(|source| RangeError::Io {
                path: path.display().to_string(),
                source,
            })?;
            charts.insert(position, RangeChart::from_json(position, &text)?);
        }

        log::info!("Загружено чартов: {} из {}", charts.len(), dir.display());
        Ok(Self {
            charts,
            origin: dir.display().to_string(),
        })
    }

    /// Собрать хранилище из готовых чартов (тесты, нестандартные источники).
    pub fn from_charts(charts: impl IntoIterator<Item = RangeChart>) -> Self {
        Self {
            charts: charts.into_iter().map(|c| (c.position(), c)).collect(),
            origin: "в памяти".to_string(),
        }
    }

    pub fn chart(&self, position: Position) -> Result<&RangeChart, RangeError> {
        self.charts.get(&position).ok_or_else(|| {
            RangeError::MissingChart(
                position,
                format!("{} ({}.json)", self.origin, position.as_str()),
            )
        })
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL
            .into_iter()
            .filter(move |p| self.charts.contains_key(p))
    }
}

fn chart_path(dir: &Path, position: Position) -> PathBuf {
    dir.join(format!("{}.json", position.as_str()))
}
