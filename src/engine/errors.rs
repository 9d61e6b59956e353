use thiserror::Error;

use crate::domain::errors::ParseError;
use crate::eval::EquityError;
use crate::ranges::RangeError;
use crate::stats::StatsError;

/// Общая ошибка движка советника.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Не удалось загрузить конфигурацию {path}: {reason}")]
    Config { path: String, reason: String },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Equity(#[from] EquityError),

    #[error(transparent)]
    Stats(#[from] StatsError),
}
