use thiserror::Error;

use crate::domain::errors::ParseError;
use crate::domain::hand::HandClass;
use crate::domain::position::Position;

/// Ошибки чартов диапазонов и селектора префлоп-действия.
#[derive(Debug, Error)]
pub enum RangeError {
    #[error("Неизвестная позиция: '{0}'")]
    UnknownPosition(String),

    #[error("Нет чарта для позиции {0}: {1}")]
    MissingChart(Position, String),

    #[error("Чарт позиции {position} повреждён: {reason}")]
    MalformedChart { position: Position, reason: String },

    #[error("Рука {0} не найдена в чарте позиции {1}")]
    HandNotInChart(HandClass, Position),

    #[error("Не удалось прочитать чарт {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}
