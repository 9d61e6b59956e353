use thiserror::Error;

use crate::domain::card::Card;

/// Ошибки разбора входных данных (карты, руки, позиции, борд).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Некорректная карта: '{0}'")]
    InvalidCard(String),

    #[error("Некорректная рука: '{0}'. Ожидается формат вида 'AKs', 'QQ', 'JTo'")]
    InvalidHand(String),

    #[error("Некорректная пара рангов: '{0}'. Ожидается формат вида 'A7', '72'")]
    InvalidRankPair(String),

    #[error("Неизвестная позиция: '{0}'")]
    UnknownPosition(String),

    #[error("Недопустимая длина борда: {0} (допустимо 0, 3, 4 или 5)")]
    InvalidBoardLength(usize),

    #[error("Карта {0} встречается дважды")]
    DuplicateCard(Card),
}
