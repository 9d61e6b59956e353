use thiserror::Error;

use crate::domain::card::Card;
use crate::domain::errors::ParseError;

/// Ошибки калькулятора эквити.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EquityError {
    #[error("Недопустимая длина борда {0} (нужно 0, 3, 4 или 5 карт)")]
    InvalidBoardLength(usize),

    #[error("Карта {0} одновременно у героя/злодея/на борде")]
    DuplicateCard(Card),

    #[error("В колоде не хватает карт, чтобы достроить борд")]
    NotEnoughCards,

    #[error("Не удалось синтезировать руку злодея для борда")]
    NoSynthesizedHand,

    #[error(transparent)]
    Parse(#[from] ParseError),
}
