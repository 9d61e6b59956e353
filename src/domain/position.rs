use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::ParseError;

/// Каноническая позиция за столом (до 9 мест + кнопка на десятом).
///
/// Единственная нумерация в крейте; индекс для сайзинга выводится из неё
/// через [`Position::sizing_seat`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    Utg,
    Utg1,
    Utg2,
    Lj,
    Hj,
    Co,
    Btn,
    Sb,
    Bb,
}

impl Position {
    pub const ALL: [Position; 9] = [
        Position::Utg,
        Position::Utg1,
        Position::Utg2,
        Position::Lj,
        Position::Hj,
        Position::Co,
        Position::Btn,
        Position::Sb,
        Position::Bb,
    ];

    /// Позиции без блайндов и кнопки, от ранней к поздней.
    pub const NON_BLIND_ORDER: [Position; 6] = [
        Position::Utg,
        Position::Utg1,
        Position::Utg2,
        Position::Lj,
        Position::Hj,
        Position::Co,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Utg => "utg",
            Position::Utg1 => "utg+1",
            Position::Utg2 => "utg+2",
            Position::Lj => "lj",
            Position::Hj => "hj",
            Position::Co => "co",
            Position::Btn => "btn",
            Position::Sb => "sb",
            Position::Bb => "bb",
        }
    }

    /// Номер места 1..=10 для таблицы префлоп-сайзинга:
    /// sb=1, bb=2, (3 — не используется), utg=4 … co=9, btn=10.
    pub fn sizing_seat(&self) -> u8 {
        match self {
            Position::Sb => 1,
            Position::Bb => 2,
            Position::Utg => 4,
            Position::Utg1 => 5,
            Position::Utg2 => 6,
            Position::Lj => 7,
            Position::Hj => 8,
            Position::Co => 9,
            Position::Btn => 10,
        }
    }

    pub fn is_blind(&self) -> bool {
        matches!(self, Position::Sb | Position::Bb)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            // "utg-1" — старое имя самого раннего места на 10-max, сводим к utg.
            "utg" | "utg-1" => Ok(Position::Utg),
            "utg+1" => Ok(Position::Utg1),
            "utg+2" => Ok(Position::Utg2),
            "lj" => Ok(Position::Lj),
            "hj" => Ok(Position::Hj),
            "co" => Ok(Position::Co),
            "btn" => Ok(Position::Btn),
            "sb" => Ok(Position::Sb),
            "bb" => Ok(Position::Bb),
            _ => Err(ParseError::UnknownPosition(s.to_string())),
        }
    }
}

impl Serialize for Position {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
