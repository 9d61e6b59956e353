use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::hand::HandClass;
use crate::domain::position::Position;

use super::errors::RangeError;

/// Базовое действие из чарта.
///
/// В документе чарта кодируется одной буквой: `r`, `f`, `s`, `b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionCode {
    /// `r` — открываемся всегда.
    Raise,
    /// `f` — пас.
    Fold,
    /// `s` — одномастная рука, открываемся с частотой.
    SuitedFrequency,
    /// `b` — пограничная рука, открываемся с частотой.
    Borderline,
}

impl ActionCode {
    pub fn from_code(code: &str) -> Option<ActionCode> {
        match code.trim() {
            "r" => Some(ActionCode::Raise),
            "f" => Some(ActionCode::Fold),
            "s" => Some(ActionCode::SuitedFrequency),
            "b" => Some(ActionCode::Borderline),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            ActionCode::Raise => "r",
            ActionCode::Fold => "f",
            ActionCode::SuitedFrequency => "s",
            ActionCode::Borderline => "b",
        }
    }
}

impl fmt::Display for ActionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl Serialize for ActionCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_code())
    }
}

impl<'de> Deserialize<'de> for ActionCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ActionCode::from_code(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("неизвестный код действия '{s}'")))
    }
}

/// Чарт одной позиции: все 169 стартовых рук -> код действия.
///
/// Строится один раз и дальше только читается.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeChart {
    position: Position,
    actions: HashMap<HandClass, ActionCode>,
}

impl RangeChart {
    /// Собрать чарт из пар (рука, код). Чарт обязан покрывать все 169 рук.
    pub fn from_entries(
        position: Position,
        entries: impl IntoIterator<Item = (HandClass, ActionCode)>,
    ) -> Result<Self, RangeError> {
        let mut actions = HashMap::with_capacity(169);
        for (hand, code) in entries {
            if let Some(prev) = actions.insert(hand, code) {
                if prev != code {
                    return Err(RangeError::MalformedChart {
                        position,
                        reason: format!("рука {hand} задана дважды с разными кодами"),
                    });
                }
            }
        }

        let missing: Vec<String> = HandClass::all()
            .into_iter()
            .filter(|h| !actions.contains_key(h))
            .map(|h| h.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(RangeError::MalformedChart {
                position,
                reason: format!("нет рук: {}", missing.join(", ")),
            });
        }

        Ok(Self { position, actions })
    }

    /// Разобрать JSON-документ вида `{"AKs": "r", "72o": "f", ...}`.
    ///
    /// Ключи нормализуются ("KAs" == "AKs").
    pub fn from_json(position: Position, text: &str) -> Result<Self, RangeError> {
        let malformed = |reason: String| RangeError::MalformedChart { position, reason };

        let raw: BTreeMap<String, String> =
            serde_json::from_str(text).map_err(|e| malformed(e.to_string()))?;

        let mut entries = Vec::with_capacity(raw.len());
        for (key, value) in &raw {
            let hand: HandClass = key
                .parse()
                .map_err(|_| malformed(format!("некорректная рука '{key}'")))?;
            let code = ActionCode::from_code(value)
                .ok_or_else(|| malformed(format!("неизвестный код '{value}' у руки {key}")))?;
            entries.push((hand, code));
        }

        Self::from_entries(position, entries)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn action(&self, hand: HandClass) -> Result<ActionCode, RangeError> {
        self.actions
            .get(&hand)
            .copied()
            .ok_or(RangeError::HandNotInChart(hand, self.position))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Сколько рук отмечено данным кодом.
    pub fn count(&self, code: ActionCode) -> usize {
        self.actions.values().filter(|c| **c == code).count()
    }
}
