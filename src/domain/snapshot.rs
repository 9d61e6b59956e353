//! Входные данные одного тика: снимок стола и пользовательские настройки оверлея.

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::errors::ParseError;
use crate::domain::hand::HoleHand;

/// Индекс места за столом (как его нумерует страница стола).
pub type SeatIndex = u8;

/// Одно место за столом в снимке.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatSnapshot {
    pub seat: SeatIndex,
    pub name: String,
    /// Стек за столом (без поставленного на текущей улице).
    pub stack: Chips,
    /// Сколько поставлено на текущей улице.
    #[serde(default)]
    pub committed: Chips,
    #[serde(default)]
    pub folded: bool,
    #[serde(default)]
    pub is_hero: bool,
    #[serde(default)]
    pub is_dealer: bool,
    /// Открытые карты (шоудаун / показ).
    #[serde(default)]
    pub revealed: Option<HoleHand>,
}

/// Снимок стола за один тик опроса. Движок его не изменяет.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSnapshot {
    /// Тип игры, как его показывает стол (например, "NLH").
    #[serde(default)]
    pub game_type: Option<String>,
    /// Карты героя: 0 или 2.
    #[serde(default)]
    pub hero_cards: Vec<Card>,
    /// Борд как есть со страницы (длина ещё не проверена).
    #[serde(default)]
    pub board: Vec<Card>,
    #[serde(default)]
    pub pot: Chips,
    pub big_blind: Chips,
    pub seats: Vec<SeatSnapshot>,
}

impl TableSnapshot {
    /// Место с дилерской кнопкой (None — раздача ещё не началась).
    pub fn dealer_seat(&self) -> Option<SeatIndex> {
        self.seats.iter().find(|s| s.is_dealer).map(|s| s.seat)
    }

    pub fn hero(&self) -> Option<&SeatSnapshot> {
        self.seats.iter().find(|s| s.is_hero)
    }

    /// Рука героя, если карты уже видны.
    pub fn hero_hand(&self) -> Result<Option<HoleHand>, ParseError> {
        match self.hero_cards.as_slice() {
            [] => Ok(None),
            [a, b] => HoleHand::new(*a, *b).map(Some),
            other => Err(ParseError::InvalidHand(
                other.iter().map(|c| c.to_string()).collect(),
            )),
        }
    }

    /// Оппоненты, ещё не сбросившие карты.
    pub fn active_villains(&self) -> impl Iterator<Item = &SeatSnapshot> {
        self.seats.iter().filter(|s| !s.is_hero && !s.folded)
    }

    pub fn active_count(&self) -> usize {
        self.seats.iter().filter(|s| !s.folded).count()
    }

    /// Первая открытая рука оппонента.
    pub fn revealed_villain_hand(&self) -> Option<HoleHand> {
        self.seats
            .iter()
            .filter(|s| !s.is_hero)
            .find_map(|s| s.revealed)
    }

    /// Все места в порядке нумерации.
    pub fn seat_order(&self) -> Vec<SeatIndex> {
        let mut seats: Vec<SeatIndex> = self.seats.iter().map(|s| s.seat).collect();
        seats.sort_unstable();
        seats.dedup();
        seats
    }
}

/// Настройка «особой» руки: всегда открывать её, подстроив частоты остальных.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct OverrideOptions {
    #[serde(default)]
    pub enabled: bool,
    /// Пара рангов, например "72".
    #[serde(default)]
    pub hand: String,
    #[serde(default)]
    pub suited_only: bool,
}

/// Как калькулятор выбирает руку злодея.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "mode", content = "hand", rename_all = "snake_case")]
pub enum CalculatorOverrideMode {
    /// Ручной ввод, 4 символа: "AhTd".
    Manual(String),
    Nuts,
    TopPairTopKicker,
    #[default]
    None,
}

/// Способ синтеза руки злодея.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SynthesisMode {
    Nuts,
    TopPair,
}

/// Разрешённый на текущий тик источник руки злодея.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VillainHandSource {
    Explicit(HoleHand),
    Synthesized(SynthesisMode),
    None,
}
