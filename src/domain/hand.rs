use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::card::{parse_cards, Card, Rank};
use crate::domain::errors::ParseError;

/// Улица раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// Улица по количеству карт на борде. 1–2 карты и больше 5 — неизвестная улица.
    pub fn from_board_len(len: usize) -> Option<Street> {
        match len {
            0 => Some(Street::Preflop),
            3 => Some(Street::Flop),
            4 => Some(Street::Turn),
            5 => Some(Street::River),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }

    pub fn is_postflop(&self) -> bool {
        !matches!(self, Street::Preflop)
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ранг руки. Чем больше число, тем сильнее рука; заполняется в eval.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(pub u32);

/// Карманные карты: ровно две разные карты. В JSON — строка "AhKd".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HoleHand {
    cards: [Card; 2],
}

impl HoleHand {
    pub fn new(first: Card, second: Card) -> Result<Self, ParseError> {
        if first == second {
            return Err(ParseError::DuplicateCard(first));
        }
        Ok(Self {
            cards: [first, second],
        })
    }

    pub fn cards(&self) -> [Card; 2] {
        self.cards
    }

    /// Каноническая форма руки ("AKs", "T9o", "77").
    pub fn class(&self) -> HandClass {
        HandClass::from_cards(self.cards[0], self.cards[1])
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }
}

impl fmt::Display for HoleHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.cards[0], self.cards[1])
    }
}

/// "AhKd", "10hJs", "ahkd".
impl FromStr for HoleHand {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|_| ParseError::InvalidHand(s.to_string()))?;
        match cards.as_slice() {
            [a, b] => HoleHand::new(*a, *b),
            _ => Err(ParseError::InvalidHand(s.to_string())),
        }
    }
}

impl Serialize for HoleHand {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HoleHand {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Одномастность стартовой руки.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suitedness {
    Pair,
    Suited,
    Offsuit,
}

/// Каноническая стартовая рука (одна из 169): старший ранг, младший ранг, маркер.
///
/// Инвариант: `high >= low`, у пар маркер всегда `Pair`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandClass {
    high: Rank,
    low: Rank,
    kind: Suitedness,
}

impl HandClass {
    pub fn new(a: Rank, b: Rank, suited: bool) -> Self {
        let (high, low) = if a >= b { (a, b) } else { (b, a) };
        let kind = if high == low {
            Suitedness::Pair
        } else if suited {
            Suitedness::Suited
        } else {
            Suitedness::Offsuit
        };
        Self { high, low, kind }
    }

    pub fn from_cards(a: Card, b: Card) -> Self {
        Self::new(a.rank, b.rank, a.suit == b.suit)
    }

    pub fn high(&self) -> Rank {
        self.high
    }

    pub fn low(&self) -> Rank {
        self.low
    }

    pub fn kind(&self) -> Suitedness {
        self.kind
    }

    pub fn is_pair(&self) -> bool {
        self.kind == Suitedness::Pair
    }

    pub fn is_suited(&self) -> bool {
        self.kind == Suitedness::Suited
    }

    /// Ядро руки без маркера одномастности ("AK" для "AKs" и "AKo").
    pub fn core(&self) -> RankPair {
        RankPair {
            high: self.high,
            low: self.low,
        }
    }

    /// Все 169 канонических рук: пары, одномастные, разномастные.
    pub fn all() -> Vec<HandClass> {
        let mut out = Vec::with_capacity(169);
        for (i, &high) in Rank::ALL.iter().enumerate().rev() {
            for &low in Rank::ALL[..=i].iter().rev() {
                if high == low {
                    out.push(HandClass::new(high, low, false));
                } else {
                    out.push(HandClass::new(high, low, true));
                    out.push(HandClass::new(high, low, false));
                }
            }
        }
        out
    }
}

impl fmt::Display for HandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Suitedness::Pair => write!(f, "{}{}", self.high, self.low),
            Suitedness::Suited => write!(f, "{}{}s", self.high, self.low),
            Suitedness::Offsuit => write!(f, "{}{}o", self.high, self.low),
        }
    }
}

/// Нормализация: "KAs" -> "AKs", "77" -> "77", "77s" -> "77".
impl FromStr for HandClass {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidHand(s.to_string());
        let chars: Vec<char> = s.trim().chars().collect();

        let (r1, r2, marker) = match chars.as_slice() {
            [a, b] => (*a, *b, None),
            [a, b, m] => (*a, *b, Some(*m)),
            _ => return Err(invalid()),
        };
        let r1 = Rank::from_char(r1).ok_or_else(invalid)?;
        let r2 = Rank::from_char(r2).ok_or_else(invalid)?;

        match (r1 == r2, marker) {
            (true, None) | (true, Some('s' | 'o')) => Ok(HandClass::new(r1, r2, false)),
            (false, Some('s')) => Ok(HandClass::new(r1, r2, true)),
            (false, Some('o')) => Ok(HandClass::new(r1, r2, false)),
            _ => Err(invalid()),
        }
    }
}

impl Serialize for HandClass {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HandClass {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Пара рангов без масти — так задаётся «особая» рука в настройках ("72", "A5").
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RankPair {
    pub high: Rank,
    pub low: Rank,
}

impl RankPair {
    pub fn new(a: Rank, b: Rank) -> Self {
        if a >= b {
            Self { high: a, low: b }
        } else {
            Self { high: b, low: a }
        }
    }

    pub fn is_pair(&self) -> bool {
        self.high == self.low
    }

    /// Одномастный вариант (для пары — сама пара).
    pub fn suited_class(&self) -> HandClass {
        HandClass::new(self.high, self.low, true)
    }
}

impl fmt::Display for RankPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.high, self.low)
    }
}

impl FromStr for RankPair {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidRankPair(s.to_string());
        let chars: Vec<char> = s.trim().chars().collect();
        match chars.as_slice() {
            [a, b] => {
                let a = Rank::from_char(*a).ok_or_else(invalid)?;
                let b = Rank::from_char(*b).ok_or_else(invalid)?;
                Ok(RankPair::new(a, b))
            }
            _ => Err(invalid()),
        }
    }
}

/// Борд: 0, 3, 4 или 5 различных карт. Длина определяет улицу.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(cards: Vec<Card>) -> Result<Self, ParseError> {
        if Street::from_board_len(cards.len()).is_none() {
            return Err(ParseError::InvalidBoardLength(cards.len()));
        }
        for (i, c) in cards.iter().enumerate() {
            if cards[..i].contains(c) {
                return Err(ParseError::DuplicateCard(*c));
            }
        }
        Ok(Self { cards })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn street(&self) -> Street {
        // Конструктор гарантирует допустимую длину.
        Street::from_board_len(self.cards.len()).unwrap_or(Street::Preflop)
    }
}

impl TryFrom<Vec<Card>> for Board {
    type Error = ParseError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Board::new(cards)
    }
}

impl From<Board> for Vec<Card> {
    fn from(board: Board) -> Self {
        board.cards
    }
}

impl FromStr for Board {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::new(parse_cards(s)?)
    }
}
