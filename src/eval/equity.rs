//! Калькулятор эквити герой-против-злодея и синтез руки злодея.
//!
//! Основные функции:
//!   - `equity` — вероятность выигрыша/ничьей при 0, 3, 4 или 5 картах борда;
//!   - `best_villain_holding` — «натсы» для режима nuts;
//!   - `top_pair_top_kicker` — эвристика «топ-пара, топ-кикер».

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};
use crate::domain::deck::Deck;
use crate::domain::hand::{HandRank, HoleHand, Street};
use crate::engine::RandomSource;

use super::errors::EquityError;
use super::evaluator::evaluate_cards;

/// Бюджет выборок Монте-Карло по умолчанию.
pub const DEFAULT_EQUITY_SAMPLES: usize = 10_000;

/// Результат калькулятора: доли выигрышей и ничьих, каждая в [0, 1].
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Equity {
    pub win_rate: f64,
    pub tie_rate: f64,
}

impl Equity {
    /// Нейтральный результат, когда руки злодея ещё нет.
    pub const NEUTRAL: Equity = Equity {
        win_rate: 0.0,
        tie_rate: 0.0,
    };

    /// Проценты 0..100 с точностью до сотых.
    pub fn win_percent(&self) -> f64 {
        round_percent(self.win_rate)
    }

    pub fn tie_percent(&self) -> f64 {
        round_percent(self.tie_rate)
    }
}

fn round_percent(rate: f64) -> f64 {
    (rate * 100.0 * 100.0).round() / 100.0
}

/// Счётчики исходов.
#[derive(Clone, Copy, Debug, Default)]
struct Tally {
    wins: u64,
    ties: u64,
    total: u64,
}

impl Tally {
    fn record(&mut self, outcome: Ordering) {
        self.total += 1;
        match outcome {
            Ordering::Greater => self.wins += 1,
            Ordering::Equal => self.ties += 1,
            Ordering::Less => {}
        }
    }

    fn into_equity(self) -> Equity {
        if self.total == 0 {
            return Equity::NEUTRAL;
        }
        Equity {
            win_rate: self.wins as f64 / self.total as f64,
            tie_rate: self.ties as f64 / self.total as f64,
        }
    }
}

/// Эквити героя против конкретной руки злодея.
///
/// - борд из 1–2 или 6+ карт — ошибка `InvalidBoardLength`;
/// - 5 карт борда: исход известен, win/tie ∈ {0, 1};
/// - меньше 5: если всех достроек борда не больше `samples`, перебираем их точно,
///   иначе берём `samples` случайных достроек.
pub fn equity<R: RandomSource>(
    hero: &HoleHand,
    villain: &HoleHand,
    board: &[Card],
    samples: usize,
    rng: &mut R,
) -> Result<Equity, EquityError> {
    if Street::from_board_len(board.len()).is_none() {
        return Err(EquityError::InvalidBoardLength(board.len()));
    }

    let mut dead: Vec<Card> = Vec::with_capacity(9);
    dead.extend_from_slice(&hero.cards());
    dead.extend_from_slice(&villain.cards());
    dead.extend_from_slice(board);
    ensure_distinct(&dead)?;

    let hero_cards = hero.cards();
    let villain_cards = villain.cards();

    if board.len() == 5 {
        let mut tally = Tally::default();
        tally.record(showdown(&hero_cards, &villain_cards, board, &[]));
        return Ok(tally.into_equity());
    }

    let need = 5 - board.len();
    let deck = Deck::without(&dead);
    if deck.len() < need {
        return Err(EquityError::NotEnoughCards);
    }

    let mut tally = Tally::default();
    let samples = samples.max(1);

    if binomial(deck.len(), need) <= samples as u128 {
        for_each_combination(&deck.cards, need, |extra| {
            tally.record(showdown(&hero_cards, &villain_cards, board, extra));
        });
    } else {
        let mut scratch = deck.cards;
        let n = scratch.len();
        for _ in 0..samples {
            // Частичная тасовка Фишера–Йетса: первые `need` карт — случайная достройка.
            for i in 0..need {
                let j = i + rng.next_index(n - i);
                scratch.swap(i, j);
            }
            tally.record(showdown(&hero_cards, &villain_cards, board, &scratch[..need]));
        }
    }

    Ok(tally.into_equity())
}

/// Сравнение рук героя и злодея на полном борде `board + extra`.
fn showdown(hero: &[Card; 2], villain: &[Card; 2], board: &[Card], extra: &[Card]) -> Ordering {
    let hero_rank = evaluate_cards(hero.iter().chain(board).chain(extra));
    let villain_rank = evaluate_cards(villain.iter().chain(board).chain(extra));
    hero_rank.cmp(&villain_rank)
}

fn ensure_distinct(cards: &[Card]) -> Result<(), EquityError> {
    let mut seen = 0u64;
    for card in cards {
        let bit = 1u64 << card.index();
        if seen & bit != 0 {
            return Err(EquityError::DuplicateCard(*card));
        }
        seen |= bit;
    }
    Ok(())
}

fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1u128, |acc, i| acc * (n - i) as u128 / (i as u128 + 1))
}

/// Перебор всех k-сочетаний карт в лексикографическом порядке индексов.
fn for_each_combination(cards: &[Card], k: usize, mut f: impl FnMut(&[Card])) {
    let n = cards.len();
    if k > n {
        return;
    }
    let mut idx: Vec<usize> = (0..k).collect();
    let mut buf: Vec<Card> = idx.iter().map(|&i| cards[i]).collect();

    loop {
        f(&buf);

        // Ищем самый правый индекс, который ещё можно сдвинуть.
        let Some(pos) = (0..k).rev().find(|&i| idx[i] < n - k + i) else {
            return;
        };
        idx[pos] += 1;
        for i in (pos + 1)..k {
            idx[i] = idx[i - 1] + 1;
        }
        for i in pos..k {
            buf[i] = cards[idx[i]];
        }
    }
}

/// «Натсы»: сильнейшая двухкарточная рука из оставшейся колоды для данного борда.
pub fn best_villain_holding(board: &[Card]) -> Result<HoleHand, EquityError> {
    best_villain_holding_excluding(board, &[])
}

/// То же, но без карт, которые уже заняты (обычно рука героя).
///
/// При ничьей по силе остаётся первая найденная комбинация в порядке перебора.
/// До флопа (меньше трёх карт борда) оценивать нечего — возвращаем пару тузов.
pub fn best_villain_holding_excluding(
    board: &[Card],
    dead: &[Card],
) -> Result<HoleHand, EquityError> {
    if Street::from_board_len(board.len()).is_none() {
        return Err(EquityError::InvalidBoardLength(board.len()));
    }
    let blocked: Vec<Card> = board.iter().chain(dead).copied().collect();
    ensure_distinct(&blocked)?;

    if board.len() < 3 {
        return pocket_aces(board, &blocked);
    }

    let deck = Deck::without(&blocked);
    let mut best: Option<([Card; 2], HandRank)> = None;
    for combo in deck.two_card_combinations() {
        let rank = evaluate_cards(combo.iter().chain(board));
        if best.map_or(true, |(_, best_rank)| rank > best_rank) {
            best = Some((combo, rank));
        }
    }

    let (cards, _) = best.ok_or(EquityError::NotEnoughCards)?;
    Ok(HoleHand::new(cards[0], cards[1])?)
}

/// «Топ-пара, топ-кикер»: старший ранг борда + старший отличный от него ранг
/// (туз, а при тузе на борде — король). Масти берём самые редкие на борде.
pub fn top_pair_top_kicker(board: &[Card], dead: &[Card]) -> Result<HoleHand, EquityError> {
    if Street::from_board_len(board.len()).is_none() {
        return Err(EquityError::InvalidBoardLength(board.len()));
    }
    let mut blocked: Vec<Card> = board.iter().chain(dead).copied().collect();
    ensure_distinct(&blocked)?;

    let Some(top) = board.iter().map(|c| c.rank).max() else {
        return pocket_aces(board, &blocked);
    };
    let kicker = if top == Rank::Ace { Rank::King } else { Rank::Ace };

    let order = least_used_suits(board);
    let first = pick_card(top, &order, &blocked)?;
    blocked.push(first);
    let second = pick_card(kicker, &order, &blocked)?;

    Ok(HoleHand::new(first, second)?)
}

fn pocket_aces(board: &[Card], blocked: &[Card]) -> Result<HoleHand, EquityError> {
    let order = least_used_suits(board);
    let first = pick_card(Rank::Ace, &order, blocked)?;
    let mut blocked = blocked.to_vec();
    blocked.push(first);
    let second = pick_card(Rank::Ace, &order, &blocked)?;
    Ok(HoleHand::new(first, second)?)
}

/// Масти по возрастанию числа карт на борде (при равенстве — c, d, h, s).
fn least_used_suits(board: &[Card]) -> [Suit; 4] {
    let mut counts = [0usize; 4];
    for card in board {
        counts[card.suit.index()] += 1;
    }
    let mut order = Suit::ALL;
    order.sort_by_key(|s| counts[s.index()]);
    order
}

fn pick_card(rank: Rank, suits: &[Suit; 4], blocked: &[Card]) -> Result<Card, EquityError> {
    suits
        .iter()
        .map(|s| Card::new(rank, *s))
        .find(|c| !blocked.contains(c))
        .ok_or(EquityError::NoSynthesizedHand)
}
