use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::engine::RandomSource;

use super::distribution::{centered_sample, truncated_normal};

/// Олл-ин, если стек героя не больше стольких больших блайндов.
pub const SHORT_STACK_BB: u64 = 12;
/// Ставка от этой доли стека превращается в олл-ин.
pub const JAM_THRESHOLD: f64 = 0.85;
/// Множитель ставки в мультипоте на постфлопе.
pub const MULTIWAY_FACTOR: f64 = 0.75;
/// Сдвиг множителей 3-бета / 4-бета без позиции.
pub const OOP_SHIFT: f64 = 0.75;

const THREE_BET_RANGE: (f64, f64) = (2.5, 3.5);
const FOUR_BET_RANGE: (f64, f64) = (2.2, 3.2);
const DEFAULT_OPEN_RANGE: (f64, f64) = (2.5, 4.5);
const POSTFLOP_RANGE: (f64, f64) = (1.0 / 3.0, 2.0);
const RERAISE_RANGE: (f64, f64) = (0.75, 1.25);

/// Вход калькулятора сайзинга.
///
/// `street` одновременно задаёт и префлоп/постфлоп, и конкретную постфлоп-улицу.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct BetSizingInput {
    pub street: Street,
    pub hero_stack: Chips,
    pub villain_stack: Chips,
    pub pot: Chips,
    /// Рейзов на текущей улице.
    pub raises: u32,
    pub last_villain_bet: Chips,
    pub big_blind: Chips,
    /// Больше двух игроков в банке (учитывается только на постфлопе).
    pub multiway: bool,
    /// Номер места 1..=10 для таблицы открытий (см. `Position::sizing_seat`).
    pub hero_position: u8,
    pub in_position: bool,
}

/// Результат: SPR и рекомендуемый размер ставки в фишках.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct BetSizing {
    pub spr: f64,
    pub bet_size: Chips,
}

impl BetSizing {
    /// SPR с двумя знаками после запятой (для вывода).
    pub fn spr_rounded(&self) -> f64 {
        (self.spr * 100.0).round() / 100.0
    }
}

/// Диапазон множителя большого блайнда для открытия с места 1..=10.
pub fn preflop_open_range(seat: u8) -> (f64, f64) {
    match seat {
        1 => (2.5, 4.5),
        2 => (2.5, 4.0),
        3 => (2.0, 2.5),
        4 => (2.0, 3.0),
        5 | 6 => (2.0, 3.5),
        7 => (2.0, 4.0),
        8..=10 => (2.0, 4.5),
        _ => DEFAULT_OPEN_RANGE,
    }
}

/// Центр постфлоп-ставки в долях банка.
pub fn postflop_center(street: Street) -> f64 {
    match street {
        Street::Turn => 0.75,
        Street::River => 1.0,
        Street::Flop | Street::Preflop => 0.5,
    }
}

/// SPR: меньший из стеков / банк (0 при пустом банке).
pub fn stack_to_pot(hero_stack: Chips, villain_stack: Chips, pot: Chips) -> f64 {
    if pot.is_zero() {
        return 0.0;
    }
    hero_stack.min(villain_stack).as_f64() / pot.as_f64()
}

/// Посчитать SPR и размер ставки.
///
/// Олл-ин (весь стек героя) при SPR <= 1 или коротком стеке важнее всех остальных правил.
pub fn size_bet<R: RandomSource>(input: &BetSizingInput, rng: &mut R) -> BetSizing {
    let spr = stack_to_pot(input.hero_stack, input.villain_stack, input.pot);
    let jam = BetSizing {
        spr,
        bet_size: input.hero_stack,
    };

    let short_stack = input.hero_stack.0 <= SHORT_STACK_BB.saturating_mul(input.big_blind.0);
    if spr <= 1.0 || short_stack {
        return jam;
    }

    let raw = if input.street.is_postflop() {
        let bet = postflop_bet(input, rng);
        if input.multiway {
            bet * MULTIWAY_FACTOR
        } else {
            bet
        }
    } else {
        match input.raises {
            0 => {
                let (lower, upper) = preflop_open_range(input.hero_position);
                input.big_blind.as_f64() * centered_sample(rng, lower, upper)
            }
            1 => input.last_villain_bet.as_f64() * reraise_multiplier(THREE_BET_RANGE, input, rng),
            2 => input.last_villain_bet.as_f64() * reraise_multiplier(FOUR_BET_RANGE, input, rng),
            _ => {
                // 5-бет и дальше: мин-клик или пуш.
                return BetSizing {
                    spr,
                    bet_size: input.hero_stack.min(input.pot),
                };
            }
        }
    };

    let hero = input.hero_stack.as_f64();
    if raw >= JAM_THRESHOLD * hero || raw >= hero {
        return jam;
    }

    BetSizing {
        spr,
        bet_size: Chips::from_f64_rounded(raw),
    }
}

fn reraise_multiplier<R: RandomSource>(
    (lower, upper): (f64, f64),
    input: &BetSizingInput,
    rng: &mut R,
) -> f64 {
    let shift = if input.in_position { 0.0 } else { OOP_SHIFT };
    centered_sample(rng, lower + shift, upper + shift)
}

fn postflop_bet<R: RandomSource>(input: &BetSizingInput, rng: &mut R) -> f64 {
    let pot = input.pot.as_f64();
    if input.raises > 0 {
        let (lower, upper) = RERAISE_RANGE;
        (pot + 2.0 * input.last_villain_bet.as_f64()) * truncated_normal(rng, 1.0, lower, upper)
    } else {
        let (lower, upper) = POSTFLOP_RANGE;
        pot * truncated_normal(rng, postflop_center(input.street), lower, upper)
    }
}
