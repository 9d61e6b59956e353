//! Оценка силы рук и калькулятор эквити (Texas Hold'em).
//!
//! Основные функции:
//!   `evaluate_best_hand(hole, board) -> HandRank`
//!   `equity(hero, villain, board, samples, rng) -> Equity`

pub mod equity;
pub mod errors;
pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use equity::{
    best_villain_holding, best_villain_holding_excluding, equity, top_pair_top_kicker, Equity,
    DEFAULT_EQUITY_SAMPLES,
};
pub use errors::EquityError;
pub use evaluator::{evaluate_best_hand, evaluate_cards};
pub use hand_rank::{describe_hand, HandCategory};
