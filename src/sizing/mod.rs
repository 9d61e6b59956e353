//! Сайзинг ставок: SPR и рекомендуемый размер ставки/рейза.

pub mod calculator;
pub mod distribution;

pub use calculator::{
    postflop_center, preflop_open_range, size_bet, stack_to_pot, BetSizing, BetSizingInput,
};
pub use distribution::{centered_sample, truncated_normal};
