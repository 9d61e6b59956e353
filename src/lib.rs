//! Покерный советник: префлоп-селектор по чартам, сайзинг ставок,
//! калькулятор эквити и статистика оппонентов поверх потока снимков стола.
//!
//! Поток данных за тик: `TableSnapshot` -> `HandTracker` -> `Advisor` -> `Suggestion`.

pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod ranges;
pub mod sizing;
pub mod stats;

pub use engine::{Advisor, Suggestion};
