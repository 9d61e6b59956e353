//! Движок советника: состояние раздачи/улицы и конвейер расчётов на каждый тик.
//!
//! Высокоуровневый объект: `Advisor`
//! Основные операции:
//!   - `HandTracker::observe` – обновить контекст раздачи по снимку стола
//!   - `Advisor::on_tick` – пересчитать подсказку (с мемоизацией входов)
//!   - `assign_positions` – разложить места по каноническим позициям

pub mod advisor;
pub mod errors;
pub mod positions;
pub mod suggestion;
pub mod tracker;

pub use advisor::{Advisor, TickOutcome, TickSkip};
pub use errors::EngineError;
pub use positions::{assign_positions, hero_in_position, position_of};
pub use suggestion::{PreflopAdvice, Suggestion};
pub use tracker::{HandContext, HandState, HandTracker, TrackerEvent};

/// RNG интерфейс для движка.
///
/// Все вероятностные решения (частоты открытия, сайзинг, Монте-Карло)
/// идут через него, чтобы тесты могли зафиксировать исход.
pub trait RandomSource {
    /// Равномерное число в [0, 1).
    fn next_unit(&mut self) -> f64;

    /// Равномерный индекс в [0, upper). `upper` должен быть > 0.
    fn next_index(&mut self, upper: usize) -> usize;

    /// Нормальное распределение N(mean, std_dev²).
    fn next_gaussian(&mut self, mean: f64, std_dev: f64) -> f64;

    /// `true` с вероятностью `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_unit() < p
    }
}
