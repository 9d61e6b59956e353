//! Статистика игроков: журнал раздачи -> флаги -> скользящие проценты.
//!
//! Основные операции:
//!   - `HandFlags::evaluate` – шесть флагов игрока по журналу раздачи
//!   - `SessionStatsTracker::commit_hand` – идемпотентно записать раздачу в хранилище

pub mod errors;
pub mod records;
pub mod store;
pub mod tracker;

pub use errors::StatsError;
pub use records::{
    ActionKind, HandAction, HandFlags, HandLog, HandRecord, LoggedAction, PlayerStatRecord,
    PlayerStats,
};
pub use store::{InMemoryStatsStore, JsonDirStatsStore, StatsStore};
pub use tracker::{CommitSummary, SessionStatsTracker};
