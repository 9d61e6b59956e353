use std::collections::HashSet;

use super::errors::StatsError;
use super::records::{HandLog, HandRecord, PlayerStatRecord, PlayerStats};
use super::store::StatsStore;

/// Итог фиксации одной раздачи.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommitSummary {
    /// Игроки, чьи записи обновлены.
    pub updated: Vec<String>,
    /// Раздача уже была зафиксирована раньше.
    pub duplicate: bool,
}

/// Трекер статистики сессии поверх хранилища.
///
/// Повторная фиксация той же раздачи (тот же `hand_id`) ничего не меняет:
/// и в пределах сессии, и относительно уже сохранённой истории игрока.
#[derive(Debug)]
pub struct SessionStatsTracker<S: StatsStore> {
    store: S,
    committed: HashSet<String>,
}

impl<S: StatsStore> SessionStatsTracker<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            committed: HashSet::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Зафиксировать завершённую раздачу: по записи на каждого участника.
    pub fn commit_hand(&mut self, log: &HandLog) -> Result<CommitSummary, StatsError> {
        if self.committed.contains(&log.hand_id) {
            log::debug!("Раздача {} уже учтена", log.hand_id);
            return Ok(CommitSummary {
                updated: Vec::new(),
                duplicate: true,
            });
        }

        let mut updated = Vec::new();
        for player in &log.players {
            if player.trim().is_empty() {
                continue;
            }
            let mut record = self
                .store
                .load(player)?
                .unwrap_or_else(|| PlayerStatRecord::new(player.clone()));

            if record.add_hand(HandRecord::from_log(log, player)) {
                self.store.save(&record)?;
                updated.push(player.clone());
            }
        }

        self.committed.insert(log.hand_id.clone());
        log::info!(
            "Раздача {} учтена: обновлено игроков {}",
            log.hand_id,
            updated.len()
        );
        Ok(CommitSummary {
            updated,
            duplicate: false,
        })
    }

    /// Текущие проценты игрока (None — игрок не встречался).
    pub fn player_stats(&self, name: &str) -> Result<Option<PlayerStats>, StatsError> {
        Ok(self.store.load(name)?.map(|r| r.stats))
    }

    pub fn player_record(&self, name: &str) -> Result<Option<PlayerStatRecord>, StatsError> {
        self.store.load(name)
    }
}
