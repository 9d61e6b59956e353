//! Журнал раздачи и персистентные записи статистики игроков.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::snapshot::SeatIndex;

/// Действие, выведенное из изменений снимка.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Постановка блайнда.
    Post,
    Fold,
    Call,
    /// Первая ставка на постфлоп-улице.
    Bet,
    Raise,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Post => "post",
            ActionKind::Fold => "fold",
            ActionKind::Call => "call",
            ActionKind::Bet => "bet",
            ActionKind::Raise => "raise",
        }
    }

    pub fn is_aggressive(&self) -> bool {
        matches!(self, ActionKind::Bet | ActionKind::Raise)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Одно действие в журнале раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggedAction {
    pub seat: SeatIndex,
    pub player: String,
    #[serde(rename = "action_type")]
    pub kind: ActionKind,
    /// Сколько игрок поставил на улице после этого действия.
    pub amount: Chips,
    pub street: Street,
    /// Unix-время в секундах.
    pub timestamp: u64,
}

/// Полный журнал одной завершённой раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandLog {
    /// `<сессия>-<номер раздачи>`.
    pub hand_id: String,
    pub started_at: u64,
    /// Имена всех, кто сидел за столом в этой раздаче.
    pub players: Vec<String>,
    /// Действия в порядке наблюдения.
    pub actions: Vec<LoggedAction>,
    /// Раздача дошла до ривера.
    pub reached_river: bool,
}

impl HandLog {
    /// Действия одного игрока.
    pub fn actions_of<'a>(&'a self, player: &'a str) -> impl Iterator<Item = &'a LoggedAction> + 'a {
        self.actions.iter().filter(move |a| a.player == player)
    }

    pub fn folded(&self, player: &str) -> bool {
        self.actions_of(player).any(|a| a.kind == ActionKind::Fold)
    }
}

/// Шесть флагов игрока за одну раздачу.
///
/// Считаются по всему журналу раздачи разом, поэтому каждый флаг
/// учитывается не больше одного раза за раздачу.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandFlags {
    pub vpip: bool,
    pub pfr: bool,
    pub three_bet: bool,
    pub fold_to_three_bet: bool,
    pub cbet_flop: bool,
    pub went_to_showdown: bool,
}

impl HandFlags {
    pub fn evaluate(log: &HandLog, player: &str) -> HandFlags {
        let mut flags = HandFlags::default();
        let mut preflop_raises_before = 0usize;
        // Индекс (в префлоп-рейзах) последнего рейза игрока.
        let mut own_raise_at: Option<usize> = None;
        let mut reraised_after_own = false;

        for action in log.actions.iter() {
            let own = action.player == player;
            match action.street {
                Street::Preflop => match action.kind {
                    ActionKind::Raise | ActionKind::Bet => {
                        if own {
                            flags.vpip = true;
                            flags.pfr = true;
                            if preflop_raises_before > 0 {
                                flags.three_bet = true;
                            }
                            own_raise_at = Some(preflop_raises_before);
                            reraised_after_own = false;
                        } else if own_raise_at.is_some() {
                            reraised_after_own = true;
                        }
                        preflop_raises_before += 1;
                    }
                    ActionKind::Call if own => flags.vpip = true,
                    ActionKind::Fold if own && reraised_after_own => {
                        flags.fold_to_three_bet = true;
                    }
                    _ => {}
                },
                Street::Flop if own && action.kind.is_aggressive() => flags.cbet_flop = true,
                _ => {}
            }
        }

        flags.went_to_showdown =
            log.players.iter().any(|p| p == player) && log.reached_river && !log.folded(player);
        flags
    }
}

/// Действие в сохранённой раздаче игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandAction {
    pub action_type: ActionKind,
    pub amount: Chips,
    pub street: Street,
    pub timestamp: u64,
}

/// Раздача в истории игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandRecord {
    pub hand_id: String,
    pub timestamp: u64,
    pub actions: Vec<HandAction>,
    pub went_to_showdown: bool,
    pub flags: HandFlags,
}

impl HandRecord {
    pub fn from_log(log: &HandLog, player: &str) -> HandRecord {
        let flags = HandFlags::evaluate(log, player);
        HandRecord {
            hand_id: log.hand_id.clone(),
            timestamp: log.started_at,
            actions: log
                .actions_of(player)
                .map(|a| HandAction {
                    action_type: a.kind,
                    amount: a.amount,
                    street: a.street,
                    timestamp: a.timestamp,
                })
                .collect(),
            went_to_showdown: flags.went_to_showdown,
            flags,
        }
    }
}

/// Скользящие проценты 0..100 по всей сохранённой истории игрока.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PlayerStats {
    pub hands: usize,
    pub vpip: f64,
    pub pfr: f64,
    pub three_bet: f64,
    pub fold_to_three_bet: f64,
    pub cbet_flop: f64,
    pub went_to_showdown: f64,
}

impl PlayerStats {
    pub fn from_hands(hands: &[HandRecord]) -> PlayerStats {
        let total = hands.len();
        if total == 0 {
            return PlayerStats::default();
        }
        let pct = |f: fn(&HandFlags) -> bool| {
            let n = hands.iter().filter(|h| f(&h.flags)).count();
            n as f64 / total as f64 * 100.0
        };
        PlayerStats {
            hands: total,
            vpip: pct(|f| f.vpip),
            pfr: pct(|f| f.pfr),
            three_bet: pct(|f| f.three_bet),
            fold_to_three_bet: pct(|f| f.fold_to_three_bet),
            cbet_flop: pct(|f| f.cbet_flop),
            went_to_showdown: pct(|f| f.went_to_showdown),
        }
    }
}

/// Персистентная запись об игроке: история раздач + проценты.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlayerStatRecord {
    pub name: String,
    pub hands: Vec<HandRecord>,
    pub stats: PlayerStats,
}

impl PlayerStatRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hands: Vec::new(),
            stats: PlayerStats::default(),
        }
    }

    pub fn contains_hand(&self, hand_id: &str) -> bool {
        self.hands.iter().any(|h| h.hand_id == hand_id)
    }

    /// Добавить раздачу и пересчитать проценты. Повтор того же `hand_id` игнорируется.
    pub fn add_hand(&mut self, record: HandRecord) -> bool {
        if self.contains_hand(&record.hand_id) {
            return false;
        }
        self.hands.push(record);
        self.recompute();
        true
    }

    pub fn recompute(&mut self) {
        self.stats = PlayerStats::from_hands(&self.hands);
    }
}
