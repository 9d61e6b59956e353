//! Трекер раздачи/улицы: границы раздач, смена улиц, подсчёт рейзов, журнал действий.

use std::collections::{BTreeMap, BTreeSet};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::position::Position;
use crate::domain::snapshot::{SeatIndex, TableSnapshot};
use crate::stats::records::{ActionKind, HandLog, LoggedAction};

use super::positions::snapshot_positions;

/// Состояние автомата раздачи.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HandState {
    #[default]
    NoHand,
    Preflop,
    Flop,
    Turn,
    River,
}

impl HandState {
    pub fn from_street(street: Street) -> HandState {
        match street {
            Street::Preflop => HandState::Preflop,
            Street::Flop => HandState::Flop,
            Street::Turn => HandState::Turn,
            Street::River => HandState::River,
        }
    }

    pub fn street(&self) -> Option<Street> {
        match self {
            HandState::NoHand => None,
            HandState::Preflop => Some(Street::Preflop),
            HandState::Flop => Some(Street::Flop),
            HandState::Turn => Some(Street::Turn),
            HandState::River => Some(Street::River),
        }
    }
}

/// Событие трекера за тик.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TrackerEvent {
    NewHand { hand_number: u64, dealer: SeatIndex },
    NewStreet { street: Street },
}

/// Изменяемое состояние текущей раздачи.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HandContext {
    pub state: HandState,
    pub hand_number: u64,
    pub dealer: Option<SeatIndex>,
    /// Рейзов на текущей улице.
    pub raises: u32,
    pub last_aggressor: Option<SeatIndex>,
    /// Поставлено на текущей улице, по местам.
    pub committed: BTreeMap<SeatIndex, Chips>,
    /// Максимальная ставка улицы; превышение = рейз.
    pub street_max: Chips,
    /// Последняя допустимая длина борда (0, 3, 4, 5).
    pub board_len: usize,
    positions: BTreeMap<SeatIndex, Position>,
    folded: BTreeSet<SeatIndex>,
}

impl HandContext {
    pub fn street(&self) -> Option<Street> {
        self.state.street()
    }

    pub fn position_of(&self, seat: SeatIndex) -> Option<Position> {
        self.positions.get(&seat).copied()
    }

    pub fn has_folded(&self, seat: SeatIndex) -> bool {
        self.folded.contains(&seat)
    }

    fn enter_street(&mut self, street: Street, board_len: usize, big_blind: Chips) {
        self.state = HandState::from_street(street);
        self.board_len = board_len;
        self.raises = 0;
        self.committed.clear();
        // На префлопе большой блайнд — уже «ставка», его постановка не рейз.
        self.street_max = if street.is_postflop() {
            Chips::ZERO
        } else {
            big_blind
        };
    }
}

/// Что произошло за тик.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Observation {
    pub events: Vec<TrackerEvent>,
    /// Журнал предыдущей раздачи, если на этом тике началась новая.
    pub completed: Option<HandLog>,
}

impl Observation {
    pub fn new_hand(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, TrackerEvent::NewHand { .. }))
    }
}

/// Автомат {нет раздачи, префлоп, флоп, тёрн, ривер} поверх потока снимков.
#[derive(Clone, Debug)]
pub struct HandTracker {
    session: String,
    context: HandContext,
    log: Option<HandLog>,
}

impl HandTracker {
    /// `session` входит в идентификатор раздачи: `<session>-<номер>`.
    pub fn new(session: impl Into<String>) -> Self {
        Self {
            session: session.into(),
            context: HandContext::default(),
            log: None,
        }
    }

    pub fn context(&self) -> &HandContext {
        &self.context
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    /// Журнал текущей (незавершённой) раздачи.
    pub fn current_log(&self) -> Option<&HandLog> {
        self.log.as_ref()
    }

    pub fn observe(&mut self, snapshot: &TableSnapshot) -> Observation {
        self.observe_at(snapshot, unix_now())
    }

    /// Обработать снимок с явным временем (секунды Unix).
    ///
    /// Без кнопки дилера состояние не меняется.
    pub fn observe_at(&mut self, snapshot: &TableSnapshot, now: u64) -> Observation {
        let Some(dealer) = snapshot.dealer_seat() else {
            return Observation::default();
        };

        let mut observation = Observation::default();

        if self.context.dealer != Some(dealer) {
            observation.completed = self.finish();
            self.start_hand(snapshot, dealer, now);
            log::info!(
                "Новая раздача #{} (кнопка на месте {})",
                self.context.hand_number,
                dealer
            );
            observation.events.push(TrackerEvent::NewHand {
                hand_number: self.context.hand_number,
                dealer,
            });
        }

        let board_len = snapshot.board.len();
        match Street::from_board_len(board_len) {
            Some(street) if board_len != self.context.board_len => {
                self.context.enter_street(street, board_len, snapshot.big_blind);
                if street == Street::River {
                    if let Some(log) = self.log.as_mut() {
                        log.reached_river = true;
                    }
                }
                log::info!("Новая улица: {}", street);
                observation.events.push(TrackerEvent::NewStreet { street });
            }
            Some(_) => {}
            None => log::debug!("Борд из {} карт: улица не меняется", board_len),
        }

        self.record_actions(snapshot, now);
        observation
    }

    /// Закрыть текущую раздачу и вернуть её журнал (конец сессии).
    pub fn finish(&mut self) -> Option<HandLog> {
        let log = self.log.take()?;
        self.context.state = HandState::NoHand;
        if log.players.is_empty() {
            return None;
        }
        Some(log)
    }

    fn start_hand(&mut self, snapshot: &TableSnapshot, dealer: SeatIndex, now: u64) {
        let hand_number = self.context.hand_number + 1;
        self.context = HandContext {
            state: HandState::Preflop,
            hand_number,
            dealer: Some(dealer),
            positions: snapshot_positions(snapshot),
            ..HandContext::default()
        };
        self.context.street_max = snapshot.big_blind;

        self.log = Some(HandLog {
            hand_id: format!("{}-{}", self.session, hand_number),
            started_at: now,
            players: Vec::new(),
            actions: Vec::new(),
            reached_river: false,
        });
    }

    fn record_actions(&mut self, snapshot: &TableSnapshot, now: u64) {
        let Some(log) = self.log.as_mut() else {
            return;
        };
        let ctx = &mut self.context;
        let street = ctx.street().unwrap_or(Street::Preflop);

        let mut seats: Vec<_> = snapshot.seats.iter().collect();
        seats.sort_by_key(|s| s.seat);

        for seat in seats {
            if !seat.name.is_empty() && !log.players.contains(&seat.name) {
                log.players.push(seat.name.clone());
            }

            let mut push = |kind: ActionKind, amount: Chips| {
                log.actions.push(LoggedAction {
                    seat: seat.seat,
                    player: seat.name.clone(),
                    kind,
                    amount,
                    street,
                    timestamp: now,
                });
            };

            if seat.folded {
                if ctx.folded.insert(seat.seat) {
                    push(ActionKind::Fold, seat.committed);
                }
                continue;
            }

            let prev = ctx.committed.get(&seat.seat).copied().unwrap_or_default();
            if seat.committed == prev {
                continue;
            }
            ctx.committed.insert(seat.seat, seat.committed);
            if seat.committed < prev {
                continue;
            }

            let blind_seat = ctx
                .positions
                .get(&seat.seat)
                .is_some_and(|p| p.is_blind());
            let kind = if street == Street::Preflop
                && blind_seat
                && prev.is_zero()
                && seat.committed <= snapshot.big_blind
            {
                ActionKind::Post
            } else if seat.committed > ctx.street_max {
                ctx.raises += 1;
                ctx.street_max = seat.committed;
                ctx.last_aggressor = Some(seat.seat);
                if street.is_postflop() && ctx.raises == 1 {
                    ActionKind::Bet
                } else {
                    ActionKind::Raise
                }
            } else {
                ActionKind::Call
            };
            push(kind, seat.committed);
        }
    }
}

/// Текущее время, секунды Unix.
pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
