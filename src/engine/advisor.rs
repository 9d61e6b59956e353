//! Конвейер советника: снимок -> контекст раздачи -> подсказка.
//!
//! Три калькулятора (префлоп, сайзинг, эквити) независимы: ошибка одного
//! не мешает остальным. Каждый мемоизирован по своим входам, поэтому
//! одинаковые тики не перезапускают случайный сайзинг и Монте-Карло.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::errors::ParseError;
use crate::domain::hand::{Board, HandClass, HoleHand, Street};
use crate::domain::position::Position;
use crate::domain::snapshot::{
    CalculatorOverrideMode, OverrideOptions, SynthesisMode, TableSnapshot, VillainHandSource,
};
use crate::eval::{
    best_villain_holding_excluding, equity, top_pair_top_kicker, Equity, EquityError,
};
use crate::infra::config::AdvisorConfig;
use crate::infra::rng::ConfiguredRng;
use crate::ranges::{select_action, RangeChartStore, RangeError};
use crate::sizing::{size_bet, BetSizing, BetSizingInput};
use crate::stats::{
    CommitSummary, HandLog, JsonDirStatsStore, SessionStatsTracker, StatsError, StatsStore,
};

use super::errors::EngineError;
use super::positions::{hero_in_position, position_of};
use super::suggestion::{PreflopAdvice, Suggestion};
use super::tracker::{unix_now, HandTracker, TrackerEvent};
use super::RandomSource;

/// Почему тик пропущен целиком.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum TickSkip {
    /// Кнопки дилера нет — раздача не началась.
    HandNotStarted,
    GameTypeMismatch {
        expected: String,
        actual: Option<String>,
    },
}

/// Результат одного тика.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutcome {
    /// Актуальная подсказка (None, если тик пропущен).
    pub suggestion: Option<Suggestion>,
    /// Подсказка отличается от предыдущей.
    pub changed: bool,
    pub events: Vec<TrackerEvent>,
    /// Итог фиксации предыдущей раздачи в статистике.
    pub committed: Option<CommitSummary>,
    pub skipped: Option<TickSkip>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct PreflopKey {
    hand_number: u64,
    hand: HandClass,
    position: Option<Position>,
    overrides: OverrideOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct EquityKey {
    hero: HoleHand,
    villain: HoleHand,
    board: Vec<Card>,
    samples: usize,
}

/// Последние входы и результаты каждого калькулятора.
#[derive(Clone, Debug, Default)]
struct Memo {
    preflop: Option<(PreflopKey, PreflopAdvice)>,
    sizing: Option<(BetSizingInput, BetSizing)>,
    equity: Option<(EquityKey, Equity)>,
}

/// Советник: держит трекер раздачи, чарты, RNG и статистику сессии.
pub struct Advisor<R: RandomSource, S: StatsStore> {
    config: AdvisorConfig,
    charts: RangeChartStore,
    rng: R,
    tracker: HandTracker,
    stats: SessionStatsTracker<S>,
    /// Завершённые раздачи, которые ещё не удалось сохранить.
    pending: VecDeque<HandLog>,
    memo: Memo,
    last: Option<Suggestion>,
}

impl Advisor<ConfiguredRng, JsonDirStatsStore> {
    /// Собрать советника по конфигурации: чарты, каталог статистики, RNG.
    pub fn from_config(config: AdvisorConfig) -> Result<Self, EngineError> {
        let charts = match &config.ranges_dir {
            Some(dir) => RangeChartStore::load_dir(dir)?,
            None => RangeChartStore::builtin()?,
        };
        let store = JsonDirStatsStore::open(&config.stats_dir)?;
        let rng = ConfiguredRng::from_seed(config.seed);
        Ok(Advisor::new(config, charts, rng, store))
    }
}

impl<R: RandomSource, S: StatsStore> Advisor<R, S> {
    pub fn new(config: AdvisorConfig, charts: RangeChartStore, rng: R, store: S) -> Self {
        let session = config
            .session
            .clone()
            .unwrap_or_else(|| unix_now().to_string());
        Self {
            config,
            charts,
            rng,
            tracker: HandTracker::new(session),
            stats: SessionStatsTracker::new(store),
            pending: VecDeque::new(),
            memo: Memo::default(),
            last: None,
        }
    }

    pub fn tracker(&self) -> &HandTracker {
        &self.tracker
    }

    pub fn stats(&self) -> &SessionStatsTracker<S> {
        &self.stats
    }

    pub fn last_suggestion(&self) -> Option<&Suggestion> {
        self.last.as_ref()
    }

    pub fn on_tick(
        &mut self,
        snapshot: &TableSnapshot,
        overrides: &OverrideOptions,
        villain_mode: &CalculatorOverrideMode,
    ) -> TickOutcome {
        self.on_tick_at(snapshot, overrides, villain_mode, unix_now())
    }

    /// Один тик опроса с явным временем.
    pub fn on_tick_at(
        &mut self,
        snapshot: &TableSnapshot,
        overrides: &OverrideOptions,
        villain_mode: &CalculatorOverrideMode,
        now: u64,
    ) -> TickOutcome {
        if !self.config.accepts_game_type(snapshot.game_type.as_deref()) {
            let expected = self.config.expected_game_type.clone().unwrap_or_default();
            log::debug!(
                "Тип игры {:?} не совпадает с ожидаемым {}",
                snapshot.game_type,
                expected
            );
            return TickOutcome {
                skipped: Some(TickSkip::GameTypeMismatch {
                    expected,
                    actual: snapshot.game_type.clone(),
                }),
                ..TickOutcome::default()
            };
        }
        if snapshot.dealer_seat().is_none() {
            return TickOutcome {
                skipped: Some(TickSkip::HandNotStarted),
                ..TickOutcome::default()
            };
        }

        let mut observation = self.tracker.observe_at(snapshot, now);
        let committed = match observation.completed.take() {
            Some(hand_log) => {
                self.pending.push_back(hand_log);
                self.commit_pending().ok().flatten()
            }
            None => None,
        };

        let suggestion = self.compute(snapshot, overrides, villain_mode);
        let changed = self.last.as_ref() != Some(&suggestion);
        if changed {
            log::debug!("Подсказка обновлена: {}", suggestion);
            self.last = Some(suggestion.clone());
        }

        TickOutcome {
            suggestion: Some(suggestion),
            changed,
            events: observation.events,
            committed,
            skipped: None,
        }
    }

    /// Раздачи, ожидающие повторной записи в статистику.
    pub fn pending_hands(&self) -> usize {
        self.pending.len()
    }

    /// Закрыть сессию: зафиксировать незавершённую раздачу и всё, что не
    /// сохранилось раньше.
    pub fn finish(&mut self) -> Result<Option<CommitSummary>, StatsError> {
        if let Some(hand_log) = self.tracker.finish() {
            self.pending.push_back(hand_log);
        }
        self.commit_pending()
    }

    /// Сохранить отложенные раздачи по порядку. На первой ошибке очередь
    /// остаётся как есть, следующая граница раздачи попробует снова.
    /// Возвращает итог последней сохранённой раздачи.
    fn commit_pending(&mut self) -> Result<Option<CommitSummary>, StatsError> {
        let mut last = None;
        while let Some(hand_log) = self.pending.front() {
            match self.stats.commit_hand(hand_log) {
                Ok(summary) => {
                    self.pending.pop_front();
                    last = Some(summary);
                }
                Err(e) => {
                    log::error!(
                        "Не удалось сохранить статистику раздачи {} (в очереди {}): {}",
                        hand_log.hand_id,
                        self.pending.len(),
                        e
                    );
                    return Err(e);
                }
            }
        }
        Ok(last)
    }

    fn compute(
        &mut self,
        snapshot: &TableSnapshot,
        overrides: &OverrideOptions,
        villain_mode: &CalculatorOverrideMode,
    ) -> Suggestion {
        let mut suggestion = Suggestion::default();

        let hero_hand = match snapshot.hero_hand() {
            Ok(hand) => hand,
            Err(e) => {
                log::warn!("Карты героя не разобраны: {}", e);
                suggestion.preflop_action = Some(PreflopAdvice::Error(e.to_string()));
                None
            }
        };

        if let Some(hand) = hero_hand {
            suggestion.preflop_action = Some(self.preflop(snapshot, hand, overrides));
        }

        if let Some(input) = self.sizing_input(snapshot) {
            suggestion.apply_sizing(&self.sizing(input));
        }

        if let Some(hero) = hero_hand {
            match self.equity(snapshot, hero, villain_mode) {
                Ok(eq) => suggestion.apply_equity(&eq),
                Err(e) => {
                    log::warn!("Эквити не посчитано: {}", e);
                    suggestion.equity_error = Some(e.to_string());
                }
            }
        }

        suggestion
    }

    fn preflop(
        &mut self,
        snapshot: &TableSnapshot,
        hand: HoleHand,
        overrides: &OverrideOptions,
    ) -> PreflopAdvice {
        let context = self.tracker.context();
        let position = snapshot.hero().and_then(|hero| {
            context
                .position_of(hero.seat)
                .or_else(|| position_of(snapshot, hero.seat))
        });
        let key = PreflopKey {
            hand_number: context.hand_number,
            hand: hand.class(),
            position,
            overrides: overrides.clone(),
        };
        if let Some((memo_key, advice)) = &self.memo.preflop {
            if *memo_key == key {
                return advice.clone();
            }
        }

        let result = match position {
            Some(position) => {
                select_action(key.hand, position, overrides, &self.charts, &mut self.rng)
            }
            None => Err(RangeError::UnknownPosition("?".to_string())),
        };
        let advice = match result {
            Ok(action) => PreflopAdvice::from(action),
            Err(e) => {
                log::warn!("Селектор префлопа: {}", e);
                PreflopAdvice::Error(e.to_string())
            }
        };
        self.memo.preflop = Some((key, advice.clone()));
        advice
    }

    /// Вход сайзинга из снимка и контекста раздачи (None — героя нет за столом).
    fn sizing_input(&self, snapshot: &TableSnapshot) -> Option<BetSizingInput> {
        let hero = snapshot.hero()?;
        let context = self.tracker.context();
        let street = Street::from_board_len(snapshot.board.len())
            .or_else(|| context.street())
            .unwrap_or(Street::Preflop);

        let villain_stack = snapshot
            .active_villains()
            .map(|s| s.stack)
            .min()
            .unwrap_or(Chips::ZERO);
        let mut last_villain_bet = snapshot
            .active_villains()
            .map(|s| s.committed)
            .max()
            .unwrap_or(Chips::ZERO);
        if last_villain_bet <= snapshot.big_blind {
            last_villain_bet = Chips::ZERO;
        }

        let hero_position = context
            .position_of(hero.seat)
            .or_else(|| position_of(snapshot, hero.seat))
            .map_or(0, |p| p.sizing_seat());

        Some(BetSizingInput {
            street,
            hero_stack: hero.stack,
            villain_stack,
            pot: snapshot.pot,
            raises: context.raises,
            last_villain_bet,
            big_blind: snapshot.big_blind,
            multiway: snapshot.active_count() > 2,
            hero_position,
            in_position: hero_in_position(snapshot),
        })
    }

    fn sizing(&mut self, input: BetSizingInput) -> BetSizing {
        if let Some((memo_input, sizing)) = &self.memo.sizing {
            if *memo_input == input {
                return *sizing;
            }
        }
        let sizing = size_bet(&input, &mut self.rng);
        log::debug!("Сайзинг: SPR={:.2}, ставка={}", sizing.spr, sizing.bet_size);
        self.memo.sizing = Some((input, sizing));
        sizing
    }

    fn equity(
        &mut self,
        snapshot: &TableSnapshot,
        hero: HoleHand,
        villain_mode: &CalculatorOverrideMode,
    ) -> Result<Equity, EquityError> {
        // Борд из 1–2 карт бывает, пока карты флопа ещё раздаются.
        let board = Board::new(snapshot.board.clone()).map_err(board_error)?;
        let source = resolve_villain_source(snapshot, villain_mode)?;
        let Some(villain) = villain_hand(source, board.cards(), &hero)? else {
            return Ok(Equity::NEUTRAL);
        };

        let key = EquityKey {
            hero,
            villain,
            board: board.cards().to_vec(),
            samples: self.config.equity_samples,
        };
        if let Some((memo_key, eq)) = &self.memo.equity {
            if *memo_key == key {
                return Ok(*eq);
            }
        }

        let eq = equity(&hero, &villain, board.cards(), key.samples, &mut self.rng)?;
        self.memo.equity = Some((key, eq));
        Ok(eq)
    }
}

fn board_error(e: ParseError) -> EquityError {
    match e {
        ParseError::InvalidBoardLength(len) => EquityError::InvalidBoardLength(len),
        ParseError::DuplicateCard(card) => EquityError::DuplicateCard(card),
        other => EquityError::Parse(other),
    }
}

/// Откуда брать руку злодея на этом тике.
///
/// Приоритет: открытая рука оппонента > nuts > топ-пара > ручной ввод > нет.
/// Синтез нужен только пока реальной руки злодея не видно.
pub fn resolve_villain_source(
    snapshot: &TableSnapshot,
    mode: &CalculatorOverrideMode,
) -> Result<VillainHandSource, ParseError> {
    if let Some(revealed) = snapshot.revealed_villain_hand() {
        return Ok(VillainHandSource::Explicit(revealed));
    }

    match mode {
        CalculatorOverrideMode::Nuts => Ok(VillainHandSource::Synthesized(SynthesisMode::Nuts)),
        CalculatorOverrideMode::TopPairTopKicker => {
            Ok(VillainHandSource::Synthesized(SynthesisMode::TopPair))
        }
        CalculatorOverrideMode::Manual(text) if !text.trim().is_empty() => {
            Ok(VillainHandSource::Explicit(text.trim().parse()?))
        }
        _ => Ok(VillainHandSource::None),
    }
}

/// Конкретная рука злодея для источника (None — считать нечего).
pub fn villain_hand(
    source: VillainHandSource,
    board: &[Card],
    hero: &HoleHand,
) -> Result<Option<HoleHand>, EquityError> {
    let dead = hero.cards();
    match source {
        VillainHandSource::Explicit(hand) => Ok(Some(hand)),
        VillainHandSource::Synthesized(SynthesisMode::Nuts) => {
            best_villain_holding_excluding(board, &dead).map(Some)
        }
        VillainHandSource::Synthesized(SynthesisMode::TopPair) => {
            top_pair_top_kicker(board, &dead).map(Some)
        }
        VillainHandSource::None => Ok(None),
    }
}
