//! Префлоп-селектор: рука + позиция + «особая» рука -> открыть / пас / колл / чек.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::hand::{HandClass, RankPair};
use crate::domain::position::Position;
use crate::domain::snapshot::OverrideOptions;
use crate::engine::RandomSource;

use super::chart::ActionCode;
use super::errors::RangeError;
use super::store::RangeChartStore;

/// На bb открываемся с этой частотой независимо от руки.
pub const BB_DEFEND_FREQUENCY: f64 = 0.15;
/// Частота открытия для кодов `s`/`b` без особой руки.
pub const DEFAULT_MIX_FREQUENCY: f64 = 0.25;
/// Частота `s`/`b`, когда особая рука включена только одномастной.
pub const SUITED_OVERRIDE_MIX_FREQUENCY: f64 = 0.125;
/// Частота `s`/`b`, когда особая рука включена в любой масти.
pub const OFFSUIT_OVERRIDE_MIX_FREQUENCY: f64 = 0.05;
/// Частота для кода `s`, если сама особая рука в чарте — `r`.
pub const OVERRIDE_RAISE_MIX_FREQUENCY: f64 = 0.25;
/// На sb рука с кодом `r` коллирует с этой частотой.
pub const SB_CALL_FREQUENCY: f64 = 0.60;

/// Итоговое префлоп-решение.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PreflopAction {
    Open,
    Fold,
    Call,
    Check,
}

impl PreflopAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreflopAction::Open => "open",
            PreflopAction::Fold => "fold",
            PreflopAction::Call => "call",
            PreflopAction::Check => "check",
        }
    }
}

impl fmt::Display for PreflopAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Разобранная «особая» рука.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SpecialHand {
    core: RankPair,
    suited_only: bool,
}

impl SpecialHand {
    fn from_options(options: &OverrideOptions) -> Result<Option<Self>, RangeError> {
        if !options.enabled {
            return Ok(None);
        }
        let core: RankPair = options.hand.parse()?;
        Ok(Some(Self {
            core,
            suited_only: options.suited_only,
        }))
    }

    /// Совпадение по ядру; в режиме suited_only — ещё и по одномастности.
    /// Пара совпадает с парой (у пар маркера нет).
    fn matches(&self, hand: HandClass) -> bool {
        if hand.core() != self.core {
            return false;
        }
        !self.suited_only || self.core.is_pair() || hand.is_suited()
    }

    fn mix_frequency(&self) -> f64 {
        if self.suited_only {
            SUITED_OVERRIDE_MIX_FREQUENCY
        } else {
            OFFSUIT_OVERRIDE_MIX_FREQUENCY
        }
    }
}

fn open_or_fold<R: RandomSource>(rng: &mut R, p: f64) -> PreflopAction {
    if rng.chance(p) {
        PreflopAction::Open
    } else {
        PreflopAction::Fold
    }
}

/// Выбрать префлоп-действие.
///
/// Порядок правил:
/// 1. bb: с вероятностью 15% — `open` при любой руке;
/// 2. рука совпала с особой — `open`;
/// 3. код `s`, а особая рука в этой позиции `r` — `open` с вероятностью 25%;
/// 4. коды `s`/`b` — `open` с вероятностью 25% (12.5% / 5% при особой руке);
/// 5. `r` на sb — `call` в 60% случаев, иначе `open`;
/// 6. `f` на bb — `check`.
pub fn select_action<R: RandomSource>(
    hand: HandClass,
    position: Position,
    overrides: &OverrideOptions,
    charts: &RangeChartStore,
    rng: &mut R,
) -> Result<PreflopAction, RangeError> {
    let chart = charts.chart(position)?;
    let special = SpecialHand::from_options(overrides)?;

    if position == Position::Bb && rng.chance(BB_DEFEND_FREQUENCY) {
        return Ok(PreflopAction::Open);
    }

    if let Some(special) = &special {
        if special.matches(hand) {
            return Ok(PreflopAction::Open);
        }
    }

    let code = chart.action(hand)?;

    if let Some(special) = &special {
        let special_code = chart.action(special.core.suited_class())?;
        if special_code == ActionCode::Raise && code == ActionCode::SuitedFrequency {
            return Ok(open_or_fold(rng, OVERRIDE_RAISE_MIX_FREQUENCY));
        }
    }

    let action = match code {
        ActionCode::SuitedFrequency | ActionCode::Borderline => {
            let p = special
                .as_ref()
                .map_or(DEFAULT_MIX_FREQUENCY, SpecialHand::mix_frequency);
            open_or_fold(rng, p)
        }
        ActionCode::Raise if position == Position::Sb => {
            if rng.chance(SB_CALL_FREQUENCY) {
                PreflopAction::Call
            } else {
                PreflopAction::Open
            }
        }
        ActionCode::Raise => PreflopAction::Open,
        ActionCode::Fold if position == Position::Bb => PreflopAction::Check,
        ActionCode::Fold => PreflopAction::Fold,
    };
    Ok(action)
}

/// То же по строкам, как их отдаёт оверлей: рука "KAs", позиция "utg+1".
pub fn select_action_str<R: RandomSource>(
    hand: &str,
    position: &str,
    overrides: &OverrideOptions,
    charts: &RangeChartStore,
    rng: &mut R,
) -> Result<PreflopAction, RangeError> {
    let hand: HandClass = hand.parse()?;
    let position: Position = position
        .parse()
        .map_err(|_| RangeError::UnknownPosition(position.to_string()))?;
    select_action(hand, position, overrides, charts, rng)
}
