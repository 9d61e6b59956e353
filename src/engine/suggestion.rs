use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::eval::Equity;
use crate::ranges::PreflopAction;
use crate::sizing::BetSizing;

/// Префлоп-совет для оверлея: действие или ошибка селектора.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", content = "message", rename_all = "lowercase")]
pub enum PreflopAdvice {
    Open,
    Fold,
    Call,
    Check,
    Error(String),
}

impl From<PreflopAction> for PreflopAdvice {
    fn from(action: PreflopAction) -> Self {
        match action {
            PreflopAction::Open => PreflopAdvice::Open,
            PreflopAction::Fold => PreflopAdvice::Fold,
            PreflopAction::Call => PreflopAdvice::Call,
            PreflopAction::Check => PreflopAdvice::Check,
        }
    }
}

impl PreflopAdvice {
    pub fn is_error(&self) -> bool {
        matches!(self, PreflopAdvice::Error(_))
    }
}

impl fmt::Display for PreflopAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreflopAdvice::Open => f.write_str("open"),
            PreflopAdvice::Fold => f.write_str("fold"),
            PreflopAdvice::Call => f.write_str("call"),
            PreflopAdvice::Check => f.write_str("check"),
            PreflopAdvice::Error(msg) => write!(f, "error: {msg}"),
        }
    }
}

/// Выход движка за один тик.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    /// None — карт героя ещё нет.
    pub preflop_action: Option<PreflopAdvice>,
    /// SPR, два знака после запятой.
    pub spr: f64,
    pub bet_size: Chips,
    /// 0..100, два знака после запятой.
    pub win_percent: f64,
    pub tie_percent: f64,
    /// Ошибка калькулятора эквити на этом тике (эквити тогда нулевое).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equity_error: Option<String>,
}

impl Suggestion {
    pub fn apply_sizing(&mut self, sizing: &BetSizing) {
        self.spr = sizing.spr_rounded();
        self.bet_size = sizing.bet_size;
    }

    pub fn apply_equity(&mut self, equity: &Equity) {
        self.win_percent = equity.win_percent();
        self.tie_percent = equity.tie_percent();
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = self
            .preflop_action
            .as_ref()
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "preflop={} spr={:.2} bet={} win={:.2}% tie={:.2}%",
            action, self.spr, self.bet_size, self.win_percent, self.tie_percent
        )
    }
}
