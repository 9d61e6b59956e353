//! Тесты префлоп-чартов и селектора действия.
//!
//! Случайность подменяется ScriptedRng: каждый `next_unit` берётся из очереди,
//! поэтому ветки с вероятностями проверяются детерминированно.

use std::fs;

use poker_advisor::domain::hand::HandClass;
use poker_advisor::domain::position::Position;
use poker_advisor::domain::snapshot::OverrideOptions;
use poker_advisor::domain::ParseError;
use poker_advisor::infra::{DeterministicRng, ScriptedRng};
use poker_advisor::ranges::{
    select_action, select_action_str, ActionCode, PreflopAction, RangeChart, RangeChartStore,
    RangeError,
};

fn store() -> RangeChartStore {
    RangeChartStore::builtin().unwrap()
}

fn hc(s: &str) -> HandClass {
    s.parse().unwrap()
}

fn no_override() -> OverrideOptions {
    OverrideOptions::default()
}

fn special(hand: &str, suited_only: bool) -> OverrideOptions {
    OverrideOptions {
        enabled: true,
        hand: hand.to_string(),
        suited_only,
    }
}

//
// TEST 1 — встроенные чарты покрывают все 169 рук в каждой позиции
//
#[test]
fn builtin_charts_are_total() {
    let charts = store();
    for position in Position::ALL {
        let chart = charts.chart(position).unwrap();
        assert_eq!(chart.len(), 169, "позиция {position}");
        for hand in HandClass::all() {
            assert!(chart.action(hand).is_ok(), "{hand} в {position}");
        }
    }
    assert_eq!(charts.positions().count(), 9);
    assert_eq!(charts.chart(Position::Utg).unwrap().count(ActionCode::Raise), 10);
}

//
// TEST 2 — сильная рука открывается без обращения к RNG
//
#[test]
fn premium_hand_opens_in_late_position() {
    let mut rng = ScriptedRng::new();
    let action = select_action(hc("AKs"), Position::Co, &no_override(), &store(), &mut rng).unwrap();
    assert_eq!(action, PreflopAction::Open);
    assert_eq!(rng.units_drawn(), 0);

    // Нормализация: "KAs" == "AKs".
    let action =
        select_action_str("KAs", "CO", &no_override(), &store(), &mut ScriptedRng::new()).unwrap();
    assert_eq!(action, PreflopAction::Open);
}

//
// TEST 3 — мусор: пас на utg, чек на bb (без «защиты» bb)
//
#[test]
fn trash_folds_or_checks_from_big_blind() {
    let charts = store();

    let mut rng = ScriptedRng::new();
    let action = select_action(hc("72o"), Position::Utg, &no_override(), &charts, &mut rng).unwrap();
    assert_eq!(action, PreflopAction::Fold);

    // 0.9 >= 15% — защиты bb нет, код `f` на bb превращается в check.
    let mut rng = ScriptedRng::new().with_units([0.9]);
    let action = select_action(hc("72o"), Position::Bb, &no_override(), &charts, &mut rng).unwrap();
    assert_eq!(action, PreflopAction::Check);

    // 0.1 < 15% — bb открывается любой рукой.
    let mut rng = ScriptedRng::new().with_units([0.1]);
    let action = select_action(hc("72o"), Position::Bb, &no_override(), &charts, &mut rng).unwrap();
    assert_eq!(action, PreflopAction::Open);
}

//
// TEST 4 — `r` на sb: 60% колл, иначе открытие
//
#[test]
fn small_blind_splits_raise_into_call_and_open() {
    let charts = store();

    let mut rng = ScriptedRng::new().with_units([0.3]);
    let action = select_action(hc("AKs"), Position::Sb, &no_override(), &charts, &mut rng).unwrap();
    assert_eq!(action, PreflopAction::Call);

    let mut rng = ScriptedRng::new().with_units([0.7]);
    let action = select_action(hc("AKs"), Position::Sb, &no_override(), &charts, &mut rng).unwrap();
    assert_eq!(action, PreflopAction::Open);
}

//
// TEST 5 — коды `s`/`b` без особой руки: открытие с частотой 25%
//
#[test]
fn mixed_codes_use_default_frequency() {
    let charts = store();
    assert_eq!(
        charts.chart(Position::Hj).unwrap().action(hc("87s")).unwrap(),
        ActionCode::SuitedFrequency
    );

    let mut rng = ScriptedRng::new().with_units([0.2]);
    let action = select_action(hc("87s"), Position::Hj, &no_override(), &charts, &mut rng).unwrap();
    assert_eq!(action, PreflopAction::Open);

    let mut rng = ScriptedRng::new().with_units([0.3]);
    let action = select_action(hc("87s"), Position::Hj, &no_override(), &charts, &mut rng).unwrap();
    assert_eq!(action, PreflopAction::Fold);
}

//
// TEST 6 — частота открытия `s` на длинной выборке ≈ 25%
//
#[test]
fn mixed_frequency_converges() {
    let charts = store();
    let mut rng = DeterministicRng::from_seed(2024);
    let trials = 10_000;

    let opens = (0..trials)
        .filter(|_| {
            select_action(hc("87s"), Position::Hj, &no_override(), &charts, &mut rng).unwrap()
                == PreflopAction::Open
        })
        .count();

    let freq = opens as f64 / trials as f64;
    assert!((0.23..=0.27).contains(&freq), "частота {freq}");
}

//
// TEST 7 — особая рука всегда открывается
//
#[test]
fn special_hand_always_opens() {
    let charts = store();

    // Любая масть.
    let any_suit = special("72", false);
    for hand in ["72o", "72s", "27o"] {
        let action =
            select_action(hc(hand), Position::Utg, &any_suit, &charts, &mut ScriptedRng::new())
                .unwrap();
        assert_eq!(action, PreflopAction::Open, "{hand}");
    }

    // Только одномастная: 72o остаётся пасом.
    let suited = special("72", true);
    let action =
        select_action(hc("72s"), Position::Utg, &suited, &charts, &mut ScriptedRng::new()).unwrap();
    assert_eq!(action, PreflopAction::Open);
    let action =
        select_action(hc("72o"), Position::Utg, &suited, &charts, &mut ScriptedRng::new()).unwrap();
    assert_eq!(action, PreflopAction::Fold);

    // Пара совпадает с парой и в режиме suited_only.
    let pair = special("77", true);
    let action =
        select_action(hc("77"), Position::Utg, &pair, &charts, &mut ScriptedRng::new()).unwrap();
    assert_eq!(action, PreflopAction::Open);
}

//
// TEST 8 — при включённой особой руке смешанные коды открываются реже
//
#[test]
fn special_hand_lowers_mix_frequency() {
    let charts = store();

    // suited_only: 12.5%. 72s в hj — `f`, так что правило 25% не срабатывает.
    let suited = special("72", true);
    let mut rng = ScriptedRng::new().with_units([0.2]);
    assert_eq!(
        select_action(hc("87s"), Position::Hj, &suited, &charts, &mut rng).unwrap(),
        PreflopAction::Fold
    );
    let mut rng = ScriptedRng::new().with_units([0.1]);
    assert_eq!(
        select_action(hc("87s"), Position::Hj, &suited, &charts, &mut rng).unwrap(),
        PreflopAction::Open
    );

    // Любая масть: 5%.
    let any_suit = special("72", false);
    let mut rng = ScriptedRng::new().with_units([0.1]);
    assert_eq!(
        select_action(hc("87s"), Position::Hj, &any_suit, &charts, &mut rng).unwrap(),
        PreflopAction::Fold
    );
    let mut rng = ScriptedRng::new().with_units([0.04]);
    assert_eq!(
        select_action(hc("87s"), Position::Hj, &any_suit, &charts, &mut rng).unwrap(),
        PreflopAction::Open
    );
}

//
// TEST 9 — особая рука сама `r`: код `s` открывается с частотой 25%, код `b` — нет
//
#[test]
fn raising_special_hand_keeps_suited_frequency() {
    let charts = store();

    // T9s в hj — `r`, 87s — `s`: 0.2 < 25% → open (при 12.5% был бы fold).
    let t9 = special("T9", true);
    let mut rng = ScriptedRng::new().with_units([0.2]);
    assert_eq!(
        select_action(hc("87s"), Position::Hj, &t9, &charts, &mut rng).unwrap(),
        PreflopAction::Open
    );

    // 22 на btn — `b`: остаётся 12.5%, 0.2 → fold.
    assert_eq!(
        charts.chart(Position::Btn).unwrap().action(hc("22")).unwrap(),
        ActionCode::Borderline
    );
    let a5 = special("A5", true);
    let mut rng = ScriptedRng::new().with_units([0.2]);
    assert_eq!(
        select_action(hc("22"), Position::Btn, &a5, &charts, &mut rng).unwrap(),
        PreflopAction::Fold
    );
}

//
// TEST 10 — ошибки входа
//
#[test]
fn selector_reports_bad_input() {
    let charts = store();
    let mut rng = ScriptedRng::new();

    let err = select_action_str("AKs", "mp", &no_override(), &charts, &mut rng).unwrap_err();
    assert!(matches!(err, RangeError::UnknownPosition(p) if p == "mp"));

    let err = select_action_str("AK", "co", &no_override(), &charts, &mut rng).unwrap_err();
    assert!(matches!(err, RangeError::Parse(ParseError::InvalidHand(_))));

    let err = select_action(hc("AKs"), Position::Co, &special("7", false), &charts, &mut rng)
        .unwrap_err();
    assert!(matches!(err, RangeError::Parse(ParseError::InvalidRankPair(_))));
}

//
// TEST 11 — каталог без части чартов: ошибка только при запросе позиции
//
#[test]
fn missing_chart_is_reported_on_request() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("co.json"), include_str!("../ranges/co.json")).unwrap();

    let charts = RangeChartStore::load_dir(dir.path()).unwrap();
    assert_eq!(charts.positions().collect::<Vec<_>>(), vec![Position::Co]);

    let mut rng = ScriptedRng::new();
    assert_eq!(
        select_action(hc("AKs"), Position::Co, &no_override(), &charts, &mut rng).unwrap(),
        PreflopAction::Open
    );

    // На bb чарта нет: ошибка раньше розыгрыша 15%.
    let err = select_action(hc("AKs"), Position::Bb, &no_override(), &charts, &mut rng).unwrap_err();
    assert!(matches!(err, RangeError::MissingChart(Position::Bb, _)));
    assert_eq!(rng.units_drawn(), 0);
}

//
// TEST 12 — повреждённый чарт
//
#[test]
fn malformed_chart_is_rejected() {
    let err = RangeChart::from_json(Position::Utg, r#"{"AA": "r"}"#).unwrap_err();
    assert!(matches!(
        err,
        RangeError::MalformedChart { position: Position::Utg, .. }
    ));

    let err = RangeChart::from_json(Position::Utg, r#"{"AA": "x"}"#).unwrap_err();
    assert!(matches!(err, RangeError::MalformedChart { .. }));

    let err = RangeChart::from_json(Position::Utg, "not json").unwrap_err();
    assert!(matches!(err, RangeError::MalformedChart { .. }));

    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("utg.json"), r#"{"AA": "r"}"#).unwrap();
    assert!(RangeChartStore::load_dir(dir.path()).is_err());
}

//
// TEST 13 — ключи чарта нормализуются, повтор с другим кодом — ошибка
//
#[test]
fn chart_keys_are_normalized() {
    let mut entries: Vec<(HandClass, ActionCode)> = HandClass::all()
        .into_iter()
        .map(|h| (h, ActionCode::Fold))
        .collect();
    entries.push((hc("KAs"), ActionCode::Fold));
    let chart = RangeChart::from_entries(Position::Lj, entries.clone()).unwrap();
    assert_eq!(chart.action(hc("AKs")).unwrap(), ActionCode::Fold);

    entries.push((hc("KAs"), ActionCode::Raise));
    assert!(RangeChart::from_entries(Position::Lj, entries).is_err());
}

//
// TEST 14 — хранилище из собранных в памяти чартов
//
#[test]
fn store_from_custom_charts() {
    let all_fold = HandClass::all().into_iter().map(|h| (h, ActionCode::Fold));
    let chart = RangeChart::from_entries(Position::Btn, all_fold).unwrap();
    let charts = RangeChartStore::from_charts([chart]);

    let mut rng = ScriptedRng::new();
    assert_eq!(
        select_action(hc("AA"), Position::Btn, &no_override(), &charts, &mut rng).unwrap(),
        PreflopAction::Fold
    );
    assert!(matches!(
        select_action(hc("AA"), Position::Co, &no_override(), &charts, &mut rng),
        Err(RangeError::MissingChart(Position::Co, _))
    ));
}
