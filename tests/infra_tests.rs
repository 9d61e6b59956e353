//! Тесты инфраструктуры: RNG-реализации и загрузка конфигурации.
//!
//! - DeterministicRng воспроизводим по seed;
//! - ScriptedRng отдаёт заданные значения и считает обращения;
//! - ConfiguredRng выбирается по наличию seed;
//! - AdvisorConfig читается из JSON с умолчаниями.

use std::fs;

use poker_advisor::engine::{EngineError, RandomSource};
use poker_advisor::eval::DEFAULT_EQUITY_SAMPLES;
use poker_advisor::infra::{AdvisorConfig, ConfiguredRng, DeterministicRng, ScriptedRng};

//
// TEST 1 — одинаковый seed → одинаковые выборки
//
#[test]
fn deterministic_rng_is_reproducible() {
    let mut r1 = DeterministicRng::from_seed(123);
    let mut r2 = DeterministicRng::from_seed(123);

    for _ in 0..100 {
        assert_eq!(r1.next_unit(), r2.next_unit());
        assert_eq!(r1.next_index(52), r2.next_index(52));
        assert_eq!(r1.next_gaussian(3.0, 0.5), r2.next_gaussian(3.0, 0.5));
    }
}

//
// TEST 2 — разные seed → разные последовательности индексов
//
#[test]
fn different_seeds_differ() {
    let draw = |seed: u64| -> Vec<usize> {
        let mut rng = DeterministicRng::from_seed(seed);
        (0..20).map(|_| rng.next_index(52)).collect()
    };
    assert_eq!(draw(111), draw(111));
    assert_ne!(draw(111), draw(222));
}

//
// TEST 3 — диапазоны значений
//
#[test]
fn deterministic_rng_ranges() {
    let mut rng = DeterministicRng::from_seed(5);
    for _ in 0..1_000 {
        let u = rng.next_unit();
        assert!((0.0..1.0).contains(&u));
        assert!(rng.next_index(7) < 7);
    }
    // Вырожденное распределение — ровно среднее.
    assert_eq!(rng.next_gaussian(2.5, 0.0), 2.5);
}

//
// TEST 4 — ScriptedRng: очередь, запасное значение, счётчик
//
#[test]
fn scripted_rng_follows_script() {
    let mut rng = ScriptedRng::new().with_units([0.1, 0.2]).with_fallback(0.75);
    assert_eq!(rng.next_unit(), 0.1);
    assert_eq!(rng.next_unit(), 0.2);
    assert_eq!(rng.next_unit(), 0.75);
    assert_eq!(rng.units_drawn(), 3);

    assert!(rng.chance(0.8));
    assert!(!rng.chance(0.7));

    // 0.75 × 4 = 3
    assert_eq!(rng.next_index(4), 3);

    let mut rng = ScriptedRng::new().with_gaussians([9.0]);
    assert_eq!(rng.next_gaussian(1.0, 1.0), 9.0);
    assert_eq!(rng.next_gaussian(1.0, 1.0), 1.0);

    // Постоянное значение — постоянный индекс.
    let mut rng = ScriptedRng::constant(0.35);
    assert_eq!(rng.next_index(10), 3);
    assert_eq!(rng.next_index(10), 3);
}

//
// TEST 5 — ConfiguredRng: seed → детерминированный
//
#[test]
fn configured_rng_uses_seed() {
    let mut a = ConfiguredRng::from_seed(Some(9));
    let mut b = ConfiguredRng::from_seed(Some(9));
    assert!(matches!(a, ConfiguredRng::Seeded(_)));
    assert_eq!(a.next_unit(), b.next_unit());

    let mut system = ConfiguredRng::from_seed(None);
    assert!(matches!(system, ConfiguredRng::System(_)));
    assert!((0.0..1.0).contains(&system.next_unit()));
}

//
// TEST 6 — конфигурация: умолчания и частичный документ
//
#[test]
fn config_defaults_and_partial_json() {
    let defaults = AdvisorConfig::default();
    assert_eq!(defaults.equity_samples, DEFAULT_EQUITY_SAMPLES);
    assert_eq!(defaults.stats_dir.to_str(), Some("player_data"));
    assert!(defaults.accepts_game_type(None));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("advisor.json");
    fs::write(
        &path,
        r#"{"seed": 42, "expected_game_type": "NLH", "equity_samples": 500}"#,
    )
    .unwrap();

    let config = AdvisorConfig::load(&path).unwrap();
    assert_eq!(config.seed, Some(42));
    assert_eq!(config.equity_samples, 500);
    assert!(config.ranges_dir.is_none());
    assert!(config.accepts_game_type(Some(" nlh ")));
    assert!(!config.accepts_game_type(Some("PLO")));
    assert!(!config.accepts_game_type(None));
}

//
// TEST 7 — ошибки конфигурации
//
#[test]
fn config_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = AdvisorConfig::load(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(missing, EngineError::Config { .. }));

    let zero = dir.path().join("zero.json");
    fs::write(&zero, r#"{"equity_samples": 0}"#).unwrap();
    assert!(matches!(
        AdvisorConfig::load(&zero).unwrap_err(),
        EngineError::Config { .. }
    ));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{").unwrap();
    assert!(AdvisorConfig::load(&broken).is_err());
}
