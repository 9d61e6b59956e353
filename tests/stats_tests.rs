//! Тесты статистики игроков: флаги раздачи, идемпотентная фиксация,
//! JSON-хранилище на диске и скользящие проценты.

use poker_advisor::domain::chips::Chips;
use poker_advisor::domain::hand::Street;
use poker_advisor::domain::snapshot::SeatIndex;
use poker_advisor::stats::{
    ActionKind, HandFlags, HandLog, InMemoryStatsStore, JsonDirStatsStore, LoggedAction,
    PlayerStatRecord, SessionStatsTracker, StatsError, StatsStore,
};

/// Утилита: действие в журнале.
fn act(seat: SeatIndex, player: &str, kind: ActionKind, amount: u64, street: Street) -> LoggedAction {
    LoggedAction {
        seat,
        player: player.to_string(),
        kind,
        amount: Chips(amount),
        street,
        timestamp: 1_000,
    }
}

/// Утилита: журнал раздачи с тремя игроками.
fn hand_log(id: &str, actions: Vec<LoggedAction>, reached_river: bool) -> HandLog {
    HandLog {
        hand_id: id.to_string(),
        started_at: 1_000,
        players: vec!["hero".to_string(), "alice".to_string(), "bob".to_string()],
        actions,
        reached_river,
    }
}

/// hero открывает, alice делает 3-бет, bob и hero пасуют.
fn three_bet_pot(id: &str) -> HandLog {
    use ActionKind::*;
    use Street::Preflop;
    hand_log(
        id,
        vec![
            act(2, "alice", Post, 5, Preflop),
            act(3, "bob", Post, 10, Preflop),
            act(1, "hero", Raise, 30, Preflop),
            act(2, "alice", Raise, 90, Preflop),
            act(3, "bob", Fold, 10, Preflop),
            act(1, "hero", Fold, 30, Preflop),
        ],
        false,
    )
}

/// Все пасуют до bb.
fn walk(id: &str) -> HandLog {
    use ActionKind::*;
    use Street::Preflop;
    hand_log(
        id,
        vec![
            act(2, "alice", Post, 5, Preflop),
            act(3, "bob", Post, 10, Preflop),
            act(1, "hero", Fold, 0, Preflop),
            act(2, "alice", Fold, 5, Preflop),
        ],
        false,
    )
}

//
// TEST 1 — 3-бет и фолд на 3-бет
//
#[test]
fn three_bet_and_fold_to_three_bet() {
    let log = three_bet_pot("s-1");

    let hero = HandFlags::evaluate(&log, "hero");
    assert!(hero.vpip && hero.pfr && hero.fold_to_three_bet);
    assert!(!hero.three_bet && !hero.went_to_showdown);

    let alice = HandFlags::evaluate(&log, "alice");
    assert!(alice.vpip && alice.pfr && alice.three_bet);
    assert!(!alice.fold_to_three_bet);

    // Блайнд — не добровольное вложение.
    let bob = HandFlags::evaluate(&log, "bob");
    assert!(!bob.vpip && !bob.fold_to_three_bet);
}

//
// TEST 2 — колл 3-бета, c-bet на флопе, шоудаун
//
#[test]
fn call_three_bet_and_reach_showdown() {
    use ActionKind::*;
    use Street::*;
    let log = hand_log(
        "s-2",
        vec![
            act(2, "alice", Post, 5, Preflop),
            act(3, "bob", Post, 10, Preflop),
            act(1, "hero", Raise, 30, Preflop),
            act(2, "alice", Raise, 90, Preflop),
            act(3, "bob", Fold, 10, Preflop),
            act(1, "hero", Call, 90, Preflop),
            act(2, "alice", Bet, 100, Flop),
            act(1, "hero", Call, 100, Flop),
        ],
        true,
    );

    let hero = HandFlags::evaluate(&log, "hero");
    assert!(hero.vpip && hero.pfr && hero.went_to_showdown);
    assert!(!hero.fold_to_three_bet && !hero.cbet_flop);

    let alice = HandFlags::evaluate(&log, "alice");
    assert!(alice.three_bet && alice.cbet_flop && alice.went_to_showdown);

    let bob = HandFlags::evaluate(&log, "bob");
    assert!(!bob.went_to_showdown);

    // Игрок не из журнала — все флаги сброшены.
    assert_eq!(HandFlags::evaluate(&log, "carol"), HandFlags::default());
}

//
// TEST 3 — повторная фиксация той же раздачи ничего не меняет
//
#[test]
fn commit_is_idempotent() {
    let mut tracker = SessionStatsTracker::new(InMemoryStatsStore::new());
    let log = three_bet_pot("s-1");

    let first = tracker.commit_hand(&log).unwrap();
    assert!(!first.duplicate);
    assert_eq!(first.updated, vec!["hero", "alice", "bob"]);

    let second = tracker.commit_hand(&log).unwrap();
    assert!(second.duplicate);
    assert!(second.updated.is_empty());

    let record = tracker.player_record("hero").unwrap().unwrap();
    assert_eq!(record.hands.len(), 1);
    assert_eq!(record.stats.hands, 1);

    // Новая сессия поверх того же хранилища: запись уже содержит раздачу.
    let mut next_session = SessionStatsTracker::new(tracker.into_store());
    let third = next_session.commit_hand(&log).unwrap();
    assert!(third.updated.is_empty());
    assert_eq!(
        next_session.player_record("hero").unwrap().unwrap().hands.len(),
        1
    );
}

//
// TEST 4 — скользящие проценты по всей истории
//
#[test]
fn rolling_percentages_over_history() {
    let mut tracker = SessionStatsTracker::new(InMemoryStatsStore::new());
    tracker.commit_hand(&three_bet_pot("s-1")).unwrap();
    tracker.commit_hand(&walk("s-2")).unwrap();
    tracker.commit_hand(&walk("s-3")).unwrap();
    tracker.commit_hand(&walk("s-4")).unwrap();

    let hero = tracker.player_stats("hero").unwrap().unwrap();
    assert_eq!(hero.hands, 4);
    assert_eq!(hero.vpip, 25.0);
    assert_eq!(hero.pfr, 25.0);
    assert_eq!(hero.fold_to_three_bet, 25.0);
    assert_eq!(hero.three_bet, 0.0);
    assert_eq!(hero.went_to_showdown, 0.0);

    let alice = tracker.player_stats("alice").unwrap().unwrap();
    assert_eq!(alice.three_bet, 25.0);

    assert!(tracker.player_stats("carol").unwrap().is_none());
}

//
// TEST 5 — JSON-каталог: запись переживает перезапуск
//
#[test]
fn json_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = JsonDirStatsStore::open(dir.path().join("player_data")).unwrap();
        let mut tracker = SessionStatsTracker::new(store);
        tracker.commit_hand(&three_bet_pot("s-1")).unwrap();
        tracker.commit_hand(&walk("s-2")).unwrap();
    }

    let store = JsonDirStatsStore::open(dir.path().join("player_data")).unwrap();
    assert!(store.path_for("hero").exists());
    assert_eq!(store.names().unwrap(), vec!["alice", "bob", "hero"]);

    let hero = store.load("hero").unwrap().unwrap();
    assert_eq!(hero.hands.len(), 2);
    assert_eq!(hero.stats.vpip, 50.0);
    assert_eq!(hero.hands[0].hand_id, "s-1");
    assert_eq!(hero.hands[0].actions.len(), 2);
    assert_eq!(hero.hands[0].actions[0].action_type, ActionKind::Raise);

    assert!(store.load("nobody").unwrap().is_none());
}

//
// TEST 6 — имена с недопустимыми символами и пустое имя
//
#[test]
fn player_names_are_encoded() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonDirStatsStore::open(dir.path()).unwrap();

    let record = PlayerStatRecord::new("Bob Smith/2");
    store.save(&record).unwrap();
    assert!(dir.path().join("Bob%20Smith%2F2.json").exists());
    assert_eq!(store.names().unwrap(), vec!["Bob Smith/2"]);
    assert_eq!(store.load("Bob Smith/2").unwrap().unwrap(), record);

    let err = store.save(&PlayerStatRecord::new("  ")).unwrap_err();
    assert!(matches!(err, StatsError::EmptyPlayerName));
}

//
// TEST 7 — повреждённый файл игрока — ошибка, а не пустая запись
//
#[test]
fn corrupted_record_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("hero.json"), "{ not json").unwrap();

    let store = JsonDirStatsStore::open(dir.path()).unwrap();
    let err = store.load("hero").unwrap_err();
    assert!(matches!(err, StatsError::Json { .. }));
}

//
// TEST 8 — запись: повтор hand_id не добавляется
//
#[test]
fn record_rejects_duplicate_hand() {
    use poker_advisor::stats::HandRecord;

    let log = walk("s-9");
    let mut record = PlayerStatRecord::new("hero");
    assert!(record.add_hand(HandRecord::from_log(&log, "hero")));
    assert!(!record.add_hand(HandRecord::from_log(&log, "hero")));
    assert!(record.contains_hand("s-9"));
    assert_eq!(record.stats.hands, 1);
    assert_eq!(record.stats.vpip, 0.0);
}

/// Раздача на двоих: `opener` открывает, `caller` пасует.
fn heads_up(id: &str, opener: &str, caller: &str) -> HandLog {
    use ActionKind::*;
    use Street::Preflop;
    HandLog {
        hand_id: id.to_string(),
        started_at: 1_000,
        players: vec![opener.to_string(), caller.to_string()],
        actions: vec![
            act(1, opener, Raise, 30, Preflop),
            act(2, caller, Fold, 10, Preflop),
        ],
        reached_river: false,
    }
}

//
// TEST 9 — похожие имена («Bob Smith» и «Bob_Smith») не сливаются в одну запись
//
#[test]
fn similar_names_keep_separate_records() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDirStatsStore::open(dir.path()).unwrap();
    let mut tracker = SessionStatsTracker::new(store);

    tracker.commit_hand(&heads_up("s-1", "Bob Smith", "a/b")).unwrap();
    tracker.commit_hand(&heads_up("s-2", "Bob_Smith", "a?b")).unwrap();

    let store = tracker.into_store();
    assert_eq!(
        store.names().unwrap(),
        vec!["Bob Smith", "Bob_Smith", "a/b", "a?b"]
    );

    for (name, hand_id) in [
        ("Bob Smith", "s-1"),
        ("Bob_Smith", "s-2"),
        ("a/b", "s-1"),
        ("a?b", "s-2"),
    ] {
        let record = store.load(name).unwrap().unwrap();
        assert_eq!(record.name, name);
        assert_eq!(record.hands.len(), 1, "{name}");
        assert_eq!(record.hands[0].hand_id, hand_id);
    }
    assert_eq!(store.load("Bob Smith").unwrap().unwrap().stats.pfr, 100.0);
    assert_eq!(store.load("a?b").unwrap().unwrap().stats.pfr, 0.0);
}

//
// TEST 10 — файл с чужой записью не выдаётся за запись игрока
//
#[test]
fn foreign_record_in_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonDirStatsStore::open(dir.path()).unwrap();
    store.save(&PlayerStatRecord::new("alice")).unwrap();
    std::fs::copy(store.path_for("alice"), store.path_for("bob")).unwrap();

    let err = store.load("bob").unwrap_err();
    assert!(matches!(err, StatsError::NameMismatch { .. }));
    assert!(store.load("alice").unwrap().is_some());
}
