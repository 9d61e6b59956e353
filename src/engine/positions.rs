use std::collections::BTreeMap;

use crate::domain::position::Position;
use crate::domain::snapshot::{SeatIndex, SeatSnapshot, TableSnapshot};

/// Места по кругу, начиная со следующего после `start` (сам `start` — последним).
///
/// `seats` должны быть отсортированы. Если `start` за столом нет — пустой список.
pub fn seats_after(seats: &[SeatIndex], start: SeatIndex) -> Vec<SeatIndex> {
    let Some(idx) = seats.iter().position(|s| *s == start) else {
        return Vec::new();
    };
    let n = seats.len();
    (1..=n).map(|i| seats[(idx + i) % n]).collect()
}

/// Разложить места по каноническим позициям.
///
/// - один на один: дилер = sb, второй = bb;
/// - иначе дилер = btn, следующие два — sb и bb, остальные получают
///   последние N позиций из `[utg, utg+1, utg+2, lj, hj, co]`;
///   места сверх девяти тоже считаются utg.
pub fn assign_positions(seats: &[SeatIndex], dealer: SeatIndex) -> BTreeMap<SeatIndex, Position> {
    let mut sorted = seats.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let order = seats_after(&sorted, dealer);
    let mut out = BTreeMap::new();
    let Some((&button, others)) = order.split_last() else {
        return out;
    };

    match others {
        [] => {
            out.insert(button, Position::Btn);
        }
        [other] => {
            out.insert(button, Position::Sb);
            out.insert(*other, Position::Bb);
        }
        [sb, bb, rest @ ..] => {
            out.insert(button, Position::Btn);
            out.insert(*sb, Position::Sb);
            out.insert(*bb, Position::Bb);

            let table = Position::NON_BLIND_ORDER;
            let extra = rest.len().saturating_sub(table.len());
            let tail = &table[table.len() - (rest.len() - extra)..];
            let labels = std::iter::repeat(Position::Utg).take(extra).chain(tail.iter().copied());
            for (seat, position) in rest.iter().zip(labels) {
                out.insert(*seat, position);
            }
        }
    }

    out
}

/// Позиции всех мест снимка (пусто, пока нет кнопки).
pub fn snapshot_positions(snapshot: &TableSnapshot) -> BTreeMap<SeatIndex, Position> {
    match snapshot.dealer_seat() {
        Some(dealer) => assign_positions(&snapshot.seat_order(), dealer),
        None => BTreeMap::new(),
    }
}

/// Позиция конкретного места.
pub fn position_of(snapshot: &TableSnapshot, seat: SeatIndex) -> Option<Position> {
    snapshot_positions(snapshot).get(&seat).copied()
}

/// Активный злодей: не герой, не сбросил, с наибольшей ставкой на улице.
/// При равенстве — место с меньшим номером.
pub fn active_villain(snapshot: &TableSnapshot) -> Option<&SeatSnapshot> {
    snapshot
        .active_villains()
        .fold(None, |best: Option<&SeatSnapshot>, seat| match best {
            Some(b) if b.committed >= seat.committed => Some(b),
            _ => Some(seat),
        })
}

/// Герой в позиции против активного злодея: на постфлопе он ходит позже.
///
/// Кнопка ходит последней. Без героя, злодея или кнопки — `false`.
pub fn hero_in_position(snapshot: &TableSnapshot) -> bool {
    let (Some(dealer), Some(hero), Some(villain)) = (
        snapshot.dealer_seat(),
        snapshot.hero(),
        active_villain(snapshot),
    ) else {
        return false;
    };

    let order = seats_after(&snapshot.seat_order(), dealer);
    let offset = |seat: SeatIndex| order.iter().position(|s| *s == seat);
    match (offset(hero.seat), offset(villain.seat)) {
        (Some(h), Some(v)) => h > v,
        _ => false,
    }
}
