use crate::domain::card::{Card, Rank};
use crate::domain::hand::HandRank;

use super::hand_rank::HandCategory;
use super::lookup_tables::{detect_straight, rank_to_bit, ranks_desc, RankMask};

/// Главная функция: вычислить лучшую 5-карточную руку из hole + board.
///
/// Ожидается от 5 до 7 карт суммарно (проверяют вызывающие).
/// Оценка идёт напрямую по счётчикам рангов/мастей, без перебора 21 комбинации.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> HandRank {
    debug_assert!(
        (5..=7).contains(&(hole.len() + board.len())),
        "evaluate_best_hand ожидает от 5 до 7 карт"
    );
    evaluate_cards(hole.iter().chain(board.iter()))
}

/// Оценка произвольного набора из 5–7 карт.
pub fn evaluate_cards<'a>(cards: impl Iterator<Item = &'a Card>) -> HandRank {
    let mut rank_counts = [0u8; 15]; // индексы 2..=14
    let mut suit_masks: [RankMask; 4] = [0; 4];
    let mut rank_mask: RankMask = 0;

    for card in cards {
        rank_counts[card.rank as usize] += 1;
        let bit = rank_to_bit(card.rank);
        suit_masks[card.suit.index()] |= bit;
        rank_mask |= bit;
    }

    // Флеш (и стрит-флеш) — по маске одной масти.
    let flush_mask = suit_masks
        .iter()
        .copied()
        .find(|m| m.count_ones() >= 5);

    if let Some(fm) = flush_mask {
        if let Some(high) = detect_straight(fm) {
            return HandRank::from_category_and_ranks(HandCategory::StraightFlush, &[high]);
        }
    }

    // Группы одинаковых рангов, от старшего ранга к младшему.
    let mut quads: Option<Rank> = None;
    let mut trips: [Option<Rank>; 2] = [None; 2];
    let mut pairs: [Option<Rank>; 3] = [None; 3];
    for rank in Rank::ALL.into_iter().rev() {
        match rank_counts[rank as usize] {
            4 => quads = quads.or(Some(rank)),
            3 => push_first_free(&mut trips, rank),
            2 => push_first_free(&mut pairs, rank),
            _ => {}
        }
    }

    if let Some(q) = quads {
        let kicker = top_ranks_excluding(rank_mask, &[q], 1);
        return HandRank::from_category_and_ranks(
            HandCategory::FourOfAKind,
            &[&[q][..], &kicker[..]].concat(),
        );
    }

    if let Some(t) = trips[0] {
        // Вторая тройка тоже годится как пара для фулл-хауса.
        let pair = match (trips[1], pairs[0]) {
            (Some(t2), Some(p)) => Some(t2.max(p)),
            (Some(t2), None) => Some(t2),
            (None, p) => p,
        };
        if let Some(p) = pair {
            return HandRank::from_category_and_ranks(HandCategory::FullHouse, &[t, p]);
        }
    }

    if let Some(fm) = flush_mask {
        let top: Vec<Rank> = ranks_desc(fm).take(5).collect();
        return HandRank::from_category_and_ranks(HandCategory::Flush, &top);
    }

    if let Some(high) = detect_straight(rank_mask) {
        return HandRank::from_category_and_ranks(HandCategory::Straight, &[high]);
    }

    if let Some(t) = trips[0] {
        let kickers = top_ranks_excluding(rank_mask, &[t], 2);
        return HandRank::from_category_and_ranks(
            HandCategory::ThreeOfAKind,
            &[&[t][..], &kickers[..]].concat(),
        );
    }

    if let (Some(p1), Some(p2)) = (pairs[0], pairs[1]) {
        let kicker = top_ranks_excluding(rank_mask, &[p1, p2], 1);
        return HandRank::from_category_and_ranks(
            HandCategory::TwoPair,
            &[&[p1, p2][..], &kicker[..]].concat(),
        );
    }

    if let Some(p) = pairs[0] {
        let kickers = top_ranks_excluding(rank_mask, &[p], 3);
        return HandRank::from_category_and_ranks(
            HandCategory::OnePair,
            &[&[p][..], &kickers[..]].concat(),
        );
    }

    let top: Vec<Rank> = ranks_desc(rank_mask).take(5).collect();
    HandRank::from_category_and_ranks(HandCategory::HighCard, &top)
}

fn push_first_free<const N: usize>(slots: &mut [Option<Rank>; N], rank: Rank) {
    if let Some(slot) = slots.iter_mut().find(|s| s.is_none()) {
        *slot = Some(rank);
    }
}

/// Старшие `n` рангов маски, кроме уже занятых в комбинации.
fn top_ranks_excluding(mask: RankMask, used: &[Rank], n: usize) -> Vec<Rank> {
    ranks_desc(mask)
        .filter(|r| !used.contains(r))
        .take(n)
        .collect()
}
