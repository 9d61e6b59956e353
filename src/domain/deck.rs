use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};

/// Колода карт. В домене — просто упорядоченный список карт.
/// Случайные выборки делает eval (через RNG из infra), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода, отсортированная по рангу, затем по масти:
    /// 2c 2d 2h 2s 3c ... As.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(52);
        for rank in Rank::ALL {
            for suit in Suit::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    /// Колода без уже известных карт (рука героя, злодея, борд).
    pub fn without(dead: &[Card]) -> Self {
        let mut deck = Self::standard_52();
        deck.remove_cards(dead);
        deck
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    /// Убрать из колоды уже использованные карты.
    pub fn remove_cards(&mut self, to_remove: &[Card]) {
        self.cards.retain(|c| !to_remove.contains(c));
    }

    /// Все двухкарточные комбинации из колоды в порядке перебора (i < j).
    pub fn two_card_combinations(&self) -> impl Iterator<Item = [Card; 2]> + '_ {
        let n = self.cards.len();
        (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| [self.cards[i], self.cards[j]]))
    }
}
