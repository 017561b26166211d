//! Discard selection for the automated policy.
//!
//! Every held face gets a keep score; the lowest score is thrown. Lone
//! honours go first since they can only ever become a pair or triplet.

use crate::core::{Suit, Tile};
use crate::hand::{Hand, HandEntry};

/// How much the hand wants to keep `entry`. Higher is better.
#[must_use]
pub fn keep_score(hand: &Hand, entry: HandEntry) -> i32 {
    let tile = entry.tile();
    let count = i32::from(entry.count());
    let mut score = count * 10;

    if !tile.is_honor() {
        let neighbours = [-2i8, -1, 1, 2]
            .into_iter()
            .filter(|&offset| tile.offset(offset).is_some_and(|t| hand.contains(t)))
            .count() as i32;
        score += neighbours * 5;

        if (3..=5).contains(&tile.rank()) {
            score += 5;
        }
    }

    if count == 1 {
        if tile.is_honor() {
            score -= 20;
        } else if tile.is_terminal() {
            score -= 10;
        }
    }

    score
}

/// Pick the tile to throw from a hand.
///
/// Returns `None` only for an empty hand.
#[must_use]
pub fn choose_discard(hand: &Hand) -> Option<Tile> {
    if let Some(lone) = hand.suit_entries(Suit::Honor).iter().find(|e| e.count() == 1) {
        return Some(lone.tile());
    }

    hand.entries()
        .min_by_key(|&e| keep_score(hand, e))
        .map(HandEntry::tile)
        .or_else(|| fallback_discard(hand))
}

/// Strip complete shapes and throw the first leftover of the highest suit.
#[must_use]
pub fn fallback_discard(hand: &Hand) -> Option<Tile> {
    fn first_of_highest(hand: &Hand) -> Option<Tile> {
        Suit::ALL
            .iter()
            .rev()
            .find_map(|&suit| hand.suit_entries(suit).first().map(|e| e.tile()))
    }

    let mut rest = hand.clone();
    let mut choice = first_of_highest(&rest);

    for suit in Suit::NUMERIC {
        rest.strip_runs(suit, true);
    }
    choice = first_of_highest(&rest).or(choice);

    rest.strip_groups(3);
    choice = first_of_highest(&rest).or(choice);

    rest.strip_groups(2);
    first_of_highest(&rest).or(choice)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(notation: &str) -> Hand {
        notation.parse().unwrap()
    }

    fn t(notation: &str) -> Tile {
        hand(notation).tiles()[0]
    }

    #[test]
    fn test_lone_honor_goes_first() {
        assert_eq!(choose_discard(&hand("123m55z6z")), Some(t("6z")));
    }

    #[test]
    fn test_isolated_terminal_beats_middle() {
        // 9p has no neighbours; 5s scores for rank alone.
        assert_eq!(choose_discard(&hand("234m9p5s")), Some(t("9p")));
    }

    #[test]
    fn test_keep_score_components() {
        let h = hand("3455m");
        let five = h.suit_entries(Suit::Wan)[2];
        // count 2, neighbours 3 and 4, middle rank
        assert_eq!(keep_score(&h, five), 20 + 10 + 5);

        let h = hand("1m");
        let one = h.suit_entries(Suit::Wan)[0];
        assert_eq!(keep_score(&h, one), 10 - 10);
    }

    #[test]
    fn test_ties_keep_first() {
        // 1m and 9m score the same; 1m comes first.
        assert_eq!(choose_discard(&hand("19m55z")), Some(t("1m")));
    }

    #[test]
    fn test_empty_hand() {
        assert_eq!(choose_discard(&Hand::new()), None);
        assert_eq!(fallback_discard(&Hand::new()), None);
    }

    #[test]
    fn test_fallback_prefers_leftovers() {
        // Runs and the triplet strip away; 9s is what remains.
        assert_eq!(fallback_discard(&hand("123m555p9s")), Some(t("9s")));
        // Nothing strips: first entry of the highest suit.
        assert_eq!(fallback_discard(&hand("19m7z")), Some(t("7z")));
        // Everything strips: last non-empty snapshot wins.
        assert_eq!(fallback_discard(&hand("123m")), Some(t("1m")));
    }
}
