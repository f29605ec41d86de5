//! Precomputed category tables.
//!
//! Every distinct hand is reduced to a kicker key: its distinct ranks,
//! ordered by multiplicity then rank (both descending), folded base 15 with
//! the most significant rank first. Base 15 exceeds the largest rank (14), so
//! a larger key is always the stronger hand within a category.
//!
//! Each category keeps its keys sorted strongest first. A hand's rank is its
//! band's first value plus the position of its key. The tables are built once
//! per process and are read-only afterwards.

use std::sync::OnceLock;

use super::rank::{HandCategory, HandRank, FIVE_CARD_BANDS, FIVE_CARD_WORST, THREE_CARD_BANDS};

const KEY_BASE: u32 = 15;

/// Fold ranks into a key of `width` positions, padding with zeros.
pub(crate) fn kicker_key(ranks: &[u8], width: usize) -> u32 {
    (0..width).fold(0, |key, i| key * KEY_BASE + u32::from(ranks.get(i).copied().unwrap_or(0)))
}

/// Distinct ranks ordered by (count desc, rank desc), plus the count profile.
///
/// `ranks` holds rank values in any order.
pub(crate) fn group_ranks(ranks: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let mut histogram = [0u8; 15];
    for &r in ranks {
        histogram[r as usize] += 1;
    }
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .rev()
        .filter(|&r| histogram[r as usize] > 0)
        .map(|r| (histogram[r as usize], r))
        .collect();
    // Stable: equal counts keep descending rank order.
    groups.sort_by(|a, b| b.0.cmp(&a.0));
    groups.into_iter().map(|(count, rank)| (rank, count)).unzip()
}

/// High card of a straight, if the five ranks form one. The wheel plays as 5.
pub(crate) fn straight_high(ordered: &[u8]) -> Option<u8> {
    if ordered.len() != 5 {
        return None;
    }
    // `ordered` is distinct and descending here.
    if ordered == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    (ordered[0] - ordered[4] == 4).then_some(ordered[0])
}

/// Category and kicker key of a five-card hand.
pub(crate) fn classify_five(ranks: &[u8; 5], flush: bool) -> (HandCategory, u32) {
    let (ordered, counts) = group_ranks(ranks);
    let straight = if counts.len() == 5 { straight_high(&ordered) } else { None };

    let category = match (flush, straight, counts.as_slice()) {
        (true, Some(14), _) => HandCategory::RoyalFlush,
        (true, Some(_), _) => HandCategory::StraightFlush,
        (_, _, [4, ..]) => HandCategory::FourOfAKind,
        (_, _, [3, 2]) => HandCategory::FullHouse,
        (true, None, _) => HandCategory::Flush,
        (false, Some(_), _) => HandCategory::Straight,
        (_, _, [3, ..]) => HandCategory::ThreeOfAKind,
        (_, _, [2, 2, ..]) => HandCategory::TwoPair,
        (_, _, [2, ..]) => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    let key = match straight {
        Some(high) if matches!(category, HandCategory::RoyalFlush | HandCategory::StraightFlush | HandCategory::Straight) => {
            u32::from(high)
        }
        _ => kicker_key(&ordered, category.key_width()),
    };
    (category, key)
}

/// Category and key of a three-card hand.
///
/// The key uses the five-card width of the same category so it can be
/// placed among five-card keys.
pub(crate) fn classify_three(ranks: &[u8; 3]) -> (HandCategory, u32) {
    let (ordered, counts) = group_ranks(ranks);
    let category = match counts.as_slice() {
        [3] => HandCategory::ThreeOfAKind,
        [2, 1] => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };
    (category, kicker_key(&ordered, category.key_width()))
}

/// Keys of one category, strongest first.
#[derive(Debug, Default)]
struct CategoryTable {
    first: u16,
    keys: Vec<u32>,
}

impl CategoryTable {
    fn finish(first: u16, mut keys: Vec<u32>) -> Self {
        keys.sort_unstable_by(|a, b| b.cmp(a));
        keys.dedup();
        Self { first, keys }
    }

    fn rank_of(&self, key: u32) -> Option<u16> {
        self.keys
            .binary_search_by(|probe| key.cmp(probe))
            .ok()
            .map(|pos| self.first + pos as u16)
    }

    /// Rank of the first hand whose key is below `key`.
    fn insertion(&self, key: u32) -> u32 {
        u32::from(self.first) + self.keys.partition_point(|&k| k > key) as u32
    }

    fn len(&self) -> usize {
        self.keys.len()
    }
}

/// All lookup tables for both hand sizes.
#[derive(Debug)]
pub(crate) struct RankTables {
    five: Vec<CategoryTable>,
    three: Vec<CategoryTable>,
    /// Shared-scale insertion point per three-card rank, offset from 7463.
    front_insertion: Vec<u32>,
}

static TABLES: OnceLock<RankTables> = OnceLock::new();

/// Process-wide tables, built on first use.
pub(crate) fn get() -> &'static RankTables {
    TABLES.get_or_init(RankTables::build)
}

impl RankTables {
    fn build() -> Self {
        let mut five_keys: Vec<Vec<u32>> = vec![Vec::new(); HandCategory::ALL.len()];
        let mut three_keys: Vec<Vec<u32>> = vec![Vec::new(); THREE_CARD_BANDS.len()];

        // Every rank multiset of size five with at most four of a rank.
        for a in 2..=14u8 {
            for b in a..=14 {
                for c in b..=14 {
                    for d in c..=14 {
                        for e in d..=14 {
                            if a == e {
                                continue;
                            }
                            let ranks = [a, b, c, d, e];
                            let (category, key) = classify_five(&ranks, false);
                            five_keys[category.index()].push(key);

                            let distinct = a < b && b < c && c < d && d < e;
                            if distinct {
                                let (category, key) = classify_five(&ranks, true);
                                five_keys[category.index()].push(key);
                            }
                        }
                    }
                }
            }
        }

        for a in 2..=14u8 {
            for b in a..=14 {
                for c in b..=14 {
                    let (category, key) = classify_three(&[a, b, c]);
                    three_keys[three_band_index(category)].push(key);
                }
            }
        }

        let five: Vec<CategoryTable> = five_keys
            .into_iter()
            .zip(FIVE_CARD_BANDS)
            .map(|(keys, band)| CategoryTable::finish(band.first, keys))
            .collect();
        let three: Vec<CategoryTable> = three_keys
            .into_iter()
            .zip(THREE_CARD_BANDS)
            .map(|(keys, band)| CategoryTable::finish(band.first, keys))
            .collect();

        for (table, band) in five.iter().zip(FIVE_CARD_BANDS).chain(three.iter().zip(THREE_CARD_BANDS)) {
            debug_assert_eq!(table.len(), band.len as usize, "{} band size", band.category);
        }

        let mut front_insertion = Vec::with_capacity(three.iter().map(CategoryTable::len).sum());
        for (table, band) in three.iter().zip(THREE_CARD_BANDS) {
            let five_table = &five[band.category.index()];
            front_insertion.extend(table.keys.iter().map(|&key| five_table.insertion(key)));
        }

        Self {
            five,
            three,
            front_insertion,
        }
    }

    /// Rank of a classified five-card hand.
    pub(crate) fn five_card_rank(&self, category: HandCategory, key: u32) -> Option<HandRank> {
        self.five[category.index()].rank_of(key).and_then(HandRank::new)
    }

    /// Rank of a classified three-card hand.
    pub(crate) fn three_card_rank(&self, category: HandCategory, key: u32) -> Option<HandRank> {
        self.three[three_band_index(category)].rank_of(key).and_then(HandRank::new)
    }

    pub(crate) fn front_insertion(&self, rank: HandRank) -> u32 {
        let offset = usize::from(rank.value() - FIVE_CARD_WORST - 1);
        self.front_insertion.get(offset).copied().unwrap_or(u32::from(FIVE_CARD_WORST) + 1)
    }

    /// Number of distinct hands per five-card category.
    pub(crate) fn five_card_counts(&self) -> Vec<usize> {
        self.five.iter().map(CategoryTable::len).collect()
    }

    /// Number of distinct hands per three-card category.
    pub(crate) fn three_card_counts(&self) -> Vec<usize> {
        self.three.iter().map(CategoryTable::len).collect()
    }
}

fn three_band_index(category: HandCategory) -> usize {
    match category {
        HandCategory::ThreeOfAKind => 0,
        HandCategory::OnePair => 1,
        _ => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_sizes_match_distinct_hands() {
        let tables = get();
        let expected: Vec<usize> = FIVE_CARD_BANDS.iter().map(|b| b.len as usize).collect();
        assert_eq!(tables.five_card_counts(), expected);
        assert_eq!(tables.five_card_counts(), vec![1, 9, 156, 156, 1277, 10, 858, 858, 2860, 1277]);
        assert_eq!(tables.three_card_counts(), vec![13, 156, 286]);
    }

    #[test]
    fn test_group_ranks_orders_by_count_then_rank() {
        let (ordered, counts) = group_ranks(&[5, 13, 5, 13, 9]);
        assert_eq!(ordered, vec![13, 5, 9]);
        assert_eq!(counts, vec![2, 2, 1]);

        let (ordered, counts) = group_ranks(&[2, 14, 2, 2, 14]);
        assert_eq!(ordered, vec![2, 14]);
        assert_eq!(counts, vec![3, 2]);
    }

    #[test]
    fn test_kicker_key_weights_leading_rank_highest() {
        // Pair of kings with weak kickers beats pair of queens with an ace.
        let kings = kicker_key(&[13, 4, 3, 2], 4);
        let queens = kicker_key(&[12, 14, 11, 10], 4);
        assert!(kings > queens);
        assert_eq!(kicker_key(&[14], 3), 14 * 15 * 15);
    }

    #[test]
    fn test_wheel_is_five_high() {
        assert_eq!(classify_five(&[14, 2, 3, 4, 5], false), (HandCategory::Straight, 5));
        assert_eq!(classify_five(&[10, 11, 12, 13, 14], true), (HandCategory::RoyalFlush, 14));
        assert_eq!(classify_five(&[2, 3, 4, 5, 14], true), (HandCategory::StraightFlush, 5));
    }

    #[test]
    fn test_three_card_categories() {
        assert_eq!(classify_three(&[9, 9, 9]).0, HandCategory::ThreeOfAKind);
        assert_eq!(classify_three(&[9, 4, 9]).0, HandCategory::OnePair);
        assert_eq!(classify_three(&[2, 3, 4]).0, HandCategory::HighCard);
    }

    #[test]
    fn test_front_insertion_stays_in_category_or_next_band() {
        let tables = get();
        for (i, band) in THREE_CARD_BANDS.iter().enumerate() {
            for value in band.first..=band.last() {
                let rank = HandRank::new(value).unwrap();
                let insertion = tables.front_insertion(rank);
                let five_band = FIVE_CARD_BANDS[band.category.index()];
                assert!(
                    insertion >= u32::from(five_band.first) && insertion <= u32::from(five_band.last()) + 1,
                    "three-card band {i} rank {value} inserted at {insertion}"
                );
            }
        }
    }
}
