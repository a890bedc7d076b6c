/// Number of worst results excluded from the net total.
///
/// The same schedule applies to races within a round and to rounds within a
/// series: none below 4, one from 4, two from 8, then one more for every 8
/// after that.
pub fn discard_count(n: usize) -> usize {
    if n < 4 {
        0
    } else if n < 8 {
        1
    } else {
        2 + (n - 8) / 8
    }
}

/// Pick which scores to discard.
///
/// Returns a mask with `discard_count(scores.len())` entries set, choosing the
/// highest scores. When scores tie at the cutoff the earlier index is
/// discarded first.
pub fn select_discards(scores: &[u32]) -> Vec<bool> {
    let count = discard_count(scores.len());
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].cmp(&scores[a]).then(a.cmp(&b)));

    let mut mask = vec![false; scores.len()];
    for &idx in order.iter().take(count) {
        mask[idx] = true;
    }
    mask
}

/// Sum of the scores flagged in `mask`.
pub fn discarded_sum(scores: &[u32], mask: &[bool]) -> u32 {
    scores
        .iter()
        .zip(mask)
        .filter(|(_, &discarded)| discarded)
        .fold(0u32, |acc, (score, _)| acc.saturating_add(*score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discard_count_schedule() {
        for n in 0..=3 {
            assert_eq!(discard_count(n), 0, "n={}", n);
        }
        for n in 4..=7 {
            assert_eq!(discard_count(n), 1, "n={}", n);
        }
        for n in 8..=15 {
            assert_eq!(discard_count(n), 2, "n={}", n);
        }
        for n in 16..=23 {
            assert_eq!(discard_count(n), 3, "n={}", n);
        }
        assert_eq!(discard_count(24), 4);
    }

    #[test]
    fn test_discard_count_monotonic() {
        for n in 0..100 {
            assert!(discard_count(n + 1) >= discard_count(n));
        }
    }

    #[test]
    fn test_select_discards_worst() {
        let scores = [1, 2, 3, 4];
        assert_eq!(select_discards(&scores), vec![false, false, false, true]);
        assert_eq!(discarded_sum(&scores, &select_discards(&scores)), 4);
    }

    #[test]
    fn test_select_discards_two_worst() {
        let scores = [2, 5, 1, 4, 3, 6, 7, 8];
        let mask = select_discards(&scores);
        assert_eq!(mask.iter().filter(|d| **d).count(), 2);
        assert!(mask[6] && mask[7]);
        assert_eq!(discarded_sum(&scores, &mask), 15);
    }

    #[test]
    fn test_select_discards_tie_prefers_earlier() {
        let scores = [6, 1, 6, 2];
        let mask = select_discards(&scores);
        assert_eq!(mask, vec![true, false, false, false]);
    }

    #[test]
    fn test_select_discards_below_threshold() {
        let scores = [9, 9, 9];
        assert_eq!(select_discards(&scores), vec![false, false, false]);
        assert!(select_discards(&[]).is_empty());
    }
}
