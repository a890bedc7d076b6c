use std::cmp::Ordering;

/// Anything that can be placed in a standings table: a net total plus the
/// per-race (or per-round) scores it was built from, in sailing order.
pub trait Scored {
    fn net(&self) -> u32;
    fn scores(&self) -> &[u32];
}

/// Total order between two results, lower is better.
///
/// 1. Net total.
/// 2. Best results first: both score lists sorted ascending, first difference wins.
/// 3. Most recent race first: scores compared from the last race backward.
///
/// Equal after all three is a genuine tie (ex aequo).
pub fn compare<T: Scored + ?Sized>(a: &T, b: &T) -> Ordering {
    a.net()
        .cmp(&b.net())
        .then_with(|| compare_best_results(a.scores(), b.scores()))
        .then_with(|| compare_latest_results(a.scores(), b.scores()))
}

fn compare_best_results(a: &[u32], b: &[u32]) -> Ordering {
    let mut a_sorted = a.to_vec();
    let mut b_sorted = b.to_vec();
    a_sorted.sort_unstable();
    b_sorted.sort_unstable();

    a_sorted
        .iter()
        .zip(&b_sorted)
        .map(|(x, y)| x.cmp(y))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn compare_latest_results(a: &[u32], b: &[u32]) -> Ordering {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .map(|(x, y)| x.cmp(y))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Stable sort by [`compare`]; fully tied results keep their input order.
pub fn sort_standings<T: Scored>(items: &mut [T]) {
    items.sort_by(|a, b| compare(a, b));
}
