use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

use super::tiebreak::{compare, sort_standings, Scored};

/// A finishing place. Tied places render with a trailing `=`, e.g. "3=".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    pub position: u32,
    pub tied: bool,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tied {
            write!(f, "{}=", self.position)
        } else {
            write!(f, "{}", self.position)
        }
    }
}

impl Serialize for Rank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

pub trait Ranked: Scored {
    fn set_rank(&mut self, rank: Rank);
}

/// Assign places to a list already sorted with [`compare`].
///
/// An entry equal to the one before it shares that place; otherwise its
/// place is its 1-based position, so a tied group of k is followed by
/// `place + k`.
pub fn assign_ranks<T: Ranked>(mut items: Vec<T>) -> Vec<T> {
    let ties: Vec<bool> = items
        .windows(2)
        .map(|pair| compare(&pair[0], &pair[1]) == Ordering::Equal)
        .collect();

    let mut position = 1;
    for i in 0..items.len() {
        let tied_with_prev = i > 0 && ties[i - 1];
        let tied_with_next = ties.get(i).copied().unwrap_or(false);
        if !tied_with_prev {
            position = i as u32 + 1;
        }
        items[i].set_rank(Rank {
            position,
            tied: tied_with_prev || tied_with_next,
        });
    }
    items
}

/// Sort with the tie-break cascade and assign places.
pub fn rank_standings<T: Ranked>(mut items: Vec<T>) -> Vec<T> {
    sort_standings(&mut items);
    assign_ranks(items)
}
