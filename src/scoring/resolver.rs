use super::entry::{RaceEntry, StatusCode};
use super::penalty::PenaltyTable;

/// Turns race entries into points for one scoring event.
///
/// `attendance` is the number of competitors who started at least one race in
/// the event; `fleet_size` is the roster size.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    penalties: &'a PenaltyTable,
    attendance: u32,
    fleet_size: u32,
}

impl<'a> Resolver<'a> {
    pub fn new(penalties: &'a PenaltyTable, attendance: u32, fleet_size: u32) -> Self {
        Self {
            penalties,
            attendance,
            fleet_size,
        }
    }

    pub fn attendance(&self) -> u32 {
        self.attendance
    }

    /// Points for a competitor who never came: one worse than last among attendees
    /// under the default rules.
    pub fn dnc_points(&self) -> u32 {
        self.penalties
            .points(StatusCode::Dnc, self.attendance, self.fleet_size)
    }

    /// Score one entry. `race_average` is the rounded finisher average for the
    /// race the entry belongs to, used for redress.
    pub fn resolve(&self, entry: RaceEntry, race_average: Option<u32>) -> u32 {
        match entry {
            RaceEntry::Finish(position) => position,
            RaceEntry::Code(StatusCode::Ro) => race_average.unwrap_or_else(|| self.dnc_points()),
            RaceEntry::Code(code) => self.penalties.points(code, self.attendance, self.fleet_size),
        }
    }

    /// Score every entry of a single race across the fleet.
    pub fn resolve_race(&self, race: &[RaceEntry]) -> Vec<u32> {
        let average = race_average(race.iter().copied());
        race.iter().map(|e| self.resolve(*e, average)).collect()
    }
}

/// Rounded (half up) mean of the numeric finishing positions in a race.
pub fn race_average(race: impl IntoIterator<Item = RaceEntry>) -> Option<u32> {
    let (sum, count) = race
        .into_iter()
        .filter_map(|e| e.position())
        .fold((0u64, 0u64), |(sum, count), p| (sum + p as u64, count + 1));
    if count == 0 {
        None
    } else {
        Some(((2 * sum + count) / (2 * count)) as u32)
    }
}

/// The entry recorded for a race a competitor has no result for.
///
/// Someone who started elsewhere in the event missed this race (DNS);
/// someone with no starts at all did not compete (DNC).
pub fn absent_entry(started_event: bool) -> RaceEntry {
    if started_event {
        RaceEntry::Code(StatusCode::Dns)
    } else {
        RaceEntry::Code(StatusCode::Dnc)
    }
}
