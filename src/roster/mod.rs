pub mod storage;
pub mod types;

pub use storage::{load_roster, RosterFile};
pub use types::{Competitor, Roster};
