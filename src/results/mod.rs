pub mod loader;

pub use loader::{load_results, ResultsFile};
