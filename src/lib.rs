pub mod config;
pub mod history;
pub mod output;
pub mod results;
pub mod roster;
pub mod scoring;
