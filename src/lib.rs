pub mod config;
pub mod errors;
pub mod report;
pub mod results;
pub mod runner;
pub mod sweeps;
pub mod types;
