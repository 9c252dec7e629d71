pub mod config;
pub mod emit;
pub mod report;
pub mod validate;

pub use config::{Ambient, Config, ConfigError, Environment, LoadOutcome, LoadWarning, Loader};
pub use validate::{Findings, Severity};
