//! Configuration loading, merging, and reference resolution.

mod env;
mod error;
mod loader;
mod map;
mod parse;
mod resolve;
mod source;

pub use env::{Ambient, FixedAmbient, ProcessEnv};
pub use error::{ConfigError, LoadWarning};
pub use loader::{load_environment, load_environment_with, Environment, LoadOutcome, Loader, BASE_FILE};
pub use map::Config;
pub use source::Source;
