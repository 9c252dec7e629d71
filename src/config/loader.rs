//! Merge and load orchestration across layered sources.

use std::path::{Path, PathBuf};

use super::env::{Ambient, ProcessEnv};
use super::error::{ConfigError, LoadWarning};
use super::map::Config;
use super::parse::parse_into;
use super::resolve::resolve_references;
use super::source::Source;

/// Base configuration file, shared by every environment.
pub const BASE_FILE: &str = ".env";

/// Deployment environment selecting the override source layered on the base
/// file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Normalizes an environment identifier, accepting short aliases.
    ///
    /// Returns `None` for unrecognized names; callers fall back to
    /// development with a warning.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// File layered on top of [`BASE_FILE`] for this environment.
    pub fn override_file(self) -> &'static str {
        match self {
            Self::Development => ".env.development",
            Self::Production => ".env.production",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
        })
    }
}

/// A resolved configuration together with the non-fatal conditions observed
/// while producing it.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub config: Config,
    pub warnings: Vec<LoadWarning>,
}

/// Builder over an ordered list of configuration sources.
///
/// Sources are parsed and merged in registration order, later sources
/// overriding earlier ones per key. After the merge, `${...}` references are
/// resolved across the whole mapping.
///
/// ## Example
///
/// ```no_run
/// use envstack::config::Loader;
///
/// let outcome = Loader::new()
///     .with_file(".env")
///     .with_file(".env.development")
///     .load()?;
///
/// println!("{} entries", outcome.config.len());
/// # Ok::<(), envstack::config::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .load() is called"]
pub struct Loader {
    files: Vec<PathBuf>,
}

impl Loader {
    /// Creates an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source file; missing files degrade to an empty mapping plus a
    /// warning rather than an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.files.push(path.as_ref().to_path_buf());
        self
    }

    /// Loads, merges, and resolves against the process environment.
    pub fn load(self) -> Result<LoadOutcome, ConfigError> {
        self.load_with(&ProcessEnv)
    }

    /// Loads, merges, and resolves against the given ambient environment.
    pub fn load_with(self, ambient: &dyn Ambient) -> Result<LoadOutcome, ConfigError> {
        let mut config = Config::new();
        let mut warnings = Vec::new();

        for path in &self.files {
            match Source::read(path)? {
                Some(source) => {
                    tracing::debug!(path = %source.origin().display(), "parsing configuration source");
                    parse_into(source.text(), &mut config, ambient);
                }
                None => warnings.push(LoadWarning::MissingSource(path.clone())),
            }
        }

        warnings.extend(resolve_references(&mut config, ambient));
        Ok(LoadOutcome { config, warnings })
    }
}

/// Loads the configuration for a named environment: the base file first, then
/// the environment override file.
///
/// Unrecognized environment names fall back to development with a warning.
pub fn load_environment(
    root: &Path,
    name: &str,
) -> Result<(Environment, LoadOutcome), ConfigError> {
    load_environment_with(root, name, &ProcessEnv)
}

/// [`load_environment`] with an explicit ambient environment.
pub fn load_environment_with(
    root: &Path,
    name: &str,
    ambient: &dyn Ambient,
) -> Result<(Environment, LoadOutcome), ConfigError> {
    let (environment, mut warnings) = match Environment::from_name(name) {
        Some(environment) => (environment, Vec::new()),
        None => (
            Environment::Development,
            vec![LoadWarning::UnknownEnvironment(name.to_string())],
        ),
    };

    let outcome = Loader::new()
        .with_file(root.join(BASE_FILE))
        .with_file(root.join(environment.override_file()))
        .load_with(ambient)?;

    warnings.extend(outcome.warnings);
    Ok((
        environment,
        LoadOutcome {
            config: outcome.config,
            warnings,
        },
    ))
}
