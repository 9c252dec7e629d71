//! Generation of the merged environment file consumed by container tooling.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::config::{Config, ConfigError, Environment};

/// File written by [`write_docker_env`], relative to the project root.
pub const OUTPUT_FILE: &str = ".env.docker";

/// Writes every non-empty resolved entry as a `KEY=VALUE` line under a
/// generated header, and returns the path written.
///
/// Callers are expected to validate first; generation on top of a failing
/// validation is refused at the command layer.
pub fn write_docker_env(
    config: &Config,
    environment: Environment,
    root: &Path,
) -> Result<PathBuf, ConfigError> {
    let path = root.join(OUTPUT_FILE);
    let body = render(config, environment, &Utc::now().to_rfc3339());
    std::fs::write(&path, body).map_err(|e| ConfigError::WriteError {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}

fn render(config: &Config, environment: Environment, timestamp: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# envstack merged environment - {}\n",
        environment.to_string().to_uppercase()
    ));
    out.push_str("# generated by the envstack configuration manager\n");
    out.push_str(&format!("# generated at: {timestamp}\n"));
    out.push_str("# ==========================================\n\n");

    for (key, value) in config.iter() {
        if value.is_empty() {
            continue;
        }
        out.push_str(&format!("{key}={value}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config() -> Config {
        [("APP_NAME", "demo"), ("EMPTY", ""), ("BACKEND_PORT", "8080")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_render_skips_empty_values() {
        let body = render(&config(), Environment::Development, "2026-01-01T00:00:00+00:00");
        assert!(body.contains("APP_NAME=demo\n"));
        assert!(body.contains("BACKEND_PORT=8080\n"));
        assert!(!body.contains("EMPTY"));
    }

    #[test]
    fn test_render_header_names_environment_and_timestamp() {
        let body = render(&config(), Environment::Production, "2026-01-01T00:00:00+00:00");
        let mut lines = body.lines();
        assert_eq!(
            lines.next(),
            Some("# envstack merged environment - PRODUCTION")
        );
        assert!(body.contains("# generated at: 2026-01-01T00:00:00+00:00"));
    }

    #[test]
    fn test_write_docker_env_creates_output_file() {
        let dir = TempDir::new().unwrap();
        let path = write_docker_env(&config(), Environment::Development, dir.path()).unwrap();

        assert_eq!(path, dir.path().join(OUTPUT_FILE));
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.starts_with('#'));
        assert!(written.contains("APP_NAME=demo\n"));
    }
}
