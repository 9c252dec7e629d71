//! Static validation of resolved configurations and peripheral files.

mod project;
mod rules;

use std::ops::RangeInclusive;

use crate::config::Config;

pub use project::ProjectValidator;
pub use rules::{apply_rules, RuleKind, TextRule};

/// Variables every deployment must define.
pub const REQUIRED_VARS: &[&str] = &[
    "APP_NAME",
    "FRONTEND_PORT",
    "BACKEND_PORT",
    "DB_TYPE",
    "NODE_ENV",
];

/// Registered/ephemeral range acceptable for service port bindings.
const PORT_RANGE: RangeInclusive<i64> = 1024..=65535;

/// Severity of a validation finding.
///
/// Errors block downstream generation; warnings are advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Ordered validation results, split by severity.
#[derive(Debug, Clone, Default)]
pub struct Findings {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        match severity {
            Severity::Error => self.errors.push(message.into()),
            Severity::Warning => self.warnings.push(message.into()),
        }
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, message);
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Checks a resolved configuration: required variables, port collisions and
/// ranges, database type/host pairing.
///
/// An empty value counts as missing throughout, consistent with the
/// resolver's empty-as-unset policy.
pub fn validate_config(config: &Config) -> Findings {
    let mut findings = Findings::new();

    for &name in REQUIRED_VARS {
        if config.get(name).is_none_or(str::is_empty) {
            findings.error(format!("missing required variable: {name}"));
        }
    }

    port_findings(config, &mut findings);

    if let Some(db_type) = config.get("DB_TYPE").filter(|v| !v.is_empty()) {
        if config.get("DB_HOST").is_none_or(str::is_empty) {
            findings.error(format!("database type is {db_type} but DB_HOST is not set"));
        }
    }

    findings
}

/// Port collision and range checks over every numeric `*PORT*` entry.
pub(crate) fn port_findings(config: &Config, findings: &mut Findings) {
    let ports = config.ports();

    let mut duplicates: Vec<i64> = Vec::new();
    for (i, &(_, port)) in ports.iter().enumerate() {
        if ports[..i].iter().any(|&(_, p)| p == port) && !duplicates.contains(&port) {
            duplicates.push(port);
        }
    }
    if !duplicates.is_empty() {
        let list: Vec<String> = duplicates.iter().map(i64::to_string).collect();
        findings.warning(format!("duplicate port values: {}", list.join(", ")));
    }

    let out_of_range: Vec<String> = ports
        .iter()
        .filter(|(_, port)| !PORT_RANGE.contains(port))
        .map(|(key, port)| format!("{key}={port}"))
        .collect();
    if !out_of_range.is_empty() {
        findings.warning(format!(
            "port values outside {}-{}: {}",
            PORT_RANGE.start(),
            PORT_RANGE.end(),
            out_of_range.join(", ")
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> Config {
        [
            ("APP_NAME", "demo"),
            ("FRONTEND_PORT", "3000"),
            ("BACKEND_PORT", "8080"),
            ("DB_TYPE", "postgres"),
            ("DB_HOST", "db"),
            ("NODE_ENV", "development"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_complete_config_is_clean() {
        assert!(validate_config(&full_config()).is_clean());
    }

    #[test]
    fn test_missing_required_variable_is_error() {
        let config: Config = [
            ("APP_NAME", "demo"),
            ("FRONTEND_PORT", "3000"),
            ("BACKEND_PORT", "8080"),
            ("NODE_ENV", "development"),
        ]
        .into_iter()
        .collect();

        let findings = validate_config(&config);
        assert!(findings.has_errors());
        assert!(findings
            .errors()
            .iter()
            .any(|e| e.contains("DB_TYPE")));
    }

    #[test]
    fn test_empty_required_variable_is_error() {
        let mut config = full_config();
        config.insert("APP_NAME", "");
        let findings = validate_config(&config);
        assert!(findings.errors().iter().any(|e| e.contains("APP_NAME")));
    }

    #[test]
    fn test_duplicate_port_is_warning_not_error() {
        let mut config = full_config();
        config.insert("BACKEND_PORT", "3000");
        let findings = validate_config(&config);
        assert!(!findings.has_errors());
        assert!(findings.warnings().iter().any(|w| w.contains("3000")));
    }

    #[test]
    fn test_port_out_of_range_is_warning() {
        let mut config = full_config();
        config.insert("NGINX_PORT", "80");
        let findings = validate_config(&config);
        assert!(!findings.has_errors());
        assert!(findings
            .warnings()
            .iter()
            .any(|w| w.contains("NGINX_PORT=80")));
    }

    #[test]
    fn test_db_type_without_host_is_error() {
        let mut config = full_config();
        config.insert("DB_HOST", "");
        let findings = validate_config(&config);
        assert!(findings
            .errors()
            .iter()
            .any(|e| e.contains("DB_HOST")));
    }
}
