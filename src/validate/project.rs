//! Full cross-service validation run over peripheral configuration files.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::config::load_environment;

use super::rules::{apply_rules, TextRule};
use super::{port_findings, Findings, Severity};

const BACKEND_RESOURCES_DIR: &str = "backend/src/main/resources";
const FRONTEND_DIR: &str = "frontend";

const BACKEND_PROPERTY_FILES: &[&str] = &[
    "application.properties",
    "application-dev.properties",
    "application-prod.properties",
    "application-docker.properties",
];

const FRONTEND_ENV_FILES: &[&str] = &[".env.development", ".env.production"];
const BUILD_CONFIG_FILE: &str = "vite.config.ts";
const COMPOSE_FILES: &[&str] = &["docker-compose.yml", "docker-compose.dev.yml"];

static BACKEND_COMMON_RULES: LazyLock<Vec<TextRule>> = LazyLock::new(|| {
    vec![
        TextRule::forbidden(r"server\.port=\d+", Severity::Warning, "hardcoded server port"),
        TextRule::required(r"server\.port", Severity::Warning, "missing server.port"),
        TextRule::required(
            r"spring\.datasource\.url",
            Severity::Warning,
            "missing spring.datasource.url",
        ),
        TextRule::required(
            r"spring\.jpa\.hibernate\.ddl-auto",
            Severity::Warning,
            "missing spring.jpa.hibernate.ddl-auto",
        ),
    ]
});

// The base application.properties legitimately carries plain defaults, so the
// interpolation-usage lint only applies to the profile overrides.
static BACKEND_OVERRIDE_RULES: LazyLock<Vec<TextRule>> = LazyLock::new(|| {
    vec![TextRule::required(
        r"\$\{[^}]+\}",
        Severity::Warning,
        "no environment variable references",
    )]
});

static FRONTEND_ENV_RULES: LazyLock<Vec<TextRule>> = LazyLock::new(|| {
    vec![
        TextRule::forbidden(
            r"VITE_API_BASE_URL=http://localhost:\d+",
            Severity::Warning,
            "hardcoded API base URL",
        ),
        TextRule::required("VITE_API_BASE_URL", Severity::Error, "missing VITE_API_BASE_URL"),
        TextRule::required("VITE_APP_TITLE", Severity::Error, "missing VITE_APP_TITLE"),
        TextRule::required("VITE_APP_VERSION", Severity::Error, "missing VITE_APP_VERSION"),
    ]
});

static BUILD_CONFIG_RULES: LazyLock<Vec<TextRule>> = LazyLock::new(|| {
    vec![
        TextRule::required("loadEnv", Severity::Warning, "environment not loaded via loadEnv"),
        TextRule::forbidden(r"port:\s*\d+", Severity::Warning, "hardcoded port")
            .unless_line_contains("env"),
    ]
});

static COMPOSE_RULES: LazyLock<Vec<TextRule>> = LazyLock::new(|| {
    vec![
        TextRule::forbidden(r#"":\d+:"#, Severity::Warning, "hardcoded port mapping"),
        TextRule::require_at_least(
            5,
            r"\$\{[^}]+\}",
            Severity::Warning,
            "few environment variable references, values may be hardcoded",
        ),
        TextRule::required("healthcheck", Severity::Warning, "no healthcheck declared"),
    ]
});

/// Orchestrates every peripheral check plus port consistency across
/// environments. Consumes resolved configurations strictly through the
/// loader; it performs no resolution of its own.
#[derive(Debug)]
pub struct ProjectValidator {
    root: PathBuf,
}

impl ProjectValidator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Runs every check and returns the consolidated findings.
    pub fn run(&self) -> Findings {
        let mut findings = Findings::new();
        self.check_backend(&mut findings);
        self.check_frontend(&mut findings);
        self.check_orchestration(&mut findings);
        self.check_port_consistency(&mut findings);
        findings
    }

    fn check_backend(&self, findings: &mut Findings) {
        let dir = self.root.join(BACKEND_RESOURCES_DIR);
        for file in BACKEND_PROPERTY_FILES {
            let Some(text) = read_required(&dir.join(file), file, findings) else {
                continue;
            };
            apply_rules(&BACKEND_COMMON_RULES, file, &text, findings);
            if *file != "application.properties" {
                apply_rules(&BACKEND_OVERRIDE_RULES, file, &text, findings);
            }
        }
    }

    fn check_frontend(&self, findings: &mut Findings) {
        let dir = self.root.join(FRONTEND_DIR);
        for file in FRONTEND_ENV_FILES {
            if let Some(text) = read_required(&dir.join(file), file, findings) {
                apply_rules(&FRONTEND_ENV_RULES, file, &text, findings);
            }
        }
        if let Some(text) = read_required(&dir.join(BUILD_CONFIG_FILE), BUILD_CONFIG_FILE, findings)
        {
            apply_rules(&BUILD_CONFIG_RULES, BUILD_CONFIG_FILE, &text, findings);
        }
    }

    fn check_orchestration(&self, findings: &mut Findings) {
        for file in COMPOSE_FILES {
            if let Some(text) = read_required(&self.root.join(file), file, findings) {
                apply_rules(&COMPOSE_RULES, file, &text, findings);
            }
        }
    }

    /// Loads each environment through the resolver and re-runs the port
    /// checks on the merged result. A failing load degrades to a warning.
    fn check_port_consistency(&self, findings: &mut Findings) {
        for name in ["development", "production"] {
            match load_environment(&self.root, name) {
                Ok((_, outcome)) => port_findings(&outcome.config, findings),
                Err(e) => {
                    findings.warning(format!("could not verify port consistency for {name}: {e}"));
                }
            }
        }
    }
}

/// Reads a peripheral file that must exist; absence or unreadability is an
/// error-level finding, not a fatal failure.
fn read_required(path: &Path, label: &str, findings: &mut Findings) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            findings.error(format!("missing required file: {label}"));
            None
        }
        Err(e) => {
            findings.error(format!("unreadable file {label}: {e}"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, text: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    fn compliant_project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        write(root, ".env", "APP_NAME=demo\nFRONTEND_PORT=3000\nBACKEND_PORT=8080\n");
        write(root, ".env.development", "NODE_ENV=development\n");
        write(root, ".env.production", "NODE_ENV=production\n");

        let properties = "server.port=${BACKEND_PORT:-8080}\n\
                          spring.datasource.url=jdbc:postgresql://${DB_HOST}/app\n\
                          spring.jpa.hibernate.ddl-auto=validate\n";
        for file in BACKEND_PROPERTY_FILES {
            write(root, &format!("{BACKEND_RESOURCES_DIR}/{file}"), properties);
        }

        let env = "VITE_API_BASE_URL=${API_BASE_URL}\n\
                   VITE_APP_TITLE=Demo\n\
                   VITE_APP_VERSION=1.0.0\n";
        write(root, "frontend/.env.development", env);
        write(root, "frontend/.env.production", env);
        write(
            root,
            "frontend/vite.config.ts",
            "const env = loadEnv(mode, process.cwd());\nserver: { port: Number(env.VITE_PORT) },\n",
        );

        let compose = "services:\n  backend:\n    ports:\n      - \"${BACKEND_PORT}:${BACKEND_PORT}\"\n    \
                       environment:\n      - DB_HOST=${DB_HOST}\n      - DB_PORT=${DB_PORT}\n      - APP_NAME=${APP_NAME}\n    \
                       healthcheck:\n      test: curl -f http://localhost:${BACKEND_PORT}/health\n";
        write(root, "docker-compose.yml", compose);
        write(root, "docker-compose.dev.yml", compose);

        dir
    }

    #[test]
    fn test_compliant_project_has_no_errors() {
        let dir = compliant_project();
        let findings = ProjectValidator::new(dir.path()).run();
        assert!(!findings.has_errors(), "errors: {:?}", findings.errors());
    }

    #[test]
    fn test_missing_files_are_errors() {
        let dir = TempDir::new().unwrap();
        let findings = ProjectValidator::new(dir.path()).run();

        assert!(findings.has_errors());
        assert!(findings
            .errors()
            .iter()
            .any(|e| e.contains("application.properties")));
        assert!(findings
            .errors()
            .iter()
            .any(|e| e.contains("docker-compose.yml")));
    }

    #[test]
    fn test_missing_healthcheck_is_warning() {
        let dir = compliant_project();
        write(
            dir.path(),
            "docker-compose.yml",
            "services:\n  backend:\n    environment:\n      - A=${A}\n      - B=${B}\n      - C=${C}\n      - D=${D}\n      - E=${E}\n",
        );
        let findings = ProjectValidator::new(dir.path()).run();

        assert!(findings
            .warnings()
            .iter()
            .any(|w| w.contains("docker-compose.yml") && w.contains("healthcheck")));
    }

    #[test]
    fn test_hardcoded_server_port_is_warning() {
        let dir = compliant_project();
        write(
            dir.path(),
            &format!("{BACKEND_RESOURCES_DIR}/application-dev.properties"),
            "server.port=8080\n\
             spring.datasource.url=jdbc:postgresql://${DB_HOST}/app\n\
             spring.jpa.hibernate.ddl-auto=validate\n",
        );
        let findings = ProjectValidator::new(dir.path()).run();

        assert!(findings
            .warnings()
            .iter()
            .any(|w| w.contains("application-dev.properties") && w.contains("hardcoded server port")));
    }

    #[test]
    fn test_port_consistency_checks_each_environment() {
        let dir = compliant_project();
        write(
            dir.path(),
            ".env.production",
            "NODE_ENV=production\nNGINX_PORT=8080\n",
        );
        let findings = ProjectValidator::new(dir.path()).run();

        assert!(findings
            .warnings()
            .iter()
            .any(|w| w.contains("duplicate port values")));
    }
}
