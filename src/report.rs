//! Console reporting for resolved configurations and validation findings.

use crate::config::{Config, Environment};
use crate::validate::Findings;

/// Display groups for `show`, in presentation order.
const CATEGORIES: &[(&str, &[&str])] = &[
    ("Application", &["APP_NAME", "APP_VERSION", "APP_DESCRIPTION"]),
    (
        "Ports",
        &["FRONTEND_PORT", "BACKEND_PORT", "NGINX_PORT", "MAILHOG_WEB_PORT"],
    ),
    (
        "Database",
        &["DB_TYPE", "DB_HOST", "DB_PORT", "DB_NAME", "DB_USERNAME"],
    ),
    ("API", &["API_BASE_URL", "API_PREFIX", "API_TIMEOUT"]),
    (
        "Runtime",
        &["NODE_ENV", "SPRING_PROFILES_ACTIVE", "LOG_LEVEL"],
    ),
];

const MASK: &str = "********";

/// True for keys whose values must never be printed.
fn is_sensitive(key: &str) -> bool {
    key.contains("PASSWORD") || key.contains("SECRET")
}

fn display_value<'a>(key: &str, value: &'a str) -> &'a str {
    if is_sensitive(key) {
        MASK
    } else {
        value
    }
}

/// Prints the categorized, sensitive-masked configuration display.
pub fn print_config(config: &Config, environment: Environment) {
    println!();
    println!(
        "{} environment configuration:",
        environment.to_string().to_uppercase()
    );
    println!("{}", "=".repeat(50));

    for (category, keys) in CATEGORIES {
        println!();
        println!("[{category}]");
        for key in *keys {
            if let Some(value) = config.get(key) {
                println!("  {key}={}", display_value(key, value));
            }
        }
    }

    println!();
    println!("{}", "=".repeat(50));
}

/// Prints every numeric port entry, sorted ascending by port.
pub fn print_ports(config: &Config, environment: Environment) {
    println!();
    println!(
        "{} environment ports:",
        environment.to_string().to_uppercase()
    );
    println!("{}", "=".repeat(40));

    let mut ports = config.ports();
    ports.sort_by_key(|&(_, port)| port);
    for (key, port) in ports {
        let service = key.replacen("_PORT", "", 1).to_lowercase();
        println!("  {service:<15} : {port}");
    }

    println!("{}", "=".repeat(40));
}

/// Prints numbered errors and warnings followed by a pass/fail line.
pub fn print_findings(findings: &Findings) {
    println!();
    println!("validation results:");
    println!("{}", "=".repeat(50));

    if findings.is_clean() {
        println!("all configuration checks passed");
        return;
    }

    if !findings.errors().is_empty() {
        println!();
        println!("errors (must fix):");
        for (i, error) in findings.errors().iter().enumerate() {
            println!("  {}. {error}", i + 1);
        }
    }

    if !findings.warnings().is_empty() {
        println!();
        println!("warnings (should fix):");
        for (i, warning) in findings.warnings().iter().enumerate() {
            println!("  {}. {warning}", i + 1);
        }
    }

    println!();
    println!("{}", "=".repeat(50));
    if findings.has_errors() {
        println!("validation failed");
    } else {
        println!("validation passed with warnings");
    }
}
