//! Uniform pattern rules evaluated over peripheral configuration text.
//!
//! Each file class carries a table of (pattern, kind, severity, message)
//! rules; the evaluator is shared so new lints are new table rows, not new
//! code paths.

use regex::Regex;

use super::{Findings, Severity};

/// How a rule's pattern relates to compliant text.
#[derive(Debug, Clone, Copy)]
pub enum RuleKind {
    /// Any match is a finding; the matched text is listed.
    Forbidden,
    /// Fewer than this many matches is a finding.
    RequireAtLeast(usize),
}

/// One pattern lint evaluated over a file's text.
#[derive(Debug)]
pub struct TextRule {
    pattern: Regex,
    kind: RuleKind,
    severity: Severity,
    message: &'static str,
    /// Lines containing this substring are exempt from `Forbidden` matches.
    exempt_line: Option<&'static str>,
}

impl TextRule {
    pub fn forbidden(pattern: &str, severity: Severity, message: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            kind: RuleKind::Forbidden,
            severity,
            message,
            exempt_line: None,
        }
    }

    pub fn require_at_least(
        count: usize,
        pattern: &str,
        severity: Severity,
        message: &'static str,
    ) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            kind: RuleKind::RequireAtLeast(count),
            severity,
            message,
            exempt_line: None,
        }
    }

    pub fn required(pattern: &str, severity: Severity, message: &'static str) -> Self {
        Self::require_at_least(1, pattern, severity, message)
    }

    /// Skips `Forbidden` matches on lines containing the given substring.
    pub fn unless_line_contains(mut self, substring: &'static str) -> Self {
        self.exempt_line = Some(substring);
        self
    }

    /// Applies the rule to one file's text, recording a finding when violated.
    pub fn apply(&self, file: &str, text: &str, findings: &mut Findings) {
        match self.kind {
            RuleKind::Forbidden => {
                let matches: Vec<&str> = text
                    .lines()
                    .filter(|line| {
                        self.exempt_line
                            .is_none_or(|substring| !line.contains(substring))
                    })
                    .flat_map(|line| self.pattern.find_iter(line).map(|m| m.as_str()))
                    .collect();
                if !matches.is_empty() {
                    findings.push(
                        self.severity,
                        format!("{file}: {}: {}", self.message, matches.join(", ")),
                    );
                }
            }
            RuleKind::RequireAtLeast(min) => {
                if self.pattern.find_iter(text).count() < min {
                    findings.push(self.severity, format!("{file}: {}", self.message));
                }
            }
        }
    }
}

/// Applies every rule in a table to one file's text.
pub fn apply_rules(rules: &[TextRule], file: &str, text: &str, findings: &mut Findings) {
    for rule in rules {
        rule.apply(file, text, findings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_rule_lists_matches() {
        let rule = TextRule::forbidden(r"port=\d+", Severity::Warning, "hardcoded port");
        let mut findings = Findings::new();
        rule.apply("app.properties", "port=8080\nport=9090\n", &mut findings);

        assert_eq!(findings.warnings().len(), 1);
        assert!(findings.warnings()[0].contains("port=8080, port=9090"));
    }

    #[test]
    fn test_forbidden_rule_respects_line_exemption() {
        let rule = TextRule::forbidden(r"port:\s*\d+", Severity::Warning, "hardcoded port")
            .unless_line_contains("env");
        let mut findings = Findings::new();
        rule.apply(
            "vite.config.ts",
            "port: Number(env.VITE_PORT) || 3000,\n",
            &mut findings,
        );

        assert!(findings.is_clean());
    }

    #[test]
    fn test_required_rule_fires_on_absence() {
        let rule = TextRule::required("healthcheck", Severity::Warning, "no healthcheck declared");
        let mut findings = Findings::new();
        rule.apply("docker-compose.yml", "services: {}\n", &mut findings);

        assert_eq!(findings.warnings().len(), 1);
    }

    #[test]
    fn test_require_at_least_counts_matches() {
        let rule = TextRule::require_at_least(
            2,
            r"\$\{[^}]+\}",
            Severity::Warning,
            "few environment references",
        );
        let mut findings = Findings::new();
        rule.apply("docker-compose.yml", "image: app:${TAG}\n", &mut findings);
        assert_eq!(findings.warnings().len(), 1);

        let mut findings = Findings::new();
        rule.apply(
            "docker-compose.yml",
            "image: app:${TAG}\nport: ${PORT}\n",
            &mut findings,
        );
        assert!(findings.is_clean());
    }
}
