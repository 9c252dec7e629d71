//! Variable reference resolution for configuration values.
//!
//! Values may reference other keys with `${NAME}` or carry a fallback with
//! `${NAME:-default}`. A single pass substitutes each reference from the
//! configuration mapping, the ambient environment, or the default literal, in
//! that order; the fixed-point driver repeats passes until the mapping is
//! stable or the iteration cap is hit.

use super::env::Ambient;
use super::error::LoadWarning;
use super::map::Config;

/// Upper bound on resolution passes. Reference chains longer than this stay
/// partially unresolved and are reported as a possible circular reference.
pub(crate) const MAX_ITERATIONS: usize = 10;

/// Substitutes every `${NAME}` / `${NAME:-default}` occurrence in one value.
///
/// Unresolvable references are left as literal text, as are unclosed or empty
/// ones. Substituted text is not rescanned within the pass; chains across
/// keys are handled by [`resolve_references`].
pub(crate) fn resolve_value(input: &str, config: &Config, ambient: &dyn Ambient) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            // Unclosed reference, keep the tail verbatim.
            out.push_str(&rest[start..]);
            return out;
        };
        let inner = &after[..end];
        match lookup(inner, config, ambient) {
            Some(value) => out.push_str(&value),
            None => {
                out.push_str("${");
                out.push_str(inner);
                out.push('}');
            }
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

/// Resolves one reference body (`NAME` or `NAME:-DEFAULT`).
///
/// First non-empty hit wins: configuration value, then ambient variable, then
/// the default literal. An empty string at any tier counts as unset and falls
/// through to the next.
fn lookup(inner: &str, config: &Config, ambient: &dyn Ambient) -> Option<String> {
    if inner.is_empty() {
        return None;
    }
    let mut parts = inner.split(":-");
    let name = parts.next().unwrap_or("");
    let default = parts.next();

    if let Some(value) = config.get(name) {
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }
    if let Some(value) = ambient.get(name) {
        if !value.is_empty() {
            return Some(value);
        }
    }
    match default {
        Some(value) if !value.is_empty() => Some(value.to_string()),
        _ => None,
    }
}

/// Drives repeated substitution passes over the whole mapping.
///
/// Each pass revisits every key whose value still contains `${`, resolving
/// against the current full mapping so cross-key chains shorten by one link
/// per pass. Stops early on a change-free pass; after [`MAX_ITERATIONS`]
/// passes the mapping is returned in its current state with a warning, never
/// an error.
pub(crate) fn resolve_references(config: &mut Config, ambient: &dyn Ambient) -> Vec<LoadWarning> {
    let mut changed = true;
    let mut iterations = 0;

    while changed && iterations < MAX_ITERATIONS {
        changed = false;
        iterations += 1;

        let keys: Vec<String> = config.keys().map(str::to_owned).collect();
        for key in keys {
            let Some(value) = config.get(&key).map(str::to_owned) else {
                continue;
            };
            if !value.contains("${") {
                continue;
            }
            let resolved = resolve_value(&value, config, ambient);
            if resolved != value {
                config.insert(key, resolved);
                changed = true;
            }
        }
    }

    tracing::debug!(iterations, converged = !changed, "reference resolution finished");

    if changed || has_residual_cycle(config) {
        vec![LoadWarning::PossibleCircularReference]
    } else {
        Vec::new()
    }
}

/// A reference that survives resolution while naming a non-empty key can only
/// be a self-sustaining cycle; substitution would otherwise have removed it.
fn has_residual_cycle(config: &Config) -> bool {
    config.iter().any(|(_, value)| {
        reference_names(value).any(|name| config.get(name).is_some_and(|v| !v.is_empty()))
    })
}

/// Yields the NAME part of every `${...}` occurrence in a value.
fn reference_names(value: &str) -> impl Iterator<Item = &str> {
    let mut rest = value;
    std::iter::from_fn(move || {
        let start = rest.find("${")?;
        let after = &rest[start + 2..];
        let end = after.find('}')?;
        let inner = &after[..end];
        rest = &after[end + 1..];
        Some(inner.split(":-").next().unwrap_or(""))
    })
}
