//! Line parsing for `.env`-style sources.

use super::env::Ambient;
use super::map::Config;
use super::resolve::resolve_value;

/// Parses `KEY=VALUE` lines from one source into the accumulating mapping.
///
/// Comments and blank lines are skipped, as is any line without an `=`; the
/// value keeps every `=` beyond the first. One layer of matching surrounding
/// quotes is stripped before interpolation. Each value gets a single
/// substitution pass against the mapping built so far, so later lines can
/// reference earlier lines and earlier, lower-precedence sources.
///
/// Parsing is best-effort: malformed lines are dropped, never fatal.
pub(crate) fn parse_into(text: &str, config: &mut Config, ambient: &dyn Ambient) {
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, rest)) = line.split_once('=') else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        let value = strip_quotes(rest);
        let value = resolve_value(value, config, ambient);
        config.insert(key.trim(), value);
    }
}

/// Removes exactly one layer of matching `"…"` or `'…'` quoting.
fn strip_quotes(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}
