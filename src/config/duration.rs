//! Duration and delimiter parsing utilities.

use anyhow::Context;
use std::time::Duration;

/// Parse a duration string like "1h", "30m", "300s", "300" into seconds.
/// Supports:
/// - Plain numbers (interpreted as seconds): "300"
/// - Seconds suffix: "300s"
/// - Minutes suffix: "30m"
/// - Hours suffix: "1h"
pub fn parse_duration_to_secs(s: &str) -> anyhow::Result<u64> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("Empty duration string");
    }

    // Check for suffix
    if let Some(num_str) = s.strip_suffix('h') {
        let hours: u64 = num_str
            .parse()
            .with_context(|| format!("Invalid hours value: {num_str}"))?;
        return hours
            .checked_mul(3600)
            .with_context(|| format!("Duration too large: {s}"));
    }
    if let Some(num_str) = s.strip_suffix('m') {
        let minutes: u64 = num_str
            .parse()
            .with_context(|| format!("Invalid minutes value: {num_str}"))?;
        return minutes
            .checked_mul(60)
            .with_context(|| format!("Duration too large: {s}"));
    }
    if let Some(num_str) = s.strip_suffix('s') {
        let secs: u64 = num_str
            .parse()
            .with_context(|| format!("Invalid seconds value: {num_str}"))?;
        return Ok(secs);
    }

    // No suffix - treat as seconds
    s.parse::<u64>()
        .with_context(|| format!("Invalid duration value: {s}"))
}

/// clap value parser for `--request-timeout`.
pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
    let secs = parse_duration_to_secs(s)?;
    if secs == 0 {
        anyhow::bail!("Timeout must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

/// clap value parser for `--delimiter`: one ASCII character, or `\t` / `tab`.
pub fn parse_delimiter(s: &str) -> anyhow::Result<u8> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        _ => match s.as_bytes() {
            [b] if b.is_ascii() && !b.is_ascii_alphanumeric() && *b != b'"' => Ok(*b),
            _ => anyhow::bail!("Delimiter must be a single ASCII punctuation character, got '{s}'"),
        },
    }
}
