//! Delimiter detection from a sample of the input.

use std::collections::HashMap;

/// Bytes read from the start of the file for sniffing.
pub const SAMPLE_SIZE: usize = 1024;

/// Used when sniffing cannot decide.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Tried in order; earlier entries win ties.
const CANDIDATES: [u8; 5] = [b',', b'\t', b';', b'|', b':'];

/// Share of sample lines that must agree on a delimiter count.
const MIN_CONSISTENCY: f64 = 0.9;

/// Guess the delimiter of a delimited-text sample.
///
/// A candidate scores by how many lines contain it the same, non-zero number
/// of times outside double quotes. `truncated` marks a sample cut off at
/// [`SAMPLE_SIZE`], whose last line is then ignored. Returns `None` when no
/// candidate is consistent enough.
pub fn sniff_delimiter(sample: &[u8], truncated: bool) -> Option<u8> {
    let text = String::from_utf8_lossy(sample);
    let mut lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if truncated && lines.len() > 1 && !text.ends_with('\n') {
        lines.pop();
    }
    if lines.is_empty() {
        return None;
    }

    let mut best: Option<(u8, f64)> = None;
    for candidate in CANDIDATES {
        let mut frequencies: HashMap<usize, usize> = HashMap::new();
        for line in &lines {
            let count = count_unquoted(line, candidate);
            if count > 0 {
                *frequencies.entry(count).or_default() += 1;
            }
        }

        let Some(agreeing) = frequencies.values().copied().max() else {
            continue;
        };
        let consistency = agreeing as f64 / lines.len() as f64;
        if best.map_or(true, |(_, score)| consistency > score) {
            best = Some((candidate, consistency));
        }
    }

    best.filter(|(_, score)| *score >= MIN_CONSISTENCY)
        .map(|(delimiter, _)| delimiter)
}

fn count_unquoted(line: &str, delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for b in line.bytes() {
        if b == b'"' {
            in_quotes = !in_quotes;
        } else if b == delimiter && !in_quotes {
            count += 1;
        }
    }
    count
}
