// File: brb-core/src/duration.rs
//
// Countdown lengths come in as "90s", "5m", "1h30m", "1.5h" and so on: a run of
// <number><unit> pairs with nothing in between. The same compact form is used
// when the remaining time is shown to viewers.

use std::time::Duration;
use once_cell::sync::Lazy;
use regex::Regex;
use crate::Error;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Fraction digits past this point cannot change a nanosecond count.
const MAX_FRACTION_DIGITS: usize = 18;

/// One `<number><unit>` pair. ASCII digits only.
static COMPONENT: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"([0-9]+(?:\.[0-9]*)?|\.[0-9]+)(ns|us|µs|μs|ms|s|m|h)"));

/// Parses a unit-suffixed duration string.
///
/// The bare string `"0"` is accepted. Signs are rejected because a negative
/// countdown has nothing to count.
pub fn parse_duration(input: &str) -> Result<Duration, Error> {
    if input.is_empty() {
        return Err(Error::duration_parse(input, "empty duration"));
    }
    if input.starts_with('-') || input.starts_with('+') {
        return Err(Error::duration_parse(input, "signed durations are not supported"));
    }
    if input == "0" {
        return Ok(Duration::ZERO);
    }

    let component = COMPONENT
        .as_ref()
        .map_err(|e| Error::duration_parse(input, e.to_string()))?;

    let mut total_nanos: u128 = 0;
    let mut cursor = 0;
    for caps in component.captures_iter(input) {
        let (Some(whole), Some(number), Some(unit)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if whole.start() != cursor {
            return Err(unexpected_text(input, cursor));
        }
        cursor = whole.end();

        let nanos = component_nanos(number.as_str(), unit_nanos(unit.as_str()))
            .ok_or_else(|| Error::duration_parse(input, "duration out of range"))?;
        total_nanos = total_nanos
            .checked_add(nanos)
            .ok_or_else(|| Error::duration_parse(input, "duration out of range"))?;
    }

    if cursor != input.len() {
        let rest = &input[cursor..];
        if rest.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(Error::duration_parse(input, "missing unit"));
        }
        return Err(unexpected_text(input, cursor));
    }

    let secs = u64::try_from(total_nanos / NANOS_PER_SEC)
        .map_err(|_| Error::duration_parse(input, "duration out of range"))?;
    // The remainder of a division by 1e9 always fits.
    let subsec = (total_nanos % NANOS_PER_SEC) as u32;
    Ok(Duration::new(secs, subsec))
}

fn unexpected_text(input: &str, at: usize) -> Error {
    let rest = &input[at..];
    Error::duration_parse(input, format!("unexpected {:?}", rest))
}

fn unit_nanos(unit: &str) -> u128 {
    match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => NANOS_PER_SEC,
        "m" => 60 * NANOS_PER_SEC,
        _ => 3_600 * NANOS_PER_SEC,
    }
}

/// Converts one `<number>` (possibly fractional) into nanoseconds for the given unit.
fn component_nanos(number: &str, unit: u128) -> Option<u128> {
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));

    let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut nanos = whole.checked_mul(unit)?;

    let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    if !fraction.is_empty() {
        let digits: u128 = fraction.parse().ok()?;
        let scale = 10u128.checked_pow(u32::try_from(fraction.len()).ok()?)?;
        nanos = nanos.checked_add(digits.checked_mul(unit)? / scale)?;
    }
    Some(nanos)
}

/// Formats whole seconds the way durations are written on the command line:
/// `0s`, `45s`, `1m0s`, `1h2m3s`. Anything below a second is dropped.
pub fn format_duration(d: Duration) -> String {
    let total = d.as_secs();
    let hours = total / 3600;
    let minutes = total / 60 % 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
