// tests/duration_tests.rs

use std::time::Duration;
use brb_core::duration::{format_duration, parse_duration};
use brb_core::Error;

#[test]
fn test_parse_simple_durations() -> Result<(), Error> {
    assert_eq!(parse_duration("90s")?, Duration::from_secs(90));
    assert_eq!(parse_duration("5m")?, Duration::from_secs(300));
    assert_eq!(parse_duration("1h30m")?, Duration::from_secs(5_400));
    assert_eq!(parse_duration("1h0m5s")?, Duration::from_secs(3_605));
    assert_eq!(parse_duration("0")?, Duration::ZERO);
    assert_eq!(parse_duration("0s")?, Duration::ZERO);
    Ok(())
}

#[test]
fn test_parse_fractions_and_small_units() -> Result<(), Error> {
    assert_eq!(parse_duration("1.5h")?, Duration::from_secs(5_400));
    assert_eq!(parse_duration("2.5s")?, Duration::from_millis(2_500));
    assert_eq!(parse_duration("300ms")?, Duration::from_millis(300));
    assert_eq!(parse_duration("10us")?, Duration::from_micros(10));
    assert_eq!(parse_duration("10µs")?, Duration::from_micros(10));
    assert_eq!(parse_duration("7ns")?, Duration::from_nanos(7));
    assert_eq!(parse_duration("1m30s500ms")?, Duration::from_millis(90_500));
    Ok(())
}

#[test]
fn test_parse_round_trips_through_format() -> Result<(), Error> {
    for s in ["5s", "1m0s", "1m30s", "1h0m0s", "2h3m4s"] {
        assert_eq!(format_duration(parse_duration(s)?), s);
    }
    Ok(())
}

#[test]
fn test_invalid_durations_are_rejected() {
    for bad in ["", "abc", "10", "5d", "5m x", " 5m", "-5m", "+5m", "m", ".", "1h-30m"] {
        match parse_duration(bad) {
            Err(Error::DurationParse { input, .. }) => assert_eq!(input, bad),
            other => panic!("expected DurationParse for {bad:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_missing_unit_is_explained() {
    let err = parse_duration("10").unwrap_err();
    assert!(err.to_string().contains("missing unit"), "{err}");
}

#[test]
fn test_non_ascii_digits_are_not_numbers() {
    for bad in ["１s", "٣m", "1h２m"] {
        let err = parse_duration(bad).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("unexpected"), "{bad:?}: {msg}");
        assert!(!msg.contains("out of range"), "{bad:?}: {msg}");
    }
}

#[test]
fn test_huge_duration_is_out_of_range() {
    let err = parse_duration("99999999999999999999h").unwrap_err();
    assert!(err.to_string().contains("out of range"), "{err}");
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(Duration::ZERO), "0s");
    assert_eq!(format_duration(Duration::from_millis(999)), "0s");
    assert_eq!(format_duration(Duration::from_secs(59)), "59s");
    assert_eq!(format_duration(Duration::from_secs(60)), "1m0s");
    assert_eq!(format_duration(Duration::from_secs(3_661)), "1h1m1s");
    assert_eq!(format_duration(Duration::from_secs(90_000)), "25h0m0s");
}
