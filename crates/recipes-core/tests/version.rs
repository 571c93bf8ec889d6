use jiff::Timestamp;
use recipes_core::version;

#[test]
fn parses_utc_timestamps() {
    let ts = version::parse("2025-03-01T12:00:00Z").unwrap();
    assert_eq!(ts, "2025-03-01T12:00:00Z".parse::<Timestamp>().unwrap());
}

#[test]
fn parses_offsets_and_fractions() {
    let ts = version::parse("2025-03-01T13:00:00.250+01:00").unwrap();
    assert_eq!(ts, "2025-03-01T12:00:00.25Z".parse::<Timestamp>().unwrap());
}

#[test]
fn naive_timestamps_are_utc() {
    let ts = version::parse("2025-03-01T12:00:00.123456").unwrap();
    assert_eq!(
        ts,
        "2025-03-01T12:00:00.123456Z".parse::<Timestamp>().unwrap()
    );
}

#[test]
fn garbage_is_rejected_with_message() {
    let err = version::parse("yesterday").unwrap_err();
    assert!(err.to_string().starts_with("Invalid version format: "));
}

#[test]
fn format_is_parseable() {
    let ts = "2024-11-05T08:30:15.5Z".parse::<Timestamp>().unwrap();
    assert_eq!(version::parse(&version::format(ts)).unwrap(), ts);
}

#[test]
fn newer_is_strict() {
    let cutoff = version::parse("2025-03-01T12:00:00Z").unwrap();
    let same = cutoff;
    let later = version::parse("2025-03-01T12:00:00.000001Z").unwrap();
    assert!(!version::is_newer(same, Some(cutoff)));
    assert!(version::is_newer(later, Some(cutoff)));
    assert!(version::is_newer(same, None));
}

#[test]
fn format_has_fixed_precision() {
    let whole = "2025-03-01T12:00:00Z".parse::<Timestamp>().unwrap();
    let fraction = "2025-03-01T12:00:00.1Z".parse::<Timestamp>().unwrap();
    assert_eq!(version::format(whole), "2025-03-01T12:00:00.000000000Z");
    assert_eq!(version::format(fraction), "2025-03-01T12:00:00.100000000Z");
}

#[test]
fn string_order_matches_time_order() {
    let times = [
        "2025-03-01T12:00:00Z",
        "2025-03-01T12:00:00.000000001Z",
        "2025-03-01T12:00:00.5Z",
        "2025-03-01T12:00:01Z",
    ];
    let formatted: Vec<String> = times
        .iter()
        .map(|t| version::format(t.parse().unwrap()))
        .collect();
    let mut sorted = formatted.clone();
    sorted.sort();
    assert_eq!(formatted, sorted);
}
