use waymark::{ParamError, Params};

fn params() -> Params {
    Params::from_pairs([
        ("name", "waymark"),
        ("count", "42"),
        ("big", "9000000000"),
        ("neg", "-7"),
        ("ratio", "0.125"),
        ("flag", "true"),
        ("off", "0"),
        ("day", "2026-08-26"),
        ("stamp", "2026-08-26T14:30:00"),
        ("junk", "not-a-number"),
    ])
}

#[test]
fn string_accessors() {
    let ps = params();
    assert_eq!(ps.get("name"), Some("waymark"));
    assert_eq!(ps.string("name"), Ok("waymark"));
    assert_eq!(ps.get_string("name"), "waymark");
    assert_eq!(ps.get("absent"), None);
    assert_eq!(ps.get_string("absent"), "");
}

#[test]
fn integer_accessors() {
    let ps = params();
    assert_eq!(ps.int("count"), Ok(42));
    assert_eq!(ps.int("neg"), Ok(-7));
    assert_eq!(ps.int64("big"), Ok(9_000_000_000));
    assert_eq!(ps.uint("count"), Ok(42));
    assert_eq!(ps.uint64("big"), Ok(9_000_000_000));

    assert!(matches!(ps.uint("neg"), Err(ParamError::ParseInt { .. })));
    assert!(matches!(ps.int("junk"), Err(ParamError::ParseInt { .. })));
    assert_eq!(ps.get_int("junk"), 0);
    assert_eq!(ps.get_int64("count"), 42);
}

#[test]
fn float_and_bool_accessors() {
    let ps = params();
    assert_eq!(ps.float("ratio"), Ok(0.125));
    assert_eq!(ps.float("count"), Ok(42.0));
    assert!(matches!(ps.float("junk"), Err(ParamError::ParseFloat { .. })));

    assert_eq!(ps.bool("flag"), Ok(true));
    assert_eq!(ps.bool("off"), Ok(false));
    assert!(matches!(ps.bool("junk"), Err(ParamError::ParseBool { .. })));
    assert!(ps.get_bool("flag"));
    assert!(!ps.get_bool("junk"));
}

#[test]
fn time_accessor_accepts_date_and_datetime_formats() {
    let ps = params();

    let stamp = ps
        .time("stamp", "%Y-%m-%dT%H:%M:%S")
        .expect("datetime capture parses");
    assert_eq!(stamp.format("%H:%M").to_string(), "14:30");

    // A date-only format lands at midnight.
    let day = ps.time("day", "%Y-%m-%d").expect("date capture parses");
    assert_eq!(day.format("%Y-%m-%d %H:%M:%S").to_string(), "2026-08-26 00:00:00");

    assert!(matches!(
        ps.time("junk", "%Y-%m-%d"),
        Err(ParamError::ParseTime { .. })
    ));
}

#[test]
fn missing_keys_report_not_found_with_the_key() {
    let ps = params();
    let err = ps.int("absent").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.key(), "absent");
    assert_eq!(err.to_string(), "no param for absent");
}
