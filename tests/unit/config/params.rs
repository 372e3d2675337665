use super::*;

#[test]
fn query_decodes_percent_and_plus() {
    let p = RawParams::from_query("?to=2026-12-31+10%3A00&tz=Europe%2FBerlin&font=Open+Sans");
    assert_eq!(p.get("to"), Some("2026-12-31 10:00"));
    assert_eq!(p.get("tz"), Some("Europe/Berlin"));
    assert_eq!(p.get("font"), Some("Open Sans"));
}

#[test]
fn query_later_duplicates_win_and_junk_is_skipped() {
    let p = RawParams::from_query("w=100&&=x&w=200&flag");
    assert_eq!(p.get("w"), Some("200"));
    assert_eq!(p.get("flag"), None);
    assert_eq!(p.len(), 2);
}

#[test]
fn blank_values_count_as_absent() {
    let p = RawParams::from_pairs([("bg", "   "), ("fg", "fff")]);
    assert_eq!(p.get("bg"), None);
    assert_eq!(p.get("fg"), Some("fff"));
}

#[test]
fn parse_pair_requires_key() {
    assert_eq!(
        RawParams::parse_pair("w=300"),
        Some(("w".to_owned(), "300".to_owned()))
    );
    assert_eq!(
        RawParams::parse_pair("to=2026-01-01T00:00:00+01:00"),
        Some(("to".to_owned(), "2026-01-01T00:00:00+01:00".to_owned()))
    );
    assert_eq!(RawParams::parse_pair("=3"), None);
    assert_eq!(RawParams::parse_pair("novalue"), None);
}

#[test]
fn extend_overrides() {
    let mut base = RawParams::from_query("w=1&h=2");
    base.extend(RawParams::from_pairs([("h", "3")]));
    assert_eq!(base.get("w"), Some("1"));
    assert_eq!(base.get("h"), Some("3"));
}
