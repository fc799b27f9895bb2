use handscope_engine::lexer::{lenient_amount_count, to_amount, to_buy_in, trim, wildcard_match};

#[test]
fn amounts_are_lenient() {
    assert_eq!(to_amount("42"), 42.0);
    assert_eq!(to_amount("42€"), 42.0);
    assert_eq!(to_amount("x42"), 0.0);
    assert_eq!(to_amount("42aaa"), 42.0);
    assert_eq!(to_amount("0,25"), 0.25);
}

#[test]
fn buy_in_sums_parts() {
    let b = to_buy_in("4,51 + 0,52");
    assert!(b > 5.02 && b < 5.04, "got {b}");
    assert_eq!(to_buy_in("Free"), 0.0);
    assert!((to_buy_in("0.45€ + 0.05€") - 0.5).abs() < 1e-9);
}

#[test]
fn unparsable_amount_is_counted() {
    let before = lenient_amount_count();
    assert_eq!(to_amount("abc"), 0.0);
    assert!(lenient_amount_count() > before);
}

#[test]
fn free_buy_in_is_counted() {
    let before = lenient_amount_count();
    assert_eq!(to_buy_in("Free"), 0.0);
    assert!(lenient_amount_count() > before);
}

#[test]
fn trim_strips_ascii_whitespace() {
    assert_eq!(trim("\t Seat 1: alice \r\n"), "Seat 1: alice");
    assert_eq!(trim(" \x0b\x0c "), "");
}

#[test]
fn wildcard_filters_history_names() {
    assert!(wildcard_match("*_summary", "20141116_Nice 04_real_holdem_no-limit_summary"));
    assert!(!wildcard_match("*_summary", "20141116_Nice 04_real_holdem_no-limit"));
    assert!(wildcard_match("TS*", "TS20141102 T1024497880"));
    assert!(wildcard_match("* (*)", "HH20141031 Aase II (1)"));
    assert!(!wildcard_match("* (*)", "HH20141031 Aase II"));
}
