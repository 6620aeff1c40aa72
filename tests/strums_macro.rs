#![cfg(feature = "macros")]

use strumbeat::{Pattern, Strum, Subdivision, strums};

#[test]
fn test_strums_macro_basic() {
    let pattern = strums!("DUXU");
    assert_eq!(pattern, [Strum::Down, Strum::Up, Strum::Muted, Strum::Up]);
}

#[test]
fn test_strums_macro_rest_symbols() {
    let pattern = strums!("-.Rr");
    assert!(pattern.iter().all(|s| *s == Strum::Rest));
}

#[test]
fn test_strums_macro_ignores_bar_lines() {
    let pattern = strums!("D-DU | -UDU");
    assert_eq!(pattern.len(), 8);
    assert_eq!(pattern[4], Strum::Rest);
}

#[test]
fn test_strums_macro_lowercase() {
    assert_eq!(strums!("dxm"), [Strum::Down, Strum::Muted, Strum::Muted]);
}

#[test]
fn test_strums_macro_matches_runtime_parser() {
    let compiled = strums!("D-UD UDU-");
    let parsed = Strum::parse_sequence("D-UD UDU-").unwrap();
    assert_eq!(compiled.to_vec(), parsed);
}

#[test]
fn test_strums_macro_into_pattern() {
    let pattern = Pattern::new(strums!("DXDU DUDU"), Subdivision::Eighth).unwrap();
    assert_eq!(pattern.strum_at(1), Strum::Muted);
}
