//! Tests for field separator policies

use super::*;

#[test]
fn test_literal_split_trims_drifted_widths() {
    let fields = five_spaces().split("1      0.43295186     0.43295958");
    assert_eq!(fields, vec!["1", "0.43295186", "0.43295958"]);
}

#[test]
fn test_literal_split_collapses_double_width_gaps() {
    // Ten spaces between columns would otherwise produce an empty middle field
    let fields = five_spaces().split("1          0.5");
    assert_eq!(fields, vec!["1", "0.5"]);
}

#[test]
fn test_literal_split_keeps_narrow_gaps_joined() {
    // Gaps narrower than the separator do not split
    let fields = five_spaces().split("1   2     3");
    assert_eq!(fields, vec!["1   2", "3"]);
}

#[test]
fn test_whitespace_split() {
    let fields = Separator::Whitespace.split("  1 \t 0.43   0.44  ");
    assert_eq!(fields, vec!["1", "0.43", "0.44"]);
}

#[test]
fn test_whitespace_split_blank_line() {
    assert!(Separator::Whitespace.split("   ").is_empty());
}

#[test]
fn test_empty_literal_rejected() {
    assert!(Separator::literal("").is_err());
    assert!("".parse::<Separator>().is_err());
}

#[test]
fn test_parse_separator_names() {
    assert_eq!("whitespace".parse::<Separator>().unwrap(), Separator::Whitespace);
    assert_eq!(
        "tab".parse::<Separator>().unwrap(),
        Separator::Literal("\t".to_string())
    );
    assert_eq!("spaces:5".parse::<Separator>().unwrap(), five_spaces());
    assert_eq!(
        ";".parse::<Separator>().unwrap(),
        Separator::Literal(";".to_string())
    );
    assert!("spaces:0".parse::<Separator>().is_err());
    assert!("spaces:x".parse::<Separator>().is_err());
}

#[test]
fn test_display_matches_parse() {
    for separator in [Separator::Whitespace, five_spaces(), Separator::Literal("\t".into())] {
        let text = separator.to_string();
        assert_eq!(text.parse::<Separator>().unwrap(), separator);
    }
    assert_eq!(Separator::default().to_string(), "spaces:5");
}
