//! Parser error tests: codes, spans and messages

#![allow(clippy::unwrap_used)]

#[path = "helpers/mod.rs"]
mod helpers;

use helpers::{notation, parse_err};
use rstest::rstest;
use twisty::parser::Symbol;
use twisty::{DefaultNotation, ErrorCode, ScriptParser};

// ============================================================================
// Codes and spans
// ============================================================================

#[rstest]
#[case("R ?", ErrorCode::E0101, 2, 3)]
#[case("R ]", ErrorCode::E0101, 2, 3)]
#[case("(R,F", ErrorCode::E0201, 0, 4)]
#[case("(R U", ErrorCode::E0201, 0, 4)]
#[case("[R, U", ErrorCode::E0201, 0, 5)]
#[case("<R>", ErrorCode::E0202, 0, 3)]
#[case("3*", ErrorCode::E0202, 0, 2)]
#[case("R 99999999999", ErrorCode::E0103, 2, 13)]
#[case("(ubr,ubr)", ErrorCode::E0402, 5, 8)]
#[case("(ubr,ur)", ErrorCode::E0403, 5, 7)]
#[case("(ud,ur)", ErrorCode::E0404, 1, 3)]
#[case("(ur2,uf)", ErrorCode::E0405, 3, 4)]
#[case("(++ubr)", ErrorCode::E0401, 0, 7)]
#[case("(+-ubr)", ErrorCode::E0406, 2, 3)]
fn test_error_code_and_span(
    #[case] input: &str,
    #[case] code: ErrorCode,
    #[case] start: usize,
    #[case] end: usize,
) {
    let err = parse_err(input);
    assert_eq!(err.code, code, "input: {input}, error: {}", err.format());
    assert_eq!((err.start(), err.end()), (start, end), "input: {input}");
}

#[rstest]
#[case("(")]
#[case(")")]
#[case("[R:")]
#[case("R U (R'")]
#[case("[R, U:]")]
#[case("(ubr,,dfr)")]
#[case("(urf")]
#[case("<>")]
#[case("((R)")]
#[case("R 3*")]
#[case("(uu)")]
#[case("x y z")]
fn test_spans_stay_in_bounds(#[case] input: &str) {
    let err = parse_err(input);
    assert!(err.start() <= err.end(), "{input}: {}", err.format());
    assert!(err.end() <= input.len(), "{input}: {}", err.format());
}

#[test]
fn test_unclosed_error_points_at_opener() {
    let err = parse_err("R (U F");
    assert_eq!(err.code, ErrorCode::E0201);
    assert_eq!((err.start(), err.end()), (2, 6));
    assert_eq!(err.related.len(), 1);
    assert_eq!(u32::from(err.related[0].range.start()), 2);
    assert_eq!(err.hint.as_deref(), Some("add ')'"));
}

#[test]
fn test_unknown_word_hint() {
    let err = parse_err("R xyz");
    assert_eq!(err.code, ErrorCode::E0101);
    assert!(err.message.contains("'xyz'"));
    assert!(err.hint.unwrap().contains("not a move or macro"));
}

#[test]
fn test_part_numbers_need_big_cube() {
    let notation = notation(4);
    let parser = ScriptParser::new(&notation);
    assert!(parser.parse("(ur2,uf1)").is_ok());
    let err = parser.parse("(ur3)").unwrap_err();
    assert_eq!(err.code, ErrorCode::E0103);
    let err = parser.parse("(ubr2)").unwrap_err();
    assert_eq!(err.code, ErrorCode::E0103);
}

// ============================================================================
// Ambiguity
// ============================================================================

#[test]
fn test_ambiguous_brackets() {
    let notation = DefaultNotation::new(3)
        .unwrap()
        .with_token(":", Symbol::CommutationDelimiter);
    let err = ScriptParser::new(&notation).parse("[R:U]").unwrap_err();
    assert_eq!(err.code, ErrorCode::E0301);
    assert!(err.message.contains("commutation"));
    assert!(err.message.contains("conjugation"));
    assert_eq!((err.start(), err.end()), (0, 5));
}

// ============================================================================
// Macros
// ============================================================================

#[test]
fn test_error_inside_macro() {
    let notation = notation(3).with_macro("bad", "R ?");
    let err = ScriptParser::new(&notation).parse("U bad").unwrap_err();
    assert_eq!(err.code, ErrorCode::E0501);
    assert_eq!((err.start(), err.end()), (2, 5));
    let cause = err.cause.as_deref().unwrap();
    assert_eq!(cause.code, ErrorCode::E0101);
    assert_eq!((cause.start(), cause.end()), (2, 3));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_recursive_macro_hits_depth_limit() {
    let notation = notation(3).with_macro("loop", "R loop");
    let err = ScriptParser::new(&notation).parse("loop").unwrap_err();
    assert_eq!(err.code, ErrorCode::E0501);
    let mut innermost = &err;
    while let Some(cause) = innermost.cause.as_deref() {
        innermost = cause;
    }
    assert_eq!(innermost.code, ErrorCode::E0502);
}

#[test]
fn test_macro_depth_is_configurable() {
    let notation = notation(3).with_macro("sexy", "R U R' U'");
    let err = ScriptParser::new(&notation)
        .with_max_macro_depth(0)
        .parse("sexy")
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::E0502);
    assert_eq!((err.start(), err.end()), (0, 4));
}

// ============================================================================
// Nesting depth
// ============================================================================

#[test]
fn test_deep_nesting_is_an_error() {
    let notation = notation(3);
    let depth = 10_000;
    let input = format!("{}R{}", "(".repeat(depth), ")".repeat(depth));
    let err = ScriptParser::new(&notation).parse(&input).unwrap_err();
    assert_eq!(err.code, ErrorCode::E0203);
    let opener = twisty::parser::DEFAULT_MAX_NESTING_DEPTH;
    assert_eq!((err.start(), err.end()), (opener, opener + 1));
}

#[test]
fn test_nesting_within_the_limit_parses() {
    let notation = notation(3);
    let input = format!("{}R{}", "(".repeat(40), ")".repeat(40));
    let ast = ScriptParser::new(&notation).parse(&input).unwrap();
    assert_eq!(ast.resolved(false).count(), 1);
}

#[rstest]
#[case("((MR))", None)]
#[case("(((MR)))", Some((3, 5)))]
#[case("[(MR), (U2)]", None)]
#[case("[((MR)), U]", Some((3, 5)))]
fn test_nesting_depth_is_configurable(#[case] input: &str, #[case] span: Option<(usize, usize)>) {
    let notation = notation(3);
    let result = ScriptParser::new(&notation)
        .with_max_nesting_depth(3)
        .parse(input);
    match span {
        None => assert!(result.is_ok(), "{input}: {result:?}"),
        Some(span) => {
            let err = result.unwrap_err();
            assert_eq!(err.code, ErrorCode::E0203);
            assert_eq!((err.start(), err.end()), span);
        }
    }
}
