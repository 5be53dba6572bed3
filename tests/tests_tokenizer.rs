//! Tokenizer tests against the keywords of the default notation

#![allow(clippy::unwrap_used)]

use rstest::rstest;
use twisty::DefaultNotation;
use twisty::parser::{LexerConfig, TokenKind, Tokenizer};

fn tokens(text: &str) -> Vec<(TokenKind, String)> {
    let notation = DefaultNotation::new(3).unwrap();
    let config = LexerConfig::from_notation(&notation);
    let mut tz = Tokenizer::new(text, &config);
    let mut out = Vec::new();
    loop {
        let token = tz.next_token();
        if token.is_eof() {
            return out;
        }
        out.push((token.kind, token.text.to_string()));
    }
}

fn texts(text: &str) -> Vec<String> {
    tokens(text).into_iter().map(|(_, t)| t).collect()
}

// ============================================================================
// Longest match
// ============================================================================

#[rstest]
#[case("R U2' F", &["R", "U2'", "F"])]
#[case("RUR'U'", &["R", "U", "R'", "U'"])]
#[case("MR2 T2F' N3L", &["MR2", "T2F'", "N3L"])]
#[case("[R,U]", &["[", "R", ",", "U", "]"])]
#[case("(++ubr)", &["(", "++", "u", "b", "r", ")"])]
#[case("3*R", &["3", "*", "R"])]
fn test_greedy_tokens(#[case] input: &str, #[case] expected: &[&str]) {
    assert_eq!(texts(input), expected);
}

#[test]
fn test_token_kinds() {
    let kinds: Vec<TokenKind> = tokens("R 12 x9 ?").into_iter().map(|(k, _)| k).collect();
    assert_eq!(
        kinds,
        [TokenKind::Keyword, TokenKind::Number, TokenKind::Word, TokenKind::Special]
    );
}

// ============================================================================
// Trivia
// ============================================================================

#[rstest]
#[case("R // rest of line\nU", &["R", "U"])]
#[case("R /* block */ U", &["R", "U"])]
#[case("R\t\n U", &["R", "U"])]
#[case("R /* never closed", &["R"])]
fn test_trivia_is_skipped(#[case] input: &str, #[case] expected: &[&str]) {
    assert_eq!(texts(input), expected);
}

#[test]
fn test_custom_whitespace() {
    let notation = DefaultNotation::new(3).unwrap().with_whitespace(&[' ', '_']);
    let config = LexerConfig::from_notation(&notation);
    let mut tz = Tokenizer::new("R__U", &config);
    assert_eq!(tz.next_token().text, "R");
    assert_eq!(tz.next_token().text, "U");
    assert!(tz.next_token().is_eof());
}

// ============================================================================
// Positions and push-back
// ============================================================================

#[test]
fn test_positions_and_push_back() {
    let notation = DefaultNotation::new(3).unwrap();
    let config = LexerConfig::from_notation(&notation);
    let mut tz = Tokenizer::new("  R2 U", &config);

    let first = tz.next_token();
    assert_eq!((tz.start_position(), tz.end_position()), (2, 4));
    tz.push_back();
    assert_eq!(tz.next_token(), first);

    let checkpoint = tz.checkpoint();
    assert_eq!(tz.next_token().text, "U");
    tz.restore(checkpoint);
    assert_eq!(tz.next_token().text, "U");

    let eof = tz.next_token();
    assert!(eof.is_eof());
    assert_eq!(eof.start(), 6);
    assert!(tz.next_token().is_eof());
}
