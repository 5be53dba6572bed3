//! Move counting tests

#![allow(clippy::unwrap_used)]

#[path = "helpers/mod.rs"]
mod helpers;

use helpers::{parse, parse_on};
use rstest::rstest;
use twisty::MoveMetrics;

fn counts(metrics: MoveMetrics) -> (usize, usize, usize, usize) {
    (
        metrics.moves,
        metrics.block_turns,
        metrics.face_turns,
        metrics.quarter_turns,
    )
}

#[rstest]
#[case("", (0, 0, 0, 0))]
#[case("R", (1, 1, 1, 1))]
#[case("U2", (1, 1, 1, 2))]
#[case("R2'", (1, 1, 1, 2))]
#[case("R U R' U'", (4, 4, 4, 4))]
#[case("MR", (1, 1, 2, 2))]
#[case("MR2", (1, 1, 2, 4))]
#[case("SR", (1, 1, 2, 2))]
#[case("TR", (1, 1, 1, 1))]
#[case("CU", (1, 0, 0, 0))]
#[case("[R, U]", (4, 4, 4, 4))]
#[case("(R2 MR)3", (6, 6, 9, 12))]
#[case("(ubr,bdr) . R", (1, 1, 1, 1))]
fn test_metrics_on_three_layers(#[case] text: &str, #[case] expected: (usize, usize, usize, usize)) {
    assert_eq!(counts(parse(text).metrics()), expected, "{text}");
}

#[rstest]
#[case("N2R", (1, 1, 2, 2))]
#[case("MR", (1, 1, 2, 2))]
#[case("T2R", (1, 1, 1, 1))]
#[case("WR", (1, 1, 1, 1))]
#[case("SR'", (1, 1, 2, 2))]
fn test_metrics_on_four_layers(#[case] text: &str, #[case] expected: (usize, usize, usize, usize)) {
    assert_eq!(counts(parse_on(4, text).metrics()), expected, "{text}");
}

#[test]
fn test_metrics_from_ops() {
    let ast = parse("R U2");
    let metrics = MoveMetrics::from_ops(3, ast.resolved(true));
    assert_eq!(counts(metrics), (2, 2, 2, 3));
    assert_eq!(MoveMetrics::of(&ast), ast.metrics());
}
