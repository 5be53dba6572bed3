//! Resolution tests: inverse laws, closure, invariants and the n = 3 scenarios

#![allow(clippy::unwrap_used)]

#[path = "helpers/mod.rs"]
mod helpers;

use helpers::{apply, apply_on, assert_valid_state, parse, parse_err, parse_on};
use rstest::rstest;
use twisty::{CubeError, ErrorCode, PartType, PermutationState, ResolvedOp};

fn assert_round_trip(layer_count: usize, text: &str) {
    let ast = parse_on(layer_count, text);
    let mut state = PermutationState::new(layer_count).unwrap();
    ast.apply_to(&mut state, false).unwrap();
    ast.apply_to(&mut state, true).unwrap();
    assert!(state.is_solved(), "{text} then its inverse is not the identity");
}

// ============================================================================
// Inverse laws
// ============================================================================

#[rstest]
#[case("R")]
#[case("MR2'")]
#[case("R U R' U'")]
#[case("[R, U]")]
#[case("[R U, F' D]")]
#[case("[R: U]")]
#[case("<R>U")]
#[case("<R F>[U, L2]3")]
#[case("(R U)~ F")]
#[case("((R U)' F)5")]
#[case("(ubr,bdr,dfr,fur) R'")]
#[case("(+urf,ubr) (-ur,uf) (++r)")]
fn test_forward_then_inverse_is_identity(#[case] text: &str) {
    assert_round_trip(3, text);
}

#[rstest]
#[case("T2R [N2U, F]")]
#[case("(ur2,uf1) (+u1,f4)")]
#[case("<MR>CU2 SF'")]
fn test_round_trip_on_four_layers(#[case] text: &str) {
    assert_round_trip(4, text);
}

// ============================================================================
// Construct expansion
// ============================================================================

#[rstest]
#[case("[R, U]", "R U R' U'")]
#[case("[R, U]'", "U R U' R'")]
#[case("[R: U]", "R U R'")]
#[case("[R: U]'", "R U' R'")]
#[case("<R>U", "R' U R")]
#[case("(<R>U)'", "R' U' R")]
#[case("(R U)'", "U' R'")]
#[case("R3", "R'")]
#[case("3*R", "R'")]
#[case("R 3*U", "R U'")]
#[case("U2", "U U")]
#[case("R~", "L'")]
#[case("(R U)~", "L' D'")]
#[case(". R .", "R")]
fn test_equivalent_scripts(#[case] script: &str, #[case] expanded: &str) {
    assert_eq!(apply(script), apply(expanded), "{script} vs {expanded}");
}

#[test]
fn test_resolution_is_lazy() {
    let ast = parse("(R U)999999999");
    let first: Vec<_> = ast.resolved(false).take(3).collect();
    assert_eq!(first.len(), 3);
}

#[test]
fn test_resolution_restarts() {
    let ast = parse("[R, U] F");
    assert_eq!(ast.resolved(false).count(), 5);
    assert_eq!(ast.resolved(false).count(), 5);
    assert_eq!(ast.resolved(true).count(), 5);
}

#[test]
fn test_inverse_permutation_is_a_clone() {
    let ast = parse("(ubr,bdr)");
    let ops: Vec<_> = ast.resolved(true).collect();
    let [ResolvedOp::Permutation(cycle)] = ops.as_slice() else {
        panic!("expected one permutation");
    };
    assert_eq!(cycle.to_string(), "(bdr,ubr)");
}

// ============================================================================
// Closure and invariants
// ============================================================================

#[rstest]
#[case("R")]
#[case("MU")]
#[case("T2F")]
#[case("N2L")]
#[case("CB")]
#[case("SD")]
#[case("WR")]
fn test_four_quarter_turns_are_identity(#[case] token: &str) {
    let mut state = PermutationState::new(4).unwrap();
    let ast = parse_on(4, token);
    for turn in 1..=4 {
        ast.apply_to(&mut state, false).unwrap();
        assert_eq!(state.is_solved(), turn == 4, "{token} x{turn}");
    }
}

#[test]
fn test_scramble_keeps_invariants() {
    let state = apply("R U F' L2 D B' R2 U' F L' D2 B (R U)5 [F, D]");
    assert_valid_state(&state);

    let corner_twist: u32 = state.orientations(PartType::Corner).iter().map(|&o| o as u32).sum();
    let edge_flip: u32 = state.orientations(PartType::Edge).iter().map(|&o| o as u32).sum();
    assert_eq!(corner_twist % 3, 0);
    assert_eq!(edge_flip % 2, 0);
}

#[test]
fn test_slice_moves_keep_state_valid() {
    let state = apply_on(5, "MR N2U' T3F2 <CU>SB [N3R, D] (u4,r6,f2)");
    assert_valid_state(&state);
}

#[test]
fn test_layer_count_mismatch() {
    let ast = parse("R");
    let mut state = PermutationState::new(4).unwrap();
    assert_eq!(
        ast.apply_to(&mut state, false),
        Err(CubeError::LayerCountMismatch {
            expected: 3,
            found: 4
        })
    );
}

// ============================================================================
// Scenarios (n = 3)
// ============================================================================

#[test]
fn test_right_turn_cycles_four_corners_and_edges() {
    let state = apply("R");
    assert!(!state.is_solved());
    let moved = (0..8)
        .filter(|&part| state.locations(PartType::Corner)[part] != part)
        .count();
    assert_eq!(moved, 4);
    let moved = (0..12)
        .filter(|&part| state.locations(PartType::Edge)[part] != part)
        .count();
    assert_eq!(moved, 4);
}

/// Lengths of the non-trivial cycles of a permutation, sorted
fn cycle_lengths(locations: &[usize]) -> Vec<usize> {
    let mut seen = vec![false; locations.len()];
    let mut lengths = Vec::new();
    for start in 0..locations.len() {
        let mut length = 0;
        let mut part = start;
        while !seen[part] {
            seen[part] = true;
            part = locations[part];
            length += 1;
        }
        if length > 1 {
            lengths.push(length);
        }
    }
    lengths.sort_unstable();
    lengths
}

#[test]
fn test_double_turn_order() {
    let mut state = PermutationState::new(3).unwrap();
    let ast = parse("U2");
    ast.apply_to(&mut state, false).unwrap();
    assert!(!state.is_solved());
    for part_type in [PartType::Corner, PartType::Edge] {
        assert_eq!(cycle_lengths(state.locations(part_type)), vec![2, 2], "{part_type}");
        assert!(state.orientations(part_type).iter().all(|&o| o == 0), "{part_type}");
    }
    let metrics = ast.metrics();
    assert_eq!((metrics.moves, metrics.quarter_turns), (1, 2));
    ast.apply_to(&mut state, false).unwrap();
    assert!(state.is_solved());
}

#[test]
fn test_sexy_move_order_six() {
    let ast = parse("R U R' U'");
    let mut state = PermutationState::new(3).unwrap();
    for _ in 0..5 {
        ast.apply_to(&mut state, false).unwrap();
        assert!(!state.is_solved());
    }
    ast.apply_to(&mut state, false).unwrap();
    assert!(state.is_solved());
}

#[test]
fn test_cycles_match_right_turn() {
    let by_cycle = apply("(ubr,bdr,dfr,fur) (ur,br,dr,fr)");
    let by_turn = apply("R");
    for part_type in [PartType::Corner, PartType::Edge] {
        assert_eq!(by_cycle.locations(part_type), by_turn.locations(part_type));
        assert_eq!(by_cycle.orientations(part_type), by_turn.orientations(part_type));
    }
}

#[test]
fn test_unclosed_cycle_error_spans_input() {
    let err = parse_err("(R,F");
    assert_eq!(err.code, ErrorCode::E0201);
    assert_eq!(err.end(), 4);
}
