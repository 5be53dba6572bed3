//! Shared helpers for the integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use twisty::{Ast, DefaultNotation, ParseError, PartType, PermutationState, ScriptParser};

pub fn notation(layer_count: usize) -> DefaultNotation {
    DefaultNotation::new(layer_count).unwrap()
}

pub fn parse(text: &str) -> Ast {
    parse_on(3, text)
}

pub fn parse_on(layer_count: usize, text: &str) -> Ast {
    let notation = notation(layer_count);
    ScriptParser::new(&notation)
        .parse(text)
        .unwrap_or_else(|err| panic!("failed to parse {text:?}: {}", err.format()))
}

pub fn parse_err(text: &str) -> ParseError {
    let notation = notation(3);
    match ScriptParser::new(&notation).parse(text) {
        Ok(_) => panic!("expected {text:?} to fail"),
        Err(err) => err,
    }
}

/// State of a solved cube after applying `text`
pub fn apply(text: &str) -> PermutationState {
    apply_on(3, text)
}

pub fn apply_on(layer_count: usize, text: &str) -> PermutationState {
    let mut state = PermutationState::new(layer_count).unwrap();
    parse_on(layer_count, text).apply_to(&mut state, false).unwrap();
    state
}

/// Names of the top-level statements
pub fn statement_kinds(ast: &Ast) -> Vec<&'static str> {
    ast.children(ast.root())
        .iter()
        .map(|&id| ast.node(id).unwrap().kind.name())
        .collect()
}

pub fn assert_valid_state(state: &PermutationState) {
    for part_type in [PartType::Corner, PartType::Edge, PartType::Side] {
        let mut locations = state.locations(part_type).to_vec();
        locations.sort_unstable();
        let expected: Vec<usize> = (0..state.count(part_type)).collect();
        assert_eq!(locations, expected, "{part_type} locations are not a permutation");
        assert!(
            state
                .orientations(part_type)
                .iter()
                .all(|&o| o < part_type.modulo()),
            "{part_type} orientation out of range"
        );
    }
}
