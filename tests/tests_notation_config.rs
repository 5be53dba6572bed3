//! Notations loaded from configuration files

#![cfg(feature = "config")]
#![allow(clippy::unwrap_used)]

use std::fs;

use twisty::parser::NotationError;
use twisty::{AstError, CubeError, DefaultNotation, PermutationState, ScriptParser};

const YAML: &str = r##"
layer_count: 3
remove_tokens: ["~"]
tokens:
  "{": [grouping_begin]
  "}": [grouping_end]
moves:
  x: { axis: 0, layer_mask: 7, angle: 1 }
syntax:
  inversion: [suffix, prefix]
macros:
  sexy: "R U R' U'"
line_comment: "#"
"##;

#[test]
fn test_yaml_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notation.yaml");
    fs::write(&path, YAML).unwrap();

    let notation = DefaultNotation::from_path(&path).unwrap();
    let parser = ScriptParser::new(&notation);
    let ast = parser.parse("{sexy}6 x x' # trailing comment").unwrap();

    let mut state = PermutationState::new(3).unwrap();
    ast.apply_to(&mut state, false).unwrap();
    assert!(state.is_solved());

    assert!(parser.parse("'R").is_ok());
    assert!(parser.parse("R~").is_err());
}

#[test]
fn test_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notation.json");
    fs::write(&path, r#"{"layer_count": 4, "macros": {"wide": "TR TR'"}}"#).unwrap();

    let notation = DefaultNotation::from_path(&path).unwrap();
    let ast = ScriptParser::new(&notation).parse("wide").unwrap();
    assert_eq!(ast.layer_count(), 4);
    assert_eq!(ast.resolved(false).count(), 2);
}

#[test]
fn test_config_errors() {
    assert!(matches!(
        DefaultNotation::from_yaml_str("layer_count: 3\ntokens: {\"?\": [no_such_symbol]}"),
        Err(NotationError::UnknownSymbol(_))
    ));
    assert!(matches!(
        DefaultNotation::from_yaml_str("layer_count: 3\nsyntax: {grouping: [sideways]}"),
        Err(NotationError::UnknownSyntax(_))
    ));
    assert!(matches!(
        DefaultNotation::from_json_str(r#"{"layer_count": 3, "moves": {"z": {"axis": 0, "layer_mask": 0, "angle": 1}}}"#),
        Err(NotationError::Move { .. })
    ));
    assert!(matches!(
        DefaultNotation::from_yaml_str("layer_count: 3\nmoves:\n  x: { axis: 0, layer_mask: 9, angle: 1 }\n"),
        Err(NotationError::Move { token, source: AstError::Part(CubeError::InvalidLayerMask { mask: 9, layer_count: 3 }) })
            if token == "x"
    ));
    assert!(matches!(
        DefaultNotation::from_json_str(r#"{"layer_count": 99}"#),
        Err(NotationError::Cube(_))
    ));
    assert!(matches!(
        DefaultNotation::from_path("/definitely/not/here.yaml"),
        Err(NotationError::Io(_))
    ));
}
