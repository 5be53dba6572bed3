//! Loading a notation from JSON or YAML

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;

use super::DefaultNotation;
use crate::ast::{AstError, MoveNode};
use crate::cube::CubeError;
use crate::parser::symbol::{Symbol, Syntax};

#[derive(Debug, Error)]
pub enum NotationError {
    #[error("invalid JSON notation: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML notation: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("cannot read notation file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Cube(#[from] CubeError),

    #[error("invalid move '{token}': {source}")]
    Move {
        token: SmolStr,
        #[source]
        source: AstError,
    },

    #[error("unknown symbol '{0}'")]
    UnknownSymbol(SmolStr),

    #[error("unknown syntax '{0}'")]
    UnknownSyntax(SmolStr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveConfig {
    pub axis: usize,
    pub layer_mask: u32,
    pub angle: i32,
}

/// Changes applied on top of [`DefaultNotation::new`].
///
/// ```yaml
/// layer_count: 3
/// tokens:
///   "{": [grouping_begin]
/// syntax:
///   inversion: [suffix, prefix]
/// macros:
///   sexy: "R U R' U'"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotationConfig {
    pub layer_count: usize,
    /// Tokens removed before anything is added
    pub remove_tokens: Vec<SmolStr>,
    /// Extra meanings per token, by symbol name
    pub tokens: IndexMap<SmolStr, Vec<SmolStr>>,
    pub moves: IndexMap<SmolStr, MoveConfig>,
    /// Placements per construct name, replacing the defaults
    pub syntax: IndexMap<SmolStr, Vec<SmolStr>>,
    pub macros: IndexMap<SmolStr, String>,
    pub whitespace: Option<String>,
    pub line_comment: Option<String>,
    pub block_comment: Option<(String, String)>,
}

impl DefaultNotation {
    pub fn from_config(config: &NotationConfig) -> Result<Self, NotationError> {
        let mut notation = DefaultNotation::new(config.layer_count)?;
        for token in &config.remove_tokens {
            notation = notation.without_token(token);
        }
        for (token, names) in &config.tokens {
            for name in names {
                let symbol = Symbol::from_name(name)
                    .ok_or_else(|| NotationError::UnknownSymbol(name.clone()))?;
                notation = notation.with_token(token, symbol);
            }
        }
        for (token, m) in &config.moves {
            let to_error = |source: AstError| NotationError::Move {
                token: token.clone(),
                source,
            };
            let m = MoveNode::new(m.axis, m.layer_mask, m.angle).map_err(to_error)?;
            notation = notation.with_move(token, m).map_err(to_error)?;
        }
        for (construct, names) in &config.syntax {
            let construct = Symbol::from_name(construct)
                .filter(|symbol| symbol.is_construct())
                .ok_or_else(|| NotationError::UnknownSymbol(construct.clone()))?;
            let placements = names
                .iter()
                .map(|name| Syntax::from_name(name).ok_or_else(|| NotationError::UnknownSyntax(name.clone())))
                .collect::<Result<Vec<_>, _>>()?;
            notation = notation.with_syntax(construct, &placements);
        }
        for (name, text) in &config.macros {
            notation = notation.with_macro(name, text);
        }
        if let Some(whitespace) = &config.whitespace {
            let chars: Vec<char> = whitespace.chars().collect();
            notation = notation.with_whitespace(&chars);
        }
        if let Some(start) = &config.line_comment {
            notation = notation.with_line_comment(Some(start.as_str()).filter(|s| !s.is_empty()));
        }
        if let Some((start, end)) = &config.block_comment {
            notation = notation.with_block_comment(Some((start.as_str(), end.as_str())));
        }
        tracing::debug!(
            layer_count = config.layer_count,
            tokens = config.tokens.len(),
            macros = config.macros.len(),
            "loaded notation config"
        );
        Ok(notation)
    }

    pub fn from_json_str(text: &str) -> Result<Self, NotationError> {
        let config: NotationConfig = serde_json::from_str(text)?;
        Self::from_config(&config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, NotationError> {
        let config: NotationConfig = serde_yaml::from_str(text)?;
        Self::from_config(&config)
    }

    /// Load a `.json` file, or YAML for any other extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, NotationError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_yaml_str(&text),
        }
    }
}
