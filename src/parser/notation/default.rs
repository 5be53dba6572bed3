//! Standard cube notation

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::{Notation, DEFAULT_WHITESPACE};
use crate::ast::{AstError, MoveNode};
use crate::cube::{CubeError, Face, MAX_LAYER_COUNT, MIN_LAYER_COUNT};
use crate::parser::symbol::{Symbol, Syntax, SymbolSet};

const ANGLE_SUFFIXES: [(&str, i32); 4] = [("", 1), ("'", -1), ("2", 2), ("2'", -2)];

const OPERATOR_TOKENS: [(&str, &[Symbol]); 15] = [
    (".", &[Symbol::Nop]),
    ("(", &[Symbol::GroupingBegin, Symbol::PermutationBegin]),
    (")", &[Symbol::GroupingEnd, Symbol::PermutationEnd]),
    (",", &[Symbol::CommutationDelimiter, Symbol::PermutationDelimiter]),
    ("[", &[Symbol::CommutationBegin, Symbol::ConjugationBegin]),
    ("]", &[Symbol::CommutationEnd, Symbol::ConjugationEnd]),
    (":", &[Symbol::ConjugationDelimiter]),
    ("<", &[Symbol::RotationBegin]),
    (">", &[Symbol::RotationEnd]),
    ("'", &[Symbol::InversionOperator]),
    ("~", &[Symbol::ReflectionOperator]),
    ("*", &[Symbol::RepetitionOperator]),
    ("+", &[Symbol::PermutationPlus]),
    ("-", &[Symbol::PermutationMinus]),
    ("++", &[Symbol::PermutationPlusPlus]),
];

const DEFAULT_SYNTAX: [(Symbol, &[Syntax]); 8] = [
    (Symbol::Grouping, &[Syntax::Circumfix]),
    (Symbol::Inversion, &[Syntax::Suffix]),
    (Symbol::Reflection, &[Syntax::Suffix]),
    (Symbol::Repetition, &[Syntax::Suffix, Syntax::Preinfix]),
    (Symbol::Commutation, &[Syntax::Circumfix]),
    (Symbol::Conjugation, &[Syntax::Circumfix]),
    (Symbol::Rotation, &[Syntax::Precircumfix]),
    (Symbol::Permutation, &[Syntax::Precircumfix]),
];

/// The standard notation for an n×n×n cube.
///
/// Moves, for every face `X` of `R U F L D B`, each with the angle suffixes
/// `''`, `'`, `2` and `2'`:
///
/// | Token | Layers turned |
/// |---|---|
/// | `X` | outer layer |
/// | `MX` | all inner layers |
/// | `TX` | outer two layers |
/// | `T{k}X` | outer `k` layers |
/// | `N{k}X` | `k`-th layer from `X` |
/// | `WX` | all but the opposite layer |
/// | `SX` | outer layer and opposite layer |
/// | `CX` | whole cube |
///
/// Constructs: `(A)`, `A'`, `A~`, `A3`, `3*A`, `[A,B]`, `[A:B]`, `<A>B`
/// and permutation cycles such as `(+ubr,bdr,dfr,fur)`. `.` is a no-op;
/// `//` and `/* */` start comments.
#[derive(Debug, Clone)]
pub struct DefaultNotation {
    layer_count: usize,
    tokens: IndexMap<SmolStr, SymbolSet>,
    moves: FxHashMap<SmolStr, MoveNode>,
    syntax: FxHashMap<Symbol, Vec<Syntax>>,
    macros: IndexMap<SmolStr, String>,
    whitespace: Vec<char>,
    line_comment: Option<String>,
    block_comment: Option<(String, String)>,
}

impl DefaultNotation {
    pub fn new(layer_count: usize) -> Result<Self, CubeError> {
        if !(MIN_LAYER_COUNT..=MAX_LAYER_COUNT).contains(&layer_count) {
            return Err(CubeError::LayerCountOutOfRange(layer_count));
        }
        let mut notation = Self {
            layer_count,
            tokens: IndexMap::new(),
            moves: FxHashMap::default(),
            syntax: DEFAULT_SYNTAX
                .iter()
                .map(|&(construct, placements)| (construct, placements.to_vec()))
                .collect(),
            macros: IndexMap::new(),
            whitespace: DEFAULT_WHITESPACE.to_vec(),
            line_comment: Some("//".to_string()),
            block_comment: Some(("/*".to_string(), "*/".to_string())),
        };

        for (token, symbols) in OPERATOR_TOKENS {
            for &symbol in symbols {
                notation.add_symbol(token, symbol);
            }
        }
        for face in Face::ALL {
            let lower = face.letter();
            let upper = lower.to_ascii_uppercase();
            notation.add_symbol(&lower.to_string(), Symbol::for_face(face));
            notation.add_symbol(&upper.to_string(), Symbol::for_face(face));
            for (prefix, depths) in face_moves(layer_count) {
                let mask = depths
                    .iter()
                    .fold(0u32, |mask, &depth| mask | 1 << layer_index(face, depth, layer_count));
                for (suffix, angle) in ANGLE_SUFFIXES {
                    let angle = if face.is_positive() { angle } else { -angle };
                    // masks are never empty and angles never zero here
                    if let Ok(m) = MoveNode::new(face.axis(), mask, angle) {
                        notation.add_move(&format!("{prefix}{upper}{suffix}"), m);
                    }
                }
            }
        }
        Ok(notation)
    }

    /// Add a meaning to a token
    pub fn with_token(mut self, token: &str, symbol: Symbol) -> Self {
        self.add_symbol(token, symbol);
        self
    }

    /// Make `token` a move token.
    ///
    /// Fails when the move selects a layer this cube does not have.
    pub fn with_move(mut self, token: &str, m: MoveNode) -> Result<Self, AstError> {
        if u64::from(m.layer_mask()) >= 1u64 << self.layer_count {
            return Err(AstError::Part(CubeError::InvalidLayerMask {
                mask: m.layer_mask(),
                layer_count: self.layer_count,
            }));
        }
        self.add_move(token, m);
        Ok(self)
    }

    /// Replace the placements a construct may be written with
    pub fn with_syntax(mut self, construct: Symbol, placements: &[Syntax]) -> Self {
        self.syntax.insert(construct, placements.to_vec());
        self
    }

    /// Make `name` a macro token expanding to `text`
    pub fn with_macro(mut self, name: &str, text: &str) -> Self {
        self.add_symbol(name, Symbol::Macro);
        self.macros.insert(SmolStr::new(name), text.to_string());
        self
    }

    /// Forget a token entirely
    pub fn without_token(mut self, token: &str) -> Self {
        self.tokens.shift_remove(token);
        self.moves.remove(token);
        self.macros.shift_remove(token);
        self
    }

    /// Remove one meaning from every token; tokens left without meaning go
    pub fn without_symbol(mut self, symbol: Symbol) -> Self {
        for set in self.tokens.values_mut() {
            *set = set.without(symbol);
        }
        self.tokens.retain(|_, set| !set.is_empty());
        if symbol == Symbol::Move {
            self.moves.clear();
        }
        if symbol == Symbol::Macro {
            self.macros.clear();
        }
        if symbol.is_construct() {
            self.syntax.remove(&symbol);
        }
        self
    }

    pub fn with_whitespace(mut self, whitespace: &[char]) -> Self {
        self.whitespace = whitespace.to_vec();
        self
    }

    pub fn with_line_comment(mut self, start: Option<&str>) -> Self {
        self.line_comment = start.map(str::to_string);
        self
    }

    pub fn with_block_comment(mut self, delimiters: Option<(&str, &str)>) -> Self {
        self.block_comment = delimiters.map(|(start, end)| (start.to_string(), end.to_string()));
        self
    }

    pub fn macros(&self) -> impl Iterator<Item = (&str, &str)> {
        self.macros.iter().map(|(name, text)| (name.as_str(), text.as_str()))
    }

    fn add_symbol(&mut self, token: &str, symbol: Symbol) {
        if token.is_empty() {
            return;
        }
        self.tokens.entry(SmolStr::new(token)).or_default().insert(symbol);
    }

    fn add_move(&mut self, token: &str, m: MoveNode) {
        self.add_symbol(token, Symbol::Move);
        self.moves.insert(SmolStr::new(token), m);
    }
}

impl Notation for DefaultNotation {
    fn layer_count(&self) -> usize {
        self.layer_count
    }

    fn symbols(&self, token: &str) -> SymbolSet {
        self.tokens.get(token).copied().unwrap_or_default()
    }

    fn is_syntax(&self, construct: Symbol, syntax: Syntax) -> bool {
        self.syntax
            .get(&construct)
            .is_some_and(|placements| placements.contains(&syntax))
    }

    fn is_supported(&self, symbol: Symbol) -> bool {
        if symbol.is_construct() {
            self.syntax.get(&symbol).is_some_and(|placements| !placements.is_empty())
        } else {
            self.tokens.values().any(|set| set.contains(symbol))
        }
    }

    fn macro_text(&self, name: &str) -> Option<&str> {
        self.macros.get(name).map(String::as_str)
    }

    fn move_for(&self, token: &str) -> Option<MoveNode> {
        self.moves.get(token).copied()
    }

    fn keywords(&self) -> Vec<&str> {
        self.tokens.keys().map(SmolStr::as_str).collect()
    }

    fn token_for(&self, symbol: Symbol) -> Option<&str> {
        self.tokens
            .iter()
            .find(|(_, set)| set.contains(symbol))
            .map(|(token, _)| token.as_str())
    }

    fn whitespace(&self) -> &[char] {
        &self.whitespace
    }

    fn line_comment(&self) -> Option<&str> {
        self.line_comment.as_deref()
    }

    fn block_comment(&self) -> Option<(&str, &str)> {
        self.block_comment
            .as_ref()
            .map(|(start, end)| (start.as_str(), end.as_str()))
    }
}

/// Move prefixes with the layers they turn, as 1-based depths from the face
fn face_moves(layer_count: usize) -> Vec<(String, Vec<usize>)> {
    let n = layer_count;
    let mut moves = vec![
        (String::new(), vec![1]),
        ("S".to_string(), vec![1, n]),
        ("C".to_string(), (1..=n).collect()),
    ];
    if n >= 3 {
        moves.push(("M".to_string(), (2..n).collect()));
        moves.push(("T".to_string(), vec![1, 2]));
        moves.push(("W".to_string(), (1..n).collect()));
    }
    for k in 1..n {
        moves.push((format!("T{k}"), (1..=k).collect()));
    }
    for k in 1..=n {
        moves.push((format!("N{k}"), vec![k]));
    }
    moves
}

/// Layer index, counted from the negative face, of the `depth`-th layer
/// seen from `face`
fn layer_index(face: Face, depth: usize, layer_count: usize) -> usize {
    if face.is_positive() {
        layer_count - depth
    } else {
        depth - 1
    }
}
