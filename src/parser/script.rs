//! Backtracking recursive-descent parser for move scripts
//!
//! A script is a sequence of statements. A statement is one primary
//! construct wrapped by any prefix operators and followed by any suffixes:
//!
//! ```text
//! statement := prefix* primary suffix*
//! prefix    := inversion | reflection | count ['*'] | permutation sign
//! primary   := move | nop | macro | compound | permutation
//! suffix    := inversion | reflection | count | '*' count
//!            | begin sequence end          (postcircumfix binary)
//!            | delimiter statement         (infix binary)
//! ```
//!
//! Which tokens play which role comes from the [`Notation`]. When a token can
//! start more than one construct the parser tries them in rank order,
//! restoring the tokenizer and the arena after each failed attempt, and
//! reports the failure that got furthest if none succeeds.

use std::sync::Arc;

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::errors::{ErrorCode, ParseContext, ParseError, RelatedInfo};
use super::notation::Notation;
use super::symbol::{Symbol, Syntax, SymbolSet};
use super::tokenizer::{LexerConfig, Token, TokenKind, Tokenizer};
use crate::ast::{
    Ast, AstBuilder, AstError, NodeId, NodeKind, PermutationCycle, PermutationItem,
    PermutationSign,
};
use crate::cube::{CubeError, Face, Geometry, PartType};

/// Default limit on nested macro expansions
pub const DEFAULT_MAX_MACRO_DEPTH: usize = 32;

/// Default limit on statements nested inside one another, macro bodies
/// included
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

/// Parses scripts written in one notation.
///
/// The keyword table is built once and reused for every script and every
/// macro body.
pub struct ScriptParser<'n, N: Notation + ?Sized> {
    notation: &'n N,
    lexer: LexerConfig,
    max_macro_depth: usize,
    max_nesting_depth: usize,
}

impl<'n, N: Notation + ?Sized> ScriptParser<'n, N> {
    pub fn new(notation: &'n N) -> Self {
        Self {
            notation,
            lexer: LexerConfig::from_notation(notation),
            max_macro_depth: DEFAULT_MAX_MACRO_DEPTH,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    pub fn with_max_macro_depth(mut self, depth: usize) -> Self {
        self.max_macro_depth = depth;
        self
    }

    /// Limit how deeply statements may nest before parsing fails with E0203
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    pub fn notation(&self) -> &'n N {
        self.notation
    }

    /// Parse a whole script into an [`Ast`] rooted at a sequence node
    pub fn parse(&self, text: &str) -> Result<Ast, ParseError> {
        tracing::debug!(len = text.len(), "parsing script");
        let mut session = Session {
            notation: self.notation,
            lexer: &self.lexer,
            arena: AstBuilder::new(),
            depth: 0,
            max_depth: self.max_macro_depth,
            nesting: 0,
            max_nesting: self.max_nesting_depth,
            geometry: None,
        };
        let mut tz = Tokenizer::new(text, &self.lexer);
        let children = session.parse_script(&mut tz, ParseContext::Script)?;
        let root = session
            .arena
            .push(NodeKind::Sequence(children), span(0, text.len()));
        let ast = session.arena.finish(root, self.notation.layer_count());
        tracing::debug!(nodes = ast.nodes().len(), "parsed script");
        Ok(ast)
    }
}

/// Ways a statement can begin, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Start {
    Move,
    Nop,
    Macro,
    Compound(SymbolSet),
    Permutation,
    SignedPermutation,
    InversionPrefix,
    ReflectionPrefix,
    RepetitionPrefix,
}

struct Session<'p, N: Notation + ?Sized> {
    notation: &'p N,
    lexer: &'p LexerConfig,
    arena: AstBuilder,
    depth: usize,
    max_depth: usize,
    nesting: usize,
    max_nesting: usize,
    geometry: Option<Arc<Geometry>>,
}

impl<'p, N: Notation + ?Sized> Session<'p, N> {
    // =========================================================================
    // Sequences and statements
    // =========================================================================

    /// Statements up to the end of input, which must be reached
    fn parse_script(
        &mut self,
        tz: &mut Tokenizer<'_>,
        context: ParseContext,
    ) -> Result<Vec<NodeId>, ParseError> {
        let children = self.parse_sequence(tz, context, SymbolSet::EMPTY)?;
        let token = tz.next_token();
        if !token.is_eof() {
            return Err(ParseError::unexpected(token.text, token.range, context));
        }
        Ok(children)
    }

    /// Statements up to end of input or a token carrying one of `stop`
    fn parse_sequence(
        &mut self,
        tz: &mut Tokenizer<'_>,
        context: ParseContext,
        stop: SymbolSet,
    ) -> Result<Vec<NodeId>, ParseError> {
        let mut children = Vec::new();
        loop {
            let token = tz.peek();
            if token.is_eof() || self.symbols(&token).intersects(stop) {
                return Ok(children);
            }
            children.push(self.parse_statement(tz, context)?);
        }
    }

    fn parse_statement(
        &mut self,
        tz: &mut Tokenizer<'_>,
        context: ParseContext,
    ) -> Result<NodeId, ParseError> {
        let token = tz.peek();
        if token.is_eof() {
            return Err(ParseError::unexpected("", token.range, context));
        }
        if self.nesting >= self.max_nesting {
            return Err(ParseError::new(
                format!("statements nested more than {} levels deep", self.max_nesting),
                token.range,
                ErrorCode::E0203,
            ));
        }
        self.nesting += 1;
        let result = self.parse_nested_statement(tz, token, context);
        self.nesting -= 1;
        result
    }

    fn parse_nested_statement(
        &mut self,
        tz: &mut Tokenizer<'_>,
        token: Token<'_>,
        context: ParseContext,
    ) -> Result<NodeId, ParseError> {
        let starts = self.start_candidates(&token);
        let primary = match starts.as_slice() {
            [] => {
                let err = ParseError::unexpected(token.text, token.range, context);
                return Err(match token.kind {
                    TokenKind::Word => err.with_hint(format!("'{}' is not a move or macro", token.text)),
                    _ => err,
                });
            }
            [start] => self.parse_start(tz, *start, context)?,
            _ => self.parse_alternatives(tz, &starts, context)?,
        };
        self.parse_suffixes(tz, primary, context)
    }

    /// Try each way the next token can start a statement
    fn parse_alternatives(
        &mut self,
        tz: &mut Tokenizer<'_>,
        starts: &[Start],
        context: ParseContext,
    ) -> Result<NodeId, ParseError> {
        let checkpoint = tz.checkpoint();
        let arena_len = self.arena.len();
        let mut furthest: Option<ParseError> = None;
        for &start in starts {
            tracing::trace!(?start, offset = tz.end_position(), "trying alternative");
            match self.parse_start(tz, start, context) {
                Ok(id) => return Ok(id),
                Err(err) => {
                    tracing::trace!(?start, code = %err.code, end = err.end(), "alternative failed");
                    tz.restore(checkpoint);
                    self.arena.truncate(arena_len);
                    if furthest.as_ref().is_none_or(|best| err.end() > best.end()) {
                        furthest = Some(err);
                    }
                }
            }
        }
        let token = tz.peek();
        Err(furthest.unwrap_or_else(|| ParseError::unexpected(token.text, token.range, context)))
    }

    fn start_candidates(&self, token: &Token<'_>) -> Vec<Start> {
        let mut starts = Vec::new();
        if token.kind == TokenKind::Number {
            if self.supports(Symbol::Repetition, Syntax::Prefix)
                || self.supports(Symbol::Repetition, Syntax::Preinfix)
            {
                starts.push(Start::RepetitionPrefix);
            }
            return starts;
        }
        let symbols = self.symbols(token);
        if symbols.contains(Symbol::Move) && self.notation.move_for(token.text).is_some() {
            starts.push(Start::Move);
        }
        if symbols.contains(Symbol::Nop) {
            starts.push(Start::Nop);
        }
        if symbols.contains(Symbol::Macro) {
            starts.push(Start::Macro);
        }
        let compounds: SymbolSet = Symbol::COMPOUNDS
            .into_iter()
            .filter(|&construct| {
                construct.begin().is_some_and(|begin| symbols.contains(begin))
                    && (self.supports(construct, Syntax::Circumfix)
                        || (construct.is_binary() && self.supports(construct, Syntax::Precircumfix)))
            })
            .collect();
        if !compounds.is_empty() {
            starts.push(Start::Compound(compounds));
        }
        if symbols.contains(Symbol::PermutationBegin) && self.notation.is_supported(Symbol::Permutation) {
            starts.push(Start::Permutation);
        }
        if sign_of(symbols).is_some() && self.supports(Symbol::Permutation, Syntax::Prefix) {
            starts.push(Start::SignedPermutation);
        }
        if symbols.contains(Symbol::InversionOperator) && self.supports(Symbol::Inversion, Syntax::Prefix) {
            starts.push(Start::InversionPrefix);
        }
        if symbols.contains(Symbol::ReflectionOperator) && self.supports(Symbol::Reflection, Syntax::Prefix) {
            starts.push(Start::ReflectionPrefix);
        }
        starts
    }

    fn parse_start(
        &mut self,
        tz: &mut Tokenizer<'_>,
        start: Start,
        context: ParseContext,
    ) -> Result<NodeId, ParseError> {
        match start {
            Start::Move => {
                let token = tz.next_token();
                match self.notation.move_for(token.text) {
                    Some(m) => Ok(self.arena.push(NodeKind::Move(m), token.range)),
                    None => Err(ParseError::unexpected(token.text, token.range, context)),
                }
            }
            Start::Nop => {
                let token = tz.next_token();
                Ok(self.arena.push(NodeKind::Nop, token.range))
            }
            Start::Macro => self.parse_macro(tz, context),
            Start::Compound(candidates) => self.parse_compound(tz, candidates),
            Start::Permutation => self.parse_permutation(tz, None),
            Start::SignedPermutation => {
                let token = tz.next_token();
                let sign = sign_of(self.symbols(&token)).unwrap_or_default();
                let next = tz.peek();
                if !self.symbols(&next).contains(Symbol::PermutationBegin) {
                    tz.next_token();
                    return Err(ParseError::unexpected(next.text, next.range, ParseContext::Permutation));
                }
                self.parse_permutation(tz, Some((sign, token.range)))
            }
            Start::InversionPrefix | Start::ReflectionPrefix => {
                let operator = tz.next_token();
                let operand = self.parse_operand(tz, operator.range)?;
                let range = self.cover(operator.range, operand);
                let kind = if start == Start::InversionPrefix {
                    NodeKind::Inversion(vec![operand])
                } else {
                    NodeKind::Reflection(vec![operand])
                };
                Ok(self.arena.push(kind, range))
            }
            Start::RepetitionPrefix => {
                let number = tz.next_token();
                let count = repeat_count(&number)?;
                let next = tz.peek();
                let infix = self.symbols(&next).contains(Symbol::RepetitionOperator)
                    && self.supports(Symbol::Repetition, Syntax::Preinfix);
                if infix {
                    tz.next_token();
                } else if !self.supports(Symbol::Repetition, Syntax::Prefix) {
                    tz.next_token();
                    return Err(ParseError::unexpected(next.text, next.range, ParseContext::Operand)
                        .with_hint(self.hint_for(Symbol::RepetitionOperator)));
                }
                let operand = self.parse_operand(tz, number.range)?;
                let range = self.cover(number.range, operand);
                Ok(self.arena.push(
                    NodeKind::Repetition {
                        count,
                        children: vec![operand],
                    },
                    range,
                ))
            }
        }
    }

    /// Statement following a prefix operator
    fn parse_operand(&mut self, tz: &mut Tokenizer<'_>, operator: TextRange) -> Result<NodeId, ParseError> {
        let next = tz.peek();
        if next.is_eof() {
            return Err(ParseError::new(
                "missing operand at end of input",
                TextRange::new(operator.start(), next.range.end()),
                ErrorCode::E0202,
            ));
        }
        self.parse_statement(tz, ParseContext::Operand)
    }

    fn parse_suffixes(
        &mut self,
        tz: &mut Tokenizer<'_>,
        mut node: NodeId,
        context: ParseContext,
    ) -> Result<NodeId, ParseError> {
        loop {
            let checkpoint = tz.checkpoint();
            let token = tz.next_token();
            if token.is_eof() {
                tz.restore(checkpoint);
                return Ok(node);
            }
            let symbols = self.symbols(&token);
            let start = self.arena.range(node).map_or(token.range.start(), |r| r.start());
            let through = TextRange::new(start, token.range.end());

            if symbols.contains(Symbol::InversionOperator) && self.supports(Symbol::Inversion, Syntax::Suffix) {
                node = self.arena.push(NodeKind::Inversion(vec![node]), through);
                continue;
            }
            if symbols.contains(Symbol::ReflectionOperator) && self.supports(Symbol::Reflection, Syntax::Suffix) {
                node = self.arena.push(NodeKind::Reflection(vec![node]), through);
                continue;
            }
            if token.kind == TokenKind::Number && self.supports(Symbol::Repetition, Syntax::Suffix) {
                // `R 3*U`: the count belongs to the next statement
                let next = tz.peek();
                if self.symbols(&next).contains(Symbol::RepetitionOperator)
                    && self.supports(Symbol::Repetition, Syntax::Preinfix)
                {
                    tz.restore(checkpoint);
                    return Ok(node);
                }
                let count = repeat_count(&token)?;
                node = self.arena.push(
                    NodeKind::Repetition {
                        count,
                        children: vec![node],
                    },
                    through,
                );
                continue;
            }
            if symbols.contains(Symbol::RepetitionOperator) && self.supports(Symbol::Repetition, Syntax::Postinfix) {
                let number = tz.next_token();
                if number.kind != TokenKind::Number {
                    return Err(ParseError::unexpected(number.text, number.range, context)
                        .with_hint("expected a repetition count"));
                }
                let count = repeat_count(&number)?;
                node = self.arena.push(
                    NodeKind::Repetition {
                        count,
                        children: vec![node],
                    },
                    TextRange::new(start, number.range.end()),
                );
                continue;
            }

            let postcircumfix: Vec<Symbol> = binary_constructs()
                .filter(|&c| {
                    c.begin().is_some_and(|b| symbols.contains(b)) && self.supports(c, Syntax::Postcircumfix)
                })
                .collect();
            if !postcircumfix.is_empty() {
                node = self.parse_postcircumfix(tz, node, token, postcircumfix)?;
                continue;
            }

            let infix: Vec<Symbol> = binary_constructs()
                .filter(|&c| {
                    c.delimiter().is_some_and(|d| symbols.contains(d))
                        && (self.supports(c, Syntax::Preinfix) || self.supports(c, Syntax::Postinfix))
                })
                .collect();
            match infix.as_slice() {
                [] => {
                    tz.restore(checkpoint);
                    return Ok(node);
                }
                [construct] => {
                    let operand = self.parse_operand(tz, token.range)?;
                    let first = self.wrap(vec![node]);
                    let second = self.wrap(vec![operand]);
                    let range = self.cover(TextRange::new(start, token.range.end()), operand);
                    node = self.arena.push(binary_kind(*construct, first, second), range);
                }
                _ => return Err(ambiguous(&infix, through)),
            }
        }
    }

    /// `A begin B end`
    fn parse_postcircumfix(
        &mut self,
        tz: &mut Tokenizer<'_>,
        first: NodeId,
        begin: Token<'_>,
        mut candidates: Vec<Symbol>,
    ) -> Result<NodeId, ParseError> {
        let stop: SymbolSet = candidates.iter().filter_map(|c| c.end()).collect();
        let context = compound_context(&candidates);
        let second = self.parse_sequence(tz, context, stop)?;
        let end = tz.next_token();
        if end.is_eof() {
            return Err(self.unclosed(&candidates, begin, tz.text().len()));
        }
        let symbols = self.symbols(&end);
        candidates.retain(|c| c.end().is_some_and(|e| symbols.contains(e)));
        let construct = match candidates.as_slice() {
            [construct] => *construct,
            [] => return Err(ParseError::unexpected(end.text, end.range, context)),
            _ => return Err(ambiguous(&candidates, TextRange::new(begin.range.start(), end.range.end()))),
        };
        let start = self.arena.range(first).map_or(begin.range.start(), |r| r.start());
        let first = self.wrap(vec![first]);
        let second = self.wrap(second);
        Ok(self.arena.push(
            binary_kind(construct, first, second),
            TextRange::new(start, end.range.end()),
        ))
    }

    // =========================================================================
    // Bracketed constructs
    // =========================================================================

    /// `begin A end`, `begin A delimiter B end` or `begin A end B`, with the
    /// construct narrowed down as delimiter and end tokens arrive
    fn parse_compound(
        &mut self,
        tz: &mut Tokenizer<'_>,
        candidates: SymbolSet,
    ) -> Result<NodeId, ParseError> {
        let begin = tz.next_token();
        let mut candidates: Vec<Symbol> = candidates.iter().collect();

        let mut stop = SymbolSet::EMPTY;
        for &c in &candidates {
            if let Some(end) = c.end() {
                stop.insert(end);
            }
            if let Some(delimiter) = c.delimiter().filter(|_| self.supports(c, Syntax::Circumfix)) {
                stop.insert(delimiter);
            }
        }
        let inner = compound_context(&candidates);
        let first = self.parse_sequence(tz, inner, stop)?;

        let mut token = tz.next_token();
        if token.is_eof() {
            return Err(self.unclosed(&candidates, begin, tz.text().len()));
        }
        let mut symbols = self.symbols(&token);

        let delimited: Vec<Symbol> = candidates
            .iter()
            .copied()
            .filter(|&c| {
                c.is_binary()
                    && self.supports(c, Syntax::Circumfix)
                    && c.delimiter().is_some_and(|d| symbols.contains(d))
            })
            .collect();
        let mut second = None;
        if !delimited.is_empty() {
            candidates = delimited;
            let stop: SymbolSet = candidates.iter().filter_map(|c| c.end()).collect();
            let inner = compound_context(&candidates);
            second = Some((token.range, self.parse_sequence(tz, inner, stop)?));
            token = tz.next_token();
            if token.is_eof() {
                return Err(self.unclosed(&candidates, begin, tz.text().len()));
            }
            symbols = self.symbols(&token);
        }

        candidates.retain(|&c| {
            c.end().is_some_and(|e| symbols.contains(e))
                && match second {
                    Some(_) => true,
                    None if c.is_binary() => self.supports(c, Syntax::Precircumfix),
                    None => self.supports(c, Syntax::Circumfix),
                }
        });
        let construct = match candidates.as_slice() {
            [construct] => *construct,
            [] => {
                return Err(ParseError::unexpected(token.text, token.range, inner));
            }
            _ => {
                return Err(ambiguous(
                    &candidates,
                    TextRange::new(begin.range.start(), token.range.end()),
                ));
            }
        };
        let closed = TextRange::new(begin.range.start(), token.range.end());

        let node = match (construct, second) {
            (Symbol::Grouping, None) => self.arena.push(NodeKind::Grouping(first), closed),
            (Symbol::Inversion, None) => self.arena.push(NodeKind::Inversion(first), closed),
            (Symbol::Reflection, None) => self.arena.push(NodeKind::Reflection(first), closed),
            (_, Some((_, second))) => {
                let first = self.wrap(first);
                let second = self.wrap(second);
                self.arena.push(binary_kind(construct, first, second), closed)
            }
            (_, None) => {
                // `<A>B`: the second operand is the next statement
                let next = tz.peek();
                if next.is_eof() || self.symbols(&next).intersects(self.closing_symbols()) {
                    return Err(ParseError::new(
                        format!("missing second operand of {}", construct.name()),
                        TextRange::new(begin.range.start(), next.range.end()),
                        ErrorCode::E0202,
                    ));
                }
                let operand = self.parse_statement(tz, ParseContext::Operand)?;
                let range = self.cover(closed, operand);
                let first = self.wrap(first);
                let second = self.wrap(vec![operand]);
                self.arena.push(binary_kind(construct, first, second), range)
            }
        };
        Ok(node)
    }

    fn unclosed(&self, candidates: &[Symbol], begin: Token<'_>, len: usize) -> ParseError {
        let names: Vec<&str> = candidates.iter().map(|c| c.name()).collect();
        let mut err = ParseError::new(
            format!("unclosed '{}' ({})", begin.text, names.join(" or ")),
            TextRange::new(begin.range.start(), TextSize::new(len as u32)),
            ErrorCode::E0201,
        )
        .with_related(RelatedInfo::new("opened here", begin.range));
        if let Some(end) = candidates.first().and_then(|c| c.end()) {
            err = err.with_hint(self.hint_for(end));
        }
        err
    }

    // =========================================================================
    // Permutation cycles
    // =========================================================================

    fn parse_permutation(
        &mut self,
        tz: &mut Tokenizer<'_>,
        prefix: Option<(PermutationSign, TextRange)>,
    ) -> Result<NodeId, ParseError> {
        let begin = tz.next_token();
        let start = prefix.map_or(begin.range.start(), |(_, range)| range.start());
        let geometry = self.geometry(begin.range)?;
        let layer_count = geometry.layer_count();

        let mut sign = prefix;
        let mut items: Vec<PermutationItem> = Vec::new();
        let mut faces: Vec<Face> = Vec::new();
        let mut number: Option<usize> = None;
        let mut item_start: Option<TextSize> = None;
        let mut item_end = begin.range.end();
        let context = ParseContext::Permutation;

        let end = loop {
            let token = tz.next_token();
            if token.is_eof() {
                return Err(self.unclosed(&[Symbol::Permutation], begin, tz.text().len()));
            }
            let symbols = self.symbols(&token);

            if let Some(found) = sign_of(symbols) {
                let leading = items.is_empty() && faces.is_empty();
                let allowed = (leading && self.supports(Symbol::Permutation, Syntax::Precircumfix))
                    || (!faces.is_empty()
                        && self.supports(Symbol::Permutation, Syntax::Postcircumfix)
                        && self.symbols(&tz.peek()).contains(Symbol::PermutationEnd));
                if !allowed {
                    return Err(ParseError::unexpected(token.text, token.range, context));
                }
                if sign.is_some() {
                    return Err(ParseError::new(
                        "a permutation cycle takes at most one sign",
                        token.range,
                        ErrorCode::E0406,
                    ));
                }
                sign = Some((found, token.range));
                continue;
            }

            if token.kind == TokenKind::Number {
                if faces.is_empty() || number.is_some() {
                    return Err(ParseError::unexpected(token.text, token.range, context));
                }
                if layer_count <= 3 {
                    return Err(ParseError::new(
                        format!("part numbers need more than 3 layers, this cube has {layer_count}"),
                        token.range,
                        ErrorCode::E0405,
                    ));
                }
                let value = token.number().ok_or_else(|| {
                    ParseError::new("part number out of range", token.range, ErrorCode::E0103)
                })?;
                number = Some(value as usize);
                item_end = token.range.end();
                continue;
            }

            if let Some(face) = symbols.faces().next() {
                if faces.len() == 3 || number.is_some() {
                    return Err(ParseError::unexpected(token.text, token.range, context));
                }
                item_start.get_or_insert(token.range.start());
                item_end = token.range.end();
                faces.push(face);
                continue;
            }

            let delimiter = symbols.contains(Symbol::PermutationDelimiter);
            let closing = symbols.contains(Symbol::PermutationEnd);
            if !delimiter && !closing {
                return Err(ParseError::unexpected(token.text, token.range, context));
            }
            let Some(first) = item_start.take() else {
                return Err(ParseError::unexpected(token.text, token.range, context)
                    .with_hint("expected a part such as 'ubr'"));
            };
            let item_range = TextRange::new(first, item_end);
            let item = PermutationItem::from_faces(&geometry, &faces, number)
                .map_err(|err| convert(err, item_range))?;
            if let Some(part_type) = items.first().map(|i| i.part_type) {
                if part_type != item.part_type {
                    return Err(ParseError::new(
                        format!("cannot mix {} and {} parts in one cycle", part_type, item.part_type),
                        item_range,
                        ErrorCode::E0403,
                    ));
                }
            }
            if items.iter().any(|other| other.location == item.location) {
                return Err(ParseError::new(
                    format!("part '{}' appears more than once", item.name),
                    item_range,
                    ErrorCode::E0402,
                ));
            }
            items.push(item);
            faces.clear();
            number = None;
            if closing {
                break token;
            }
        };

        let mut range = TextRange::new(start, end.range.end());
        if sign.is_none() && self.supports(Symbol::Permutation, Syntax::Suffix) {
            let checkpoint = tz.checkpoint();
            let next = tz.next_token();
            match sign_of(self.symbols(&next)) {
                Some(found) => {
                    sign = Some((found, next.range));
                    range = TextRange::new(start, next.range.end());
                }
                None => tz.restore(checkpoint),
            }
        }

        let (sign, sign_range) = sign.unwrap_or((PermutationSign::None, range));
        let part_type = items.first().map_or(PartType::Center, |i| i.part_type);
        let cycle = PermutationCycle::new(items, sign).map_err(|err| match err {
            AstError::IllegalSign { .. } => ParseError::new(
                format!("sign '{}' is not allowed for {} parts", sign.as_str(), part_type),
                range,
                ErrorCode::E0401,
            )
            .with_related(RelatedInfo::new("sign here", sign_range)),
            other => convert(other, range),
        })?;
        Ok(self.arena.push(NodeKind::Permutation(cycle), range))
    }

    fn geometry(&mut self, range: TextRange) -> Result<Arc<Geometry>, ParseError> {
        if let Some(geometry) = &self.geometry {
            return Ok(Arc::clone(geometry));
        }
        let geometry = Geometry::for_layer_count(self.notation.layer_count())
            .map_err(|err| ParseError::new(err.to_string(), range, ErrorCode::E0404))?;
        self.geometry = Some(Arc::clone(&geometry));
        Ok(geometry)
    }

    // =========================================================================
    // Macros
    // =========================================================================

    fn parse_macro(&mut self, tz: &mut Tokenizer<'_>, context: ParseContext) -> Result<NodeId, ParseError> {
        let token = tz.next_token();
        let notation = self.notation;
        let Some(text) = notation.macro_text(token.text) else {
            return Err(ParseError::unexpected(token.text, token.range, context));
        };
        if self.depth >= self.max_depth {
            return Err(ParseError::new(
                format!("macro '{}' nested more than {} levels deep", token.text, self.max_depth),
                token.range,
                ErrorCode::E0502,
            ));
        }
        tracing::debug!(name = token.text, depth = self.depth, "expanding macro");

        let first_node = self.arena.len();
        self.depth += 1;
        let lexer = self.lexer;
        let mut inner = Tokenizer::new(text, lexer);
        let result = self.parse_script(&mut inner, ParseContext::Macro);
        self.depth -= 1;
        let children = result.map_err(|cause| {
            ParseError::new(
                format!("error in macro '{}'", token.text),
                token.range,
                ErrorCode::E0501,
            )
            .with_cause(cause)
        })?;

        self.arena.set_ranges_from(first_node, token.range);
        Ok(self.arena.push(
            NodeKind::Macro {
                name: SmolStr::new(token.text),
                children,
            },
            token.range,
        ))
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn symbols(&self, token: &Token<'_>) -> SymbolSet {
        match token.kind {
            TokenKind::Keyword => self.notation.symbols(token.text),
            _ => SymbolSet::EMPTY,
        }
    }

    fn supports(&self, construct: Symbol, syntax: Syntax) -> bool {
        self.notation.is_supported(construct) && self.notation.is_syntax(construct, syntax)
    }

    /// End and delimiter tokens of every bracketed construct
    fn closing_symbols(&self) -> SymbolSet {
        Symbol::COMPOUNDS
            .into_iter()
            .chain([Symbol::Permutation])
            .flat_map(|c| [c.end(), c.delimiter()])
            .flatten()
            .collect()
    }

    fn hint_for(&self, symbol: Symbol) -> String {
        match self.notation.token_for(symbol) {
            Some(token) => format!("add '{token}'"),
            None => format!("add a {} token", symbol.name()),
        }
    }

    /// Sequence node around operand statements, covering their ranges
    fn wrap(&mut self, children: Vec<NodeId>) -> NodeId {
        let ranges: Vec<TextRange> = children.iter().filter_map(|&id| self.arena.range(id)).collect();
        let range = match (ranges.first(), ranges.last()) {
            (Some(first), Some(last)) => first.cover(*last),
            _ => TextRange::default(),
        };
        self.arena.push(NodeKind::Sequence(children), range)
    }

    fn cover(&self, range: TextRange, node: NodeId) -> TextRange {
        self.arena.range(node).map_or(range, |r| range.cover(r))
    }
}

fn span(start: usize, end: usize) -> TextRange {
    TextRange::new(TextSize::new(start as u32), TextSize::new(end as u32))
}

fn binary_constructs() -> impl Iterator<Item = Symbol> {
    Symbol::COMPOUNDS.into_iter().filter(|c| c.is_binary())
}

fn binary_kind(construct: Symbol, first: NodeId, second: NodeId) -> NodeKind {
    match construct {
        Symbol::Commutation => NodeKind::Commutation(vec![first, second]),
        Symbol::Conjugation => NodeKind::Conjugation(vec![first, second]),
        _ => NodeKind::Rotation(vec![first, second]),
    }
}

fn compound_context(candidates: &[Symbol]) -> ParseContext {
    match candidates {
        [Symbol::Grouping] => ParseContext::Grouping,
        [Symbol::Commutation] => ParseContext::Commutation,
        [Symbol::Conjugation] => ParseContext::Conjugation,
        [Symbol::Rotation] => ParseContext::Rotation,
        _ => ParseContext::Compound,
    }
}

fn ambiguous(candidates: &[Symbol], range: TextRange) -> ParseError {
    let names: Vec<&str> = candidates.iter().map(|c| c.name()).collect();
    ParseError::new(
        format!("ambiguous statement, could be {}", names.join(" or ")),
        range,
        ErrorCode::E0301,
    )
}

fn sign_of(symbols: SymbolSet) -> Option<PermutationSign> {
    if symbols.contains(Symbol::PermutationPlusPlus) {
        Some(PermutationSign::PlusPlus)
    } else if symbols.contains(Symbol::PermutationPlus) {
        Some(PermutationSign::Plus)
    } else if symbols.contains(Symbol::PermutationMinus) {
        Some(PermutationSign::Minus)
    } else {
        None
    }
}

fn repeat_count(token: &Token<'_>) -> Result<u32, ParseError> {
    token
        .number()
        .ok_or_else(|| ParseError::new("repetition count out of range", token.range, ErrorCode::E0103))
}

/// Map a construction error onto the span it came from
fn convert(err: AstError, range: TextRange) -> ParseError {
    let code = match &err {
        AstError::IllegalSign { .. } => ErrorCode::E0401,
        AstError::DuplicateLocation(_) => ErrorCode::E0402,
        AstError::MixedPartTypes { .. } => ErrorCode::E0403,
        AstError::Part(CubeError::NoSuchPart(_)) => ErrorCode::E0103,
        AstError::Part(_) => ErrorCode::E0404,
        _ => ErrorCode::E0101,
    };
    ParseError::new(err.to_string(), range, code)
}
