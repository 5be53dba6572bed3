//! Greedy tokenizer over a configurable keyword table
//!
//! Keywords come from the notation at runtime, so they are matched through a
//! [`KeywordTrie`]. Input that starts no keyword is classified with a small
//! logos lexer into numbers, words and single special characters.

use logos::Logos;
use text_size::{TextRange, TextSize};

use super::notation::Notation;
use super::trie::KeywordTrie;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A token of the notation
    Keyword,
    /// A run of decimal digits
    Number,
    /// A run of letters, digits and underscores that is no keyword
    Word,
    /// Any other single character
    Special,
    /// End of input; returned forever once reached
    Eof,
}

/// A token with its kind, text, and position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub range: TextRange,
}

impl Token<'_> {
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Value of a number token, `None` for other tokens or on overflow
    pub fn number(&self) -> Option<u32> {
        match self.kind {
            TokenKind::Number => self.text.parse().ok(),
            _ => None,
        }
    }

    pub fn start(&self) -> usize {
        usize::from(self.range.start())
    }

    pub fn end(&self) -> usize {
        usize::from(self.range.end())
    }
}

/// Fallback classification for text that starts no keyword
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum RawToken {
    #[regex(r"[0-9]+")]
    Number,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Word,
}

/// Lexical settings shared by every tokenizer of one notation
#[derive(Debug, Clone)]
pub struct LexerConfig {
    keywords: KeywordTrie,
    whitespace: Vec<char>,
    line_comment: Option<String>,
    block_comment: Option<(String, String)>,
}

impl LexerConfig {
    pub fn new(keywords: KeywordTrie, whitespace: impl IntoIterator<Item = char>) -> Self {
        Self {
            keywords,
            whitespace: whitespace.into_iter().collect(),
            line_comment: None,
            block_comment: None,
        }
    }

    pub fn with_line_comment(mut self, start: impl Into<String>) -> Self {
        self.line_comment = Some(start.into());
        self
    }

    pub fn with_block_comment(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.block_comment = Some((start.into(), end.into()));
        self
    }

    pub fn from_notation<N: Notation + ?Sized>(notation: &N) -> Self {
        let keywords: KeywordTrie = notation.keywords().into_iter().collect();
        let mut config = Self::new(keywords, notation.whitespace().iter().copied());
        if let Some(start) = notation.line_comment() {
            config = config.with_line_comment(start);
        }
        if let Some((start, end)) = notation.block_comment() {
            config = config.with_block_comment(start, end);
        }
        config
    }

    pub fn keywords(&self) -> &KeywordTrie {
        &self.keywords
    }
}

/// Saved tokenizer position for backtracking
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint<'a> {
    pos: usize,
    pushed_back: bool,
    last: Option<Token<'a>>,
}

pub struct Tokenizer<'a> {
    text: &'a str,
    config: &'a LexerConfig,
    pos: usize,
    pushed_back: bool,
    last: Option<Token<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str, config: &'a LexerConfig) -> Self {
        Self {
            text,
            config,
            pos: 0,
            pushed_back: false,
            last: None,
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn next_token(&mut self) -> Token<'a> {
        if self.pushed_back {
            if let Some(token) = self.last {
                self.pushed_back = false;
                return token;
            }
        }
        self.skip_trivia();
        let token = self.scan();
        self.pos = token.end();
        self.last = Some(token);
        token
    }

    /// Replay the last token on the next call to [`Tokenizer::next_token`].
    /// Only one token can be pushed back.
    pub fn push_back(&mut self) {
        if self.last.is_some() {
            self.pushed_back = true;
        }
    }

    /// Look at the next token without consuming it
    pub fn peek(&mut self) -> Token<'a> {
        let token = self.next_token();
        self.push_back();
        token
    }

    pub fn checkpoint(&self) -> Checkpoint<'a> {
        Checkpoint {
            pos: self.pos,
            pushed_back: self.pushed_back,
            last: self.last,
        }
    }

    pub fn restore(&mut self, checkpoint: Checkpoint<'a>) {
        self.pos = checkpoint.pos;
        self.pushed_back = checkpoint.pushed_back;
        self.last = checkpoint.last;
    }

    /// Start of the last produced token
    pub fn start_position(&self) -> usize {
        self.last.map_or(0, |token| token.start())
    }

    /// End (exclusive) of the last produced token
    pub fn end_position(&self) -> usize {
        self.last.map_or(0, |token| token.end())
    }

    fn skip_trivia(&mut self) {
        loop {
            let rest = &self.text[self.pos..];
            let trimmed = rest.trim_start_matches(|ch: char| self.config.whitespace.contains(&ch));
            self.pos += rest.len() - trimmed.len();
            let rest = trimmed;

            if let Some(start) = self.config.line_comment.as_deref() {
                if !start.is_empty() && rest.starts_with(start) {
                    self.pos += rest.find('\n').unwrap_or(rest.len());
                    continue;
                }
            }
            if let Some((start, end)) = &self.config.block_comment {
                if !start.is_empty() && rest.starts_with(start.as_str()) {
                    let body = &rest[start.len()..];
                    self.pos += match body.find(end.as_str()) {
                        Some(index) => start.len() + index + end.len(),
                        None => rest.len(),
                    };
                    continue;
                }
            }
            break;
        }
    }

    fn scan(&self) -> Token<'a> {
        let rest = &self.text[self.pos..];
        if rest.is_empty() {
            return self.token(TokenKind::Eof, 0);
        }
        if let Some(len) = self.config.keywords.longest_match(rest) {
            return self.token(TokenKind::Keyword, len);
        }
        let mut raw = RawToken::lexer(rest);
        match raw.next() {
            Some(Ok(RawToken::Number)) => self.token(TokenKind::Number, raw.span().end),
            Some(Ok(RawToken::Word)) => self.token(TokenKind::Word, raw.span().end),
            _ => {
                let len = rest.chars().next().map_or(0, char::len_utf8);
                self.token(TokenKind::Special, len)
            }
        }
    }

    fn token(&self, kind: TokenKind, len: usize) -> Token<'a> {
        let text = &self.text[self.pos..self.pos + len];
        Token {
            kind,
            text,
            range: TextRange::at(TextSize::new(self.pos as u32), TextSize::new(len as u32)),
        }
    }
}
