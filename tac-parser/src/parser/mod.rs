pub mod ast;
pub mod error;
pub mod token;

use ast::stmt::Stmt;
use error::{kind, Error};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use tac_error::ErrorKind;
use std::ops::Range;

/// The maximum number of parentheses, unary operators, and right-associative operators that can
/// be nested inside each other. Each level of nesting costs a recursive call in the parser.
pub const MAX_NESTING: usize = 100;

/// The maximum height of a parsed expression tree. Later stages walk the tree recursively, so the
/// height is bounded even when the parser itself built the tree iteratively (as it does for long
/// chains of left-associative operators).
pub const MAX_HEIGHT: usize = 1000;

/// A high-level parser for the language. This is the type to use to parse an arbitrary piece of
/// code into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// How deeply the parser is currently nested in recursive constructs.
    nesting: usize,

    /// How many parentheses are currently open. Newlines are not significant inside parentheses.
    paren_depth: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
            nesting: 0,
            paren_depth: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the previous token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the beginning of the stream.
    pub fn prev_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor.checked_sub(1)?)
    }

    /// Returns true if the token does not affect parsing at the current position. Newlines are
    /// only significant outside of parentheses, where they separate statements.
    fn is_insignificant(&self, token: &Token) -> bool {
        token.is_whitespace() || (self.paren_depth > 0 && token.kind == TokenKind::NewLine)
    }

    /// Returns the next token to be parsed, then advances the cursor. Insignificant whitespace is
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if self.is_insignificant(token) {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Returns the kind of the next significant token without moving the cursor.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens[self.cursor..]
            .iter()
            .find(|token| !self.is_insignificant(token))
            .map(|token| token.kind)
    }

    /// Returns true if the next significant tokens have exactly the given kinds. The cursor is not
    /// moved.
    pub fn peek_is(&self, kinds: &[TokenKind]) -> bool {
        let mut upcoming = self.tokens[self.cursor..]
            .iter()
            .filter(|token| !self.is_insignificant(token));
        kinds.iter().all(|kind| upcoming.next().is_some_and(|token| token.kind == *kind))
    }

    /// Returns true if there are no significant tokens left.
    pub fn is_at_end(&self) -> bool {
        self.peek_kind().is_none()
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value. The cursor is restored if parsing fails.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Parses a value without consuming any tokens, whether or not parsing succeeds.
    pub fn peek<T: Parse>(&mut self) -> Result<T, Error> {
        let start = self.cursor;
        let result = T::parse(self);
        self.cursor = start;
        result
    }

    /// Runs the given parsing function one level deeper in the nesting, failing with
    /// [`kind::TooDeeplyNested`] once [`MAX_NESTING`] is exceeded.
    pub fn nested<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        if self.nesting >= MAX_NESTING {
            return Err(self.error(kind::TooDeeplyNested { limit: MAX_NESTING }));
        }

        self.nesting += 1;
        let result = f(self);
        self.nesting -= 1;
        result
    }

    /// Runs the given parsing function as if inside a pair of parentheses, where newlines are not
    /// significant.
    pub fn in_parens<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        self.paren_depth += 1;
        let result = f(self);
        self.paren_depth -= 1;
        result
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        if self.is_at_end() {
            Ok(value)
        } else {
            self.next_token()?;
            self.prev_cursor();
            Err(self.error(kind::ExpectedEof))
        }
    }

    /// Moves the cursor back onto the previously returned token.
    fn prev_cursor(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Parses a whole program: statements separated by newlines or semicolons. Empty statements
    /// are skipped. All the tokens must be consumed by the parser; if not, an error is returned.
    pub fn try_parse_full_many(&mut self) -> Result<Vec<Stmt>, Error> {
        let mut stmts = Vec::new();

        loop {
            while self.peek_kind().is_some_and(TokenKind::is_separator) {
                self.next_token()?;
            }
            if self.is_at_end() {
                break;
            }

            let stmt = self.try_parse::<Stmt>()?;
            if let Some(expr) = stmt.expr() {
                if expr.height() > MAX_HEIGHT {
                    return Err(Error::new(vec![stmt.span()], kind::TooDeeplyNested {
                        limit: MAX_HEIGHT,
                    }));
                }
            }
            stmts.push(stmt);

            match self.next_token() {
                Err(_) => break,
                Ok(token) if token.kind.is_separator() => continue,
                Ok(token) if token.kind == TokenKind::CloseParen => {
                    return Err(Error::new(vec![token.span], kind::UnclosedParenthesis {
                        opening: false,
                    }));
                },
                Ok(token) => {
                    return Err(Error::new(vec![token.span], kind::ExpectedEndOfStatement {
                        found: token.lexeme.to_owned(),
                    }));
                },
            }
        }

        Ok(stmts)
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// The binary / unary operation is left-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The binary / unary operation is right-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `a op (b op c)`. For unary
    /// operations, this means `op op a` is evaluated as `op (op a)` (the operators appear to the
    /// left of the operand).
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of bitwise or (`|`).
    BitOr,

    /// Precedence of bitwise xor (`^`).
    BitXor,

    /// Precedence of bitwise and (`&`).
    BitAnd,

    /// Precedence of bitshifts (`<<` and `>>`).
    Shift,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`), division (`/`), and modulo (`%`), which separate
    /// factors.
    Factor,

    /// Precedence of unary negation (`-`) and unary plus (`+`).
    Neg,

    /// Precedence of exponentiation (`**`).
    Exp,
}
