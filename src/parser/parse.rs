//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the [`parse`] entry points.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: function definitions, parameter lists, type spellings
//! - `statements`: blocks, `while`, `return`, declarations, expression statements
//! - `expressions`: precedence climbing for binary operators, postfix and primaries
//!
//! Every grammar decision is made on the current token (plus one token of
//! lookahead for `(void)`), so the parser never backtracks.

use crate::parser::ast::*;
use crate::parser::config::ParserConfig;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("{location}: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        location: SourceLocation,
    },

    #[error("{location}: invalid type '{spelling}'")]
    InvalidType {
        spelling: String,
        location: SourceLocation,
    },

    #[error("{location}: cannot assign to {target}")]
    InvalidAssignmentTarget {
        target: String,
        location: SourceLocation,
    },

    #[error("{location}: nesting deeper than {limit} levels")]
    NestingTooDeep {
        limit: usize,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lex(err) => err.location(),
            ParseError::UnexpectedToken { location, .. }
            | ParseError::InvalidType { location, .. }
            | ParseError::InvalidAssignmentTarget { location, .. }
            | ParseError::NestingTooDeep { location, .. } => *location,
        }
    }
}

/// Parse `source` into a [`Program`] with the default [`ParserConfig`].
pub fn parse(source: &str) -> Result<Program, ParseError> {
    parse_with_config(source, &ParserConfig::default())
}

/// Parse `source` into a [`Program`] using explicit limits.
pub fn parse_with_config(source: &str, config: &ParserConfig) -> Result<Program, ParseError> {
    let mut parser = Parser::with_config(source, *config)?;
    parser.parse_program()
}

/// Recursive descent parser for the cycy language
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    depth: usize,
    config: ParserConfig,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        Self::with_config(source, ParserConfig::default())
    }

    pub fn with_config(source: &str, config: ParserConfig) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
            depth: 0,
            config,
        })
    }

    /// Parse the entire program (top-level function definitions, in source order)
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            let function = self.parse_function_definition()?;
            program.functions.push(function);
        }

        log::debug!(
            "parsed {} function(s) from {} token(s)",
            program.functions.len(),
            self.tokens.len()
        );
        Ok(program)
    }

    // ===== Helper methods =====

    /// Type keywords that start a declaration. `void` is included so that a
    /// misplaced `void` reports an invalid type rather than a stray token.
    pub(crate) fn is_type_keyword(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Int | TokenKind::Char | TokenKind::Const | TokenKind::Void
        )
    }

    pub(crate) fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// The tokenizer guarantees a trailing `Eof`, and `advance` never moves past it.
    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    /// Build an `UnexpectedToken` error against the current token
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.peek().to_string(),
            location: self.current_location(),
        }
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: &TokenKind,
        expected: &str,
    ) -> Result<(), ParseError> {
        if self.match_token(kind) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if let TokenKind::Ident(name) = &self.peek().kind {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    /// Enter one level of block or expression nesting
    pub(crate) fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.config.max_nesting_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.config.max_nesting_depth,
                location: self.current_location(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn main_body(program: &Program) -> &[AstNode] {
        &program.functions[0].body.statements
    }

    #[test]
    fn test_parse_simple_function() {
        let mut parser = Parser::new("int main(void) { return 0; }").unwrap();
        let program = parser.parse_program().unwrap();

        assert_eq!(program.functions.len(), 1);
        let main = &program.functions[0];
        assert_eq!(main.name, "main");
        assert_eq!(main.return_type, Type::Int32);
        assert!(main.params.is_empty());
        assert_eq!(main.body.statements, vec![AstNode::ret(Some(AstNode::int(0)))]);
    }

    #[test]
    fn test_empty_source_is_empty_program() {
        assert_eq!(parse("").unwrap(), Program::new());
        assert_eq!(parse("  // nothing here\n").unwrap(), Program::new());
    }

    #[test]
    fn test_parse_is_deterministic() {
        let source = "int f(int a, char b) { while (a != 0) { a = a - 1; } return b; }";
        assert_eq!(parse(source).unwrap(), parse(source).unwrap());
    }

    #[test]
    fn test_lex_error_surfaces_through_parse() {
        let err = parse("int main(void) { return 'ab'; }").unwrap_err();
        assert!(matches!(err, ParseError::Lex(LexError::MultiCharLiteral { .. })));
        assert_eq!(err.location().column, 25);
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse("int main(void) { return 0 }").unwrap_err();
        match err {
            ParseError::UnexpectedToken {
                expected,
                found,
                location,
            } => {
                assert_eq!(expected, "';' after return value");
                assert_eq!(found, "'}'");
                assert_eq!(location.column, 27);
            }
            other => panic!("Expected UnexpectedToken, got {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_block() {
        let err = parse("int main(void) { return 0;").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { ref found, .. } if found == "end of input"
        ));
    }

    #[test]
    fn test_nesting_limit() {
        let config = ParserConfig::new().with_max_nesting_depth(8);
        let deep = format!("int main(void) {{ return {}1{}; }}", "(".repeat(20), ")".repeat(20));

        let err = parse_with_config(&deep, &config).unwrap_err();
        assert!(matches!(err, ParseError::NestingTooDeep { limit: 8, .. }));

        // The default limit comfortably covers it.
        let program = parse(&deep).unwrap();
        assert_eq!(main_body(&program), &[AstNode::ret(Some(AstNode::int(1)))]);
    }

    #[test]
    fn test_nested_blocks_count_toward_limit() {
        let config = ParserConfig::new().with_max_nesting_depth(3);
        let source = "int main(void) { while (1) { while (1) { while (1) { } } } }";
        let err = parse_with_config(source, &config).unwrap_err();
        assert!(matches!(err, ParseError::NestingTooDeep { limit: 3, .. }));
    }
}
