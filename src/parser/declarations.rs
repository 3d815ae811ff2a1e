//! Declaration parsing implementation
//!
//! This module handles the top level of a cycy program:
//!
//! - Function definitions: `type name(params) { ... }`
//! - Parameter lists: `(void)`, `()`, or `type name, ...`
//! - Type spellings, mapped onto the closed [`Type`] vocabulary
//!
//! # Grammar
//!
//! ```text
//! function_def ::= type identifier "(" params ")" block
//! params       ::= "void" | ( type identifier ( "," type identifier )* )?
//! type         ::= "const"? ( "int" | "char" | "void" ) "*"*
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse function definition: type name(params) { body }
    pub(crate) fn parse_function_definition(&mut self) -> Result<Function, ParseError> {
        let return_type = self.parse_type()?;
        let name = self.expect_identifier()?;
        log::trace!("parsing function '{}'", name);

        self.expect_token(&TokenKind::LParen, "'(' after function name")?;
        let params = self.parse_parameter_list()?;
        self.expect_token(&TokenKind::RParen, "')' after parameters")?;

        let body = self.parse_block("before function body")?;

        Ok(Function {
            return_type,
            name,
            params,
            body,
        })
    }

    /// Parse parameter list (without the surrounding parentheses)
    pub(crate) fn parse_parameter_list(&mut self) -> Result<Vec<VariableDeclaration>, ParseError> {
        let mut params = Vec::new();

        if self.check(&TokenKind::RParen) {
            return Ok(params);
        }

        // `(void)` means no parameters; `void x` and `void *p` fall through to
        // the type check below and are rejected there.
        if self.check(&TokenKind::Void)
            && !matches!(
                self.peek_ahead(1).map(|t| &t.kind),
                Some(TokenKind::Ident(_) | TokenKind::Star)
            )
        {
            self.advance();
            return Ok(params);
        }

        loop {
            let param_type = self.parse_value_type()?;
            let name = self.expect_identifier()?;
            params.push(VariableDeclaration::new(name, param_type));

            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }

        Ok(params)
    }

    /// Parse a type that can hold a value, rejecting `void`
    pub(crate) fn parse_value_type(&mut self) -> Result<Type, ParseError> {
        let location = self.current_location();
        match self.parse_type()? {
            Type::Void => Err(ParseError::InvalidType {
                spelling: Type::Void.spelling().to_string(),
                location,
            }),
            ty => Ok(ty),
        }
    }

    /// Parse type: [const] base_type [*]*
    pub(crate) fn parse_type(&mut self) -> Result<Type, ParseError> {
        let location = self.current_location();
        let is_const = self.match_token(&TokenKind::Const);

        let base = match &self.peek().kind {
            TokenKind::Int => "int",
            TokenKind::Char => "char",
            TokenKind::Void => "void",
            TokenKind::Ident(name) => {
                let spelling = if is_const {
                    format!("const {name}")
                } else {
                    name.clone()
                };
                return Err(ParseError::InvalidType { spelling, location });
            }
            // `const` with no base type after it
            _ if is_const => {
                return Err(ParseError::InvalidType {
                    spelling: "const".to_string(),
                    location,
                });
            }
            _ => return Err(self.unexpected("type")),
        };
        self.advance();

        let mut pointer_depth = 0;
        while self.match_token(&TokenKind::Star) {
            pointer_depth += 1;
        }

        match (is_const, base, pointer_depth) {
            (false, "int", 0) => Ok(Type::Int32),
            (false, "char", 0) => Ok(Type::Char),
            (false, "char", 1) => Ok(Type::CharPtr),
            (true, "char", 1) => Ok(Type::ConstCharPtr),
            (false, "void", 0) => Ok(Type::Void),
            _ => {
                let mut spelling = String::new();
                if is_const {
                    spelling.push_str("const ");
                }
                spelling.push_str(base);
                if pointer_depth > 0 {
                    spelling.push(' ');
                    spelling.push_str(&"*".repeat(pointer_depth));
                }
                Err(ParseError::InvalidType { spelling, location })
            }
        }
    }
}
