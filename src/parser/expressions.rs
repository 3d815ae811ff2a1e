//! Expression parsing implementation
//!
//! Binary operators are resolved by a single precedence-climbing routine
//! keyed on [`BinOp::precedence`]; everything tighter than a binary operator
//! is handled by recursive descent.
//!
//! # Precedence (low to high)
//!
//! | Level          | Operators            | Associativity |
//! |----------------|----------------------|---------------|
//! | assignment     | `=`                  | right         |
//! | equality       | `==` `!=`            | left          |
//! | relational     | `<` `<=` `>` `>=`    | left          |
//! | additive       | `+` `-`              | left          |
//! | multiplicative | `*` `/` `%`          | left          |
//! | postfix        | `++` `--`            | at most once  |
//! | primary        | literals, calls, `[]`, `( )` |       |
//!
//! String literals are desugared here into a NUL-terminated `Array` of `Char`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

/// Lowest binary precedence; climbing starts here.
const MIN_PRECEDENCE: u8 = 1;

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        self.enter()?;
        let expr = self.parse_assignment();
        self.leave();
        expr
    }

    /// Parse assignment (right-associative, lvalue target only)
    fn parse_assignment(&mut self) -> Result<AstNode, ParseError> {
        let location = self.current_location();
        let left = self.parse_binary(MIN_PRECEDENCE)?;

        if !self.match_token(&TokenKind::Eq) {
            return Ok(left);
        }

        if !left.is_lvalue() {
            return Err(ParseError::InvalidAssignmentTarget {
                target: left.kind_name().to_string(),
                location,
            });
        }

        let right = self.parse_expression()?;
        Ok(AstNode::assign(left, right))
    }

    /// Precedence climbing over the binary operator table
    fn parse_binary(&mut self, min_prec: u8) -> Result<AstNode, ParseError> {
        let mut left = self.parse_primary()?;

        while let Some(op) = self.binary_operator() {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.advance();

            // prec + 1 keeps equal-precedence operators left-associative
            let right = self.parse_binary(prec + 1)?;
            left = AstNode::binary(op, left, right);
        }

        Ok(left)
    }

    /// Binary operator at the current token, if any
    fn binary_operator(&self) -> Option<BinOp> {
        let op = match self.peek().kind {
            TokenKind::EqEq => BinOp::Eq,
            TokenKind::NotEq => BinOp::Ne,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::Le => BinOp::Le,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::Ge => BinOp::Ge,
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,
            TokenKind::Percent => BinOp::Mod,
            _ => return None,
        };
        Some(op)
    }

    /// Parse primary (literals, calls, indexing, variables, parenthesized expressions)
    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        let node = match &self.peek().kind {
            TokenKind::IntLiteral(n) => AstNode::Int32(*n),
            TokenKind::CharLiteral(c) => AstNode::Char(*c),
            TokenKind::StringLiteral(s) => AstNode::string(s),
            TokenKind::Null => AstNode::Null,
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                return self.parse_identifier_expression(name);
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_token(&TokenKind::RParen, "')' after expression")?;
                return Ok(expr);
            }
            _ => return Err(self.unexpected("expression")),
        };

        self.advance();
        Ok(node)
    }

    /// Identifier already consumed: call, indexing, or plain variable
    fn parse_identifier_expression(&mut self, name: String) -> Result<AstNode, ParseError> {
        if self.match_token(&TokenKind::LParen) {
            let args = self.parse_argument_list()?;
            self.expect_token(&TokenKind::RParen, "')' after function arguments")?;
            return Ok(AstNode::Call { name, args });
        }

        let mut expr = AstNode::Variable(name);
        while self.match_token(&TokenKind::LBracket) {
            let index = self.parse_expression()?;
            self.expect_token(&TokenKind::RBracket, "']' after array index")?;
            expr = AstNode::index(expr, index);
        }

        self.parse_postfix(expr)
    }

    /// At most one `++`/`--` after a variable or indexing primary
    fn parse_postfix(&mut self, expr: AstNode) -> Result<AstNode, ParseError> {
        let op = if self.match_token(&TokenKind::PlusPlus) {
            PostOp::Inc
        } else if self.match_token(&TokenKind::MinusMinus) {
            PostOp::Dec
        } else {
            return Ok(expr);
        };

        Ok(AstNode::post(op, expr))
    }

    /// Parse argument list: expr, expr, ...
    fn parse_argument_list(&mut self) -> Result<Vec<AstNode>, ParseError> {
        let mut args = Vec::new();

        if self.check(&TokenKind::RParen) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);

            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }

        Ok(args)
    }
}
