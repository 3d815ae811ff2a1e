//! Statement parsing implementation
//!
//! This module handles parsing of blocks and the statements inside them:
//!
//! - Variable declarations: `int x;`, `int x = 42;`
//! - Loops: `while (cond) { ... }`
//! - Returns: `return;`, `return expr;`
//! - Expression statements: assignments, calls, `i++`, any expression
//!
//! # Grammar
//!
//! ```text
//! block     ::= "{" statement* "}"
//! statement ::= while_stmt | return_stmt | var_decl | expr ";"
//! var_decl  ::= type identifier ( "=" expr )? ";"
//! ```
//!
//! A statement is a declaration exactly when it starts with a type keyword,
//! so the choice is made on the leading token alone.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a braced block, including the braces
    pub(crate) fn parse_block(&mut self, ctx: &str) -> Result<Block, ParseError> {
        self.expect_token(&TokenKind::LBrace, &format!("'{{' {ctx}"))?;
        self.enter()?;

        let mut statements = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        self.expect_token(&TokenKind::RBrace, "'}' to close block")?;
        self.leave();

        Ok(Block::new(statements))
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        if self.match_token(&TokenKind::While) {
            return self.parse_while_statement();
        }

        if self.match_token(&TokenKind::Return) {
            return self.parse_return_statement();
        }

        if self.is_type_keyword() {
            return self.parse_variable_declaration();
        }

        let expr = self.parse_expression()?;
        self.expect_token(&TokenKind::Semicolon, "';' after expression")?;
        Ok(expr)
    }

    /// Parse while loop: while (condition) { body }
    fn parse_while_statement(&mut self) -> Result<AstNode, ParseError> {
        self.expect_token(&TokenKind::LParen, "'(' after 'while'")?;
        let condition = self.parse_expression()?;
        self.expect_token(&TokenKind::RParen, "')' after while condition")?;

        let body = self.parse_block("before while body")?;

        Ok(AstNode::While {
            condition: Box::new(condition),
            body,
        })
    }

    /// Parse return statement: return [expr];
    fn parse_return_statement(&mut self) -> Result<AstNode, ParseError> {
        if self.match_token(&TokenKind::Semicolon) {
            return Ok(AstNode::ret(None));
        }

        let value = self.parse_expression()?;
        self.expect_token(&TokenKind::Semicolon, "';' after return value")?;

        Ok(AstNode::ret(Some(value)))
    }

    /// Parse variable declaration: type name [= expr];
    fn parse_variable_declaration(&mut self) -> Result<AstNode, ParseError> {
        let vtype = self.parse_value_type()?;
        let name = self.expect_identifier()?;

        let mut decl = VariableDeclaration::new(name, vtype);
        if self.match_token(&TokenKind::Eq) {
            decl = decl.with_value(self.parse_expression()?);
        }

        self.expect_token(&TokenKind::Semicolon, "';' after variable declaration")?;

        Ok(AstNode::VariableDeclaration(decl))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{parse, ParseError};

    fn body(source: &str) -> Result<Vec<AstNode>, ParseError> {
        let mut program = parse(&format!("int main(void) {{ {source} }}"))?;
        Ok(program.functions.remove(0).body.statements)
    }

    #[test]
    fn test_declarations() {
        assert_eq!(
            body("int i; int j = 0; char c = 'x'; const char *s = \"\";").unwrap(),
            vec![
                AstNode::VariableDeclaration(VariableDeclaration::new("i", Type::Int32)),
                AstNode::VariableDeclaration(
                    VariableDeclaration::new("j", Type::Int32).with_value(AstNode::int(0))
                ),
                AstNode::VariableDeclaration(
                    VariableDeclaration::new("c", Type::Char).with_value(AstNode::Char('x'))
                ),
                AstNode::VariableDeclaration(
                    VariableDeclaration::new("s", Type::ConstCharPtr)
                        .with_value(AstNode::Array(vec![AstNode::Char('\0')]))
                ),
            ]
        );
    }

    #[test]
    fn test_statement_order_preserved() {
        let statements = body("i = 1; f(); i++; return i;").unwrap();
        let kinds: Vec<_> = statements.iter().map(AstNode::kind_name).collect();
        assert_eq!(
            kinds,
            ["assignment", "function call", "postfix operation", "return statement"]
        );
    }

    #[test]
    fn test_nested_while() {
        assert_eq!(
            body("while (i) { while (j) { j++; } i = 0; }").unwrap(),
            vec![AstNode::While {
                condition: Box::new(AstNode::var("i")),
                body: Block::new(vec![
                    AstNode::While {
                        condition: Box::new(AstNode::var("j")),
                        body: Block::new(vec![AstNode::post(PostOp::Inc, AstNode::var("j"))]),
                    },
                    AstNode::assign(AstNode::var("i"), AstNode::int(0)),
                ]),
            }]
        );
    }

    #[test]
    fn test_empty_while_body_and_bare_return() {
        assert_eq!(
            body("while (1) { } return;").unwrap(),
            vec![
                AstNode::While {
                    condition: Box::new(AstNode::int(1)),
                    body: Block::default(),
                },
                AstNode::ret(None),
            ]
        );
    }

    #[test]
    fn test_statement_errors() {
        assert!(matches!(
            body("void v;"),
            Err(ParseError::InvalidType { ref spelling, .. }) if spelling == "void"
        ));
        assert!(matches!(
            body("const x = 1;"),
            Err(ParseError::InvalidType { ref spelling, .. }) if spelling == "const x"
        ));
        assert!(matches!(
            body("int = 3;"),
            Err(ParseError::UnexpectedToken { ref expected, .. }) if expected == "identifier"
        ));
        assert!(matches!(
            body("int i"),
            Err(ParseError::UnexpectedToken { ref expected, .. })
                if expected == "';' after variable declaration"
        ));
        assert!(matches!(
            body("while i { }"),
            Err(ParseError::UnexpectedToken { ref expected, .. }) if expected == "'(' after 'while'"
        ));
        assert!(matches!(
            body("while (i) i++;"),
            Err(ParseError::UnexpectedToken { ref expected, .. })
                if expected == "'{' before while body"
        ));
        assert!(matches!(
            body("f()"),
            Err(ParseError::UnexpectedToken { ref expected, .. })
                if expected == "';' after expression"
        ));
    }
}
