//! # Introduction
//!
//! cycy is the front end of a compiler for a small, statically-typed, C-like
//! language. It turns source text into an owned, immutable AST that later
//! stages (type checking, code generation, interpretation) consume read-only.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → Program
//! ```
//!
//! 1. [`parser::lexer`] — skips whitespace and comments, decodes literal
//!    escapes, and yields [`parser::lexer::Token`]s ending in `Eof`.
//! 2. [`parser::parse`] — recursive descent over the tokens, with precedence
//!    climbing for binary operators and string literals desugared into
//!    NUL-terminated character arrays.
//!
//! ```
//! use cycy::{parse, AstNode, Type};
//!
//! let program = parse("int main(void) { return puts(\"hi\"); }").unwrap();
//! let main = &program.functions[0];
//! assert_eq!(main.return_type, Type::Int32);
//! assert_eq!(
//!     main.body.statements[0],
//!     AstNode::ret(Some(AstNode::call("puts", vec![AstNode::string("hi")]))),
//! );
//! ```
//!
//! Every call owns its own tokens and tree; nothing is shared between parses.

pub mod parser;

pub use parser::ast::{
    AstNode, BinOp, Block, Function, PostOp, Program, SourceLocation, Type, VariableDeclaration,
};
pub use parser::config::ParserConfig;
pub use parser::lexer::LexError;
pub use parser::parse::{parse, parse_with_config, ParseError};
