//! cycy source code parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser struct, errors, and the `parse` entry points
//! - [`ast`]: AST node definitions
//! - [`config`]: Parser limits
//!
//! # Supported Language
//!
//! A deliberately small C-like subset:
//! - Types: `int`, `char`, `char *`, `const char *`, and `void` for return types
//! - Statements: declarations, assignments, `while`, `return`, expression statements
//! - Expressions: `==` `!=` `<` `<=` `>` `>=` `+` `-` `*` `/` `%`, postfix `++`/`--`,
//!   calls, array indexing, `NULL`, integer/char/string literals
//! - No preprocessor, no `if`/`for`, no unary operators
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
pub mod config;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
