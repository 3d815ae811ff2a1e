// AST (Abstract Syntax Tree) definitions for the cycy front end

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    /// Byte offset from the start of the source (0-based)
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Semantic type tags recognised by the type parser.
///
/// The vocabulary is closed: a spelling that maps to none of these is a
/// [`ParseError::InvalidType`](crate::parser::parse::ParseError::InvalidType).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// `int`
    Int32,
    /// `char`
    Char,
    /// `char *`
    CharPtr,
    /// `const char *`
    ConstCharPtr,
    /// `void`, only valid as a function return type
    Void,
}

impl Type {
    /// Canonical C spelling of this type
    pub fn spelling(&self) -> &'static str {
        match self {
            Type::Int32 => "int",
            Type::Char => "char",
            Type::CharPtr => "char *",
            Type::ConstCharPtr => "const char *",
            Type::Void => "void",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    // Equality
    Eq,
    Ne,
    // Relational
    Lt,
    Le,
    Gt,
    Ge,
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinOp {
    /// Binding power used by the precedence-climbing loop. Higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            BinOp::Eq | BinOp::Ne => 1,
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => 2,
            BinOp::Add | BinOp::Sub => 3,
            BinOp::Mul | BinOp::Div | BinOp::Mod => 4,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Postfix mutation operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostOp {
    Inc, // x++
    Dec, // x--
}

impl PostOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            PostOp::Inc => "++",
            PostOp::Dec => "--",
        }
    }
}

impl fmt::Display for PostOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `TYPE name [= value]`, used both for locals and for function parameters.
///
/// Parameters never carry a value.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub name: String,
    pub vtype: Type,
    pub value: Option<Box<AstNode>>,
}

impl VariableDeclaration {
    pub fn new(name: impl Into<String>, vtype: Type) -> Self {
        Self {
            name: name.into(),
            vtype,
            value: None,
        }
    }

    pub fn with_value(mut self, value: AstNode) -> Self {
        self.value = Some(Box::new(value));
        self
    }
}

/// A `{ ... }` region. Statement order is execution order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<AstNode>,
}

impl Block {
    pub fn new(statements: Vec<AstNode>) -> Self {
        Self { statements }
    }
}

/// Top-level function definition
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub return_type: Type,
    pub name: String,
    pub params: Vec<VariableDeclaration>,
    pub body: Block,
}

/// AST nodes representing statements and expressions
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    // Statements
    VariableDeclaration(VariableDeclaration),
    Assignment {
        left: Box<AstNode>,
        right: Box<AstNode>,
    },
    While {
        condition: Box<AstNode>,
        body: Block,
    },
    ReturnStatement {
        value: Option<Box<AstNode>>,
    },

    // Expressions
    BinaryOperation {
        operator: BinOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },
    PostOperation {
        operator: PostOp,
        variable: Box<AstNode>,
    },
    Call {
        name: String,
        args: Vec<AstNode>,
    },
    ArrayDereference {
        array: Box<AstNode>,
        index: Box<AstNode>,
    },
    Variable(String),
    Int32(i32),
    Char(char),
    Array(Vec<AstNode>),
    Null,
}

impl AstNode {
    pub fn var(name: impl Into<String>) -> Self {
        AstNode::Variable(name.into())
    }

    pub fn int(value: i32) -> Self {
        AstNode::Int32(value)
    }

    /// Desugar a decoded string into a NUL-terminated `Array` of `Char`s.
    pub fn string(value: &str) -> Self {
        AstNode::Array(
            value
                .chars()
                .chain(std::iter::once('\0'))
                .map(AstNode::Char)
                .collect(),
        )
    }

    pub fn binary(operator: BinOp, left: AstNode, right: AstNode) -> Self {
        AstNode::BinaryOperation {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn post(operator: PostOp, variable: AstNode) -> Self {
        AstNode::PostOperation {
            operator,
            variable: Box::new(variable),
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<AstNode>) -> Self {
        AstNode::Call {
            name: name.into(),
            args,
        }
    }

    pub fn index(array: AstNode, index: AstNode) -> Self {
        AstNode::ArrayDereference {
            array: Box::new(array),
            index: Box::new(index),
        }
    }

    pub fn assign(left: AstNode, right: AstNode) -> Self {
        AstNode::Assignment {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn ret(value: Option<AstNode>) -> Self {
        AstNode::ReturnStatement {
            value: value.map(Box::new),
        }
    }

    /// Whether this node may appear on the left of `=`
    pub fn is_lvalue(&self) -> bool {
        matches!(
            self,
            AstNode::Variable(_) | AstNode::ArrayDereference { .. }
        )
    }

    /// Short human-readable name of the node kind, used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            AstNode::VariableDeclaration(_) => "variable declaration",
            AstNode::Assignment { .. } => "assignment",
            AstNode::While { .. } => "while loop",
            AstNode::ReturnStatement { .. } => "return statement",
            AstNode::BinaryOperation { .. } => "binary operation",
            AstNode::PostOperation { .. } => "postfix operation",
            AstNode::Call { .. } => "function call",
            AstNode::ArrayDereference { .. } => "array dereference",
            AstNode::Variable(_) => "variable",
            AstNode::Int32(_) => "integer literal",
            AstNode::Char(_) => "character literal",
            AstNode::Array(_) => "array literal",
            AstNode::Null => "NULL",
        }
    }
}

/// Top-level program structure. Always the root of a parse, even for a
/// single function.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub functions: Vec<Function>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}
