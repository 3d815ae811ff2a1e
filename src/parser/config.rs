// Parser limits

/// Default cap on nested blocks plus nested expressions.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

/// Tunables for a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// How deep blocks and expressions may nest before the parser gives up
    /// with [`ParseError::NestingTooDeep`](crate::parser::parse::ParseError::NestingTooDeep).
    pub max_nesting_depth: usize,
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}
