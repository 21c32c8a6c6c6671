use std::fmt;

/// Errors produced while turning characters into tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// A character sequence matched no entry in the basic-token set.
    UnexpectedCharacter(char),
    /// Defensive: the basic-token set is built so that no two entries can
    /// both be exact matches for the same buffer. Kept in the taxonomy
    /// because spec.md names it, never constructed.
    ConflictingTokenMatches(String),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::UnexpectedCharacter(c) => write!(f, "unexpected character '{c}'"),
            ScanError::ConflictingTokenMatches(s) => {
                write!(f, "\"{s}\" matches more than one basic token")
            }
        }
    }
}

impl std::error::Error for ScanError {}

/// Errors produced while turning tokens into an AST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnexpectedEof,
    UnexpectedToken(String),
    ExpectedOperand,
    ExpectedIdentifier,
    ExpectedSemicolon,
    ExpectedEqualsSign,
    ExpectedParen,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedEof => write!(f, "unexpected end of input"),
            ParseError::UnexpectedToken(t) => write!(f, "unexpected token {t}"),
            ParseError::ExpectedOperand => write!(f, "expected an operand"),
            ParseError::ExpectedIdentifier => write!(f, "expected an identifier"),
            ParseError::ExpectedSemicolon => write!(f, "expected ';'"),
            ParseError::ExpectedEqualsSign => write!(f, "expected '='"),
            ParseError::ExpectedParen => write!(f, "expected a parenthesis"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors produced while generating IR from the AST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    UndefinedLocalSymbol(String),
    UndefinedGlobalFunction(String),
    /// Defensive: the global table currently only ever holds function
    /// symbols, so looking one up can't yield a non-function. Kept in the
    /// taxonomy because spec.md names it, never constructed.
    SymbolIsNotAFunction(String),
    ArityMismatch { expected: usize, got: usize },
    UnsupportedConversion { from_bits: u8, to_bits: u8 },
    /// Defensive: every `Operation` variant is handled by the generator's
    /// dispatch; kept for taxonomy completeness, never constructed.
    OperationNotImplemented,
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticError::UndefinedLocalSymbol(n) => write!(f, "undefined variable '{n}'"),
            SemanticError::UndefinedGlobalFunction(n) => write!(f, "undefined function '{n}'"),
            SemanticError::SymbolIsNotAFunction(n) => write!(f, "'{n}' is not a function"),
            SemanticError::ArityMismatch { expected, got } => {
                write!(f, "expected {expected} argument(s), got {got}")
            }
            SemanticError::UnsupportedConversion { from_bits, to_bits } => {
                write!(f, "cannot convert a {from_bits}-bit value to {to_bits} bits")
            }
            SemanticError::OperationNotImplemented => write!(f, "operation not implemented"),
        }
    }
}

impl std::error::Error for SemanticError {}

/// The single error kind surfaced to the driver, compounding the three
/// stage-local taxonomies plus I/O failures acquiring the source or sink.
#[derive(Debug)]
pub enum CompileError {
    Scan(ScanError),
    Parse(ParseError),
    Semantic(SemanticError),
    Io(std::io::Error),
}

impl From<ScanError> for CompileError {
    fn from(err: ScanError) -> Self {
        CompileError::Scan(err)
    }
}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        CompileError::Parse(err)
    }
}

impl From<SemanticError> for CompileError {
    fn from(err: SemanticError) -> Self {
        CompileError::Semantic(err)
    }
}

impl From<std::io::Error> for CompileError {
    fn from(err: std::io::Error) -> Self {
        CompileError::Io(err)
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Scan(e) => write!(f, "{e}"),
            CompileError::Parse(e) => write!(f, "{e}"),
            CompileError::Semantic(e) => write!(f, "{e}"),
            CompileError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Scan(e) => Some(e),
            CompileError::Parse(e) => Some(e),
            CompileError::Semantic(e) => Some(e),
            CompileError::Io(e) => Some(e),
        }
    }
}
