use std::fmt;

/// A token with a single fixed lexeme: operators, separators and keywords.
/// Closed set — anything else seen by the scanner is a `ScanError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Basic {
    // operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Assign,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    // separators
    Comma,
    Semicolon,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    // keywords
    Int,
    Print,
    If,
    Else,
    While,
    Return,
}

/// Basic tokens whose lexeme is made of non-alphabetic characters, in the
/// order maximal munch should try extending them (longest possible lexemes
/// first is not required here — the scanner itself does the extending;
/// this table only needs to answer "is this buffer a prefix of some
/// lexeme" and "does this buffer exactly match some lexeme").
const SYMBOLS: &[(&str, Basic)] = &[
    ("+", Basic::Plus),
    ("-", Basic::Minus),
    ("*", Basic::Star),
    ("/", Basic::Slash),
    ("%", Basic::Percent),
    ("=", Basic::Assign),
    ("==", Basic::Equal),
    ("!=", Basic::NotEqual),
    ("<", Basic::Less),
    (">", Basic::Greater),
    ("<=", Basic::LessEqual),
    (">=", Basic::GreaterEqual),
    (",", Basic::Comma),
    (";", Basic::Semicolon),
    ("(", Basic::LeftParen),
    (")", Basic::RightParen),
    ("{", Basic::LeftBrace),
    ("}", Basic::RightBrace),
];

const KEYWORDS: &[(&str, Basic)] = &[
    ("int", Basic::Int),
    ("print", Basic::Print),
    ("if", Basic::If),
    ("else", Basic::Else),
    ("while", Basic::While),
    ("return", Basic::Return),
];

impl Basic {
    pub fn lexeme(self) -> &'static str {
        SYMBOLS
            .iter()
            .chain(KEYWORDS.iter())
            .find(|(_, kind)| *kind == self)
            .map(|(lexeme, _)| *lexeme)
            .expect("every Basic variant has a table entry")
    }

    /// Exact match against the symbol table (operators/separators only).
    pub fn from_symbol(buffer: &str) -> Option<Basic> {
        SYMBOLS
            .iter()
            .find(|(lexeme, _)| *lexeme == buffer)
            .map(|(_, kind)| *kind)
    }

    /// Whether `buffer` is a (possibly equal-length) prefix of some
    /// symbol's lexeme — the question maximal munch asks before
    /// extending the buffer by one more character.
    pub fn is_symbol_prefix(buffer: &str) -> bool {
        SYMBOLS.iter().any(|(lexeme, _)| lexeme.starts_with(buffer))
    }

    /// Exact match against the keyword table, used once a whole
    /// identifier-shaped word has been scanned.
    pub fn from_keyword(word: &str) -> Option<Basic> {
        KEYWORDS
            .iter()
            .find(|(lexeme, _)| *lexeme == word)
            .map(|(_, kind)| *kind)
    }
}

impl fmt::Display for Basic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.lexeme())
    }
}

/// A scanned token. `IntegerLiteral` and `Identifier` double as AST leaves
/// (see `crate::parser::ast::Ast`) so the parser can hand the current
/// token straight into the tree without rebuilding an equivalent node.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    IntegerLiteral(i32),
    Identifier(String),
    Basic(Basic),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::IntegerLiteral(n) => write!(f, "integer literal {n}"),
            Token::Identifier(n) => write!(f, "identifier '{n}'"),
            Token::Basic(b) => write!(f, "{b}"),
        }
    }
}
