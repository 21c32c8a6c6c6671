pub mod ast;

use crate::error::{CompileError, ParseError};
use crate::scanner::{Basic, Scanner, Token};
pub use ast::{Ast, Operation, Precedence};

/// Token-stream-to-AST parser: recursive descent for statements, Pratt
/// parsing for expressions. Assumes the scanner handed to it has already
/// been primed with its first token (the driver's job, per spec.md §2).
pub struct Parser<'src> {
    scanner: Scanner<'src>,
}

impl<'src> Parser<'src> {
    pub fn new(scanner: Scanner<'src>) -> Self {
        Parser { scanner }
    }

    /// A top-level statement is a function definition. Returns `None` at
    /// end of input.
    pub fn parse_top_level_statement(&mut self) -> Result<Option<Ast>, CompileError> {
        if self.scanner.get_token().is_none() {
            return Ok(None);
        }
        Ok(Some(self.parse_function_definition()?))
    }

    // ----------------- token-stream plumbing -----------------

    fn advance(&mut self) -> Result<(), CompileError> {
        self.scanner.scan_token()?;
        Ok(())
    }

    fn current_token_opt(&self) -> Option<Token> {
        self.scanner.get_token().cloned()
    }

    fn current_token(&self) -> Result<Token, CompileError> {
        self.scanner.expect_token().cloned().map_err(CompileError::from)
    }

    fn current_basic(&self) -> Option<Basic> {
        match self.scanner.get_token() {
            Some(Token::Basic(b)) => Some(*b),
            _ => None,
        }
    }

    fn unexpected_current(&self) -> CompileError {
        match self.current_token_opt() {
            Some(t) => ParseError::UnexpectedToken(t.to_string()).into(),
            None => ParseError::UnexpectedEof.into(),
        }
    }

    fn expect_basic(&mut self, expected: Basic) -> Result<(), CompileError> {
        match self.current_token_opt() {
            Some(Token::Basic(b)) if b == expected => {
                self.advance()?;
                Ok(())
            }
            _ => Err(match expected {
                Basic::Semicolon => ParseError::ExpectedSemicolon.into(),
                Basic::Assign => ParseError::ExpectedEqualsSign.into(),
                Basic::LeftParen | Basic::RightParen => ParseError::ExpectedParen.into(),
                _ => self.unexpected_current(),
            }),
        }
    }

    fn expect_identifier(&mut self) -> Result<String, CompileError> {
        match self.current_token()? {
            Token::Identifier(name) => {
                self.advance()?;
                Ok(name)
            }
            _ => Err(ParseError::ExpectedIdentifier.into()),
        }
    }

    // ----------------- top level -----------------

    /// `int NAME '(' (int NAME (',' int NAME)*)? ')' BLOCK`
    fn parse_function_definition(&mut self) -> Result<Ast, CompileError> {
        self.expect_basic(Basic::Int)?;
        let name = self.expect_identifier()?;
        self.expect_basic(Basic::LeftParen)?;

        let mut params = Vec::new();
        if self.current_basic() != Some(Basic::RightParen) {
            loop {
                self.expect_basic(Basic::Int)?;
                params.push(self.expect_identifier()?);
                if self.current_basic() == Some(Basic::Comma) {
                    self.advance()?;
                    continue;
                }
                break;
            }
        }
        self.expect_basic(Basic::RightParen)?;

        let body = self.parse_block()?;
        Ok(Ast::FunctionDefinition {
            name,
            params,
            body: Box::new(body),
        })
    }

    // ----------------- statements -----------------

    fn parse_statement(&mut self) -> Result<Ast, CompileError> {
        match self.current_token_opt() {
            Some(Token::Basic(Basic::LeftBrace)) => self.parse_block(),
            Some(Token::Basic(Basic::Int)) => self.parse_var_declaration(),
            Some(Token::Basic(Basic::Print)) => self.parse_print(),
            Some(Token::Basic(Basic::If)) => self.parse_conditional(),
            Some(Token::Basic(Basic::While)) => self.parse_while_loop(),
            Some(Token::Basic(Basic::Return)) => self.parse_return(),
            Some(Token::Identifier(_)) => self.parse_identifier_statement(),
            _ => Err(self.unexpected_current()),
        }
    }

    fn parse_block(&mut self) -> Result<Ast, CompileError> {
        self.expect_basic(Basic::LeftBrace)?;
        let mut statements = Vec::new();
        while self.current_basic() != Some(Basic::RightBrace) {
            if self.current_token_opt().is_none() {
                return Err(ParseError::UnexpectedEof.into());
            }
            statements.push(self.parse_statement()?);
        }
        self.expect_basic(Basic::RightBrace)?;
        Ok(Ast::Block(statements))
    }

    fn parse_var_declaration(&mut self) -> Result<Ast, CompileError> {
        self.expect_basic(Basic::Int)?;
        let name = self.expect_identifier()?;
        self.expect_basic(Basic::Semicolon)?;
        Ok(Ast::VariableDeclaration(name))
    }

    fn parse_print(&mut self) -> Result<Ast, CompileError> {
        self.expect_basic(Basic::Print)?;
        let expr = self.parse_expression(None)?;
        self.expect_basic(Basic::Semicolon)?;
        Ok(Ast::Print(Box::new(expr)))
    }

    fn parse_conditional(&mut self) -> Result<Ast, CompileError> {
        self.expect_basic(Basic::If)?;
        self.expect_basic(Basic::LeftParen)?;
        let cond = self.parse_expression(None)?;
        self.expect_basic(Basic::RightParen)?;
        let consequent = self.parse_statement()?;

        // Greedy lookahead for 'else' resolves the dangling-else ambiguity
        // by binding it to the innermost still-open `if`.
        let alternative = if self.current_basic() == Some(Basic::Else) {
            self.advance()?;
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Ast::Conditional {
            cond: Box::new(cond),
            consequent: Box::new(consequent),
            alternative,
        })
    }

    fn parse_while_loop(&mut self) -> Result<Ast, CompileError> {
        self.expect_basic(Basic::While)?;
        self.expect_basic(Basic::LeftParen)?;
        let cond = self.parse_expression(None)?;
        self.expect_basic(Basic::RightParen)?;
        let body = self.parse_statement()?;
        Ok(Ast::WhileLoop {
            cond: Box::new(cond),
            body: Box::new(body),
        })
    }

    fn parse_return(&mut self) -> Result<Ast, CompileError> {
        self.expect_basic(Basic::Return)?;
        let expr = self.parse_expression(None)?;
        self.expect_basic(Basic::Semicolon)?;
        Ok(Ast::Return(Box::new(expr)))
    }

    /// An `Identifier` statement is either an assignment or a bare
    /// function call; which one is decided by the token right after the
    /// identifier.
    fn parse_identifier_statement(&mut self) -> Result<Ast, CompileError> {
        let name = self.expect_identifier()?;
        match self.current_basic() {
            Some(Basic::Assign) => {
                self.advance()?;
                let rhs = self.parse_expression(None)?;
                self.expect_basic(Basic::Semicolon)?;
                Ok(Ast::operator(Operation::Assignment, Ast::Identifier(name), rhs))
            }
            Some(Basic::LeftParen) => {
                let args = self.parse_call_arguments()?;
                self.expect_basic(Basic::Semicolon)?;
                Ok(Ast::FunctionCall { callee: name, args })
            }
            _ => Err(self.unexpected_current()),
        }
    }

    fn parse_call_arguments(&mut self) -> Result<Vec<Ast>, CompileError> {
        self.expect_basic(Basic::LeftParen)?;
        let mut args = Vec::new();
        if self.current_basic() != Some(Basic::RightParen) {
            loop {
                args.push(self.parse_expression(None)?);
                if self.current_basic() == Some(Basic::Comma) {
                    self.advance()?;
                    continue;
                }
                break;
            }
        }
        self.expect_basic(Basic::RightParen)?;
        Ok(args)
    }

    // ----------------- expressions (Pratt) -----------------

    /// `parentPrecedence = None` means "no parent" — always exceeded, so
    /// the top-level call accepts the first operator it sees.
    fn parse_expression(&mut self, parent_precedence: Option<Precedence>) -> Result<Ast, CompileError> {
        let mut left = self.parse_operand()?;

        loop {
            let Some(op) = self.current_basic().and_then(Operation::from_infix_basic) else {
                break;
            };
            let precedence = op.precedence();
            let exceeds_parent = match parent_precedence {
                None => true,
                Some(parent) => precedence > parent,
            };
            if !exceeds_parent {
                break;
            }

            self.advance()?;
            let rhs = self.parse_expression(Some(precedence))?;
            left = Ast::operator(op, left, rhs);
        }

        Ok(left)
    }

    /// Current token must itself be a leaf (`IntegerLiteral`/`Identifier`),
    /// introduce a function call (`Identifier '('`), or open a parenthesized
    /// sub-expression (`'(' expression ')'`).
    fn parse_operand(&mut self) -> Result<Ast, CompileError> {
        match self.current_token()? {
            Token::IntegerLiteral(n) => {
                self.advance()?;
                Ok(Ast::IntegerLiteral(n))
            }
            Token::Identifier(name) => {
                self.advance()?;
                if self.current_basic() == Some(Basic::LeftParen) {
                    let args = self.parse_call_arguments()?;
                    Ok(Ast::FunctionCall { callee: name, args })
                } else {
                    Ok(Ast::Identifier(name))
                }
            }
            Token::Basic(Basic::LeftParen) => {
                self.advance()?;
                let inner = self.parse_expression(None)?;
                self.expect_basic(Basic::RightParen)?;
                Ok(inner)
            }
            _ => Err(ParseError::ExpectedOperand.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_expr(source: &str) -> Ast {
        let mut scanner = Scanner::new(source);
        scanner.scan_token().unwrap();
        let mut parser = Parser::new(scanner);
        parser.parse_expression(None).unwrap()
    }

    fn show(ast: &Ast) -> String {
        match ast {
            Ast::IntegerLiteral(n) => n.to_string(),
            Ast::Identifier(n) => n.clone(),
            Ast::Operator(op, operands) => {
                let sym = op.basic().lexeme();
                format!("({} {} {})", show(&operands[0]), sym, show(&operands[1]))
            }
            other => panic!("unexpected node in expression: {other:?}"),
        }
    }

    #[test]
    fn multiplicative_binds_tighter_than_additive() {
        assert_eq!(show(&parse_expr("a + b * c")), "(a + (b * c))");
    }

    #[test]
    fn same_precedence_is_left_associative() {
        assert_eq!(show(&parse_expr("a - b - c")), "((a - b) - c)");
    }

    #[test]
    fn additive_binds_tighter_than_equality() {
        assert_eq!(show(&parse_expr("a + b == c")), "((a + b) == c)");
    }

    #[test]
    fn function_call_as_operand() {
        assert_eq!(show(&parse_expr("1 + f(a, 2)")), "(1 + f(a, 2))");
    }

    #[test]
    fn parenthesized_subexpression_overrides_precedence() {
        assert_eq!(show(&parse_expr("(a + b) * c")), "((a + b) * c)");
    }

    #[test]
    fn bare_parenthesized_comparison_parses_as_its_inner_expression() {
        assert_eq!(show(&parse_expr("(7 == 9)")), "(7 == 9)");
    }

    fn parse_program(source: &str) -> Vec<Ast> {
        let mut scanner = Scanner::new(source);
        scanner.scan_token().unwrap();
        let mut parser = Parser::new(scanner);
        let mut out = Vec::new();
        while let Some(ast) = parser.parse_top_level_statement().unwrap() {
            out.push(ast);
        }
        out
    }

    #[test]
    fn dangling_else_binds_to_innermost_if() {
        let program = parse_program(
            "int main() { if (x) if (y) a = 1; else a = 2; }",
        );
        let Ast::FunctionDefinition { body, .. } = &program[0] else {
            panic!("expected a function definition");
        };
        let Ast::Block(stmts) = body.as_ref() else {
            panic!("expected a block body");
        };
        let Ast::Conditional { alternative, consequent, .. } = &stmts[0] else {
            panic!("expected a conditional");
        };
        assert!(alternative.is_none(), "the outer if must have no else");
        let Ast::Conditional { alternative: inner_alt, .. } = consequent.as_ref() else {
            panic!("expected the consequent to be the inner if");
        };
        assert!(inner_alt.is_some(), "the inner if must capture the else");
    }
}
