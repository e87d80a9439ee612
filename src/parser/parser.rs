//! Syntax validation over the raw token stream.
//!
//! The grammar is checked with a single forward cursor and one token of
//! lookahead. Nothing is built: each rule only consumes the tokens it
//! recognises and reports the first token that does not fit.
//!
//! ```text
//! Program    := ConstDecl*
//! ConstDecl  := CONST IDENTIFIER ASSIGN Expression
//! Expression := Function | INTEGER | IDENTIFIER
//! Function   := LPAREN (IDENTIFIER COLON INTEGER COMMA?)* RPAREN ARROW LBRACE Body RBRACE
//! Body       := (Return | <any other token>)*
//! Return     := RETURN Expression (operator Expression)?
//! ```

use std::time::Instant;

use log::{debug, trace};

use crate::{
    errors::errors::{SyntaxError, SyntaxErrorKind},
    lexer::tokens::{Token, TokenKind, OPERATORS},
    Position,
};

/// Cursor over the token sequence being validated.
pub struct Parser<'a> {
    /// The list of tokens to validate
    tokens: &'a [Token],
    /// Current position in the token stream
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser { tokens, pos: 0 }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> Option<TokenKind> {
        self.current_token().map(|token| token.kind)
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.current_token();
        self.pos += 1;
        token
    }

    /// Checks if there are more tokens to validate.
    pub fn has_tokens(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// Position of the current token, or the end of the last one once the
    /// stream is exhausted.
    pub fn get_position(&self) -> Position {
        match self.current_token() {
            Some(token) => token.span.start.clone(),
            None => self
                .tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(Position::null),
        }
    }

    /// Error for the current token, or for the missing one at end of input.
    pub fn unexpected(&self, expected: &str) -> SyntaxError {
        let kind = match self.current_token() {
            Some(token) => SyntaxErrorKind::UnexpectedToken {
                token: token.value.clone(),
                expected: expected.to_string(),
            },
            None => SyntaxErrorKind::UnexpectedEndOfInput {
                expected: expected.to_string(),
            },
        };

        SyntaxError::new(kind, self.get_position())
    }

    /// Consumes a token of the given kind or fails naming the expected construct.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        expected: &str,
    ) -> Result<&'a Token, SyntaxError> {
        match self.current_token() {
            Some(token) if token.kind == expected_kind => {
                self.pos += 1;
                Ok(token)
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    /// Consumes a token of the given kind with a default message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<&'a Token, SyntaxError> {
        self.expect_error(expected_kind, &format!("expected {}", expected_kind))
    }
}

/// Checks that the token sequence is a well formed program.
///
/// An empty sequence is a valid, empty program. The first violation is
/// returned and nothing after it is looked at.
pub fn validate_syntax(tokens: &[Token]) -> Result<(), SyntaxError> {
    let start = Instant::now();
    let mut parser = Parser::new(tokens);

    while parser.has_tokens() {
        match parser.current_token_kind() {
            Some(TokenKind::Const) => parse_const_decl(&mut parser)?,
            _ => return Err(parser.unexpected("expected 'const' declaration")),
        }
    }

    debug!("validated syntax of {} tokens in {:?}", tokens.len(), start.elapsed());
    Ok(())
}

pub fn parse_const_decl(parser: &mut Parser) -> Result<(), SyntaxError> {
    parser.expect(TokenKind::Const)?;
    let name = parser.expect_error(TokenKind::Identifier, "expected identifier after 'const'")?;
    trace!("const declaration `{}`", name.value);
    parser.expect_error(
        TokenKind::Assign,
        "expected '=' after identifier in const declaration",
    )?;

    parse_expr(parser)
}

pub fn parse_expr(parser: &mut Parser) -> Result<(), SyntaxError> {
    match parser.current_token() {
        Some(token) if token.kind == TokenKind::LParen => parse_function(parser),
        Some(token) if token.is_operand() => {
            parser.advance();
            Ok(())
        }
        Some(token) => Err(SyntaxError::new(
            SyntaxErrorKind::UnexpectedTokenInExpression {
                token: token.value.clone(),
            },
            token.span.start.clone(),
        )),
        None => Err(parser.unexpected("expected expression")),
    }
}

pub fn parse_function(parser: &mut Parser) -> Result<(), SyntaxError> {
    parser.expect(TokenKind::LParen)?;

    while parser.has_tokens() && parser.current_token_kind() != Some(TokenKind::RParen) {
        parse_param(parser)?;
    }

    parser.expect_error(
        TokenKind::RParen,
        "expected ')' after parameters in function declaration",
    )?;
    parser.expect_error(
        TokenKind::Arrow,
        "expected '=>' after parameters in function declaration",
    )?;
    parser.expect_error(
        TokenKind::LBrace,
        "expected '{' after '=>' in function declaration",
    )?;

    while parser.has_tokens() && parser.current_token_kind() != Some(TokenKind::RBrace) {
        if parser.current_token_kind() == Some(TokenKind::Return) {
            parse_return_stmt(parser)?;
        } else {
            // Only return statements are checked inside a body
            parser.advance();
        }
    }

    parser.expect_error(TokenKind::RBrace, "expected '}' at end of function")?;
    Ok(())
}

fn parse_param(parser: &mut Parser) -> Result<(), SyntaxError> {
    parser.expect_error(
        TokenKind::Identifier,
        "expected parameter name in function declaration",
    )?;
    parser.expect_error(
        TokenKind::Colon,
        "expected ':' after parameter name in function declaration",
    )?;
    parser.expect_error(
        TokenKind::Integer,
        "expected type after ':' in parameter declaration",
    )?;

    if parser.current_token_kind() == Some(TokenKind::Comma) {
        parser.advance();
    }

    Ok(())
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<(), SyntaxError> {
    parser.expect(TokenKind::Return)?;
    parse_expr(parser)?;

    if parser
        .current_token()
        .is_some_and(|token| token.is_one_of_many(&OPERATORS))
    {
        parser.advance();
        parse_expr(parser)?;
    }

    Ok(())
}
