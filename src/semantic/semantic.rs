use std::time::Instant;

use log::{debug, trace};

use crate::{
    errors::errors::{SemanticError, SemanticErrorKind},
    lexer::tokens::{Token, TokenKind, OPERATORS},
    Position,
};

use super::declarations::DeclarationTable;

/// Second pass over the token stream, independent of the syntax pass.
///
/// It keeps its own cursor and its own declaration table. Tokens it has no
/// rule for at the top level are stepped over.
pub struct SemanticAnalyzer<'a> {
    tokens: &'a [Token],
    pos: usize,
    declarations: DeclarationTable,
}

impl<'a> SemanticAnalyzer<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        SemanticAnalyzer {
            tokens,
            pos: 0,
            declarations: DeclarationTable::new(),
        }
    }

    fn current_token(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn current_token_kind(&self) -> Option<TokenKind> {
        self.current_token().map(|token| token.kind)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn get_position(&self) -> Position {
        match self.current_token() {
            Some(token) => token.span.start.clone(),
            None => self
                .tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(Position::null),
        }
    }

    fn error(&self, kind: SemanticErrorKind) -> SemanticError {
        SemanticError::new(kind, self.get_position())
    }

    /// The current token, which must exist.
    fn require(&self, expected: &str) -> Result<&'a Token, SemanticError> {
        self.current_token().ok_or_else(|| {
            self.error(SemanticErrorKind::UnexpectedEndOfInput {
                expected: expected.to_string(),
            })
        })
    }

    /// Walks the whole stream and returns the declarations that were collected.
    pub fn analyze(mut self) -> Result<DeclarationTable, SemanticError> {
        while let Some(token) = self.current_token() {
            match token.kind {
                TokenKind::Const => self.handle_const()?,
                TokenKind::Identifier => self.handle_identifier()?,
                _ => self.advance(),
            }
        }

        Ok(self.declarations)
    }

    fn handle_const(&mut self) -> Result<(), SemanticError> {
        self.advance();

        let name = self.require("expected identifier after 'const'")?;
        if name.kind != TokenKind::Identifier {
            return Err(self.error(SemanticErrorKind::ExpectedIdentifier));
        }
        self.advance();

        let assign = self.require("expected '=' after 'const' declaration")?;
        if assign.kind != TokenKind::Assign {
            return Err(self.error(SemanticErrorKind::ExpectedAssign));
        }
        self.advance();

        let value = self.require(&format!("expected value for `{}`", name.value))?;
        match value.kind {
            TokenKind::LParen => self.handle_function(&name.value),
            TokenKind::Integer | TokenKind::Identifier => {
                self.declarations
                    .declare_variable(name.value.clone(), value.kind);
                self.advance();
                Ok(())
            }
            _ => Err(self.error(SemanticErrorKind::InvalidAssignment {
                name: name.value.clone(),
            })),
        }
    }

    fn handle_function(&mut self, function_name: &str) -> Result<(), SemanticError> {
        trace!("checking function `{}`", function_name);
        self.advance();

        while let Some(token) = self.current_token() {
            if token.kind == TokenKind::RParen {
                break;
            }
            self.handle_param()?;
        }

        if self.current_token_kind() != Some(TokenKind::RParen) {
            return Err(self.error(SemanticErrorKind::ExpectedCloseParen));
        }
        self.advance();

        if self.current_token_kind() != Some(TokenKind::Arrow) {
            return Err(self.error(SemanticErrorKind::ExpectedArrow));
        }
        self.advance();

        if self.current_token_kind() != Some(TokenKind::LBrace) {
            return Err(self.error(SemanticErrorKind::ExpectedBrace));
        }
        self.advance();

        while let Some(token) = self.current_token() {
            match token.kind {
                TokenKind::RBrace => break,
                TokenKind::Return => self.handle_return()?,
                _ => self.advance(),
            }
        }

        // A missing `}` was already reported by the syntax pass.
        if self.current_token_kind() == Some(TokenKind::RBrace) {
            self.advance();
        }

        Ok(())
    }

    fn handle_param(&mut self) -> Result<(), SemanticError> {
        let param = self.require("expected parameter name in function declaration")?;
        if param.kind != TokenKind::Identifier {
            return Err(self.error(SemanticErrorKind::ExpectedParameterName));
        }
        self.advance();

        let colon = self.require("expected ':' after parameter name")?;
        if colon.kind != TokenKind::Colon {
            return Err(self.error(SemanticErrorKind::ExpectedColon));
        }
        self.advance();

        let type_name = self.require(&format!("expected type for parameter `{}`", param.value))?;
        if type_name.kind != TokenKind::Integer {
            return Err(self.error(SemanticErrorKind::ExpectedParameterType {
                parameter: param.value.clone(),
            }));
        }
        self.declarations
            .declare_variable(param.value.clone(), TokenKind::Integer);
        self.advance();

        if self.current_token_kind() == Some(TokenKind::Comma) {
            self.advance();
        }

        Ok(())
    }

    // Operands of a return are not looked up in the declaration table.
    fn handle_return(&mut self) -> Result<(), SemanticError> {
        self.advance();

        if !self.require("expected value after 'return'")?.is_operand() {
            return Err(self.error(SemanticErrorKind::ExpectedReturnValue));
        }
        self.advance();

        if self
            .current_token()
            .is_some_and(|token| token.is_one_of_many(&OPERATORS))
        {
            self.advance();
            if !self.require("expected second operand in return statement")?.is_operand() {
                return Err(self.error(SemanticErrorKind::ExpectedSecondOperand));
            }
            self.advance();
        }

        Ok(())
    }

    fn handle_identifier(&mut self) -> Result<(), SemanticError> {
        let name = self.require("expected identifier")?;
        if !self.declarations.is_declared(&name.value) {
            return Err(self.error(SemanticErrorKind::UndeclaredVariable {
                name: name.value.clone(),
            }));
        }
        self.advance();

        if self.current_token_kind() == Some(TokenKind::Assign) {
            self.advance();

            let value = self.require(&format!("expected value for `{}`", name.value))?;
            let assignable = match value.kind {
                TokenKind::Integer => true,
                TokenKind::Identifier => self.declarations.is_declared(&value.value),
                _ => false,
            };
            if !assignable {
                return Err(self.error(SemanticErrorKind::InvalidAssignment {
                    name: name.value.clone(),
                }));
            }
            self.advance();
        }

        Ok(())
    }
}

/// Checks declaration-before-use and assignment rules over a token sequence.
///
/// Meant to run only after `validate_syntax` accepted the same tokens.
pub fn validate_semantics(tokens: &[Token]) -> Result<(), SemanticError> {
    let start = Instant::now();
    let declarations = SemanticAnalyzer::new(tokens).analyze()?;

    debug!(
        "validated semantics with {} declarations in {:?}",
        declarations.len(),
        start.elapsed()
    );
    Ok(())
}
