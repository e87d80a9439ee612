use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// Behaviour shared by the error kinds of every stage.
pub trait ErrorKind: std::error::Error {
    fn name(&self) -> &'static str;
    fn tip(&self) -> ErrorTip;
}

/// An error kind paired with the position of the token that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error<K> {
    internal_error: K,
    position: Position,
}

pub type ScanError = Error<ScanErrorKind>;
pub type SyntaxError = Error<SyntaxErrorKind>;
pub type SemanticError = Error<SemanticErrorKind>;

impl<K: ErrorKind> Error<K> {
    pub fn new(error_impl: K, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn kind(&self) -> &K {
        &self.internal_error
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error_name(&self) -> &str {
        self.internal_error.name()
    }

    pub fn get_tip(&self) -> ErrorTip {
        self.internal_error.tip()
    }
}

impl<K: ErrorKind> Display for Error<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position)
    }
}

impl<K: ErrorKind> std::error::Error for Error<K> {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanErrorKind {
    #[error("unknown character: {character:?}")]
    UnknownCharacter { character: char },
}

impl ErrorKind for ScanErrorKind {
    fn name(&self) -> &'static str {
        match self {
            ScanErrorKind::UnknownCharacter { .. } => "UnknownCharacter",
        }
    }

    fn tip(&self) -> ErrorTip {
        match self {
            ScanErrorKind::UnknownCharacter { character } => ErrorTip::Suggestion(format!(
                "`{}` is not part of the language",
                character
            )),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    #[error("unexpected token {token:?}, {expected}")]
    UnexpectedToken { token: String, expected: String },
    #[error("unexpected token in expression: {token:?}")]
    UnexpectedTokenInExpression { token: String },
    #[error("unexpected end of input, {expected}")]
    UnexpectedEndOfInput { expected: String },
}

impl ErrorKind for SyntaxErrorKind {
    fn name(&self) -> &'static str {
        match self {
            SyntaxErrorKind::UnexpectedToken { .. } => "UnexpectedToken",
            SyntaxErrorKind::UnexpectedTokenInExpression { .. } => "UnexpectedTokenInExpression",
            SyntaxErrorKind::UnexpectedEndOfInput { .. } => "UnexpectedEndOfInput",
        }
    }

    fn tip(&self) -> ErrorTip {
        match self {
            SyntaxErrorKind::UnexpectedToken { token, expected } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, expected))
            }
            SyntaxErrorKind::UnexpectedTokenInExpression { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected a function, an integer or an identifier",
                token
            )),
            SyntaxErrorKind::UnexpectedEndOfInput { expected } => {
                ErrorTip::Suggestion(format!("Input ended early, {}", expected))
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticErrorKind {
    #[error("variable {name:?} not declared")]
    UndeclaredVariable { name: String },
    #[error("invalid assignment value for variable {name:?}")]
    InvalidAssignment { name: String },
    #[error("expected identifier after 'const'")]
    ExpectedIdentifier,
    #[error("expected '=' after 'const' declaration")]
    ExpectedAssign,
    #[error("expected parameter name in function declaration")]
    ExpectedParameterName,
    #[error("expected ':' after parameter name")]
    ExpectedColon,
    #[error("expected type for parameter {parameter:?}")]
    ExpectedParameterType { parameter: String },
    #[error("expected ')' after function parameters")]
    ExpectedCloseParen,
    #[error("expected '=>' after function parameters")]
    ExpectedArrow,
    #[error("expected '{{' after '=>'")]
    ExpectedBrace,
    #[error("expected value after 'return'")]
    ExpectedReturnValue,
    #[error("expected second operand in return statement")]
    ExpectedSecondOperand,
    #[error("unexpected end of input, {expected}")]
    UnexpectedEndOfInput { expected: String },
}

impl ErrorKind for SemanticErrorKind {
    fn name(&self) -> &'static str {
        match self {
            SemanticErrorKind::UndeclaredVariable { .. } => "UndeclaredVariable",
            SemanticErrorKind::InvalidAssignment { .. } => "InvalidAssignment",
            SemanticErrorKind::ExpectedIdentifier => "ExpectedIdentifier",
            SemanticErrorKind::ExpectedAssign => "ExpectedAssign",
            SemanticErrorKind::ExpectedParameterName => "ExpectedParameterName",
            SemanticErrorKind::ExpectedColon => "ExpectedColon",
            SemanticErrorKind::ExpectedParameterType { .. } => "ExpectedParameterType",
            SemanticErrorKind::ExpectedCloseParen => "ExpectedCloseParen",
            SemanticErrorKind::ExpectedArrow => "ExpectedArrow",
            SemanticErrorKind::ExpectedBrace => "ExpectedBrace",
            SemanticErrorKind::ExpectedReturnValue => "ExpectedReturnValue",
            SemanticErrorKind::ExpectedSecondOperand => "ExpectedSecondOperand",
            SemanticErrorKind::UnexpectedEndOfInput { .. } => "UnexpectedEndOfInput",
        }
    }

    fn tip(&self) -> ErrorTip {
        match self {
            SemanticErrorKind::UndeclaredVariable { name } => ErrorTip::Suggestion(format!(
                "Variable `{}` not declared, declare it with `const {} = ...` first",
                name, name
            )),
            SemanticErrorKind::InvalidAssignment { name } => ErrorTip::Suggestion(format!(
                "`{}` can only be assigned an integer or a declared identifier",
                name
            )),
            SemanticErrorKind::ExpectedParameterType { parameter } => ErrorTip::Suggestion(
                format!("Parameter `{}` needs a type, e.g. `{}: integer`", parameter, parameter),
            ),
            SemanticErrorKind::ExpectedReturnValue | SemanticErrorKind::ExpectedSecondOperand => {
                ErrorTip::Suggestion(String::from(
                    "Return values are integers or identifiers, optionally joined by one of + - * /",
                ))
            }
            _ => ErrorTip::None,
        }
    }
}

/// Failure of any stage of the pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("lexical error: {0}")]
    Scan(#[from] ScanError),
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("semantic error: {0}")]
    Semantic(#[from] SemanticError),
}

impl CompileError {
    pub fn stage(&self) -> &'static str {
        match self {
            CompileError::Scan(_) => "Lexical analysis",
            CompileError::Syntax(_) => "Syntax analysis",
            CompileError::Semantic(_) => "Semantic analysis",
        }
    }

    pub fn get_position(&self) -> &Position {
        match self {
            CompileError::Scan(error) => error.get_position(),
            CompileError::Syntax(error) => error.get_position(),
            CompileError::Semantic(error) => error.get_position(),
        }
    }

    pub fn get_error_name(&self) -> &str {
        match self {
            CompileError::Scan(error) => error.get_error_name(),
            CompileError::Syntax(error) => error.get_error_name(),
            CompileError::Semantic(error) => error.get_error_name(),
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match self {
            CompileError::Scan(error) => error.get_tip(),
            CompileError::Syntax(error) => error.get_tip(),
            CompileError::Semantic(error) => error.get_tip(),
        }
    }
}
