//! Unit tests for semantic analysis.
//!
//! These tests run the semantic pass on its own, so some inputs are ones
//! the syntax pass would reject.

use crate::errors::errors::{SemanticError, SemanticErrorKind};
use crate::lexer::{lexer::tokenize, tokens::TokenKind};

use super::{declarations::DeclarationTable, semantic::{validate_semantics, SemanticAnalyzer}};

fn tokens(source: &str) -> Vec<crate::lexer::tokens::Token> {
    tokenize(source.to_string(), Some("test.cl".to_string())).unwrap()
}

fn analyze(source: &str) -> Result<DeclarationTable, SemanticError> {
    SemanticAnalyzer::new(&tokens(source)).analyze()
}

fn expect_error(source: &str) -> SemanticErrorKind {
    validate_semantics(&tokens(source)).unwrap_err().kind().clone()
}

#[test]
fn test_sample_program_passes() {
    let source = "const a = (un:integer, dos:integer) => { return un + dos; }";

    assert!(validate_semantics(&tokens(source)).is_ok());
}

#[test]
fn test_empty_program_passes() {
    assert!(validate_semantics(&[]).is_ok());
}

#[test]
fn test_const_records_value_kind() {
    let declarations = analyze("const a = 5 const b = a").unwrap();

    assert_eq!(declarations.len(), 2);
    assert_eq!(declarations.get_variable("a"), Some(TokenKind::Integer));
    assert_eq!(declarations.get_variable("b"), Some(TokenKind::Identifier));
}

#[test]
fn test_const_identifier_value_is_not_looked_up() {
    assert!(analyze("const a = nowhere").is_ok());
}

#[test]
fn test_parameters_are_declared_but_function_name_is_not() {
    let declarations = analyze("const f = (x:integer, y:integer) => { return x * y; }").unwrap();

    assert_eq!(declarations.get_variable("x"), Some(TokenKind::Integer));
    assert_eq!(declarations.get_variable("y"), Some(TokenKind::Integer));
    assert!(!declarations.is_declared("f"));
}

#[test]
fn test_redeclaration_last_write_wins() {
    let declarations = analyze("const a = b const f = (a:integer, a:integer) => {}").unwrap();

    assert_eq!(declarations.len(), 1);
    assert_eq!(declarations.get_variable("a"), Some(TokenKind::Integer));
}

#[test]
fn test_declared_identifier_use_passes() {
    assert!(validate_semantics(&tokens("const a = 5 a")).is_ok());
    assert!(validate_semantics(&tokens("const f = (x:integer) => { return x; } x")).is_ok());
}

#[test]
fn test_undeclared_identifier_use() {
    let error = validate_semantics(&tokens("const a = 5 b")).unwrap_err();

    assert_eq!(
        error.kind(),
        &SemanticErrorKind::UndeclaredVariable {
            name: "b".to_string()
        }
    );
    assert_eq!(error.get_position().0, 12);
}

#[test]
fn test_use_before_declaration() {
    assert_eq!(
        expect_error("a const a = 5"),
        SemanticErrorKind::UndeclaredVariable {
            name: "a".to_string()
        }
    );
}

#[test]
fn test_function_name_use_is_undeclared() {
    assert_eq!(
        expect_error("const f = () => { return 1; } f"),
        SemanticErrorKind::UndeclaredVariable {
            name: "f".to_string()
        }
    );
}

#[test]
fn test_reassignment() {
    assert!(validate_semantics(&tokens("const a = 5 a = 6")).is_ok());
    assert!(validate_semantics(&tokens("const a = 5 const c = 1 a = c")).is_ok());
    assert_eq!(
        expect_error("const a = 5 a = b"),
        SemanticErrorKind::InvalidAssignment {
            name: "a".to_string()
        }
    );
    assert_eq!(
        expect_error("const a = 5 a = +"),
        SemanticErrorKind::InvalidAssignment {
            name: "a".to_string()
        }
    );
}

#[test]
fn test_invalid_const_value() {
    assert_eq!(
        expect_error("const a = +"),
        SemanticErrorKind::InvalidAssignment {
            name: "a".to_string()
        }
    );
}

#[test]
fn test_const_shape_errors() {
    assert_eq!(expect_error("const 5"), SemanticErrorKind::ExpectedIdentifier);
    assert_eq!(expect_error("const a 5"), SemanticErrorKind::ExpectedAssign);
}

#[test]
fn test_parameter_shape_errors() {
    assert_eq!(
        expect_error("const f = (1uno:integer) => {}"),
        SemanticErrorKind::ExpectedParameterName
    );
    assert_eq!(
        expect_error("const f = (x integer) => {}"),
        SemanticErrorKind::ExpectedColon
    );
    assert_eq!(
        expect_error("const f = (x:y) => {}"),
        SemanticErrorKind::ExpectedParameterType {
            parameter: "x".to_string()
        }
    );
}

#[test]
fn test_function_shape_errors() {
    assert_eq!(
        expect_error("const f = (x:integer"),
        SemanticErrorKind::ExpectedCloseParen
    );
    assert_eq!(
        expect_error("const f = (x:integer) { return x; }"),
        SemanticErrorKind::ExpectedArrow
    );
    assert_eq!(
        expect_error("const f = (x:integer) => return x; }"),
        SemanticErrorKind::ExpectedBrace
    );
}

#[test]
fn test_missing_close_brace_is_tolerated() {
    assert!(validate_semantics(&tokens("const f = () => { return 1;")).is_ok());
}

#[test]
fn test_return_operands_are_not_looked_up() {
    assert!(validate_semantics(&tokens("const f = () => { return un + dos; }")).is_ok());
}

#[test]
fn test_return_shape_errors() {
    assert_eq!(
        expect_error("const f = () => { return ; }"),
        SemanticErrorKind::ExpectedReturnValue
    );
    assert_eq!(
        expect_error("const f = () => { return 1 - ; }"),
        SemanticErrorKind::ExpectedSecondOperand
    );
}

#[test]
fn test_body_tokens_are_skipped() {
    assert!(validate_semantics(&tokens("const f = () => { zzz = 1; return 2; }")).is_ok());
}

#[test]
fn test_top_level_unrecognised_tokens_are_skipped() {
    assert!(validate_semantics(&tokens("; 5 + , => const a = 1")).is_ok());
}

#[test]
fn test_end_of_input() {
    assert!(matches!(
        expect_error("const"),
        SemanticErrorKind::UnexpectedEndOfInput { .. }
    ));
    assert!(matches!(
        expect_error("const a ="),
        SemanticErrorKind::UnexpectedEndOfInput { expected } if expected.contains("`a`")
    ));
    assert!(matches!(
        expect_error("const f = () => { return"),
        SemanticErrorKind::UnexpectedEndOfInput { .. }
    ));
}

#[test]
fn test_each_run_starts_with_empty_table() {
    let declared = tokens("const a = 1");
    let used = tokens("a");

    assert!(validate_semantics(&declared).is_ok());
    assert_eq!(
        validate_semantics(&used).unwrap_err().kind(),
        &SemanticErrorKind::UndeclaredVariable {
            name: "a".to_string()
        }
    );
}

#[test]
fn test_declaration_table() {
    let mut table = DeclarationTable::new();
    assert!(table.is_empty());

    assert_eq!(table.declare_variable("x".to_string(), TokenKind::Identifier), None);
    assert_eq!(
        table.declare_variable("x".to_string(), TokenKind::Integer),
        Some(TokenKind::Identifier)
    );
    assert_eq!(table.get_variable("x"), Some(TokenKind::Integer));
    assert!(table.get_variable("y").is_none());
}
