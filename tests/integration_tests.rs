//! Integration tests for the full front-end pipeline.
//!
//! These tests drive the public API the way the command line driver does:
//! scan the source, validate its syntax, then validate its semantics.

use constlang::{
    analyze,
    errors::errors::{CompileError, ScanErrorKind, SemanticErrorKind, SyntaxErrorKind},
    lexer::{lexer::tokenize, tokens::TokenKind},
    parser::parser::validate_syntax,
    render_error,
    semantic::semantic::validate_semantics,
};
use pretty_assertions::assert_eq;

fn check(source: &str) -> Result<Vec<constlang::lexer::tokens::Token>, CompileError> {
    analyze(source.to_string(), Some("test.cl".to_string()))
}

#[test]
fn test_sample_function_program() {
    let source = "const a = (un:integer, dos:integer) => { return un + dos; }";
    let tokens = check(source).expect("program should be accepted");

    let listing: Vec<String> = tokens.iter().map(|token| token.to_string()).collect();
    assert_eq!(
        listing,
        vec![
            "CONST",
            "IDENTIFIER(a)",
            "ASSIGN",
            "LPAREN",
            "IDENTIFIER(un)",
            "COLON",
            "INTEGER(integer)",
            "COMMA",
            "IDENTIFIER(dos)",
            "COLON",
            "INTEGER(integer)",
            "RPAREN",
            "ARROW",
            "LBRACE",
            "RETURN",
            "IDENTIFIER(un)",
            "PLUS",
            "IDENTIFIER(dos)",
            "SEMICOLON",
            "RBRACE",
        ]
    );
}

#[test]
fn test_digit_prefixed_parameter_fails_syntax() {
    let source = "const a = (1uno:integer, dos:integer) => { return un + dos; }";

    let tokens = tokenize(source.to_string(), None).unwrap();
    assert_eq!(tokens[4].kind, TokenKind::Integer);
    assert_eq!(tokens[4].value, "1");
    assert_eq!(tokens[5].kind, TokenKind::Identifier);
    assert_eq!(tokens[5].value, "uno");

    match check(source) {
        Err(CompileError::Syntax(error)) => assert!(matches!(
            error.kind(),
            SyntaxErrorKind::UnexpectedToken { token, .. } if token == "1"
        )),
        other => panic!("expected a syntax error, got {:?}", other),
    }
}

#[test]
fn test_scan_error_stops_pipeline() {
    match check("const a = 5 $") {
        Err(CompileError::Scan(error)) => assert_eq!(
            error.kind(),
            &ScanErrorKind::UnknownCharacter { character: '$' }
        ),
        other => panic!("expected a scan error, got {:?}", other),
    }
}

#[test]
fn test_syntax_error_prevents_semantic_pass() {
    // Undeclared `y` would be a semantic error, but the syntax pass fails first.
    let error = check("const x = 1 y").unwrap_err();

    assert_eq!(error.stage(), "Syntax analysis");
}

#[test]
fn test_multiple_declarations() {
    let source = "
        const limit = 10
        const alias = limit
        const scale = (value:integer, factor:integer) => {
            return value * factor;
        }
        const half = (value:integer) => { return value / 2; }
    ";

    assert!(check(source).is_ok());
}

#[test]
fn test_passes_are_independent() {
    // The semantic pass skips tokens the syntax pass rejects.
    let tokens = tokenize("; const a = 1".to_string(), None).unwrap();

    assert!(validate_syntax(&tokens).is_err());
    assert!(validate_semantics(&tokens).is_ok());
}

#[test]
fn test_undeclared_variable_property() {
    for name in ["b", "zz", "count2", "un"] {
        let source = format!("const a = 1 {}", name);
        let tokens = tokenize(source, None).unwrap();

        assert_eq!(
            validate_semantics(&tokens).unwrap_err().kind(),
            &SemanticErrorKind::UndeclaredVariable {
                name: name.to_string()
            }
        );
    }
}

#[test]
fn test_render_scan_error() {
    let source = "const a = #";
    let error = check(source).unwrap_err();

    assert_eq!(
        render_error(&error, source),
        "Error: UnknownCharacter (`#` is not part of the language)\n\
         -> test.cl\n  \
           |\n\
         1 | const a = #\n  \
           | ----------^\n"
    );
}

#[test]
fn test_non_ascii_identifiers() {
    let source = "const año = 1 const f = (mañana:integer) => { return mañana + año; } año";
    let tokens = check(source).expect("program should be accepted");

    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].value, "año");
}
