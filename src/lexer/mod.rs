//! Lexical analysis module.
//!
//! This module contains the scanner that converts source text into a
//! stream of tokens for the validation passes. It handles:
//!
//! - Tokenization of source text using an ordered table of regex patterns
//! - Recognition of the reserved words `const`, `integer` and `return`
//! - Integer literals, identifiers and single-character punctuation
//! - The two-character `=>` arrow
//! - Token position tracking for error reporting

pub mod lexer;
pub mod tokens;
