//! Syntax validation module.
//!
//! This module contains the syntax pass that confirms a token stream
//! matches the grammar of the language without building a syntax tree:
//!
//! - Top level `const` declarations
//! - Integer, identifier and arrow function expressions
//! - Typed parameter lists and `return` statements inside function bodies
//!
//! The pass stops at the first token that does not fit and reports it
//! together with the construct that was expected.

pub mod parser;
