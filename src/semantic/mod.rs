//! Semantic analysis module.
//!
//! This module re-walks the token stream after the syntax pass and checks:
//!
//! - That identifiers used at the top level were declared earlier, either
//!   by a `const` binding or as a function parameter
//! - That assignments only take integers or declared identifiers
//! - The shape of parameter lists and `return` statements
//!
//! Declarations are kept in a `DeclarationTable` owned by a single analysis
//! run and dropped when it ends.

pub mod declarations;
pub mod semantic;

#[cfg(test)]
mod tests;
