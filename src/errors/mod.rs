//! Error types and error handling for the front-end.
//!
//! This module defines the error types produced by each stage:
//!
//! - `ScanError` for characters the scanner does not recognise
//! - `SyntaxError` for token sequences that do not match the grammar
//! - `SemanticError` for declaration and assignment violations
//! - `CompileError`, the union of the three used by the pipeline
//!
//! Every error carries the source position of the token that caused it and
//! can produce a human readable tip for the diagnostic output.

pub mod errors;
