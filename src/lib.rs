#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc};

use log::debug;

use crate::{
    errors::errors::{CompileError, ErrorTip},
    lexer::{lexer::tokenize, tokens::Token},
    parser::parser::validate_syntax,
    semantic::semantic::validate_semantics,
};

pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod semantic;

/// Byte offset into a named source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.1, self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Runs the scanner, the syntax pass and the semantic pass in order.
///
/// Each stage only runs when the previous one succeeded; the first failure is
/// returned. On success the token sequence is handed back to the caller.
pub fn analyze(source: String, file: Option<String>) -> Result<Vec<Token>, CompileError> {
    let tokens = tokenize(source, file)?;
    validate_syntax(&tokens)?;
    debug!("syntax analysis passed");
    validate_semantics(&tokens)?;
    debug!("semantic analysis passed");

    Ok(tokens)
}

/// Finds the line holding byte offset `position`.
///
/// Returns the 1-based line number, the line text and the offset of the
/// position within that line. An offset at the very end of the source maps
/// to the last line, so end-of-input errors still point somewhere.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) || (pos == end && end == content.len()) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    // Empty source, or an offset just past a trailing newline.
    Some((line_number, String::new(), 0))
}

/// Renders an error with the offending source line and a caret under it.
///
/// ```text
/// Error: UndeclaredVariable (Variable `un` not declared, ...)
/// -> sample.cl
///   |
/// 1 | const a = (x:integer) => { return x; } un
///   | ----------------------------------------^
/// ```
pub fn render_error(error: &CompileError, source: &str) -> String {
    let position = error.get_position();
    let mut rendered = String::new();

    if let ErrorTip::None = error.get_tip() {
        rendered.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        rendered.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    rendered.push_str(&format!("-> {}\n", position.1));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        return rendered;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    rendered.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    rendered
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let trimmed = string.trim_start_matches([' ', '\t']);

    (String::from(trimmed), string.len() - trimmed.len())
}
