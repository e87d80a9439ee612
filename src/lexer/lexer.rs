use std::{rc::Rc, time::Instant};

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

use crate::{
    errors::errors::{ScanError, ScanErrorKind},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Receives the scanner and the length in bytes of the text its pattern matched.
pub type RegexHandler = fn(&mut Lexer, usize);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

impl RegexPattern {
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        RegexPattern {
            regex: Regex::new(pattern).expect("scanner patterns are valid regular expressions"),
            handler,
        }
    }
}

lazy_static! {
    // Every pattern is anchored; the first one matching at the cursor wins.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern::new("^[ \t\n\r]+", skip_handler),
        RegexPattern::new("^\\p{Nd}+", number_handler),
        RegexPattern::new("^\\p{L}[\\p{L}\\p{Nd}]*", symbol_handler),
        RegexPattern::new("^\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        RegexPattern::new("^-", MK_DEFAULT_HANDLER!(TokenKind::Minus, "-")),
        RegexPattern::new("^\\*", MK_DEFAULT_HANDLER!(TokenKind::Multiply, "*")),
        RegexPattern::new("^/", MK_DEFAULT_HANDLER!(TokenKind::Divide, "/")),
        RegexPattern::new("^\\(", MK_DEFAULT_HANDLER!(TokenKind::LParen, "(")),
        RegexPattern::new("^\\)", MK_DEFAULT_HANDLER!(TokenKind::RParen, ")")),
        RegexPattern::new("^\\{", MK_DEFAULT_HANDLER!(TokenKind::LBrace, "{")),
        RegexPattern::new("^\\}", MK_DEFAULT_HANDLER!(TokenKind::RBrace, "}")),
        RegexPattern::new("^:", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        RegexPattern::new("^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        RegexPattern::new("^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        // `=>` must be tried before `=`
        RegexPattern::new("^=>", MK_DEFAULT_HANDLER!(TokenKind::Arrow, "=>")),
        RegexPattern::new("^=", MK_DEFAULT_HANDLER!(TokenKind::Assign, "=")),
    ];
}

/// Cursor over the source text and the tokens produced so far.
pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = Rc::new(file.unwrap_or_else(|| String::from("shell")));

        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        trace!("scanned {}", token);
        self.tokens.push(token);
    }

    /// The character under the cursor, `None` once the input is consumed.
    pub(crate) fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub(crate) fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub(crate) fn position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    /// Span covering the next `len` bytes from the cursor.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: self.position(),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }
}

fn number_handler(lexer: &mut Lexer, len: usize) {
    let digits = lexer.remainder()[..len].to_string();

    let span = lexer.span_of(len);
    lexer.push(MK_TOKEN!(TokenKind::Integer, digits, span));
    lexer.advance_n(len);
}

fn skip_handler(lexer: &mut Lexer, len: usize) {
    lexer.advance_n(len);
}

fn symbol_handler(lexer: &mut Lexer, len: usize) {
    let value = lexer.remainder()[..len].to_string();
    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);

    let span = lexer.span_of(len);
    lexer.push(MK_TOKEN!(kind, value, span));
    lexer.advance_n(len);
}

/// Converts source text into its token sequence.
///
/// Whitespace never produces tokens and no end-of-input token is appended, so
/// blank input yields an empty vector. The first character no pattern accepts
/// fails the whole scan with `UnknownCharacter`.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, ScanError> {
    let start = Instant::now();
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let matched = PATTERNS.iter().find_map(|pattern| {
            pattern
                .regex
                .find(lex.remainder())
                .map(|found| (pattern.handler, found.end()))
        });

        match matched {
            Some((handler, len)) => handler(&mut lex, len),
            None => {
                let character = lex.at().unwrap_or('\0');
                return Err(ScanError::new(
                    ScanErrorKind::UnknownCharacter { character },
                    lex.position(),
                ));
            }
        }
    }

    debug!("tokenized {} tokens in {:?}", lex.tokens.len(), start.elapsed());
    Ok(lex.tokens)
}
