use std::{fs::read_to_string, path::PathBuf, process::ExitCode};

use clap::Parser;
use constlang::{
    errors::errors::CompileError, lexer::lexer::tokenize, parser::parser::validate_syntax,
    render_error, semantic::semantic::validate_semantics,
};
use log::{error, info};

const SAMPLE_PROGRAM: &str = "const a = (1uno:integer, dos:integer) => { return un + dos; }";

/// Scans a program and runs the syntax and semantic checks over it
#[derive(Parser, Debug)]
#[command(name = "constlang")]
#[command(version = "0.1.0")]
#[command(about = "Checks programs written in the const/arrow-function language")]
struct Cli {
    /// Source file to check
    #[arg(value_name = "FILE", conflicts_with = "source")]
    input: Option<PathBuf>,

    /// Source text to check instead of a file
    #[arg(short, long, value_name = "TEXT")]
    source: Option<String>,

    /// Do not print the token listing
    #[arg(long)]
    hide_tokens: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let (source, file_name) = match (&cli.input, &cli.source) {
        (Some(path), _) => match read_to_string(path) {
            Ok(contents) => (contents, path.to_string_lossy().into_owned()),
            Err(err) => {
                eprintln!("Failed to read {}: {}", path.display(), err);
                return ExitCode::FAILURE;
            }
        },
        (None, Some(source)) => (source.clone(), String::from("<source>")),
        (None, None) => {
            info!("no input given, checking the built-in sample program");
            (String::from(SAMPLE_PROGRAM), String::from("<sample>"))
        }
    };

    match check(&source, file_name, !cli.hide_tokens) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{} failed: {}", err.stage(), err);
            eprintln!("{} error: {}", err.stage(), err);
            eprint!("{}", render_error(&err, &source));
            ExitCode::FAILURE
        }
    }
}

fn check(source: &str, file_name: String, print_tokens: bool) -> Result<(), CompileError> {
    let tokens = tokenize(source.to_string(), Some(file_name))?;

    if print_tokens {
        println!("Tokens:");
        for token in &tokens {
            println!("{}", token);
        }
    }

    validate_syntax(&tokens)?;
    println!("Syntax analysis passed.");

    validate_semantics(&tokens)?;
    println!("Semantic analysis passed.");

    Ok(())
}
