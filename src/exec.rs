//! Exec template expansion
//!
//! Turns a descriptor's launch template plus a list of target files into a
//! structured argv. The output is never handed to a shell, so paths with
//! spaces, quotes or metacharacters pass through as opaque elements.

use std::path::{Path, PathBuf};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_encode};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template requires a target file but none was given")]
    MissingTarget,
}

/// Placeholder kinds recognized in exec templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    /// `%f`: first file as a local path
    Path,
    /// `%F`: every file as its own local-path argument
    Paths,
    /// `%u`: first file as a file:// URI
    Uri,
    /// `%U`: every file as its own file:// URI argument
    Uris,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Placeholder(Placeholder),
}

/// Tokenize a template into literal runs and placeholders.
///
/// `%%` contributes a literal `%` to the surrounding run; any other `%X`
/// (and a trailing `%`) is deleted outright, never passed through.
fn tokenize(template: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }
        match chars.next() {
            Some('%') => literal.push('%'),
            Some(kind @ ('f' | 'F' | 'u' | 'U')) => {
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(Token::Placeholder(match kind {
                    'f' => Placeholder::Path,
                    'F' => Placeholder::Paths,
                    'u' => Placeholder::Uri,
                    _ => Placeholder::Uris,
                }));
            }
            // Unrecognized placeholder or trailing %: both characters dropped
            Some(_) | None => {}
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

// Unreserved characters and the path separator stay verbatim, every other
// byte (spaces, shell metacharacters, non-ASCII) is %XX-escaped.
const URI_PATH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encode a local path as a file:// URI
pub fn file_uri(path: &Path) -> String {
    let encoded = percent_encode(path.as_os_str().as_encoded_bytes(), URI_PATH);
    format!("file://{}", encoded)
}

/// Expand an exec template against a list of target files.
///
/// Returns the argv, program in element 0. Fails only when a singular
/// placeholder (`%f`, `%u`) is present and `files` is empty; plural
/// placeholders expand to nothing in that case.
pub fn expand(template: &str, files: &[PathBuf]) -> Result<Vec<String>, TemplateError> {
    let mut argv = Vec::new();
    // Current word under construction; Some("") is a started-but-empty word.
    let mut word: Option<String> = None;

    let flush = |word: &mut Option<String>, argv: &mut Vec<String>| {
        if let Some(w) = word.take() {
            argv.push(w);
        }
    };

    for token in tokenize(template) {
        match token {
            Token::Literal(text) => {
                for c in text.chars() {
                    if c.is_ascii_whitespace() {
                        flush(&mut word, &mut argv);
                    } else {
                        word.get_or_insert_with(String::new).push(c);
                    }
                }
            }
            Token::Placeholder(kind) => match kind {
                Placeholder::Path | Placeholder::Uri => {
                    let first = files.first().ok_or(TemplateError::MissingTarget)?;
                    let value = match kind {
                        Placeholder::Path => first.to_string_lossy().into_owned(),
                        _ => file_uri(first),
                    };
                    word.get_or_insert_with(String::new).push_str(&value);
                }
                Placeholder::Paths | Placeholder::Uris => {
                    flush(&mut word, &mut argv);
                    for file in files {
                        argv.push(match kind {
                            Placeholder::Paths => file.to_string_lossy().into_owned(),
                            _ => file_uri(file),
                        });
                    }
                }
            },
        }
    }

    flush(&mut word, &mut argv);
    Ok(argv)
}
