//! Crate-wide error type.
//!
//! Every fatal condition in the pipeline — from reading the `.lang` source
//! through emitting the generated artifacts — collapses into a single
//! [`CompileError`] variant. There is no recovery path: the CLI prints the
//! `Display` of whatever error escapes `run` and exits 1.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum CompileError {
    /// An identifier did not resolve to a token, enum, ast, or list grammar,
    /// and was not a built-in.
    UnresolvedReference { identifier: String },
    /// A shorthand list declaration didn't have exactly one token side.
    ListShape { key: String },
    /// The list element-type retry queue stagnated.
    ListCycle { pending: Vec<String> },
    /// A class member was referenced with two different typed parts.
    TypeConflict { class: String, member: String },
    /// A subclass already extends a different base.
    ReparentConflict { class: String, existing: String, attempted: String },
    /// Pass 6 encountered a rule action it can't turn into a class member.
    UnsupportedAction { description: String },
    /// Pass 7 found more than one alternative for the same (key, class).
    MultipleCases { key: String, class: String },
    /// Filesystem failure reading input or writing output.
    Io { path: PathBuf, source: std::io::Error },
    /// The `.lang` source failed to lex or parse.
    Reader { line: usize, message: String },
    /// Invoking an external generator (lexer/grammar compiler) failed.
    ExternalTool { tool: String, message: String },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::UnresolvedReference { identifier } => {
                write!(f, "Key not found: {identifier}")
            }
            CompileError::ListShape { key } => {
                write!(f, "List requires a token and a type reference: {key}")
            }
            CompileError::ListCycle { pending } => {
                write!(f, "Loop detected in lists: {}", pending.join(", "))
            }
            CompileError::TypeConflict { class, member } => {
                write!(f, "Member has different type: {class}.{member}")
            }
            CompileError::ReparentConflict { class, existing, attempted } => {
                write!(
                    f,
                    "Todo, handle different base: {class} already extends {existing}, attempted {attempted}"
                )
            }
            CompileError::UnsupportedAction { description } => {
                write!(f, "Can only handle ref and ast construction actions: {description}")
            }
            CompileError::MultipleCases { key, class } => {
                write!(f, "Multiple ast cases not implemented: {key} -> {class}")
            }
            CompileError::Io { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
            CompileError::Reader { line, message } => {
                write!(f, "Parse error at line {line}: {message}")
            }
            CompileError::ExternalTool { tool, message } => {
                write!(f, "{tool} failed: {message}")
            }
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;
