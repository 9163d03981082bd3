//! `langforge`: reads a declarative description of a target language and
//! emits a lexer spec, shift-reduce grammar spec, typed AST class
//! hierarchy, base visitor, and source-reconstruction printer for it.
//!
//! ## Pipeline
//!
//! - [`description`] — Step 1: lex and parse `<langKey>.lang` into the
//!   Description Model.
//! - [`passes`] — Steps 2–8: the seven semantic-analysis passes that build
//!   the fully cross-linked [`model::LanguageModel`].
//! - [`emit`] — Step 9: project the completed model into the five
//!   generated artifacts and invoke the external lexer/grammar generators.

pub mod description;
pub mod emit;
pub mod error;
pub mod model;
pub mod passes;

use std::path::Path;

pub use error::{CompileError, Result};
pub use model::LanguageModel;

/// Reads `<folder>/<lang_key>.lang` and runs the full analysis pipeline,
/// returning the completed language model without emitting anything. Useful
/// on its own for the `dump` CLI subcommand and for tests.
pub fn compile(folder: &Path, lang_key: &str) -> Result<LanguageModel> {
    let text = read_source(folder, lang_key)?;
    let source = description::parser::read(&text)?;
    passes::run_all(&source)
}

fn read_source(folder: &Path, lang_key: &str) -> Result<String> {
    let path = folder.join(format!("{lang_key}.lang"));
    std::fs::read_to_string(&path).map_err(|e| CompileError::Io { path, source: e })
}

/// Runs the full pipeline and emits all five artifacts under
/// `<folder>/gen/`, invoking the external generators unless
/// `options.skip_external` is set.
pub fn compile_and_emit(folder: &Path, lang_key: &str, options: &emit::EmitOptions) -> Result<emit::EmitResult> {
    let model = compile(folder, lang_key)?;
    emit::emit(folder, lang_key, &model, options)
}
