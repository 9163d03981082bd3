//! The emitter (§4.9): walks the completed language model once and writes
//! the five generated artifacts under `<folder>/gen/`, then optionally
//! invokes the external lexer/grammar generators on them.

pub mod class_header;
pub mod external;
pub mod grammar_spec;
pub mod lexer_spec;
pub mod printer;
pub mod visitor;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CompileError, Result};
use crate::model::LanguageModel;

pub struct EmitOptions {
    pub skip_external: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions { skip_external: false }
    }
}

pub struct EmitResult {
    pub gen_dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Emits all five artifacts for `lang_key` under `<folder>/gen/`. Matches
/// the exit-code contract of §6: any filesystem or generator failure comes
/// back as a single `CompileError`, never a panic.
pub fn emit(folder: &Path, lang_key: &str, model: &LanguageModel, options: &EmitOptions) -> Result<EmitResult> {
    let gen_dir = folder.join("gen");
    fs::create_dir_all(&gen_dir).map_err(|e| CompileError::Io { path: gen_dir.clone(), source: e })?;

    let mut files = Vec::new();
    files.push(write_file(&gen_dir, &format!("{lang_key}.l"), &lexer_spec::generate(model))?);
    files.push(write_file(&gen_dir, &format!("{lang_key}.y"), &grammar_spec::generate(lang_key, model))?);
    files.push(write_file(&gen_dir, &format!("{lang_key}.hpp"), &class_header::generate(lang_key, model))?);
    files.push(write_file(&gen_dir, &format!("{lang_key}Visitor.hpp"), &visitor::generate(lang_key, model))?);
    files.push(write_file(&gen_dir, &format!("{lang_key}ToSource.hpp"), &printer::generate(lang_key, model)?)?);

    if !options.skip_external {
        external::run_generators(&gen_dir, lang_key)?;
    }

    log::debug!("emitted {} files under {}", files.len(), gen_dir.display());
    Ok(EmitResult { gen_dir, files })
}

fn write_file(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents).map_err(|e| CompileError::Io { path: path.clone(), source: e })?;
    Ok(path)
}

/// A literal token's regex "cleaned" of the backslash-escapes a built-in or
/// punctuation token carries (`\(` -> `(`), for printing it back as source
/// text rather than matching it.
pub fn clean_literal(regex: &str) -> String {
    regex.replace('\\', "")
}

/// The grammar symbol an identifier resolves to when written into a
/// production's right-hand side: `<IDENT>_T` for a registered token,
/// otherwise the grammar key unchanged (a nonterminal).
pub fn grammar_symbol(model: &LanguageModel, identifier: &str) -> String {
    if model.token_data.contains(identifier) {
        format!("{}_T", identifier.to_uppercase())
    } else {
        identifier.to_string()
    }
}
