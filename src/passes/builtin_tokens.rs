//! Pass 2 (§4.3): resolve every `AstPart`/list-separator reference that
//! wasn't registered in Pass 1 against the built-in token table, or fail.

use crate::description::{Decl, ListBody, Source};
use crate::error::{CompileError, Result};
use crate::model::language_model::TokenData;
use crate::model::typed_part::builtin_token;
use crate::model::LanguageModel;

pub fn run(source: &Source, model: &mut LanguageModel) -> Result<()> {
    for identifier in referenced_identifiers(source) {
        ensure_resolvable(model, &identifier)?;
    }
    Ok(())
}

fn ensure_resolvable(model: &mut LanguageModel, identifier: &str) -> Result<()> {
    if model.is_known(identifier) {
        return Ok(());
    }
    match builtin_token(identifier) {
        Some((prim_type, regex)) => {
            model.token_data.insert(
                identifier.to_string(),
                TokenData { identifier: identifier.to_string(), prim_type, regex: regex.to_string() },
            );
            model.note_prim_type_in_use(prim_type);
            Ok(())
        }
        None => Err(CompileError::UnresolvedReference { identifier: identifier.to_string() }),
    }
}

fn referenced_identifiers(source: &Source) -> Vec<String> {
    let mut out = Vec::new();
    for decl in &source.decls {
        match decl {
            Decl::Ast { defs, .. } => {
                for def in defs {
                    for part in &def.parts {
                        out.push(part.identifier.clone());
                    }
                }
            }
            Decl::List { body, .. } => match body {
                ListBody::Shorthand { ast_key, token_sep } => {
                    out.push(ast_key.clone());
                    out.push(token_sep.clone());
                }
                ListBody::Expanded(list_defs) => {
                    for ld in list_defs {
                        if let Some(sep) = &ld.sep_before {
                            out.push(sep.clone());
                        }
                        if let Some(sep) = &ld.sep_after {
                            out.push(sep.clone());
                        }
                        for part in &ld.inner.parts {
                            out.push(part.identifier.clone());
                        }
                    }
                }
            },
            _ => {}
        }
    }
    out
}
