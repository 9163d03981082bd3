//! Pass 3 (§4.4): resolve each list grammar's element type and separator.
//! Shorthand lists (`list Args Expr COMMA`) may depend on other
//! not-yet-resolved lists, so unresolved entries go on a FIFO retry queue
//! with stagnation-based cycle detection.

use std::collections::VecDeque;

use crate::description::{Decl, ListBody, Source};
use crate::error::{CompileError, Result};
use crate::model::{LanguageModel, TypedPart};

struct Pending {
    key: String,
    ast_key: String,
    token_sep: String,
}

pub fn run(source: &Source, model: &mut LanguageModel) -> Result<()> {
    let mut queue: VecDeque<Pending> = VecDeque::new();

    for decl in &source.decls {
        if let Decl::List { type_decl, body } = decl {
            let key = type_decl.key().to_string();
            match body {
                ListBody::Shorthand { ast_key, token_sep } => {
                    queue.push_back(Pending { key, ast_key: ast_key.clone(), token_sep: token_sep.clone() });
                }
                ListBody::Expanded(_) => {
                    model.ensure_class(&type_decl.identifier);
                    let ast_class = type_decl.identifier.clone();
                    let list_grammar = model.ensure_list_grammar(&key);
                    list_grammar.element_type = Some(TypedPart::Ast {
                        identifier: ast_class.clone(),
                        alias: None,
                        ast_class,
                    });
                    // Expanded lists carry their separator per alternative
                    // (Pass 4 reads `ListDef.sep_before`/`sep_after`
                    // directly); the grammar-level separator stays unset.
                }
            }
        }
    }

    let mut stagnant = 0usize;
    loop {
        if queue.is_empty() {
            break;
        }
        let round_size = queue.len();
        let mut next_round = VecDeque::new();
        while let Some(item) = queue.pop_front() {
            if try_resolve(model, &item)? {
                // resolved this round, drop from the queue
            } else {
                next_round.push_back(item);
            }
        }
        log::trace!("list resolution: {} pending, {} resolved this round", next_round.len(), round_size - next_round.len());
        if next_round.len() == round_size {
            stagnant += 1;
        } else {
            stagnant = 0;
        }
        if stagnant >= round_size {
            let pending: Vec<String> = next_round.iter().map(|p| p.key.clone()).collect();
            return Err(CompileError::ListCycle { pending });
        }
        queue = next_round;
    }
    Ok(())
}

/// Returns `Ok(true)` if the list grammar named by `item.key` was resolved
/// this attempt, `Ok(false)` if it should be retried later.
fn try_resolve(model: &mut LanguageModel, item: &Pending) -> Result<bool> {
    let first = model.resolve(&item.ast_key);
    let second = model.resolve(&item.token_sep);
    let first_is_token = matches!(first, Some(TypedPart::Token { .. }));
    let second_is_token = matches!(second, Some(TypedPart::Token { .. }));

    if first_is_token && second_is_token {
        return Err(CompileError::ListShape { key: item.key.clone() });
    }

    // Token before means separator between, token after means separator
    // after each. `list Args Expr COMMA` has the token second, so it's a
    // trailing separator: sepBetween=false.
    if first_is_token {
        return match second {
            Some(elem) => {
                finish(model, &item.key, elem, first.expect("checked is_token"), true);
                Ok(true)
            }
            None => Ok(false),
        };
    }

    if second_is_token {
        return match first {
            Some(elem) => {
                finish(model, &item.key, elem, second.expect("checked is_token"), false);
                Ok(true)
            }
            None => Ok(false),
        };
    }

    match (first, second) {
        (None, _) | (_, None) => Ok(false),
        _ => Err(CompileError::ListShape { key: item.key.clone() }),
    }
}

fn finish(model: &mut LanguageModel, key: &str, element_type: TypedPart, separator: TypedPart, sep_between: bool) {
    let list_grammar = model.ensure_list_grammar(key);
    list_grammar.element_type = Some(element_type);
    list_grammar.separator = Some(separator);
    list_grammar.sep_between = sep_between;
}
