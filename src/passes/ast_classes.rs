//! Pass 6 (§4.7): synthesize the AST class hierarchy from the built grammar
//! rules — subclass relations, unified members, deduplicated constructors.

use crate::error::{CompileError, Result};
use crate::model::ast_class::AstClassConstructor;
use crate::model::{Action, LanguageModel, TypedPart};

pub fn run(model: &mut LanguageModel) -> Result<()> {
    let keys: Vec<String> = model.ast_grammars.keys().map(String::from).collect();
    for key in keys {
        let ast_grammar = model.ast_grammars.get(&key).expect("just listed");
        let base_class = ast_grammar.ast_class.clone();
        let rules = ast_grammar.rules.clone();
        for rule in rules {
            match rule.action {
                Action::Ref { part, .. } => match &part {
                    TypedPart::Ast { ast_class, .. } => {
                        model.ensure_sub_relation(&base_class, ast_class)?;
                    }
                    other => {
                        return Err(CompileError::UnsupportedAction {
                            description: format!("reference to non-ast part {other:?}"),
                        })
                    }
                },
                Action::AstConstruction { ast_class, args, fingerprint } => {
                    model.ensure_sub_relation(&base_class, &ast_class)?;
                    let class = model.ensure_class(&ast_class);
                    for arg in &args {
                        let member_key = arg.part.member_key();
                        if let Some(existing) = class.ensure_member(&member_key, arg.part.clone()) {
                            if existing != &arg.part {
                                return Err(CompileError::TypeConflict {
                                    class: ast_class.clone(),
                                    member: member_key,
                                });
                            }
                        }
                    }
                    if class.constructor_with_fingerprint(&fingerprint).is_none() {
                        class.constructors.push(AstClassConstructor { args, fingerprint });
                    }
                }
                other => {
                    return Err(CompileError::UnsupportedAction { description: format!("{other:?}") })
                }
            }
        }
    }
    Ok(())
}
