//! Pass 4 (§4.5): build `AstRuleDef`/`ListRuleDef` records for every AST and
//! expanded-list alternative, each carrying a fingerprint.

use crate::description::{AstDef, Decl, ListBody, Source};
use crate::error::{CompileError, Result};
use crate::model::rule_def::{fingerprint, AstRuleDef, ListRuleDef, RuleDef, RuleTarget};
use crate::model::LanguageModel;

pub fn run(source: &Source, model: &mut LanguageModel) -> Result<()> {
    for decl in &source.decls {
        match decl {
            Decl::Ast { type_decl, defs } => {
                let base_class = type_decl.identifier.clone();
                let key = type_decl.key().to_string();
                let mut rule_defs = Vec::with_capacity(defs.len());
                for def in defs {
                    rule_defs.push(RuleDef::Ast(build_ast_rule_def(model, &base_class, def)?));
                }
                model.ensure_ast_grammar(&key).rule_defs = rule_defs;
            }
            Decl::List { type_decl, body: ListBody::Expanded(list_defs) } => {
                let base_class = type_decl.identifier.clone();
                let key = type_decl.key().to_string();
                let mut rule_defs = Vec::with_capacity(list_defs.len());
                for ld in list_defs {
                    let inner = build_ast_rule_def(model, &base_class, &ld.inner)?;
                    rule_defs.push(RuleDef::List(ListRuleDef {
                        inner,
                        sep_before: ld.sep_before.clone(),
                        sep_after: ld.sep_after.clone(),
                    }));
                }
                model.ensure_list_grammar(&key).rule_defs = rule_defs;
            }
            _ => {}
        }
    }
    Ok(())
}

fn build_ast_rule_def(model: &LanguageModel, base_class: &str, def: &AstDef) -> Result<AstRuleDef> {
    let target = match &def.identifier {
        Some(name) if model.ast_grammars.contains(name) => {
            let referenced = model.ast_grammars.get(name).expect("just checked contains");
            RuleTarget::Reference(crate::model::TypedPart::Ast {
                identifier: name.clone(),
                alias: None,
                ast_class: referenced.ast_class.clone(),
            })
        }
        Some(name) => RuleTarget::Construct(name.clone()),
        None => RuleTarget::Construct(base_class.to_string()),
    };

    let mut raw_tokens = Vec::with_capacity(def.parts.len());
    let mut parts = Vec::with_capacity(def.parts.len());
    for part in &def.parts {
        raw_tokens.push(part.identifier.clone());
        let resolved = model
            .resolve(&part.identifier)
            .ok_or_else(|| CompileError::UnresolvedReference { identifier: part.identifier.clone() })?
            .with_alias(part.alias.clone());
        parts.push(resolved);
    }

    let fp = fingerprint(&raw_tokens);
    Ok(AstRuleDef { base_class: base_class.to_string(), target, raw_tokens, parts, fingerprint: fp })
}
